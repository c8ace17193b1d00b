//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' cannot be negative, got {actual}")]
    NegativeQuantity { field: String, actual: f64 },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Calendar has no entry for {weekday}")]
    MissingCalendarEntry { weekday: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a negative quantity validation error.
    pub fn negative_quantity(field: impl Into<String>, actual: f64) -> Self {
        ValidationError::NegativeQuantity {
            field: field.into(),
            actual,
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing calendar entry error.
    pub fn missing_calendar_entry(weekday: impl fmt::Display) -> Self {
        ValidationError::MissingCalendarEntry {
            weekday: weekday.to_string(),
        }
    }

    fn field_name(&self) -> String {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::NegativeQuantity { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
            ValidationError::MissingCalendarEntry { .. } => "working_days".to_string(),
        }
    }
}

/// Broad error families callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    ChainMismatch,
    InvalidTransition,
    Authorization,
    NotFound,
    Configuration,
    Conflict,
    Infrastructure,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    NegativeQuantity,
    OutOfRange,
    InvalidFormat,
    MissingCalendarEntry,
    MissingMeasurements,
    AlreadyExists,

    // Chain consistency
    ChainMismatch,

    // State errors
    InvalidStateTransition,
    BatchClosed,
    PreviousPhaseIncomplete,

    // Authorization errors
    Forbidden,

    // Not found errors
    BatchNotFound,
    PhaseNotFound,
    ProductNotFound,

    // Configuration errors
    NoWorkingDays,

    // Concurrency
    ConcurrentModification,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Returns the family this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        use ErrorCode::*;
        match self {
            ValidationFailed | EmptyField | NegativeQuantity | OutOfRange | InvalidFormat
            | MissingCalendarEntry | MissingMeasurements | AlreadyExists => {
                ErrorCategory::Validation
            }
            ChainMismatch => ErrorCategory::ChainMismatch,
            InvalidStateTransition | BatchClosed | PreviousPhaseIncomplete => {
                ErrorCategory::InvalidTransition
            }
            Forbidden => ErrorCategory::Authorization,
            BatchNotFound | PhaseNotFound | ProductNotFound => ErrorCategory::NotFound,
            NoWorkingDays => ErrorCategory::Configuration,
            ConcurrentModification => ErrorCategory::Conflict,
            DatabaseError | InternalError => ErrorCategory::Infrastructure,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::NegativeQuantity => "NEGATIVE_QUANTITY",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::MissingCalendarEntry => "MISSING_CALENDAR_ENTRY",
            ErrorCode::MissingMeasurements => "MISSING_MEASUREMENTS",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::ChainMismatch => "CHAIN_MISMATCH",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::BatchClosed => "BATCH_CLOSED",
            ErrorCode::PreviousPhaseIncomplete => "PREVIOUS_PHASE_INCOMPLETE",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::BatchNotFound => "BATCH_NOT_FOUND",
            ErrorCode::PhaseNotFound => "PHASE_NOT_FOUND",
            ErrorCode::ProductNotFound => "PRODUCT_NOT_FOUND",
            ErrorCode::NoWorkingDays => "NO_WORKING_DAYS",
            ErrorCode::ConcurrentModification => "CONCURRENT_MODIFICATION",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates an optimistic concurrency conflict.
    pub fn conflict(expected_version: u64, actual_version: u64) -> Self {
        Self::new(
            ErrorCode::ConcurrentModification,
            "Batch was modified concurrently",
        )
        .with_detail("expected_version", expected_version.to_string())
        .with_detail("actual_version", actual_version.to_string())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the family of this error.
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// True when re-reading and re-submitting the whole operation may succeed.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Conflict
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::NegativeQuantity { .. } => ErrorCode::NegativeQuantity,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::MissingCalendarEntry { .. } => ErrorCode::MissingCalendarEntry,
        };
        let field = err.field_name();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("user_id");
        assert_eq!(format!("{}", err), "Field 'user_id' cannot be empty");
    }

    #[test]
    fn validation_error_negative_quantity_displays_correctly() {
        let err = ValidationError::negative_quantity("input", -3.5);
        assert_eq!(format!("{}", err), "Field 'input' cannot be negative, got -3.5");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("order", 1, 9, 12);
        assert_eq!(
            format!("{}", err),
            "Field 'order' must be between 1 and 9, got 12"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::BatchNotFound, "Batch not found");
        assert_eq!(format!("{}", err), "[BATCH_NOT_FOUND] Batch not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ChainMismatch, "Mismatch")
            .with_detail("phase", "COCCION")
            .with_detail("next_phase", "FERMENTACION");

        assert_eq!(err.details.get("phase"), Some(&"COCCION".to_string()));
        assert_eq!(err.details.get("next_phase"), Some(&"FERMENTACION".to_string()));
    }

    #[test]
    fn validation_error_converts_with_matching_code() {
        let err: DomainError = ValidationError::negative_quantity("output", -1.0).into();
        assert_eq!(err.code, ErrorCode::NegativeQuantity);
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.details.get("field"), Some(&"output".to_string()));
    }

    #[test]
    fn missing_calendar_entry_is_a_validation_error() {
        let err: DomainError = ValidationError::missing_calendar_entry("Sun").into();
        assert_eq!(err.code, ErrorCode::MissingCalendarEntry);
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn every_error_kind_has_a_code() {
        assert_eq!(ErrorCode::ChainMismatch.category(), ErrorCategory::ChainMismatch);
        assert_eq!(
            ErrorCode::InvalidStateTransition.category(),
            ErrorCategory::InvalidTransition
        );
        assert_eq!(ErrorCode::Forbidden.category(), ErrorCategory::Authorization);
        assert_eq!(ErrorCode::PhaseNotFound.category(), ErrorCategory::NotFound);
        assert_eq!(ErrorCode::NoWorkingDays.category(), ErrorCategory::Configuration);
        assert_eq!(
            ErrorCode::ConcurrentModification.category(),
            ErrorCategory::Conflict
        );
    }

    #[test]
    fn only_conflicts_are_retryable() {
        assert!(DomainError::conflict(3, 4).is_retryable());
        assert!(!DomainError::new(ErrorCode::AlreadyExists, "x").is_retryable());
        assert!(!DomainError::new(ErrorCode::ChainMismatch, "x").is_retryable());
        assert!(!DomainError::new(ErrorCode::DatabaseError, "x").is_retryable());
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::ChainMismatch), "CHAIN_MISMATCH");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
