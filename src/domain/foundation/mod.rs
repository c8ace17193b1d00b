//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the production domain.

mod authorization;
mod batch_status;
mod command;
mod errors;
mod ids;
mod phase_kind;
mod phase_status;
mod quantity;
mod state_machine;
mod timestamp;

pub use authorization::{AuthorizationContext, AuthorizationResult, Permission, Role};
pub use batch_status::BatchStatus;
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCategory, ErrorCode, ValidationError};
pub use ids::{BatchId, PhaseRecordId, ProductId, SectorId, UserId};
pub use phase_kind::PhaseKind;
pub use phase_status::PhaseStatus;
pub use quantity::{ensure_non_negative, same_quantity, UnitOfMeasure, QUANTITY_EPSILON};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
