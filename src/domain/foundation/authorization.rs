//! Authorization support types.
//!
//! The core never decides who a user is; it only states which permission a
//! transition needs (`Permission`) and turns the caller-supplied predicate
//! answer into a consistent result for logging and error mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, ErrorCode, SectorId, UserId};

/// Plant roles relevant to the phase workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Reviews finished phases and accepts, adjusts or rejects them.
    Calidad,
    /// Supervises production sectors.
    SupervisorProduccion,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Calidad => "CALIDAD",
            Role::SupervisorProduccion => "SUPERVISOR_PRODUCCION",
        };
        write!(f, "{}", s)
    }
}

/// What a caller must hold to perform an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Supervisor of the sector owning the phase record.
    SectorSupervisor,
    /// Any user holding the role.
    Role(Role),
}

/// Result of an authorization check.
///
/// Contains both the decision and context for logging/auditing.
#[derive(Debug, Clone)]
pub struct AuthorizationResult {
    /// Whether access was granted.
    pub granted: bool,

    /// The action being attempted (e.g. "submit_for_review").
    pub action: &'static str,

    /// The ID of the resource being accessed.
    pub resource_id: String,

    /// The user who requested access.
    pub user_id: String,

    /// Optional reason for denial (if denied).
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    /// Converts this result to a `Result<(), DomainError>`.
    ///
    /// Returns `Ok(())` if granted, `Err(Forbidden)` if denied.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                self.denial_reason
                    .unwrap_or_else(|| "Access denied".to_string()),
            )
            .with_detail("action", self.action)
            .with_detail("resource_id", self.resource_id)
            .with_detail("user_id", self.user_id))
        }
    }

    /// Returns true if access was granted.
    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

/// Context for authorization decisions.
///
/// Captures the "who, what, where" of a request so that grants and denials
/// are reported identically by every handler.
#[derive(Debug, Clone)]
pub struct AuthorizationContext {
    /// The user requesting access.
    pub user_id: UserId,

    /// The action being performed.
    pub action: &'static str,

    /// The ID of the phase record or batch.
    pub resource_id: String,

    /// Sector owning the resource, if assigned.
    pub sector_id: Option<SectorId>,
}

impl AuthorizationContext {
    /// Creates a new authorization context.
    pub fn new(
        user_id: UserId,
        action: &'static str,
        resource_id: impl Into<String>,
        sector_id: Option<SectorId>,
    ) -> Self {
        Self {
            user_id,
            action,
            resource_id: resource_id.into(),
            sector_id,
        }
    }

    /// Creates an `AuthorizationResult` for granted access.
    pub fn grant(&self) -> AuthorizationResult {
        AuthorizationResult {
            granted: true,
            action: self.action,
            resource_id: self.resource_id.clone(),
            user_id: self.user_id.to_string(),
            denial_reason: None,
        }
    }

    /// Creates an `AuthorizationResult` for denied access.
    pub fn deny(&self, reason: impl Into<String>) -> AuthorizationResult {
        AuthorizationResult {
            granted: false,
            action: self.action,
            resource_id: self.resource_id.clone(),
            user_id: self.user_id.to_string(),
            denial_reason: Some(reason.into()),
        }
    }
}
