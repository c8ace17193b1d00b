//! Access policy port for workflow authorization.
//!
//! Who supervises which sector, and who holds which role, lives outside this
//! crate. Handlers ask this port and turn the answer into an
//! `AuthorizationResult`.
//!
//! # Design
//!
//! Fail-secure: callers treat an error from the policy as a denial.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Role, SectorId, UserId};

/// Port answering authorization predicates.
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    /// True if `user_id` supervises `sector_id`.
    async fn is_supervisor_of_sector(
        &self,
        user_id: &UserId,
        sector_id: &SectorId,
    ) -> Result<bool, DomainError>;

    /// True if `user_id` holds `role`.
    async fn has_role(&self, user_id: &UserId, role: Role) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_policy_is_object_safe() {
        fn _accepts_dyn(_policy: &dyn AccessPolicy) {}
    }
}
