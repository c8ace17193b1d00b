//! Authorization of workflow operations against the access policy.

use crate::domain::foundation::{
    AuthorizationContext, AuthorizationResult, CommandMetadata, DomainError, Permission, Role,
};
use crate::domain::production::ProductionPhaseRecord;
use crate::ports::AccessPolicy;

/// Checks that the caller holds `permission` for `record`.
///
/// Sector supervision of a record without a sector falls back to the
/// production supervisor role. Policy errors deny.
pub(crate) async fn authorize(
    policy: &dyn AccessPolicy,
    metadata: &CommandMetadata,
    action: &'static str,
    permission: Permission,
    record: &ProductionPhaseRecord,
) -> Result<(), DomainError> {
    let ctx = AuthorizationContext::new(
        metadata.user_id.clone(),
        action,
        record.id().to_string(),
        record.sector_id(),
    );

    let (answer, denial) = match (permission, record.sector_id()) {
        (Permission::SectorSupervisor, Some(sector)) => (
            policy.is_supervisor_of_sector(&ctx.user_id, &sector).await,
            "User does not supervise the sector owning this phase",
        ),
        (Permission::SectorSupervisor, None) => (
            policy
                .has_role(&ctx.user_id, Role::SupervisorProduccion)
                .await,
            "Phase has no sector; a production supervisor is required",
        ),
        (Permission::Role(role), _) => (
            policy.has_role(&ctx.user_id, role).await,
            "User lacks the role required for this action",
        ),
    };

    let result: AuthorizationResult = match answer {
        Ok(true) => ctx.grant(),
        Ok(false) => ctx.deny(denial),
        Err(err) => {
            tracing::warn!(error = %err, action, "access policy failed; denying");
            ctx.deny("Access policy unavailable")
        }
    };

    if !result.is_granted() {
        tracing::warn!(
            user_id = %result.user_id,
            action = result.action,
            resource_id = %result.resource_id,
            "authorization denied"
        );
    }
    result.into_result()
}
