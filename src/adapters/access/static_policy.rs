//! Static access policy.
//!
//! Holds explicit grants built up front. Anything not granted is denied.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{DomainError, Role, SectorId, UserId};
use crate::ports::AccessPolicy;

/// Access policy backed by fixed grant tables.
#[derive(Debug, Clone, Default)]
pub struct StaticAccessPolicy {
    supervised: HashMap<UserId, HashSet<SectorId>>,
    roles: HashMap<UserId, HashSet<Role>>,
}

impl StaticAccessPolicy {
    /// A policy that denies everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `user_id` supervisor of `sector_id`.
    pub fn with_supervisor(mut self, user_id: UserId, sector_id: SectorId) -> Self {
        self.supervised.entry(user_id).or_default().insert(sector_id);
        self
    }

    /// Grants `role` to `user_id`.
    pub fn with_role(mut self, user_id: UserId, role: Role) -> Self {
        self.roles.entry(user_id).or_default().insert(role);
        self
    }
}

#[async_trait]
impl AccessPolicy for StaticAccessPolicy {
    async fn is_supervisor_of_sector(
        &self,
        user_id: &UserId,
        sector_id: &SectorId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .supervised
            .get(user_id)
            .is_some_and(|sectors| sectors.contains(sector_id)))
    }

    async fn has_role(&self, user_id: &UserId, role: Role) -> Result<bool, DomainError> {
        Ok(self
            .roles
            .get(user_id)
            .is_some_and(|roles| roles.contains(&role)))
    }
}
