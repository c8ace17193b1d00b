//! In-Memory Work Week Repository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::calendar::WorkWeekCalendar;
use crate::domain::foundation::DomainError;
use crate::ports::WorkWeekRepository;

/// Holds at most one active calendar.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkWeekRepository {
    active: Arc<RwLock<Option<WorkWeekCalendar>>>,
}

impl InMemoryWorkWeekRepository {
    /// Starts empty, like a fresh installation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `calendar` already active.
    pub fn with_active(calendar: WorkWeekCalendar) -> Self {
        Self {
            active: Arc::new(RwLock::new(Some(calendar))),
        }
    }
}

#[async_trait]
impl WorkWeekRepository for InMemoryWorkWeekRepository {
    async fn load_active(&self) -> Result<Option<WorkWeekCalendar>, DomainError> {
        Ok(self.active.read().await.clone())
    }

    async fn save_active(&self, calendar: &WorkWeekCalendar) -> Result<(), DomainError> {
        *self.active.write().await = Some(calendar.clone());
        Ok(())
    }
}
