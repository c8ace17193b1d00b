//! Work week repository port.
//!
//! The plant has a single active calendar. This port only loads and stores
//! it; creating it on first access is the job of
//! `application::ActiveWorkWeek`.

use async_trait::async_trait;

use crate::domain::calendar::WorkWeekCalendar;
use crate::domain::foundation::DomainError;

/// Stores the active work week.
#[async_trait]
pub trait WorkWeekRepository: Send + Sync {
    /// Load the active calendar, or `None` if none was ever stored.
    async fn load_active(&self) -> Result<Option<WorkWeekCalendar>, DomainError>;

    /// Store `calendar` as the active calendar.
    async fn save_active(&self, calendar: &WorkWeekCalendar) -> Result<(), DomainError>;
}
