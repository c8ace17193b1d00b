//! ActiveWorkWeek - the plant's single active calendar.
//!
//! Loaded from the repository on first access; if none was ever stored, the
//! configured default is stored and used. Later reads come from memory until
//! `replace` swaps the calendar.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::calendar::WorkWeekCalendar;
use crate::domain::foundation::DomainError;
use crate::ports::WorkWeekRepository;

/// Load-or-create holder for the active work week.
pub struct ActiveWorkWeek {
    repository: Arc<dyn WorkWeekRepository>,
    default_calendar: WorkWeekCalendar,
    current: Mutex<Option<WorkWeekCalendar>>,
}

impl ActiveWorkWeek {
    /// `default_calendar` is stored the first time no active calendar exists.
    pub fn new(repository: Arc<dyn WorkWeekRepository>, default_calendar: WorkWeekCalendar) -> Self {
        Self {
            repository,
            default_calendar,
            current: Mutex::new(None),
        }
    }

    /// The active calendar, creating it on first access.
    pub async fn current(&self) -> Result<WorkWeekCalendar, DomainError> {
        let mut current = self.current.lock().await;
        if let Some(calendar) = current.as_ref() {
            return Ok(calendar.clone());
        }

        let calendar = match self.repository.load_active().await? {
            Some(calendar) => calendar,
            None => {
                self.repository.save_active(&self.default_calendar).await?;
                tracing::info!(
                    weekly_hours = self.default_calendar.weekly_working_hours(),
                    "created default work week"
                );
                self.default_calendar.clone()
            }
        };
        *current = Some(calendar.clone());
        Ok(calendar)
    }

    /// Stores `calendar` as the active calendar.
    pub async fn replace(&self, calendar: WorkWeekCalendar) -> Result<(), DomainError> {
        let mut current = self.current.lock().await;
        self.repository.save_active(&calendar).await?;
        if !calendar.has_working_days() {
            tracing::warn!("active work week has no working days; estimates will fail");
        }
        *current = Some(calendar);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use async_trait::async_trait;
    use chrono::{NaiveTime, Weekday};
    use std::sync::Mutex as StdMutex;

    struct MockWorkWeekRepository {
        stored: StdMutex<Option<WorkWeekCalendar>>,
        loads: StdMutex<usize>,
        fail_load: bool,
    }

    impl MockWorkWeekRepository {
        fn empty() -> Self {
            Self {
                stored: StdMutex::new(None),
                loads: StdMutex::new(0),
                fail_load: false,
            }
        }

        fn with(calendar: WorkWeekCalendar) -> Self {
            let repo = Self::empty();
            *repo.stored.lock().unwrap() = Some(calendar);
            repo
        }

        fn failing() -> Self {
            Self {
                fail_load: true,
                ..Self::empty()
            }
        }

        fn loads(&self) -> usize {
            *self.loads.lock().unwrap()
        }
    }

    #[async_trait]
    impl WorkWeekRepository for MockWorkWeekRepository {
        async fn load_active(&self) -> Result<Option<WorkWeekCalendar>, DomainError> {
            *self.loads.lock().unwrap() += 1;
            if self.fail_load {
                return Err(DomainError::new(ErrorCode::DatabaseError, "Simulated load failure"));
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save_active(&self, calendar: &WorkWeekCalendar) -> Result<(), DomainError> {
            *self.stored.lock().unwrap() = Some(calendar.clone());
            Ok(())
        }
    }

    fn weekdays() -> WorkWeekCalendar {
        WorkWeekCalendar::uniform(
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn creates_default_on_first_access() {
        let repo = Arc::new(MockWorkWeekRepository::empty());
        let active = ActiveWorkWeek::new(repo.clone(), WorkWeekCalendar::standard());

        assert_eq!(active.current().await.unwrap(), WorkWeekCalendar::standard());
        assert_eq!(
            repo.stored.lock().unwrap().clone(),
            Some(WorkWeekCalendar::standard())
        );
    }

    #[tokio::test]
    async fn prefers_stored_calendar_and_caches_it() {
        let repo = Arc::new(MockWorkWeekRepository::with(weekdays()));
        let active = ActiveWorkWeek::new(repo.clone(), WorkWeekCalendar::standard());

        assert_eq!(active.current().await.unwrap(), weekdays());
        assert_eq!(active.current().await.unwrap(), weekdays());
        assert_eq!(repo.loads(), 1);
    }

    #[tokio::test]
    async fn replace_swaps_and_persists() {
        let repo = Arc::new(MockWorkWeekRepository::empty());
        let active = ActiveWorkWeek::new(repo.clone(), WorkWeekCalendar::standard());
        active.current().await.unwrap();

        active.replace(weekdays()).await.unwrap();
        assert_eq!(active.current().await.unwrap(), weekdays());
        assert_eq!(repo.stored.lock().unwrap().clone(), Some(weekdays()));
    }

    #[tokio::test]
    async fn load_failure_propagates_and_is_retried() {
        let repo = Arc::new(MockWorkWeekRepository::failing());
        let active = ActiveWorkWeek::new(repo.clone(), WorkWeekCalendar::standard());

        assert!(active.current().await.is_err());
        assert!(active.current().await.is_err());
        assert_eq!(repo.loads(), 2);
    }
}
