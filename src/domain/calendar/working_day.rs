//! Opening hours for one weekday.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Opening hours of one weekday. Closing is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDay {
    pub day_of_week: Weekday,
    pub is_working_day: bool,
    pub opening_hour: NaiveTime,
    pub closing_hour: NaiveTime,
}

impl WorkingDay {
    /// A working day open from `opening_hour` until `closing_hour`.
    pub fn open(
        day_of_week: Weekday,
        opening_hour: NaiveTime,
        closing_hour: NaiveTime,
    ) -> Result<Self, ValidationError> {
        let day = Self {
            day_of_week,
            is_working_day: true,
            opening_hour,
            closing_hour,
        };
        day.validate()?;
        Ok(day)
    }

    /// A day on which nothing is worked.
    pub fn closed(day_of_week: Weekday) -> Self {
        Self {
            day_of_week,
            is_working_day: false,
            opening_hour: NaiveTime::MIN,
            closing_hour: NaiveTime::MIN,
        }
    }

    /// Working days must open before they close.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_working_day && self.opening_hour >= self.closing_hour {
            return Err(ValidationError::invalid_format(
                "closing_hour",
                format!(
                    "{} closes at {} which is not after opening at {}",
                    self.day_of_week, self.closing_hour, self.opening_hour
                ),
            ));
        }
        Ok(())
    }

    /// Hours between opening and closing; 0 on a non-working day.
    pub fn span_hours(&self) -> f64 {
        if !self.is_working_day {
            return 0.0;
        }
        hours_between(self.opening_hour, self.closing_hour)
    }

    /// True if `time` falls inside opening hours.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        self.is_working_day && time >= self.opening_hour && time < self.closing_hour
    }
}

pub(super) fn hours_between(from: NaiveTime, to: NaiveTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}
