//! Default work-week configuration
//!
//! Used only when no active calendar exists yet and one must be created on
//! first access.

use chrono::{NaiveTime, Weekday};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::calendar::WorkWeekCalendar;

/// Opening hours applied to every configured working day.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Opening time, `HH:MM`
    #[serde(default = "default_opening_time")]
    pub opening_time: String,

    /// Closing time, `HH:MM` (exclusive)
    #[serde(default = "default_closing_time")]
    pub closing_time: String,

    /// Comma-separated weekdays (`mon,tue,...`)
    #[serde(default = "default_working_days")]
    pub working_days: String,
}

impl ScheduleConfig {
    pub fn opening(&self) -> Result<NaiveTime, ValidationError> {
        parse_time("opening_time", &self.opening_time)
    }

    pub fn closing(&self) -> Result<NaiveTime, ValidationError> {
        parse_time("closing_time", &self.closing_time)
    }

    /// Parsed working weekdays, duplicates removed.
    pub fn weekdays(&self) -> Result<Vec<Weekday>, ValidationError> {
        let mut days = Vec::new();
        for raw in self.working_days.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let day: Weekday = raw
                .parse()
                .map_err(|_| ValidationError::UnknownWeekday(raw.to_string()))?;
            if !days.contains(&day) {
                days.push(day);
            }
        }
        Ok(days)
    }

    /// Validate schedule configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let opening = self.opening()?;
        let closing = self.closing()?;
        if opening >= closing {
            return Err(ValidationError::OpeningNotBeforeClosing {
                opening: self.opening_time.clone(),
                closing: self.closing_time.clone(),
            });
        }
        if self.weekdays()?.is_empty() {
            return Err(ValidationError::NoWorkingDays);
        }
        Ok(())
    }

    /// Builds the calendar to create when none is active.
    pub fn default_calendar(&self) -> Result<WorkWeekCalendar, ValidationError> {
        self.validate()?;
        WorkWeekCalendar::uniform(self.opening()?, self.closing()?, &self.weekdays()?).map_err(
            |_| ValidationError::OpeningNotBeforeClosing {
                opening: self.opening_time.clone(),
                closing: self.closing_time.clone(),
            },
        )
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            opening_time: default_opening_time(),
            closing_time: default_closing_time(),
            working_days: default_working_days(),
        }
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| ValidationError::InvalidTime {
        field,
        value: value.to_string(),
    })
}

fn default_opening_time() -> String {
    "09:00".to_string()
}

fn default_closing_time() -> String {
    "17:00".to_string()
}

fn default_working_days() -> String {
    "mon,tue,wed,thu,fri,sat,sun".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(opening: &str, closing: &str, days: &str) -> ScheduleConfig {
        ScheduleConfig {
            opening_time: opening.to_string(),
            closing_time: closing.to_string(),
            working_days: days.to_string(),
        }
    }

    #[test]
    fn defaults_match_standard_calendar() {
        let calendar = ScheduleConfig::default().default_calendar().unwrap();
        assert_eq!(calendar, WorkWeekCalendar::standard());
    }

    #[test]
    fn weekdays_accept_short_and_long_names() {
        let days = config("08:00", "17:00", "Mon, tuesday,fri,mon").weekdays().unwrap();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Tue, Weekday::Fri]);
    }

    #[test]
    fn rejects_unparsable_time() {
        let err = config("8am", "17:00", "mon").validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTime { field: "opening_time", .. }));
    }

    #[test]
    fn rejects_inverted_hours() {
        let err = config("17:00", "08:00", "mon").validate().unwrap_err();
        assert!(matches!(err, ValidationError::OpeningNotBeforeClosing { .. }));
    }

    #[test]
    fn rejects_empty_week() {
        assert_eq!(
            config("08:00", "17:00", " ").validate(),
            Err(ValidationError::NoWorkingDays)
        );
    }

    #[test]
    fn rejects_unknown_weekday() {
        assert_eq!(
            config("08:00", "17:00", "mon,funday").validate(),
            Err(ValidationError::UnknownWeekday("funday".to_string()))
        );
    }

    #[test]
    fn weekday_calendar_closes_weekend() {
        let calendar = config("08:00", "17:00", "mon,tue,wed,thu,fri")
            .default_calendar()
            .unwrap();
        assert!(!calendar.day_of(Weekday::Sat).is_working_day);
        assert_eq!(calendar.weekly_working_hours(), 45.0);
    }
}
