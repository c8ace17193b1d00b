//! WorkWeekCalendar - weekly opening hours of the plant.
//!
//! Holds exactly one `WorkingDay` per weekday. All times are local wall-clock
//! time; there is no timezone or holiday handling.
//!
//! # Alignment
//!
//! A timestamp is *inside working hours* iff its weekday is a working day and
//! its time of day is in `[opening, closing)`. `align_to_opening_hours`
//! moves any other timestamp forward to the next opening.

use chrono::{Datelike, Days, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::working_day::{hours_between, WorkingDay};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Plant opening hours for a whole week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWeekCalendar {
    days: [WorkingDay; 7],
}

impl WorkWeekCalendar {
    /// Builds a calendar from one entry per weekday, in any order.
    pub fn from_days(days: Vec<WorkingDay>) -> Result<Self, ValidationError> {
        let mut slots: [Option<WorkingDay>; 7] = [None; 7];
        for day in days {
            day.validate()?;
            let idx = day.day_of_week.num_days_from_monday() as usize;
            if slots[idx].replace(day).is_some() {
                return Err(ValidationError::invalid_format(
                    "working_days",
                    format!("duplicate entry for {}", day.day_of_week),
                ));
            }
        }

        let mut week = WEEK.map(WorkingDay::closed);
        for (idx, slot) in slots.into_iter().enumerate() {
            week[idx] = slot.ok_or_else(|| ValidationError::missing_calendar_entry(WEEK[idx]))?;
        }
        Ok(Self { days: week })
    }

    /// Same hours on every listed weekday; the others are closed.
    pub fn uniform(
        opening: NaiveTime,
        closing: NaiveTime,
        working_days: &[Weekday],
    ) -> Result<Self, ValidationError> {
        let days = WEEK
            .iter()
            .map(|&weekday| {
                if working_days.contains(&weekday) {
                    WorkingDay::open(weekday, opening, closing)
                } else {
                    Ok(WorkingDay::closed(weekday))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_days(days)
    }

    /// Every day of the week, 09:00 to 17:00.
    pub fn standard() -> Self {
        let days = WEEK.map(|weekday| WorkingDay {
            day_of_week: weekday,
            is_working_day: true,
            opening_hour: hour(9),
            closing_hour: hour(17),
        });
        Self { days }
    }

    /// Entries in Monday-first order.
    pub fn days(&self) -> &[WorkingDay; 7] {
        &self.days
    }

    /// The configured entry for the weekday of `at`.
    pub fn day_for(&self, at: NaiveDateTime) -> &WorkingDay {
        self.day_of(at.weekday())
    }

    pub fn day_of(&self, weekday: Weekday) -> &WorkingDay {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn has_working_days(&self) -> bool {
        self.days.iter().any(|d| d.is_working_day)
    }

    /// Total working hours in one week.
    pub fn weekly_working_hours(&self) -> f64 {
        self.days.iter().map(WorkingDay::span_hours).sum()
    }

    /// Hours left before `day` closes, seen from `at`.
    ///
    /// Before opening this is the full span: callers align first.
    pub fn hours_until_close(&self, at: NaiveDateTime, day: &WorkingDay) -> f64 {
        if !day.is_working_day {
            return 0.0;
        }
        let time = at.time();
        if time >= day.closing_hour {
            0.0
        } else if time < day.opening_hour {
            day.span_hours()
        } else {
            hours_between(time, day.closing_hour)
        }
    }

    /// Opening of the first working day strictly after the date of `at`.
    pub fn next_working_day(&self, at: NaiveDateTime) -> Result<NaiveDateTime, DomainError> {
        let date = at.date();
        for offset in 1..=7u64 {
            let Some(candidate) = date.checked_add_days(Days::new(offset)) else {
                break;
            };
            let day = self.day_of(candidate.weekday());
            if day.is_working_day {
                return Ok(candidate.and_time(day.opening_hour));
            }
        }
        Err(no_working_days())
    }

    /// Moves `at` forward to the nearest moment inside working hours.
    pub fn align_to_opening_hours(&self, at: NaiveDateTime) -> Result<NaiveDateTime, DomainError> {
        let day = self.day_for(at);
        if !day.is_working_day || at.time() >= day.closing_hour {
            return self.next_working_day(at);
        }
        if at.time() < day.opening_hour {
            return Ok(at.date().and_time(day.opening_hour));
        }
        Ok(at)
    }
}

impl Default for WorkWeekCalendar {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn no_working_days() -> DomainError {
    DomainError::new(
        ErrorCode::NoWorkingDays,
        "The work week has no working days; nothing can be scheduled",
    )
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN)
}
