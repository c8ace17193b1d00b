//! ScheduleEstimator - projects when a batch will finish.
//!
//! Active phases only progress during opening hours: each step consumes
//! `min(hours until close, hours still needed)` and, if work remains, the
//! clock jumps to the next opening. Passive phases (fermentation,
//! maturation) add their duration to the raw clock, nights and weekends
//! included.
//!
//! Every advance is rounded down to whole minutes. The remainder is dropped
//! per step, so long multi-step phases can drift by a few seconds. A duration
//! that would run past the representable calendar is an `OutOfRange` error.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, PhaseKind};

use super::work_week::no_working_days;
use super::WorkWeekCalendar;

/// Estimated duration of one phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseEstimate {
    pub kind: PhaseKind,
    pub estimated_hours: f64,
}

impl PhaseEstimate {
    pub fn new(kind: PhaseKind, estimated_hours: f64) -> Self {
        Self {
            kind,
            estimated_hours,
        }
    }

    /// True if the phase only progresses during working hours.
    pub fn is_active(&self) -> bool {
        self.kind.is_time_active()
    }

    fn contributes(&self) -> bool {
        self.estimated_hours > 0.0
    }
}

/// Projected window of one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPhase {
    pub kind: PhaseKind,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

/// Per-phase projection of a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBreakdown {
    pub started_at: NaiveDateTime,
    pub phases: Vec<ScheduledPhase>,
    pub completion: NaiveDateTime,
}

/// Pure completion-date calculator.
pub struct ScheduleEstimator;

impl ScheduleEstimator {
    /// Projected completion of `phases`, run in order from `start`.
    ///
    /// The start is first aligned to opening hours. Fails with a
    /// configuration error, before doing any work, if the calendar has no
    /// working days.
    pub fn estimate_completion(
        phases: &[PhaseEstimate],
        start: NaiveDateTime,
        calendar: &WorkWeekCalendar,
    ) -> Result<NaiveDateTime, DomainError> {
        Ok(Self::estimate_breakdown(phases, start, calendar)?.completion)
    }

    /// Same as `estimate_completion`, keeping each phase's window.
    pub fn estimate_breakdown(
        phases: &[PhaseEstimate],
        start: NaiveDateTime,
        calendar: &WorkWeekCalendar,
    ) -> Result<ScheduleBreakdown, DomainError> {
        if !calendar.has_working_days() {
            return Err(no_working_days());
        }

        let started_at = calendar.align_to_opening_hours(start)?;
        let mut clock = started_at;
        let mut scheduled = Vec::with_capacity(phases.len());

        for estimate in phases {
            let starts_at = if estimate.is_active() && estimate.contributes() {
                calendar.align_to_opening_hours(clock)?
            } else {
                clock
            };
            clock = Self::advance_through_phase(clock, estimate, calendar)?;
            tracing::debug!(
                phase = %estimate.kind,
                hours = estimate.estimated_hours,
                active = estimate.is_active(),
                ends_at = %clock,
                "phase projected"
            );
            scheduled.push(ScheduledPhase {
                kind: estimate.kind,
                starts_at,
                ends_at: clock,
            });
        }

        Ok(ScheduleBreakdown {
            started_at,
            phases: scheduled,
            completion: clock,
        })
    }

    /// Advances `clock` through a single phase.
    pub fn advance_through_phase(
        clock: NaiveDateTime,
        estimate: &PhaseEstimate,
        calendar: &WorkWeekCalendar,
    ) -> Result<NaiveDateTime, DomainError> {
        if !estimate.contributes() {
            return Ok(clock);
        }
        if !estimate.is_active() {
            return advance(clock, estimate.estimated_hours);
        }

        let mut clock = calendar.align_to_opening_hours(clock)?;
        let mut remaining = estimate.estimated_hours;
        loop {
            let available = calendar.hours_until_close(clock, calendar.day_for(clock));
            if available > 0.0 {
                let consumed = available.min(remaining);
                clock = advance(clock, consumed)?;
                remaining -= consumed;
            }
            if remaining <= 0.0 {
                return Ok(clock);
            }
            clock = calendar.next_working_day(clock)?;
        }
    }
}

/// Adds `hours` to `at`, as whole hours plus whole minutes.
fn advance(at: NaiveDateTime, hours: f64) -> Result<NaiveDateTime, DomainError> {
    let whole_hours = hours.trunc();
    let minutes = ((hours - whole_hours) * 60.0).trunc();
    let step = if whole_hours < i64::MAX as f64 {
        Duration::try_hours(whole_hours as i64)
            .zip(Duration::try_minutes(minutes as i64))
            .and_then(|(h, m)| h.checked_add(&m))
    } else {
        None
    };
    step.and_then(|step| at.checked_add_signed(step))
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::OutOfRange,
                format!("Advancing {} by {} hours leaves the supported calendar", at, hours),
            )
            .with_detail("hours", hours.to_string())
        })
}
