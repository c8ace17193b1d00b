//! Calendar module - plant opening hours and completion estimates.
//!
//! Pure and synchronous: nothing here performs I/O or holds shared state.

mod estimator;
mod work_week;
mod working_day;

pub use estimator::{PhaseEstimate, ScheduleBreakdown, ScheduleEstimator, ScheduledPhase};
pub use work_week::WorkWeekCalendar;
pub use working_day::WorkingDay;
