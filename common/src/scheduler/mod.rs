// Task auto-scheduler: working-day calendar, due-date distribution engine,
// and the service that ties them to persistence

pub mod calendar;
pub mod engine;
pub mod service;

pub use calendar::{count_working_days, is_working_day, next_working_day};
pub use engine::{schedule_tasks, ScheduleOutcome, ScheduleWindow, ScheduledTask};
pub use service::SchedulerService;
