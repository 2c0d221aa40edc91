// Due-date distribution engine
//
// A single deterministic pass over a project's incomplete tasks: the total
// hour budget of the window is split evenly per task (integer division) and
// the current date advances across working days as whole daily quotas are
// consumed. Pure computation: no I/O, no clock access, no shared state.

use crate::models::Task;
use crate::scheduler::calendar::{count_working_days, next_working_day};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The time window due dates are distributed over. `start_date` and
/// `end_date` are inclusive calendar dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours_per_day: i64,
    pub work_days_per_week: u8,
}

/// One task with its assigned due date, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: Uuid,
    pub title: String,
    pub due_date: NaiveDate,
    pub is_completed: bool,
}

/// Result of one scheduling pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub scheduled_tasks: Vec<ScheduledTask>,
    pub message: String,
    pub tasks_scheduled: usize,
}

impl ScheduleOutcome {
    fn empty() -> Self {
        Self {
            scheduled_tasks: Vec::new(),
            message: "No incomplete tasks to schedule".to_string(),
            tasks_scheduled: 0,
        }
    }
}

/// Assign a due date to every task, in input order.
///
/// `tasks` must already be filtered to incomplete tasks and sorted by
/// ascending creation time; the engine preserves that order and never
/// re-validates numeric ranges (the caller does). The hour budget per task
/// is `count_working_days * hours_per_day / tasks.len()` with the fractional
/// part truncated, so an uneven split under-counts the total budget rather
/// than rounding.
pub fn schedule_tasks(tasks: &[Task], window: &ScheduleWindow) -> ScheduleOutcome {
    if tasks.is_empty() {
        return ScheduleOutcome::empty();
    }

    let working_days =
        count_working_days(window.start_date, window.end_date, window.work_days_per_week);
    let total_work_hours = working_days * window.hours_per_day;
    let hours_per_task = total_work_hours / tasks.len() as i64;

    let mut current_date = window.start_date;
    let mut hours_accumulated: i64 = 0;
    let mut scheduled_tasks = Vec::with_capacity(tasks.len());

    for task in tasks {
        hours_accumulated += hours_per_task;

        // Each full daily quota consumed moves the due date one working day
        while hours_accumulated > window.hours_per_day {
            current_date = next_working_day(current_date, window.work_days_per_week);
            hours_accumulated -= window.hours_per_day;
        }

        scheduled_tasks.push(ScheduledTask {
            id: task.id,
            title: task.title.clone(),
            due_date: current_date,
            is_completed: task.is_completed,
        });

        // Move to the next day for the next task. Also runs after the final
        // task, where it has no observable effect.
        current_date = next_working_day(current_date, window.work_days_per_week);
    }

    let tasks_scheduled = scheduled_tasks.len();
    ScheduleOutcome {
        scheduled_tasks,
        message: format!("Successfully scheduled {} tasks", tasks_scheduled),
        tasks_scheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_tasks(count: usize) -> Vec<Task> {
        (0..count)
            .map(|i| Task {
                id: Uuid::new_v4(),
                project_id: Uuid::nil(),
                title: format!("task {}", i),
                description: None,
                due_date: None,
                is_completed: false,
                created_at: Utc::now() + chrono::Duration::seconds(i as i64),
            })
            .collect()
    }

    fn window(
        start: NaiveDate,
        end: NaiveDate,
        hours_per_day: i64,
        work_days_per_week: u8,
    ) -> ScheduleWindow {
        ScheduleWindow {
            start_date: start,
            end_date: end,
            hours_per_day,
            work_days_per_week,
        }
    }

    #[test]
    fn test_empty_input_returns_fixed_message() {
        let w = window(date(2026, 1, 5), date(2026, 1, 18), 8, 5);
        let outcome = schedule_tasks(&[], &w);
        assert_eq!(outcome.tasks_scheduled, 0);
        assert!(outcome.scheduled_tasks.is_empty());
        assert_eq!(outcome.message, "No incomplete tasks to schedule");
    }

    #[test]
    fn test_single_task_consumes_whole_budget() {
        // Monday start, two full weeks, 8h/day, 5-day week: 10 working days,
        // 80 hours, all of it on one task. The accumulation loop drains nine
        // full daily quotas, so the due date is the tenth working day in the
        // window: the second Friday.
        let w = window(date(2026, 1, 5), date(2026, 1, 18), 8, 5);
        let tasks = make_tasks(1);
        let outcome = schedule_tasks(&tasks, &w);

        assert_eq!(outcome.tasks_scheduled, 1);
        assert_eq!(outcome.scheduled_tasks[0].due_date, date(2026, 1, 16));
        assert_eq!(outcome.message, "Successfully scheduled 1 tasks");
    }

    #[test]
    fn test_even_division_spaces_tasks_two_working_days_apart() {
        // Same window, ten tasks: 8 hours per task, exactly one daily quota.
        // After each assignment the date advances once unconditionally, and
        // the retained quota in the accumulator forces one more advance at
        // the next task, so tasks land on working days 1, 3, 5, ...
        let w = window(date(2026, 1, 5), date(2026, 1, 18), 8, 5);
        let tasks = make_tasks(4);
        let outcome = schedule_tasks(&tasks, &w);

        // 10 working days * 8h / 4 tasks = 20h per task.
        // Task 0: acc 20 drains two quotas (20 -> 12 -> 4), two advances,
        // due Wednesday.
        assert_eq!(outcome.scheduled_tasks[0].due_date, date(2026, 1, 7));

        let ten = make_tasks(10);
        let outcome = schedule_tasks(&ten, &w);
        let expected = [
            date(2026, 1, 5),  // Mon, week 1
            date(2026, 1, 7),  // Wed
            date(2026, 1, 9),  // Fri
            date(2026, 1, 13), // Tue, week 2
            date(2026, 1, 15), // Thu
            date(2026, 1, 19), // Mon, week 3
            date(2026, 1, 21), // Wed
            date(2026, 1, 23), // Fri
            date(2026, 1, 27), // Tue, week 4
            date(2026, 1, 29), // Thu
        ];
        let actual: Vec<NaiveDate> = outcome
            .scheduled_tasks
            .iter()
            .map(|t| t.due_date)
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_saturday_start_advances_past_weekend() {
        // 2026-01-10 is a Saturday. One task over two weeks forces the
        // accumulation loop to advance, and every advance lands on a weekday.
        let w = window(date(2026, 1, 10), date(2026, 1, 23), 8, 5);
        let tasks = make_tasks(1);
        let outcome = schedule_tasks(&tasks, &w);

        let due = outcome.scheduled_tasks[0].due_date;
        assert!(crate::scheduler::calendar::is_working_day(due, 5));
    }

    #[test]
    fn test_inverted_window_steps_one_working_day_per_task() {
        // end < start: zero working days, zero hours per task, so the
        // accumulation loop never runs. The first task is due on the start
        // date itself (2026-01-18, a Sunday), then the unconditional
        // post-assignment advance moves each later task to the next working
        // day: Monday, Tuesday.
        let w = window(date(2026, 1, 18), date(2026, 1, 5), 8, 5);
        let tasks = make_tasks(3);
        let outcome = schedule_tasks(&tasks, &w);

        assert_eq!(outcome.tasks_scheduled, 3);
        let actual: Vec<NaiveDate> = outcome
            .scheduled_tasks
            .iter()
            .map(|t| t.due_date)
            .collect();
        assert_eq!(
            actual,
            [date(2026, 1, 18), date(2026, 1, 19), date(2026, 1, 20)]
        );
    }

    #[test]
    fn test_seven_day_week_advances_by_single_days() {
        // 14 calendar days, all working: 14 working days * 1h = 14 hours,
        // 7 tasks -> 2h per task with hours_per_day = 1. The first task
        // drains one quota; every later task drains two (its own plus the
        // one the accumulator retained), plus the unconditional advance, so
        // due dates step by three calendar days with no weekend skips.
        let w = window(date(2026, 1, 5), date(2026, 1, 18), 1, 7);
        let tasks = make_tasks(7);
        let outcome = schedule_tasks(&tasks, &w);

        let actual: Vec<NaiveDate> = outcome
            .scheduled_tasks
            .iter()
            .map(|t| t.due_date)
            .collect();
        let expected = [
            date(2026, 1, 6),
            date(2026, 1, 9),
            date(2026, 1, 12),
            date(2026, 1, 15),
            date(2026, 1, 18),
            date(2026, 1, 21),
            date(2026, 1, 24),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_truncating_division_drops_fractional_hours() {
        // 10 working days * 8h = 80 hours over 3 tasks: 26 each, 2 hours of
        // the budget dropped on the floor.
        let w = window(date(2026, 1, 5), date(2026, 1, 18), 8, 5);
        let tasks = make_tasks(3);
        let outcome = schedule_tasks(&tasks, &w);

        // Task 0: acc 26 -> 3 advances (26, 18, 10 all > 8) leaves acc 2; due Thu.
        assert_eq!(outcome.scheduled_tasks[0].due_date, date(2026, 1, 8));
        // Task 1: acc 28 -> advances Fri..Wed leave acc 4; due Wed week 2.
        assert_eq!(outcome.scheduled_tasks[1].due_date, date(2026, 1, 14));
        // Task 2: acc 30 -> advances Thu..Tue leave acc 6; due Tue week 3.
        assert_eq!(outcome.scheduled_tasks[2].due_date, date(2026, 1, 20));
    }

    #[test]
    fn test_order_and_count_preserved() {
        let w = window(date(2026, 1, 5), date(2026, 1, 18), 8, 5);
        let tasks = make_tasks(6);
        let outcome = schedule_tasks(&tasks, &w);

        assert_eq!(outcome.tasks_scheduled, 6);
        let input_ids: Vec<Uuid> = tasks.iter().map(|t| t.id).collect();
        let output_ids: Vec<Uuid> = outcome.scheduled_tasks.iter().map(|t| t.id).collect();
        assert_eq!(input_ids, output_ids);
    }

    #[test]
    fn test_due_dates_monotonically_non_decreasing() {
        let w = window(date(2026, 1, 5), date(2026, 2, 27), 3, 6);
        let tasks = make_tasks(11);
        let outcome = schedule_tasks(&tasks, &w);

        for pair in outcome.scheduled_tasks.windows(2) {
            assert!(pair[0].due_date <= pair[1].due_date);
        }
    }

    #[test]
    fn test_out_of_range_policy_does_not_panic() {
        // The caller range-checks 1-7; values 1-4 reach the engine and take
        // the every-day fallback.
        let w = window(date(2026, 1, 5), date(2026, 1, 18), 8, 3);
        let tasks = make_tasks(2);
        let outcome = schedule_tasks(&tasks, &w);
        assert_eq!(outcome.tasks_scheduled, 2);
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let w = window(date(2026, 1, 5), date(2026, 1, 30), 6, 6);
        let tasks = make_tasks(5);
        let first = schedule_tasks(&tasks, &w);
        let second = schedule_tasks(&tasks, &w);
        assert_eq!(first, second);
    }
}
