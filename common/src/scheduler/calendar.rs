// Working-day calendar
//
// Classifies calendar dates as working or non-working under a
// days-per-week policy and provides the counting and advancement
// primitives the scheduling engine is built on.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Whether `date` is a working day under the given policy.
///
/// Policy table:
/// - 5 → Monday through Friday
/// - 6 → Monday through Saturday
/// - 7 → every day
/// - any other value → every day (fallback branch)
pub fn is_working_day(date: NaiveDate, work_days_per_week: u8) -> bool {
    match work_days_per_week {
        5 => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        6 => date.weekday() != Weekday::Sun,
        _ => true,
    }
}

/// Inclusive count of working days in `[start, end]`; 0 when `end < start`.
pub fn count_working_days(start: NaiveDate, end: NaiveDate, work_days_per_week: u8) -> i64 {
    let mut working_days = 0;
    let mut current = start;

    while current <= end {
        if is_working_day(current, work_days_per_week) {
            working_days += 1;
        }
        current = current + Days::new(1);
    }

    working_days
}

/// Smallest working day strictly greater than `date`.
///
/// Terminates for every policy value: at least one day per week is working
/// under the table above.
pub fn next_working_day(date: NaiveDate, work_days_per_week: u8) -> NaiveDate {
    let mut next = date + Days::new(1);

    while !is_working_day(next, work_days_per_week) {
        next = next + Days::new(1);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_five_day_week_excludes_weekend() {
        // 2026-01-05 is a Monday
        assert!(is_working_day(date(2026, 1, 5), 5));
        assert!(is_working_day(date(2026, 1, 9), 5)); // Friday
        assert!(!is_working_day(date(2026, 1, 10), 5)); // Saturday
        assert!(!is_working_day(date(2026, 1, 11), 5)); // Sunday
    }

    #[test]
    fn test_six_day_week_excludes_only_sunday() {
        assert!(is_working_day(date(2026, 1, 10), 6)); // Saturday
        assert!(!is_working_day(date(2026, 1, 11), 6)); // Sunday
    }

    #[test]
    fn test_seven_day_week_all_working() {
        for offset in 0..7 {
            assert!(is_working_day(date(2026, 1, 5) + Days::new(offset), 7));
        }
    }

    #[test]
    fn test_unlisted_policy_falls_back_to_all_working() {
        // Values outside {5, 6, 7} take the fallback branch
        assert!(is_working_day(date(2026, 1, 11), 3)); // Sunday
        assert!(is_working_day(date(2026, 1, 11), 0));
        assert!(is_working_day(date(2026, 1, 11), 200));
    }

    #[test]
    fn test_count_two_full_weeks_five_day() {
        // Monday through the second Sunday: 10 working days
        assert_eq!(count_working_days(date(2026, 1, 5), date(2026, 1, 18), 5), 10);
    }

    #[test]
    fn test_count_two_full_weeks_six_day() {
        assert_eq!(count_working_days(date(2026, 1, 5), date(2026, 1, 18), 6), 12);
    }

    #[test]
    fn test_count_two_full_weeks_seven_day() {
        assert_eq!(count_working_days(date(2026, 1, 5), date(2026, 1, 18), 7), 14);
    }

    #[test]
    fn test_count_single_day_range() {
        assert_eq!(count_working_days(date(2026, 1, 5), date(2026, 1, 5), 5), 1);
        assert_eq!(count_working_days(date(2026, 1, 10), date(2026, 1, 10), 5), 0);
    }

    #[test]
    fn test_count_inverted_range_is_zero() {
        assert_eq!(count_working_days(date(2026, 1, 18), date(2026, 1, 5), 5), 0);
    }

    #[test]
    fn test_next_working_day_skips_weekend() {
        // Friday advances to Monday under a 5-day week
        assert_eq!(next_working_day(date(2026, 1, 9), 5), date(2026, 1, 12));
        // Saturday also lands on Monday
        assert_eq!(next_working_day(date(2026, 1, 10), 5), date(2026, 1, 12));
    }

    #[test]
    fn test_next_working_day_six_day_week() {
        // Friday advances to Saturday
        assert_eq!(next_working_day(date(2026, 1, 9), 6), date(2026, 1, 10));
        // Saturday skips Sunday to Monday
        assert_eq!(next_working_day(date(2026, 1, 10), 6), date(2026, 1, 12));
    }

    #[test]
    fn test_next_working_day_seven_day_week_is_tomorrow() {
        assert_eq!(next_working_day(date(2026, 1, 10), 7), date(2026, 1, 11));
        assert_eq!(next_working_day(date(2026, 1, 11), 7), date(2026, 1, 12));
    }

    #[test]
    fn test_next_working_day_is_strictly_greater() {
        let start = date(2026, 1, 5);
        for policy in [0u8, 1, 5, 6, 7] {
            assert!(next_working_day(start, policy) > start);
        }
    }
}
