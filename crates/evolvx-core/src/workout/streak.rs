//! Workout streak: consecutive calendar days with at least one workout.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::WorkoutSummary;

/// Counts the current streak ending today or yesterday.
///
/// Workouts are reduced to distinct calendar days. Counting starts at `today`
/// when today has a workout, or at yesterday when the most recent workout was
/// yesterday; otherwise the streak is broken and the result is 0. The cursor
/// then walks back one day at a time and stops at the first day without a
/// workout. Entries dated after `today` are ignored.
pub fn current_streak(workouts: &[WorkoutSummary], today: NaiveDate) -> u32 {
    streak_from_days(workouts.iter().map(WorkoutSummary::day), today)
}

/// Streak over raw calendar days, in any order and possibly repeated.
pub fn streak_from_days<I>(days: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: BTreeSet<NaiveDate> = days.into_iter().filter(|day| *day <= today).collect();

    let Some(&most_recent) = days.last() else {
        return 0;
    };

    let mut cursor = if most_recent == today {
        today
    } else if Some(most_recent) == today.pred_opt() {
        most_recent
    } else {
        return 0;
    };

    let mut count = 0;
    while days.contains(&cursor) {
        count += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn workout_on(day: NaiveDate, hour: u32) -> WorkoutSummary {
        WorkoutSummary {
            workout_id: i64::from(hour),
            workout_name: "Session".into(),
            workout_date: day.and_hms_opt(hour, 15, 0).unwrap(),
            duration: None,
            notes: None,
            created_at: None,
            exercises: Vec::new(),
        }
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    #[test]
    fn test_empty_list_has_no_streak() {
        assert_eq!(current_streak(&[], today()), 0);
    }

    #[test]
    fn test_single_workout_today() {
        assert_eq!(current_streak(&[workout_on(today(), 9)], today()), 1);
    }

    #[test]
    fn test_three_consecutive_days() {
        let workouts = vec![
            workout_on(days_ago(2), 7),
            workout_on(today(), 18),
            workout_on(days_ago(1), 6),
        ];
        assert_eq!(current_streak(&workouts, today()), 3);
    }

    #[test]
    fn test_gap_breaks_the_run() {
        let workouts = vec![workout_on(today(), 8), workout_on(days_ago(2), 8)];
        assert_eq!(current_streak(&workouts, today()), 1);
    }

    #[test]
    fn test_streak_can_end_yesterday() {
        let workouts = vec![
            workout_on(days_ago(1), 20),
            workout_on(days_ago(2), 20),
            workout_on(days_ago(4), 20),
        ];
        assert_eq!(current_streak(&workouts, today()), 2);
    }

    #[test]
    fn test_last_workout_two_days_ago_is_broken() {
        let workouts = vec![workout_on(days_ago(2), 10), workout_on(days_ago(3), 10)];
        assert_eq!(current_streak(&workouts, today()), 0);
    }

    #[test]
    fn test_multiple_workouts_same_day_count_once() {
        let workouts = vec![
            workout_on(today(), 6),
            workout_on(today(), 19),
            workout_on(days_ago(1), 12),
        ];
        assert_eq!(current_streak(&workouts, today()), 2);
    }

    #[test]
    fn test_future_entries_are_ignored() {
        let tomorrow = today() + Duration::days(1);
        let workouts = vec![workout_on(tomorrow, 9), workout_on(today(), 9)];
        assert_eq!(current_streak(&workouts, today()), 1);
    }

    #[test]
    fn test_streak_across_month_boundary() {
        let first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let days = vec![
            first,
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
        ];
        assert_eq!(streak_from_days(days, first), 3);
    }
}
