//! Current-streak computation.
//!
//! Counting walks backward from today. Today itself is a grace day: an
//! unfinished today does not break the streak, but a second missing day does.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::date::days_before;

/// Upper bound on how far back a streak is counted.
pub const MAX_SCAN_DAYS: u64 = 365;

/// Streak lengths at multiples of this value are milestones.
pub const MILESTONE_INTERVAL: u32 = 7;

/// Number of consecutive completed days ending today (or yesterday, when
/// today is not completed yet), capped at [`MAX_SCAN_DAYS`].
pub fn current_streak_length(completed_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut count = 0;
    for offset in 0..MAX_SCAN_DAYS {
        let Some(day) = days_before(today, offset) else {
            break;
        };
        if completed_days.contains(&day) {
            count += 1;
        } else if offset > 0 {
            break;
        }
    }
    count
}

/// Total number of completed days, regardless of gaps.
pub fn total_completed(completed_days: &BTreeSet<NaiveDate>) -> usize {
    completed_days.len()
}

/// 7, 14, 21, ...
pub fn is_milestone(length: u32) -> bool {
    length >= MILESTONE_INTERVAL && length % MILESTONE_INTERVAL == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn ago(offset: u64) -> NaiveDate {
        days_before(today(), offset).unwrap()
    }

    fn days(offsets: &[u64]) -> BTreeSet<NaiveDate> {
        offsets.iter().map(|&o| ago(o)).collect()
    }

    #[test]
    fn empty_history_is_zero() {
        assert_eq!(current_streak_length(&BTreeSet::new(), today()), 0);
    }

    #[test]
    fn today_only_counts_one() {
        assert_eq!(current_streak_length(&days(&[0]), today()), 1);
    }

    #[test]
    fn missing_today_is_a_grace_day() {
        assert_eq!(current_streak_length(&days(&[1, 2]), today()), 2);
    }

    #[test]
    fn two_missing_days_end_the_streak() {
        assert_eq!(current_streak_length(&days(&[2]), today()), 0);
        assert_eq!(current_streak_length(&days(&[2, 3, 4]), today()), 0);
    }

    #[test]
    fn internal_gap_stops_the_count() {
        assert_eq!(current_streak_length(&days(&[0, 1, 3, 4, 5]), today()), 2);
        assert_eq!(current_streak_length(&days(&[1, 2, 4]), today()), 2);
    }

    #[test]
    fn future_days_are_ignored() {
        let mut completed = days(&[0, 1]);
        completed.insert(today().succ_opt().unwrap());
        assert_eq!(current_streak_length(&completed, today()), 2);
    }

    #[test]
    fn week_ending_today_is_seven() {
        let completed = days(&[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(current_streak_length(&completed, today()), 7);
    }

    #[test]
    fn streak_is_capped_at_scan_window() {
        let completed: BTreeSet<NaiveDate> = (0..500).map(ago).collect();
        assert_eq!(current_streak_length(&completed, today()), 365);

        let without_today: BTreeSet<NaiveDate> = (1..500).map(ago).collect();
        assert_eq!(current_streak_length(&without_today, today()), 364);
    }

    #[test]
    fn counts_across_month_and_year_boundaries() {
        let new_year = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let completed: BTreeSet<NaiveDate> = (0..5)
            .map(|o| days_before(new_year, o).unwrap())
            .collect();
        assert_eq!(current_streak_length(&completed, new_year), 5);
    }

    #[test]
    fn total_counts_every_completed_day() {
        assert_eq!(total_completed(&days(&[0, 3, 40])), 3);
    }

    #[test]
    fn milestones_are_multiples_of_seven() {
        assert!(!is_milestone(0));
        assert!(!is_milestone(6));
        assert!(is_milestone(7));
        assert!(!is_milestone(8));
        assert!(is_milestone(14));
        assert!(is_milestone(364));
    }
}
