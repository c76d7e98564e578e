//! Displayed month and the day grid built for it.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::date::{canonical_day, is_today, Clock};
use crate::error::ValidationError;
use crate::streak::Streak;

/// A calendar month, represented by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Month that contains `day`.
    pub fn containing(day: NaiveDate) -> Self {
        Self {
            first: day.with_day(1).unwrap_or(day),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidValue {
            field: "month".to_string(),
            message: format!("expected YYYY-MM, got '{value}'"),
        };
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some() => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Blank cells before the 1st in a Sunday-first week grid.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// The `day`-th day of this month, if it exists.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        Self::containing(day) == *self
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    /// e.g. "October 2026"
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

/// One clickable day in the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub day_of_month: u32,
    /// Canonical `YYYY-MM-DD` key of this cell.
    pub date: String,
    pub is_today: bool,
    pub is_completed: bool,
    /// Cell rejects toggles in the current edit mode.
    pub is_disabled: bool,
}

/// Everything the presentation layer needs to draw the calendar for the
/// selected streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub streak_id: String,
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub leading_blanks: u32,
    pub days_in_month: u32,
    /// Completed days falling inside this month.
    pub completed_this_month: usize,
    pub cells: Vec<DayCell>,
}

impl MonthView {
    pub fn build(
        month: YearMonth,
        streak: &Streak,
        clock: &impl Clock,
        developer_mode: bool,
    ) -> Self {
        let cells = (1..=month.days_in_month())
            .filter_map(|dom| month.day(dom))
            .map(|date| {
                let current = is_today(date, clock);
                DayCell {
                    day_of_month: date.day(),
                    date: canonical_day(date),
                    is_today: current,
                    is_completed: streak.is_completed(date),
                    is_disabled: !developer_mode && !current,
                }
            })
            .collect();

        let completed_this_month = streak
            .completed_days
            .iter()
            .filter(|day| month.contains(**day))
            .count();

        Self {
            streak_id: streak.id.clone(),
            year: month.year(),
            month: month.month(),
            label: month.label(),
            leading_blanks: month.leading_blanks(),
            days_in_month: month.days_in_month(),
            completed_this_month,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedClock;
    use chrono::Utc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2025, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2026, 4).unwrap().days_in_month(), 30);
        assert_eq!(YearMonth::new(2026, 12).unwrap().days_in_month(), 31);
        assert!(YearMonth::new(2026, 13).is_none());
    }

    #[test]
    fn navigation_wraps_years() {
        let jan = YearMonth::new(2026, 1).unwrap();
        assert_eq!(jan.previous(), YearMonth::new(2025, 12).unwrap());
        assert_eq!(jan.previous().next(), jan);
        assert_eq!(YearMonth::new(2025, 12).unwrap().next(), jan);
    }

    #[test]
    fn leading_blanks_start_on_sunday() {
        // 2026-02-01 is a Sunday, 2026-10-01 a Thursday.
        assert_eq!(YearMonth::new(2026, 2).unwrap().leading_blanks(), 0);
        assert_eq!(YearMonth::new(2026, 10).unwrap().leading_blanks(), 4);
    }

    #[test]
    fn parse_requires_padded_year_month() {
        assert_eq!(YearMonth::parse("2026-03").unwrap(), YearMonth::new(2026, 3).unwrap());
        for bad in ["2026-3", "2026-13", "26-03", "2026/03", "march"] {
            assert!(YearMonth::parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn label_names_month_and_year() {
        assert_eq!(YearMonth::new(2026, 10).unwrap().label(), "October 2026");
    }

    #[test]
    fn view_marks_today_completed_and_disabled_cells() {
        let today = ymd(2026, 10, 18);
        let mut streak = Streak::new("s", "Walk", Utc::now());
        streak.completed_days.insert(ymd(2026, 10, 17));
        streak.completed_days.insert(ymd(2026, 10, 18));
        streak.completed_days.insert(ymd(2026, 9, 30));

        let clock = FixedClock::new(today);
        let view = MonthView::build(YearMonth::containing(today), &streak, &clock, false);
        assert_eq!(view.cells.len(), 31);
        assert_eq!(view.completed_this_month, 2);
        assert_eq!(view.leading_blanks, 4);

        let cell = &view.cells[17];
        assert_eq!(cell.date, "2026-10-18");
        assert!(cell.is_today && cell.is_completed && !cell.is_disabled);

        let yesterday = &view.cells[16];
        assert!(!yesterday.is_today && yesterday.is_completed && yesterday.is_disabled);

        let dev_view = MonthView::build(YearMonth::containing(today), &streak, &clock, true);
        assert_eq!(dev_view.cells.iter().filter(|c| c.is_today).count(), 1);
        assert!(dev_view.cells.iter().all(|c| !c.is_disabled));
    }
}
