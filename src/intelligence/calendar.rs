/// Month calendar heatmap
///
/// Lays out one month as day cells and shades each by how many words were
/// entered that day.

use crate::db::WordRecord;
use crate::error::{Result, WordCalendarError};
use crate::intelligence::aggregation::counts_by_date;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

/// Upper bound (inclusive) of each shading level. Anything above the last
/// bound is the top level.
pub const COLOR_THRESHOLDS: [usize; 8] = [0, 1, 3, 6, 10, 15, 20, 25];

/// Highest shading level
pub const MAX_COLOR_LEVEL: u8 = COLOR_THRESHOLDS.len() as u8;

/// Shading level 0..=8 for a day with `count` words.
///
/// 0 for an empty day; level k covers (threshold[k-1], threshold[k]];
/// more than 25 words is level 8.
pub fn color_level(count: usize) -> u8 {
    COLOR_THRESHOLDS
        .iter()
        .position(|&upper| count <= upper)
        .map(|level| level as u8)
        .unwrap_or(MAX_COLOR_LEVEL)
}

/// One day on the calendar grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub count: usize,
    pub level: u8,
    pub is_today: bool,
}

/// A displayed month, held as its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// `month` is 1-based
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| WordCalendarError::InvalidDate(format!("{}-{:02}", year, month)))
    }

    /// The month containing `today`
    pub fn current(today: NaiveDate) -> Self {
        Self {
            first: today - Days::new(u64::from(today.day0())),
        }
    }

    /// Parse a `YYYY-MM` argument
    pub fn parse(value: &str) -> Result<Self> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
            .map_err(|_| WordCalendarError::InvalidDate(value.to_string()))?;
        Ok(Self { first })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Move by `delta` months, rolling over year boundaries either way.
    ///
    /// `None` when the target month falls outside the representable date range.
    pub fn shift(self, delta: i32) -> Option<Self> {
        let months = Months::new(delta.unsigned_abs());
        let first = if delta < 0 {
            self.first.checked_sub_months(months)?
        } else {
            self.first.checked_add_months(months)?
        };
        Some(Self { first })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .map(|next| next.signed_duration_since(first).num_days() as u32)
            .unwrap_or(31)
    }

    /// Empty cells before day 1, weeks starting on Sunday
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// One cell per day of the month, shaded from `records`
    pub fn cells(&self, records: &[WordRecord], today: NaiveDate) -> Vec<DayCell> {
        let counts = counts_by_date(records);
        self.first_day()
            .iter_days()
            .take(self.days_in_month() as usize)
            .map(|date| {
                let count = counts.get(&date).copied().unwrap_or(0);
                DayCell {
                    date,
                    count,
                    level: color_level(count),
                    is_today: date == today,
                }
            })
            .collect()
    }

    /// Heading like `2024-02`
    pub fn title(&self) -> String {
        format!("{}-{:02}", self.year(), self.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_color_level_boundaries() {
        assert_eq!(color_level(0), 0);
        assert_eq!(color_level(1), 1);
        assert_eq!(color_level(2), 2);
        assert_eq!(color_level(3), 2);
        assert_eq!(color_level(4), 3);
        assert_eq!(color_level(6), 3);
        assert_eq!(color_level(7), 4);
        assert_eq!(color_level(10), 4);
        assert_eq!(color_level(11), 5);
        assert_eq!(color_level(15), 5);
        assert_eq!(color_level(20), 6);
        assert_eq!(color_level(25), 7);
        assert_eq!(color_level(26), 8);
        assert_eq!(color_level(10_000), 8);
    }

    #[test]
    fn test_color_level_monotonic() {
        let levels: Vec<u8> = (0..40).map(color_level).collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_shift_wraps_years() {
        let jan = CalendarMonth::new(2024, 1).unwrap();
        assert_eq!(jan.shift(-1), CalendarMonth::new(2023, 12).ok());

        let dec = CalendarMonth::new(2024, 12).unwrap();
        assert_eq!(dec.shift(1), CalendarMonth::new(2025, 1).ok());
        assert_eq!(dec.shift(-12), CalendarMonth::new(2023, 12).ok());
    }

    #[test]
    fn test_shift_past_date_range_is_none() {
        let last = CalendarMonth::current(NaiveDate::MAX);
        assert_eq!(last.shift(1), None);
        assert_eq!(last.shift(i32::MAX), None);
        assert!(last.shift(-1).is_some());

        let first = CalendarMonth::current(NaiveDate::MIN);
        assert_eq!(first.shift(-1), None);
        assert_eq!(first.shift(i32::MIN), None);
        assert_eq!(first.first_day(), NaiveDate::MIN);
    }

    #[test]
    fn test_days_and_blanks() {
        let feb = CalendarMonth::new(2024, 2).unwrap();
        assert_eq!(feb.days_in_month(), 29);
        // 2024-02-01 was a Thursday
        assert_eq!(feb.leading_blanks(), 4);

        let sep = CalendarMonth::new(2024, 9).unwrap();
        assert_eq!(sep.days_in_month(), 30);
        assert_eq!(sep.leading_blanks(), 0);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            CalendarMonth::parse("2025-07").unwrap(),
            CalendarMonth::new(2025, 7).unwrap()
        );
        assert!(CalendarMonth::parse("2025-13").is_err());
        assert!(CalendarMonth::new(2025, 0).is_err());
    }

    #[test]
    fn test_cells_carry_counts() {
        let records = vec![
            WordRecord::new("cat", date("2024-01-01"), 100),
            WordRecord::new("dog", date("2024-01-01"), 200),
            WordRecord::new("cat", date("2024-01-02"), 300),
            WordRecord::new("elk", date("2024-02-01"), 400),
        ];

        let month = CalendarMonth::new(2024, 1).unwrap();
        let cells = month.cells(&records, date("2024-01-02"));

        assert_eq!(cells.len(), 31);
        assert_eq!(cells[0].count, 2);
        assert_eq!(cells[0].level, 2);
        assert_eq!(cells[1].count, 1);
        assert!(cells[1].is_today);
        assert!(cells[2..].iter().all(|c| c.count == 0 && c.level == 0));
    }
}
