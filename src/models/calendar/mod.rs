// Calendar grid model
// Day cells, the displayed-month cursor and the per-locale month/weekday names

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::settings::Locale;
use crate::utils::date::{days_in_month, first_of_month, normalize_month, shift_month};

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months.
    pub in_current_month: bool,
}

impl DayCell {
    pub fn new(date: NaiveDate, in_current_month: bool) -> Self {
        Self {
            date,
            in_current_month,
        }
    }
}

/// A day cell decorated with what a renderer needs to highlight it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: DayCell,
    pub selected: bool,
    pub today: bool,
}

/// The month currently shown by a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavigationCursor {
    year: i32,
    month: u32,
}

impl NavigationCursor {
    /// Build a cursor, carrying out-of-range months into the year.
    pub fn new(year: i32, month: i32) -> Self {
        let (year, month) = normalize_month(year, month);
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1..=12.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> Self {
        let (year, month) = shift_month(self.year, self.month, -1);
        Self { year, month }
    }

    pub fn next(&self) -> Self {
        let (year, month) = shift_month(self.year, self.month, 1);
        Self { year, month }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        first_of_month(self.year, self.month)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Title such as "January 2025" or "Janeiro 2025".
    pub fn title(&self, locale: Locale) -> String {
        format!("{} {}", month_name(self.month, locale), self.year)
    }
}

const MONTH_NAMES_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_NAMES_PT_BR: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Full month name for month 1..=12.
pub fn month_name(month: u32, locale: Locale) -> &'static str {
    let idx = (month.clamp(1, 12) - 1) as usize;
    match locale {
        Locale::En => MONTH_NAMES_EN[idx],
        Locale::PtBr => MONTH_NAMES_PT_BR[idx],
    }
}

/// Column headers of the grid, Sunday first.
pub fn weekday_headers(locale: Locale) -> [&'static str; 7] {
    match locale {
        Locale::En => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        Locale::PtBr => ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_normalizes_month() {
        let cursor = NavigationCursor::new(2024, 13);
        assert_eq!((cursor.year(), cursor.month()), (2025, 1));
        let cursor = NavigationCursor::new(2025, 0);
        assert_eq!((cursor.year(), cursor.month()), (2024, 12));
    }

    #[test]
    fn test_cursor_at_largest_year() {
        let cursor = NavigationCursor::new(i32::MAX, 1);
        assert_eq!((cursor.year(), cursor.month()), (i32::MAX, 1));
        assert_eq!(cursor.first_day(), None);
        assert_eq!(cursor.days_in_month(), 0);

        let last = NavigationCursor::new(i32::MAX, 12);
        assert_eq!(last.next().year(), i32::MAX);
        assert_eq!(last.previous().month(), 11);
    }

    #[test]
    fn test_cursor_navigation_carries_year() {
        let jan = NavigationCursor::new(2025, 1);
        assert_eq!(jan.previous(), NavigationCursor::new(2024, 12));
        assert_eq!(jan.previous().next(), jan);
        assert_eq!(NavigationCursor::new(2025, 12).next(), NavigationCursor::new(2026, 1));
    }

    #[test]
    fn test_cursor_contains() {
        let cursor = NavigationCursor::new(2025, 2);
        assert!(cursor.contains(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(!cursor.contains(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()));
        assert_eq!(cursor.days_in_month(), 28);
    }

    #[test]
    fn test_titles() {
        let cursor = NavigationCursor::new(2025, 3);
        assert_eq!(cursor.title(Locale::En), "March 2025");
        assert_eq!(cursor.title(Locale::PtBr), "Março 2025");
        assert_eq!(weekday_headers(Locale::PtBr)[6], "Sáb");
    }
}
