// Date utility functions
// Calendar arithmetic shared by the grid builder, the selection policies and the records layer

use chrono::{Datelike, Duration, NaiveDate};

/// Normalize a (year, month) pair so that `month` lands in 1..=12,
/// carrying whole years in either direction.
///
/// `normalize_month(2024, 13)` is `(2025, 1)`, `normalize_month(2025, 0)` is `(2024, 12)`.
/// The year saturates at the bounds of `i32`.
pub fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    let total_months = i64::from(year) * 12 + i64::from(month) - 1;
    let new_year = total_months
        .div_euclid(12)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    let new_month = total_months.rem_euclid(12) + 1;
    (new_year as i32, new_month as u32)
}

/// Shift a (year, month) pair by `delta_months`.
pub fn shift_month(year: i32, month: u32, delta_months: i32) -> (i32, u32) {
    let month = i32::try_from(month).unwrap_or(i32::MAX);
    normalize_month(year, month.saturating_add(delta_months))
}

/// First day of the given month, `None` when the year is outside chrono's range.
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (year, month) = normalize_month(year, i32::try_from(month).unwrap_or(i32::MAX));
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Number of days in the given month, derived from the calendar rather than a table.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = shift_month(year, month, 1);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Weekday index with Sunday as 0 and Saturday as 6.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Every date of the given month, in order.
pub fn month_days(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    let first = first_of_month(year, month);
    let count = first.map(|d| days_in_month(d.year(), d.month())).unwrap_or(0);
    first
        .into_iter()
        .flat_map(move |first| first.iter_days().take(count as usize))
}

/// Inclusive day-by-day interval between two dates, whichever comes first.
///
/// Crosses month and year boundaries: Jan 30 to Feb 2 yields four dates.
pub fn inclusive_days(a: NaiveDate, b: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    start.iter_days().take_while(move |d| *d <= end)
}

/// Number of whole days from `start` to `end` (negative when `end` is earlier).
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Date `days` days after `date`, saturating at chrono's supported range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
}

/// Format a date as ISO `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
