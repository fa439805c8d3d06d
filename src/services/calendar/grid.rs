use chrono::{Datelike, NaiveDate};

use crate::models::calendar::DayCell;
use crate::utils::date::{add_days, days_in_month, first_of_month, weekday_index};

/// Cells in a six-row month layout.
pub const SIX_WEEK_CELLS: usize = 42;

/// Build the month grid for `year`/`month`, Sunday first.
///
/// The grid starts with the trailing days of the previous month needed to
/// reach the weekday of the 1st, then every day of the month, then the
/// leading days of the next month up to the next multiple of 7.
/// Out-of-range months are carried into the year.
pub fn build_grid(year: i32, month: u32) -> Vec<DayCell> {
    let Some(first) = first_of_month(year, month) else {
        return Vec::new();
    };
    let in_month = month_length(first);
    let leading = weekday_index(first) as usize;
    let total = (leading + in_month).div_ceil(7) * 7;
    fill_grid(first, leading, in_month, total)
}

/// Like [`build_grid`] but always padded to six weeks (42 cells).
pub fn build_six_week_grid(year: i32, month: u32) -> Vec<DayCell> {
    let Some(first) = first_of_month(year, month) else {
        return Vec::new();
    };
    let in_month = month_length(first);
    let leading = weekday_index(first) as usize;
    fill_grid(first, leading, in_month, SIX_WEEK_CELLS)
}

fn month_length(first: NaiveDate) -> usize {
    days_in_month(first.year(), first.month()) as usize
}

fn fill_grid(first: NaiveDate, leading: usize, in_month: usize, total: usize) -> Vec<DayCell> {
    let grid_start = add_days(first, -(leading as i64));
    grid_start
        .iter_days()
        .take(total)
        .enumerate()
        .map(|(idx, date)| DayCell::new(date, idx >= leading && idx < leading + in_month))
        .collect()
}

/// Split a grid into rows of seven cells.
pub fn weeks<T>(grid: &[T]) -> impl Iterator<Item = &[T]> {
    grid.chunks(7)
}
