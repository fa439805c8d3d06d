//! Selection policies: how one event turns the current selection into the next.

use chrono::{Datelike, NaiveDate};

use crate::models::calendar::NavigationCursor;
use crate::models::selection::{SelectionEvent, SelectionMode, SelectionSet};
use crate::utils::date::{inclusive_days, month_days};

/// Compute the selection that results from applying `event` under `mode`.
///
/// `displayed` is the month currently on screen; Recurring mode toggles the
/// weekday cohort of that month, which is not necessarily the month of the
/// clicked date (a click on a trailing cell still targets the displayed month).
pub fn apply(
    current: &SelectionSet,
    mode: SelectionMode,
    event: SelectionEvent,
    displayed: NavigationCursor,
) -> SelectionSet {
    match event {
        SelectionEvent::Clear => SelectionSet::new(),
        SelectionEvent::Click(date) => apply_click(current, mode, date, displayed),
        SelectionEvent::DragUpdate { anchor, hovered } => match mode {
            SelectionMode::Range => range_selection(anchor, hovered),
            SelectionMode::Single | SelectionMode::Multiple | SelectionMode::Recurring => {
                current.clone()
            }
        },
    }
}

fn apply_click(
    current: &SelectionSet,
    mode: SelectionMode,
    date: NaiveDate,
    displayed: NavigationCursor,
) -> SelectionSet {
    match mode {
        SelectionMode::Single | SelectionMode::Range => SelectionSet::single(date),
        SelectionMode::Multiple => {
            let mut next = current.clone();
            next.toggle(date);
            next
        }
        SelectionMode::Recurring => {
            let mut next = current.clone();
            for day in weekday_cohort(displayed, date.weekday()) {
                next.toggle(day);
            }
            next
        }
    }
}

/// Every date between `anchor` and `hovered`, inclusive, in either direction.
pub fn range_selection(anchor: NaiveDate, hovered: NaiveDate) -> SelectionSet {
    inclusive_days(anchor, hovered).collect()
}

/// Days of the displayed month falling on `weekday`.
pub fn weekday_cohort(
    displayed: NavigationCursor,
    weekday: chrono::Weekday,
) -> impl Iterator<Item = NaiveDate> {
    month_days(displayed.year(), displayed.month()).filter(move |d| d.weekday() == weekday)
}
