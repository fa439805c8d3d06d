//! Plain-text month view.
//!
//! Each day takes four columns: a `>` marker for today, the day number,
//! then `*` when selected or `.` when the day belongs to an adjacent month.

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};

use crate::models::calendar::{weekday_headers, CalendarCell};
use crate::models::settings::Locale;
use crate::services::calendar::{weeks, CalendarEngine};

/// Render the engine's displayed month as text, one week per line.
pub fn render_month(engine: &CalendarEngine, locale: Locale, today: NaiveDate) -> String {
    let mut out = String::new();
    let cursor = engine.cursor();

    let _ = writeln!(out, "{}", cursor.title(locale));
    let mode_caption = match locale {
        Locale::En => "Mode",
        Locale::PtBr => "Modo",
    };
    let _ = writeln!(out, "{}: {}", mode_caption, engine.mode().label(locale));
    if let Some(summary) = engine.selection().summary(locale) {
        let _ = writeln!(out, "{}", summary);
    }

    let header: String = weekday_headers(locale)
        .iter()
        .map(|name| format!("{:>4}", name))
        .collect();
    let _ = writeln!(out, "{}", header);

    let cells = engine.cells(today);
    for week in weeks(&cells) {
        let row: String = week.iter().map(render_cell).collect();
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out
}

fn render_cell(cell: &CalendarCell) -> String {
    let marker = if cell.today { '>' } else { ' ' };
    let suffix = if cell.selected {
        '*'
    } else if !cell.day.in_current_month {
        '.'
    } else {
        ' '
    };
    format!("{}{:>2}{}", marker, cell.day.date.day(), suffix)
}
