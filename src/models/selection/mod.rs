//! Selection model for the calendar date picker.
//!
//! A selection is a set of date-only values ([`NaiveDate`]), so two selections
//! agree whenever their year/month/day triples agree, regardless of the
//! timezone the host application lives in.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::settings::Locale;

/// How a click on a day cell changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// A click replaces the selection with the clicked day.
    #[default]
    Single,
    /// A click toggles the clicked day.
    Multiple,
    /// Pointer drag selects a contiguous interval of days.
    Range,
    /// A click toggles every same-weekday day of the displayed month.
    Recurring,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 4] = [
        SelectionMode::Single,
        SelectionMode::Multiple,
        SelectionMode::Range,
        SelectionMode::Recurring,
    ];

    /// Stable lower-case identifier used in settings files and scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Single => "single",
            SelectionMode::Multiple => "multiple",
            SelectionMode::Range => "range",
            SelectionMode::Recurring => "recurring",
        }
    }

    /// Button label for the mode picker.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, SelectionMode::Single) => "Single Date",
            (Locale::En, SelectionMode::Multiple) => "Multiple Dates",
            (Locale::En, SelectionMode::Range) => "Range (Drag)",
            (Locale::En, SelectionMode::Recurring) => "Recurring Weekdays",
            (Locale::PtBr, SelectionMode::Single) => "Seleção Única",
            (Locale::PtBr, SelectionMode::Multiple) => "Múltiplas Datas",
            (Locale::PtBr, SelectionMode::Range) => "Intervalo (Arrastar)",
            (Locale::PtBr, SelectionMode::Recurring) => "Dias Recorrentes",
        }
    }

    /// Whether this mode is driven by pointer drags rather than clicks.
    pub fn uses_drag(&self) -> bool {
        matches!(self, SelectionMode::Range)
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown selection mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection mode '{0}' (expected single, multiple, range or recurring)")]
pub struct ParseSelectionModeError(pub String);

impl FromStr for SelectionMode {
    type Err = ParseSelectionModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(SelectionMode::Single),
            "multiple" => Ok(SelectionMode::Multiple),
            "range" => Ok(SelectionMode::Range),
            "recurring" => Ok(SelectionMode::Recurring),
            other => Err(ParseSelectionModeError(other.to_string())),
        }
    }
}

/// A discrete input to the selection policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Click(NaiveDate),
    DragUpdate { anchor: NaiveDate, hovered: NaiveDate },
    Clear,
}

/// Set of selected calendar dates, iterated in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    dates: BTreeSet<NaiveDate>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(date: NaiveDate) -> Self {
        let mut set = Self::new();
        set.insert(date);
        set
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Returns true when the date was not already selected.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    /// Returns true when the date was selected.
    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.dates.remove(&date)
    }

    /// Flip membership of `date`. Returns true when the date ends up selected.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.dates.remove(&date) {
            false
        } else {
            self.dates.insert(date);
            true
        }
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Materialize the selection as an ascending list.
    pub fn to_vec(&self) -> Vec<NaiveDate> {
        self.dates.iter().copied().collect()
    }

    /// Short summary for a badge, e.g. "3 dates selected".
    pub fn summary(&self, locale: Locale) -> Option<String> {
        let count = self.len();
        if count == 0 {
            return None;
        }
        let plural = count > 1;
        Some(match locale {
            Locale::En => format!("{} date{} selected", count, if plural { "s" } else { "" }),
            Locale::PtBr => {
                let s = if plural { "s" } else { "" };
                format!("{} data{} selecionada{}", count, s, s)
            }
        })
    }
}

impl FromIterator<NaiveDate> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl Extend<NaiveDate> for SelectionSet {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        self.dates.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a NaiveDate;
    type IntoIter = std::collections::btree_set::Iter<'a, NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mode_round_trips_through_str() {
        for mode in SelectionMode::ALL {
            assert_eq!(mode.as_str().parse::<SelectionMode>(), Ok(mode));
        }
        assert_eq!("RANGE".parse::<SelectionMode>(), Ok(SelectionMode::Range));
        assert!("weekly".parse::<SelectionMode>().is_err());
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        let json = serde_json::to_string(&SelectionMode::Recurring).unwrap();
        assert_eq!(json, "\"recurring\"");
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(SelectionMode::Range.label(Locale::PtBr), "Intervalo (Arrastar)");
        assert_eq!(SelectionMode::Single.label(Locale::En), "Single Date");
        assert!(SelectionMode::Range.uses_drag());
        assert!(!SelectionMode::Recurring.uses_drag());
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut set = SelectionSet::new();
        assert!(set.toggle(ymd(2025, 1, 1)));
        assert!(set.contains(ymd(2025, 1, 1)));
        assert!(!set.toggle(ymd(2025, 1, 1)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let set: SelectionSet = [ymd(2025, 3, 1), ymd(2024, 12, 31), ymd(2025, 1, 15)]
            .into_iter()
            .collect();
        assert_eq!(
            set.to_vec(),
            vec![ymd(2024, 12, 31), ymd(2025, 1, 15), ymd(2025, 3, 1)]
        );
        assert_eq!(set.first(), Some(ymd(2024, 12, 31)));
        assert_eq!(set.last(), Some(ymd(2025, 3, 1)));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set: SelectionSet = [ymd(2025, 1, 1), ymd(2025, 1, 1)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_summary() {
        let mut set = SelectionSet::new();
        assert_eq!(set.summary(Locale::En), None);
        set.insert(ymd(2025, 1, 1));
        assert_eq!(set.summary(Locale::PtBr).as_deref(), Some("1 data selecionada"));
        set.insert(ymd(2025, 1, 2));
        assert_eq!(set.summary(Locale::PtBr).as_deref(), Some("2 datas selecionadas"));
        assert_eq!(set.summary(Locale::En).as_deref(), Some("2 dates selected"));
    }

    #[test]
    fn test_serializes_as_iso_list() {
        let set: SelectionSet = [ymd(2025, 1, 2), ymd(2025, 1, 1)].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[\"2025-01-01\",\"2025-01-02\"]");
    }
}
