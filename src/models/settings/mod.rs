// Settings module
// User preferences for the calendar picker, stored as TOML

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::selection::SelectionMode;

/// Language used for month names, weekday headers and mode labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode the picker starts in.
    pub default_mode: SelectionMode,
    pub locale: Locale,
    /// Open on today's month rather than the month of the first initial date.
    pub start_on_today: bool,
    /// Dates selected when the picker opens.
    pub initial_selection: Vec<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_mode: SelectionMode::Single,
            locale: Locale::En,
            start_on_today: true,
            initial_selection: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("initial selection lists {0} more than once")]
    DuplicateInitialDate(NaiveDate),
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut seen = HashSet::new();
        for date in &self.initial_selection {
            if !seen.insert(*date) {
                return Err(SettingsError::DuplicateInitialDate(*date));
            }
        }
        Ok(())
    }
}
