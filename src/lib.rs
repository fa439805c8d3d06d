// Secretaria Library
// Calendar date-selection engine and secretariat records core

pub mod models;
pub mod services;
pub mod ui_terminal;
pub mod utils;
