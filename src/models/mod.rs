// Module exports for models

pub mod calendar;
pub mod records;
pub mod selection;
pub mod settings;
