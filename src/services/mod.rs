// Service module exports

pub mod calendar;
pub mod records;
pub mod secretariat;
pub mod settings;
