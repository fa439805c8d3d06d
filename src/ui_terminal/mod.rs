//! Terminal front end: a text month view and a line-oriented script runner.

pub mod render;
pub mod script;

pub use render::render_month;
pub use script::{parse_script, Command, ScriptError, ScriptRunner};
