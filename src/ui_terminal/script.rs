//! Line-oriented interaction scripts for driving a [`CalendarEngine`] without a GUI.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::models::selection::{ParseSelectionModeError, SelectionMode};
use crate::models::settings::Locale;
use crate::services::calendar::CalendarEngine;
use crate::utils::date::{format_iso_date, parse_iso_date};

use super::render::render_month;

/// One scripted interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Mode(SelectionMode),
    Click(NaiveDate),
    Down(NaiveDate),
    Enter(NaiveDate),
    Up,
    Leave,
    Clear,
    Prev,
    Next,
    Goto { year: i32, month: u32 },
    Show,
}

impl Command {
    fn takes_argument(&self) -> bool {
        matches!(
            self,
            Command::Mode(_)
                | Command::Click(_)
                | Command::Down(_)
                | Command::Enter(_)
                | Command::Goto { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: '{command}' expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },
    #[error("line {line}: invalid date '{value}' (use YYYY-MM-DD)")]
    InvalidDate { line: usize, value: String },
    #[error("line {line}: invalid month '{value}' (use YYYY-MM)")]
    InvalidMonth { line: usize, value: String },
    #[error("line {line}: unexpected argument '{value}' after '{command}'")]
    UnexpectedArgument {
        line: usize,
        command: String,
        value: String,
    },
    #[error("line {line}: {source}")]
    InvalidMode {
        line: usize,
        #[source]
        source: ParseSelectionModeError,
    },
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Command>, ScriptError> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default().to_ascii_lowercase();
    let argument = parts.next();

    let missing = |expected: &'static str| ScriptError::MissingArgument {
        line: line_no,
        command: command.clone(),
        expected,
    };
    let date_arg = |value: Option<&str>| -> Result<NaiveDate, ScriptError> {
        let value = value.ok_or_else(|| missing("a date"))?;
        parse_iso_date(value).map_err(|_| ScriptError::InvalidDate {
            line: line_no,
            value: value.to_string(),
        })
    };

    let parsed = match command.as_str() {
        "mode" => {
            let value = argument.ok_or_else(|| missing("a mode name"))?;
            let mode = value
                .parse::<SelectionMode>()
                .map_err(|source| ScriptError::InvalidMode {
                    line: line_no,
                    source,
                })?;
            Command::Mode(mode)
        }
        "click" => Command::Click(date_arg(argument)?),
        "down" => Command::Down(date_arg(argument)?),
        "enter" => Command::Enter(date_arg(argument)?),
        "up" => Command::Up,
        "leave" => Command::Leave,
        "clear" => Command::Clear,
        "prev" => Command::Prev,
        "next" => Command::Next,
        "goto" => {
            let value = argument.ok_or_else(|| missing("a month"))?;
            let (year, month) =
                parse_year_month(value).ok_or_else(|| ScriptError::InvalidMonth {
                    line: line_no,
                    value: value.to_string(),
                })?;
            Command::Goto { year, month }
        }
        "show" => Command::Show,
        _ => {
            return Err(ScriptError::UnknownCommand {
                line: line_no,
                command: command.clone(),
            })
        }
    };

    let leftover = if parsed.takes_argument() {
        parts.next()
    } else {
        argument
    };
    if let Some(value) = leftover {
        return Err(ScriptError::UnexpectedArgument {
            line: line_no,
            command,
            value: value.to_string(),
        });
    }
    Ok(Some(parsed))
}

/// `YYYY-MM` within the range of years a calendar date can hold.
fn parse_year_month(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((year, month))
}

/// Parse a whole script, stopping at the first malformed line.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(idx + 1, line)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Runs commands against an engine, printing every publication as a JSON array.
pub struct ScriptRunner {
    engine: CalendarEngine,
    locale: Locale,
    today: NaiveDate,
    pending: Rc<RefCell<Vec<Vec<NaiveDate>>>>,
}

impl ScriptRunner {
    pub fn new(mut engine: CalendarEngine, locale: Locale, today: NaiveDate) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        engine.subscribe(move |dates: &[NaiveDate]| sink.borrow_mut().push(dates.to_vec()));
        Self {
            engine,
            locale,
            today,
            pending,
        }
    }

    pub fn engine(&self) -> &CalendarEngine {
        &self.engine
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Mode(mode) => self.engine.set_mode(mode),
            Command::Click(date) => self.engine.click(date),
            Command::Down(date) => self.engine.pointer_down(date),
            Command::Enter(date) => self.engine.pointer_enter(date),
            Command::Up => self.engine.pointer_up(),
            Command::Leave => self.engine.pointer_leave(),
            Command::Clear => self.engine.clear(),
            Command::Prev => self.engine.prev_month(),
            Command::Next => self.engine.next_month(),
            Command::Goto { year, month } => self.engine.go_to(year, month),
            Command::Show => {
                let text = render_month(&self.engine, self.locale, self.today);
                out.write_all(text.as_bytes())
                    .context("Failed to write calendar")?;
            }
        }
        self.flush_publications(out)
    }

    pub fn run(&mut self, commands: &[Command], out: &mut impl Write) -> Result<()> {
        for command in commands {
            self.execute(*command, out)?;
        }
        Ok(())
    }

    fn flush_publications(&mut self, out: &mut impl Write) -> Result<()> {
        let published: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        for dates in published {
            let iso: Vec<String> = dates.into_iter().map(format_iso_date).collect();
            let line = serde_json::to_string(&iso).context("Failed to encode selection")?;
            writeln!(out, "{}", line).context("Failed to write selection")?;
        }
        Ok(())
    }
}
