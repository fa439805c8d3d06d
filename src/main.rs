// Secretaria calendar picker
// Drives the selection engine from a command script (file argument or stdin)

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::Local;

use secretaria::services::calendar::CalendarEngine;
use secretaria::services::settings::SettingsService;
use secretaria::ui_terminal::{parse_script, ScriptRunner};

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting Secretaria calendar picker");

    let settings = match SettingsService::from_default_location() {
        Ok(service) => {
            log::debug!("Loading settings from {}", service.path().display());
            service.get_or_default()
        }
        Err(e) => {
            log::warn!("{:#}, using default settings", e);
            Default::default()
        }
    };

    let script = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read script {}", path))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read script from stdin")?;
            text
        }
    };
    let commands = parse_script(&script)?;
    log::info!("Running {} command(s)", commands.len());

    let today = Local::now().date_naive();
    let engine = CalendarEngine::from_settings(&settings, today);
    let mut runner = ScriptRunner::new(engine, settings.locale, today);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    runner.run(&commands, &mut out)
}
