mod app;
mod game_date;
mod report;
mod settings;

use crate::settings::AppSettings;
use chrono::Local;
use log::debug;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
enum CliAction {
    Run,
    Help,
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    better_panic::install();
    sensible_env_logger::init!();

    let mut settings = AppSettings::load();
    match parse_cli_args(std::env::args().skip(1), &mut settings) {
        Ok(CliAction::Run) => {}
        Ok(CliAction::Help) => {
            println!("{}", usage_text());
            return Ok(());
        }
        Ok(CliAction::Version) => {
            println!("tennis-check {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }

    debug!("settings: {settings:?}");

    let mut out = io::stdout().lock();
    if let Err(e) = app::run(&settings, Local::now(), &mut out).await {
        out.flush()?;
        debug!("run failed: {e:?}");
        eprintln!("Error fetching tennis data: {e:#}");
    }
    Ok(())
}

/// Apply command-line flags on top of `settings`. Flags win over environment.
fn parse_cli_args<I>(args: I, settings: &mut AppSettings) -> Result<CliAction, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "--debug-hours" => settings.debug_hours = flag_value(&arg, args.next())?,
            "--debug-minutes" => settings.debug_minutes = flag_value(&arg, args.next())?,
            "--snapshot" => {
                let path = args.next().ok_or_else(|| format!("Missing value for {arg}"))?;
                settings.snapshot = Some(PathBuf::from(path));
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }
    Ok(CliAction::Run)
}

fn flag_value(flag: &str, value: Option<String>) -> Result<i32, String> {
    let value = value.ok_or_else(|| format!("Missing value for {flag}"))?;
    value
        .parse()
        .map_err(|e| format!("Invalid value for {flag}: {value:?} ({e})"))
}

fn usage_text() -> &'static str {
    "tennis-check - list today's singles tennis matches from ESPN's scoreboard

Usage:
  tennis-check [--debug-hours <n>] [--debug-minutes <n>] [--snapshot <path>]
  tennis-check --help
  tennis-check --version

Options:
  --debug-hours <n>     Shift the current time by n hours before picking the date
  --debug-minutes <n>   Shift the current time by n minutes
  --snapshot <path>     Read a saved scoreboard JSON instead of calling ESPN

Environment:
  TENNIS_TIME_FORMAT      12 or 24 (default 12)
  TENNIS_ROLLOVER_HOURS   Hour the sports day rolls over (default 3)
  TENNIS_DEBUG_HOURS      Same as --debug-hours
  TENNIS_DEBUG_MINUTES    Same as --debug-minutes
  TENNIS_SCOREBOARD_URL   Scoreboard base URL (default ESPN site v2 tennis/all)
  TENNIS_SCOREBOARD_JSON  Same as --snapshot
  TENNIS_TIMEOUT_SECS     Request timeout, 0 to wait indefinitely (default 30)
  RUST_LOG                Log filter, e.g. debug"
}
