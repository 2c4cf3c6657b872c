use log::warn;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tennis_api::client::ESPN_TENNIS_SITE_V2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFormat {
    #[default]
    Twelve,
    TwentyFour,
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "12" => Ok(TimeFormat::Twelve),
            "24" => Ok(TimeFormat::TwentyFour),
            other => Err(format!("expected 12 or 24, got {other:?}")),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::Twelve => write!(f, "12"),
            TimeFormat::TwentyFour => write!(f, "24"),
        }
    }
}

/// Run configuration. Mirrors the scoreboard module's options; only the debug
/// offsets change what gets fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Clock style of the parent display. Not used by the report.
    pub time_format: TimeFormat,
    /// Hour at which the sports day rolls over. Printed, not applied.
    pub rollover_hours: i32,
    pub debug_hours: i32,
    pub debug_minutes: i32,
    pub scoreboard_url: String,
    /// Local scoreboard JSON to use instead of the network.
    pub snapshot: Option<PathBuf>,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::Twelve,
            rollover_hours: 3,
            debug_hours: 0,
            debug_minutes: 0,
            scoreboard_url: ESPN_TENNIS_SITE_V2.to_owned(),
            snapshot: None,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_env(|key| std::env::var(key).ok())
    }

    /// Build settings from environment-style lookups. Malformed values are
    /// logged and left at their defaults.
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("TENNIS_TIME_FORMAT") {
            set_parsed(&mut settings.time_format, "TENNIS_TIME_FORMAT", &v);
        }
        if let Some(v) = var("TENNIS_ROLLOVER_HOURS") {
            set_parsed(&mut settings.rollover_hours, "TENNIS_ROLLOVER_HOURS", &v);
        }
        if let Some(v) = var("TENNIS_DEBUG_HOURS") {
            set_parsed(&mut settings.debug_hours, "TENNIS_DEBUG_HOURS", &v);
        }
        if let Some(v) = var("TENNIS_DEBUG_MINUTES") {
            set_parsed(&mut settings.debug_minutes, "TENNIS_DEBUG_MINUTES", &v);
        }
        if let Some(v) = var("TENNIS_SCOREBOARD_URL") {
            settings.scoreboard_url = v.trim().to_owned();
        }
        if let Some(v) = var("TENNIS_SCOREBOARD_JSON") {
            settings.snapshot = Some(PathBuf::from(v));
        }
        if let Some(v) = var("TENNIS_TIMEOUT_SECS") {
            let mut secs = settings.timeout.map(|t| t.as_secs()).unwrap_or(0);
            set_parsed(&mut secs, "TENNIS_TIMEOUT_SECS", &v);
            settings.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        settings
    }
}

fn set_parsed<T>(slot: &mut T, key: &str, raw: &str)
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(e) => warn!("ignoring {key}={raw:?}: {e}"),
    }
}
