use crate::game_date::GameDate;
use crate::report;
use crate::settings::AppSettings;
use chrono::{DateTime, TimeZone};
use log::{debug, info};
use std::fmt::Display;
use std::io::Write;
use tennis_api::client::{TennisApi, date_histogram, events_on, extract_singles_matches};

/// One pass: resolve the day, fetch its scoreboard, report singles matches.
///
/// Any error means the fetch (or decoding it) failed; nothing further is
/// printed for this run.
pub async fn run<Tz, W>(settings: &AppSettings, now: DateTime<Tz>, out: &mut W) -> anyhow::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    let game_date = GameDate::resolve(&now, settings);
    debug!("time format: {}h", settings.time_format);
    report::banner(out, &now, &game_date, settings)?;

    let raw = match &settings.snapshot {
        Some(path) => {
            report::fetching(out, &path.display().to_string())?;
            TennisApi::load_scoreboard_snapshot(path)?
        }
        None => {
            let api = TennisApi::new()
                .with_base_url(settings.scoreboard_url.as_str())
                .with_timeout(settings.timeout);
            report::fetching(out, &api.scoreboard_url(game_date.date))?;
            api.fetch_scoreboard(game_date.date).await?
        }
    };

    let events = raw.events.unwrap_or_default();
    if events.is_empty() {
        info!("scoreboard for {} has no events", game_date.compact());
        return Ok(report::no_events(out)?);
    }

    let todays_events = events_on(&events, game_date.date);
    report::event_counts(out, events.len(), &game_date, todays_events.len())?;

    let singles = extract_singles_matches(todays_events);
    info!(
        "{} events, {} singles matches on {}",
        events.len(),
        singles.len(),
        game_date.display()
    );

    report::matches(out, &singles)?;
    report::summary(out, &singles)?;
    report::date_analysis(out, &date_histogram(&events))?;
    Ok(())
}
