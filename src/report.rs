//! Console report. Every line written here is part of the tool's output
//! contract, so wording and blank lines are kept stable.

use crate::game_date::GameDate;
use crate::settings::AppSettings;
use chrono::{DateTime, TimeZone};
use log::debug;
use std::fmt::Display;
use std::io::{self, Write};
use tennis_api::{DateCount, MatchRecord, group_by_tournament};

pub fn banner<Tz, W>(out: &mut W, now: &DateTime<Tz>, game_date: &GameDate, settings: &AppSettings) -> io::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    writeln!(out, "=== Tennis Data Test Script ===")?;
    writeln!(out, "Current time: {}", now.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "Game date: {} ({})", game_date.display(), game_date.compact())?;
    writeln!(out, "Rollover hours: {}", settings.rollover_hours)?;
    writeln!(out)
}

/// `source` is the scoreboard URL, or the snapshot path when reading from disk.
pub fn fetching<W: Write>(out: &mut W, source: &str) -> io::Result<()> {
    writeln!(out, "Fetching data from: {source}")?;
    writeln!(out)
}

pub fn no_events<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "No events found for today.")
}

pub fn event_counts<W: Write>(out: &mut W, total: usize, game_date: &GameDate, matching: usize) -> io::Result<()> {
    writeln!(out, "Found {total} total events")?;
    writeln!(out)?;
    writeln!(out, "Events matching today's date ({}): {matching}", game_date.compact())?;
    writeln!(out)
}

/// One line per match: "<visiting> vs <home> - <score> (<status>)".
pub fn match_line(m: &MatchRecord) -> String {
    let tbd_flag = if m.has_tbd { " [TBD OPPONENT]" } else { "" };
    format!(
        "{} vs {} - {} ({}){tbd_flag}",
        m.visiting_player,
        m.home_player,
        m.score_label(),
        m.status_label()
    )
}

pub fn matches<W: Write>(out: &mut W, records: &[MatchRecord]) -> io::Result<()> {
    writeln!(out, "Found {} singles matches", records.len())?;
    writeln!(out)?;

    for tournament in group_by_tournament(records) {
        writeln!(out, "\n=== {} ===", tournament.name)?;
        for m in tournament.matches {
            debug!(
                "{} [{}] {}: sets {:?}, decided: {}",
                m.id,
                m.grouping,
                m.date,
                m.sets_label(),
                m.winner
            );
            writeln!(out, "{}", match_line(m))?;
        }
    }
    Ok(())
}

pub fn summary<W: Write>(out: &mut W, records: &[MatchRecord]) -> io::Result<()> {
    let tbd: Vec<&MatchRecord> = records.iter().filter(|m| m.has_tbd).collect();

    writeln!(out, "\n=== SUMMARY ===")?;
    writeln!(out, "Total matches: {}", records.len())?;
    writeln!(out, "Matches with TBD opponents: {}", tbd.len())?;

    if !tbd.is_empty() {
        writeln!(out, "\nTBD Matches:")?;
        for m in tbd {
            writeln!(out, "- {} vs {} ({})", m.visiting_player, m.home_player, m.event_name)?;
        }
    }
    Ok(())
}

pub fn date_analysis<W: Write>(out: &mut W, histogram: &[DateCount]) -> io::Result<()> {
    writeln!(out, "\n=== DATE ANALYSIS ===")?;
    writeln!(out, "Dates found in API response:")?;
    for count in histogram {
        writeln!(out, "- {}: {} events", count.label(), count.events)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn record(event: &str, visiting: &str, home: &str, scores: (&str, &str), has_tbd: bool) -> MatchRecord {
        MatchRecord {
            event_name: event.into(),
            visiting_player: visiting.into(),
            home_player: home.into(),
            home_score: scores.0.into(),
            visiting_score: scores.1.into(),
            status: "STATUS_FINAL".into(),
            status_id: "3".into(),
            has_tbd,
            ..Default::default()
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn banner_lists_time_date_and_rollover() {
        let now = Utc.with_ymd_and_hms(2025, 6, 30, 9, 5, 7).unwrap();
        let game_date = GameDate { date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap() };
        let text = render(|out| banner(out, &now, &game_date, &AppSettings::default()));
        assert_eq!(
            text,
            "=== Tennis Data Test Script ===\n\
             Current time: 2025-06-30 09:05:07\n\
             Game date: 2025-06-30 (20250630)\n\
             Rollover hours: 3\n\n"
        );
    }

    #[test]
    fn match_line_formats_score_status_and_tbd_flag() {
        let m = record("Wimbledon", "Visitor", "Home", ("6", "4"), false);
        assert_eq!(match_line(&m), "Visitor vs Home - 6-4 (STATUS_FINAL)");

        let mut open = record("Wimbledon", "TBD", "Home", ("", ""), true);
        open.status = "STATUS_SCHEDULED".into();
        open.status_id = "0".into();
        assert_eq!(match_line(&open), "TBD vs Home - No Score (TBD) [TBD OPPONENT]");
    }

    #[test]
    fn matches_are_printed_under_their_tournament() {
        let records = vec![
            record("Wimbledon", "A", "B", ("6", "4"), false),
            record("Mallorca", "C", "D", ("", ""), false),
            record("Wimbledon", "E", "F", ("7", "5"), false),
        ];
        let text = render(|out| matches(out, &records));
        assert_eq!(
            text,
            "Found 3 singles matches\n\n\
             \n=== Wimbledon ===\n\
             A vs B - 6-4 (STATUS_FINAL)\n\
             E vs F - 7-5 (STATUS_FINAL)\n\
             \n=== Mallorca ===\n\
             C vs D - No Score (STATUS_FINAL)\n"
        );
    }

    #[test]
    fn summary_lists_tbd_matches_only_when_present() {
        let clean = vec![record("Wimbledon", "A", "B", ("6", "4"), false)];
        assert_eq!(
            render(|out| summary(out, &clean)),
            "\n=== SUMMARY ===\nTotal matches: 1\nMatches with TBD opponents: 0\n"
        );

        let mixed = vec![
            record("Wimbledon", "A", "B", ("6", "4"), false),
            record("Mallorca", "TBD", "D", ("", ""), true),
        ];
        assert_eq!(
            render(|out| summary(out, &mixed)),
            "\n=== SUMMARY ===\nTotal matches: 2\nMatches with TBD opponents: 1\n\
             \nTBD Matches:\n- TBD vs D (Mallorca)\n"
        );
    }

    #[test]
    fn date_analysis_prints_each_bucket() {
        let histogram = vec![
            DateCount { date: NaiveDate::from_ymd_opt(2025, 6, 30), events: 4 },
            DateCount { date: None, events: 1 },
        ];
        assert_eq!(
            render(|out| date_analysis(out, &histogram)),
            "\n=== DATE ANALYSIS ===\nDates found in API response:\n\
             - 2025-06-30: 4 events\n- Invalid date: 1 events\n"
        );
    }
}
