pub mod client;
pub mod espn;

use chrono::NaiveDate;

/// Player name substituted for an open draw slot.
pub const TBD: &str = "TBD";

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// A singles match summarised from one ESPN competition.
///
/// "home" is the side whose `homeAway` was not "away"; "visiting" is the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecord {
    pub id: String,
    pub date: String, // raw event timestamp
    pub event_name: String,
    pub grouping: String, // "Men's Singles", "Women's Singles", ...
    pub status: String,
    pub status_id: String, // "0" = not scheduled yet
    pub home_player: String,
    pub visiting_player: String,
    pub home_score: String,
    pub visiting_score: String,
    pub home_linescores: Vec<Linescore>,
    pub visiting_linescores: Vec<Linescore>,
    pub winner: bool, // either side flagged as winner
    pub has_tbd: bool,
}

impl MatchRecord {
    /// Status as shown in the report: unscheduled matches read "TBD".
    pub fn status_label(&self) -> &str {
        if self.status_id == "0" { TBD } else { &self.status }
    }

    /// "home-visiting", or "No Score" unless both sides have one.
    pub fn score_label(&self) -> String {
        if self.home_score.is_empty() || self.visiting_score.is_empty() {
            "No Score".to_owned()
        } else {
            format!("{}-{}", self.home_score, self.visiting_score)
        }
    }

    /// Set-by-set score, e.g. "6-4 7-6(5)".
    pub fn sets_label(&self) -> String {
        self.home_linescores
            .iter()
            .zip(&self.visiting_linescores)
            .map(|(h, v)| {
                let mut set = format!("{}-{}", h.games(), v.games());
                if let Some(tb) = h.tiebreak.zip(v.tiebreak).map(|(a, b)| a.min(b)) {
                    set.push_str(&format!("({tb})"));
                }
                set
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Linescore {
    pub value: Option<f64>,
    pub tiebreak: Option<f64>,
    pub winner: Option<bool>,
}

impl Linescore {
    fn games(&self) -> String {
        self.value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
    }
}

/// Matches of one tournament, in the order they were encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentGroup<'a> {
    pub name: &'a str,
    pub matches: Vec<&'a MatchRecord>,
}

/// Group records by event name. Tournaments keep first-seen order and each
/// keeps its matches in encounter order.
pub fn group_by_tournament(records: &[MatchRecord]) -> Vec<TournamentGroup<'_>> {
    let mut groups: Vec<TournamentGroup<'_>> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.name == record.event_name) {
            Some(group) => group.matches.push(record),
            None => groups.push(TournamentGroup {
                name: &record.event_name,
                matches: vec![record],
            }),
        }
    }
    groups
}

/// How many raw events fall on one New York calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCount {
    /// `None` when the event timestamp could not be read.
    pub date: Option<NaiveDate>,
    pub events: usize,
}

impl DateCount {
    pub fn label(&self) -> String {
        match self.date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => "Invalid date".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event: &str, id: &str) -> MatchRecord {
        MatchRecord {
            id: id.into(),
            event_name: event.into(),
            ..Default::default()
        }
    }

    #[test]
    fn status_label_shows_tbd_for_code_zero() {
        let mut m = MatchRecord { status: "STATUS_SCHEDULED".into(), status_id: "0".into(), ..Default::default() };
        assert_eq!(m.status_label(), "TBD");
        m.status_id = "1".into();
        assert_eq!(m.status_label(), "STATUS_SCHEDULED");
    }

    #[test]
    fn score_label_needs_both_scores() {
        let mut m = MatchRecord { home_score: "6".into(), visiting_score: "4".into(), ..Default::default() };
        assert_eq!(m.score_label(), "6-4");
        m.visiting_score.clear();
        assert_eq!(m.score_label(), "No Score");
    }

    #[test]
    fn sets_label_includes_tiebreak_loser_points() {
        let set = |value, tiebreak| Linescore { value: Some(value), tiebreak, winner: None };
        let m = MatchRecord {
            home_linescores: vec![set(6.0, None), set(7.0, Some(7.0))],
            visiting_linescores: vec![set(4.0, None), set(6.0, Some(5.0))],
            ..Default::default()
        };
        assert_eq!(m.sets_label(), "6-4 7-6(5)");
    }

    #[test]
    fn grouping_is_stable_and_keeps_first_seen_order() {
        let records = vec![
            record("Wimbledon", "1"),
            record("Mallorca", "2"),
            record("Wimbledon", "3"),
            record("Eastbourne", "4"),
            record("Mallorca", "5"),
        ];
        let groups = group_by_tournament(&records);
        let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, ["Wimbledon", "Mallorca", "Eastbourne"]);

        let ids: Vec<&str> = groups[0].matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        let ids: Vec<&str> = groups[1].matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["2", "5"]);

        let total: usize = groups.iter().map(|g| g.matches.len()).sum();
        assert_eq!(total, records.len());
        assert!(std::ptr::eq(groups[0].matches[1], &records[2]));
    }

    #[test]
    fn date_count_label() {
        let known = DateCount { date: NaiveDate::from_ymd_opt(2025, 6, 30), events: 2 };
        assert_eq!(known.label(), "2025-06-30");
        let unknown = DateCount { date: None, events: 1 };
        assert_eq!(unknown.label(), "Invalid date");
    }
}
