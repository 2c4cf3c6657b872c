use crate::espn::{EspnCompetition, EspnCompetitor, EspnEvent, EspnGrouping, ScoreboardResponse};
use crate::{DateCount, Linescore, MatchRecord, TBD};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::America::New_York;
use log::debug;
use reqwest::Client;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_TENNIS_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/tennis/all";
/// ESPN caps the scoreboard page; 200 covers a full day of a Grand Slam.
const SCOREBOARD_LIMIT: u32 = 200;

/// Tennis scoreboard client backed by ESPN's public endpoints.
#[derive(Debug, Clone)]
pub struct TennisApi {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for TennisApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("tennis-check/0.1 (scoreboard diagnostic)")
                .build()
                .unwrap_or_default(),
            base_url: ESPN_TENNIS_SITE_V2.to_owned(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Snapshot(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Snapshot(msg) => write!(f, "Snapshot error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Parsing(e, _) => Some(e),
            ApiError::Snapshot(_) => None,
        }
    }
}

impl TennisApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host serving the same scoreboard path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// `None` waits for the response indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn scoreboard_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/scoreboard?dates={}&limit={SCOREBOARD_LIMIT}",
            self.base_url,
            date.format("%Y%m%d")
        )
    }

    /// Fetch every tennis event ESPN lists for `date`. One request, no retry.
    pub async fn fetch_scoreboard(&self, date: NaiveDate) -> ApiResult<ScoreboardResponse> {
        let url = self.scoreboard_url(date);
        self.get(&url).await
    }

    /// Read a scoreboard saved from the same endpoint.
    pub fn load_scoreboard_snapshot(path: &Path) -> ApiResult<ScoreboardResponse> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Snapshot(format!("could not read {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| ApiError::Snapshot(format!("invalid scoreboard json at {}: {e}", path.display())))
    }

    /// The body is decoded whatever the status: an error page that is not
    /// scoreboard JSON fails as `Parsing`, a JSON one decodes like any other.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let status = response.status();
        if !status.is_success() {
            debug!("{url} answered {status}");
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Event dates
// ---------------------------------------------------------------------------

/// Parse an ESPN timestamp. Accepts RFC 3339 and the minute-precision
/// "2025-06-30T10:00Z" that the scoreboard actually sends.
pub fn parse_event_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Calendar date of an event in New York, where ESPN's scoreboard day is cut.
/// A bare "YYYY-MM-DD" is taken as already being a New York date.
pub fn event_calendar_date(raw: &str) -> Option<NaiveDate> {
    parse_event_timestamp(raw)
        .map(|dt| dt.with_timezone(&New_York).date_naive())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

fn event_date(event: &EspnEvent) -> Option<NaiveDate> {
    event.date.as_deref().and_then(event_calendar_date)
}

/// Events whose New York calendar date is `date`, in response order.
pub fn events_on(events: &[EspnEvent], date: NaiveDate) -> Vec<&EspnEvent> {
    events
        .iter()
        .filter(|event| event_date(event) == Some(date))
        .collect()
}

/// Count raw events per New York calendar date, dates in first-seen order.
/// Unreadable timestamps share one `None` bucket, so the counts always add
/// up to `events.len()`.
pub fn date_histogram(events: &[EspnEvent]) -> Vec<DateCount> {
    let mut counts: Vec<DateCount> = Vec::new();
    for date in events.iter().map(event_date) {
        match counts.iter_mut().find(|c| c.date == date) {
            Some(count) => count.events += 1,
            None => counts.push(DateCount { date, events: 1 }),
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

/// Walk event → grouping → competition and keep the singles matches.
pub fn extract_singles_matches<'a, I>(events: I) -> Vec<MatchRecord>
where
    I: IntoIterator<Item = &'a EspnEvent>,
{
    let mut matches = Vec::new();
    for event in events {
        for grouping in event.groupings.as_deref().unwrap_or_default() {
            for competition in grouping.competitions.as_deref().unwrap_or_default() {
                if let Some(record) = map_singles_match(event, grouping, competition) {
                    matches.push(record);
                }
            }
        }
    }
    matches
}

fn contains_doubles(s: Option<&str>) -> bool {
    s.map(|s| s.to_lowercase().contains("doubles")).unwrap_or(false)
}

/// Doubles draws are recognised by the grouping name, or by the competition
/// type's name or abbreviation. A competition without a type is not doubles.
pub fn is_doubles(grouping: &EspnGrouping, competition: &EspnCompetition) -> bool {
    let grouping_name = grouping.grouping.as_ref().and_then(|g| g.name.as_deref());
    if contains_doubles(grouping_name) {
        return true;
    }
    competition
        .competition_type
        .as_ref()
        .map(|t| contains_doubles(t.name.as_deref()) || contains_doubles(t.abbreviation.as_deref()))
        .unwrap_or(false)
}

fn map_singles_match(
    event: &EspnEvent,
    grouping: &EspnGrouping,
    competition: &EspnCompetition,
) -> Option<MatchRecord> {
    let competitors = competition.competitors.as_deref().unwrap_or_default();
    let [first, second] = competitors else {
        debug!(
            "skipping competition {:?}: {} competitors",
            competition.id,
            competitors.len()
        );
        return None;
    };
    if is_doubles(grouping, competition) {
        debug!("skipping doubles competition {:?}", competition.id);
        return None;
    }

    let (home, visiting) = split_home_visiting(first, second);

    let status_type = competition.status.as_ref().and_then(|s| s.status_type.as_ref());

    Some(MatchRecord {
        id: competition.id.clone().unwrap_or_default(),
        date: event.date.clone().unwrap_or_default(),
        event_name: event.name.clone().unwrap_or_else(|| "Unknown".into()),
        grouping: grouping
            .grouping
            .as_ref()
            .and_then(|g| g.name.clone())
            .unwrap_or_else(|| "Unknown".into()),
        status: status_type
            .and_then(|t| t.name.clone())
            .unwrap_or_else(|| "Unknown".into()),
        status_id: status_type.and_then(|t| t.id.clone()).unwrap_or_default(),
        home_player: player_name(home),
        visiting_player: player_name(visiting),
        home_score: home.score.clone().unwrap_or_default(),
        visiting_score: visiting.score.clone().unwrap_or_default(),
        home_linescores: map_linescores(home),
        visiting_linescores: map_linescores(visiting),
        winner: home.winner.unwrap_or(false) || visiting.winner.unwrap_or(false),
        has_tbd: is_tbd(home) || is_tbd(visiting),
    })
}

/// The first competitor is home unless it is marked "away".
fn split_home_visiting<'a>(
    first: &'a EspnCompetitor,
    second: &'a EspnCompetitor,
) -> (&'a EspnCompetitor, &'a EspnCompetitor) {
    if first.home_away.as_deref() == Some("away") {
        (second, first)
    } else {
        (first, second)
    }
}

fn player_name(c: &EspnCompetitor) -> String {
    c.athlete
        .as_ref()
        .and_then(|a| a.display_name.clone())
        .unwrap_or_else(|| TBD.into())
}

fn is_tbd(c: &EspnCompetitor) -> bool {
    match &c.athlete {
        None => true,
        Some(a) => a.display_name.as_deref().unwrap_or(TBD) == TBD,
    }
}

fn map_linescores(c: &EspnCompetitor) -> Vec<Linescore> {
    c.linescores
        .iter()
        .flatten()
        .map(|l| Linescore {
            value: l.value,
            tiebreak: l.tiebreak,
            winner: l.winner,
        })
        .collect()
}
