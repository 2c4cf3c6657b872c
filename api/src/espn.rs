/// ESPN API raw wire types: serde shapes for deserializing the tennis scoreboard.
/// These map to our clean domain types via the extraction functions in client.rs.
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API, sports/tennis/all)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    #[serde(default, deserialize_with = "deserialize_flex_string")]
    pub id: Option<String>,
    pub date: Option<String>, // ISO 8601, often minute precision: "2025-06-30T10:00Z"
    pub name: Option<String>, // tournament name, e.g. "Wimbledon"
    pub groupings: Option<Vec<EspnGrouping>>,
}

/// One draw inside a tournament ("Men's Singles", "Women's Doubles", ...).
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnGrouping {
    pub grouping: Option<EspnGroupingInfo>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnGroupingInfo {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    #[serde(default, deserialize_with = "deserialize_flex_string")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub competition_type: Option<EspnCompetitionType>,
    pub status: Option<EspnStatus>,
    pub competitors: Option<Vec<EspnCompetitor>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitionType {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    /// Numeric status code as a string; "0" means not yet scheduled.
    #[serde(default, deserialize_with = "deserialize_flex_string")]
    pub id: Option<String>,
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    /// `null` or missing when the draw slot is still open.
    pub athlete: Option<EspnAthlete>,
    #[serde(default, deserialize_with = "deserialize_flex_string")]
    pub score: Option<String>, // usually a string, occasionally a bare number
    pub linescores: Option<Vec<EspnLinescore>>,
    pub winner: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthlete {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLinescore {
    pub value: Option<f64>,
    pub tiebreak: Option<f64>,
    pub winner: Option<bool>,
}

/// ESPN is inconsistent about quoting ids, status codes and scores. Accept a
/// string or a number and keep it as text; `null` stays `None`.
pub fn deserialize_flex_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}
