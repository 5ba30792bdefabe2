//! Typed view of the statistics bundle supplied by the host page.
//!
//! Decoding is lenient on purpose: numeric leaves accept numbers, numeric
//! strings or `null`; records that cannot be coerced (missing key, wrong
//! shape) are dropped individually. Only a payload that is not JSON at all
//! fails to decode, so one bad record never blanks an entire chart.

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatisticsBundle {
    #[serde(default, deserialize_with = "lenient_keys")]
    pub years: Vec<String>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub sessions: Vec<SessionStats>,
    #[serde(
        default,
        rename = "tagComparisons",
        deserialize_with = "lenient_records"
    )]
    pub tag_comparisons: Vec<TagComparison>,
}

impl StatisticsBundle {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::Payload(format!("failed to parse statistics bundle json: {e}"))
        })
    }

    pub fn from_json_value(value: Value) -> ChartResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            ChartError::Payload(format!("failed to decode statistics bundle: {e}"))
        })
    }

    #[must_use]
    pub fn session(&self, key: &str) -> Option<&SessionStats> {
        self.sessions.iter().find(|session| session.key == key)
    }

    #[must_use]
    pub fn tag(&self, id: &str) -> Option<&TagComparison> {
        self.tag_comparisons.iter().find(|tag| tag.id == id)
    }

    #[must_use]
    pub fn latest_year(&self) -> Option<&str> {
        self.years.last().map(String::as_str)
    }
}

/// Per-session statistics: year-aligned series plus per-year metric cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    #[serde(deserialize_with = "required_key")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub series: SessionSeries,
    #[serde(default, deserialize_with = "lenient_map")]
    pub metrics: IndexMap<String, YearMetrics>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSeries {
    #[serde(default, deserialize_with = "lenient_points")]
    pub registered: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_points")]
    pub applicants: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_points")]
    pub passers: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_points")]
    pub pass_rate: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YearMetrics {
    #[serde(default, deserialize_with = "lenient_number")]
    pub registered: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub applicants: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub passers: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pass_rate: Option<f64>,
}

/// Peer ranking data for one tag, used by the comparison panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagComparison {
    #[serde(deserialize_with = "required_key")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(
        default,
        rename = "defaultSessionKey",
        deserialize_with = "optional_key"
    )]
    pub default_session_key: Option<String>,
    #[serde(default, rename = "defaultYear", deserialize_with = "optional_key")]
    pub default_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub sessions: Vec<TagSession>,
}

impl TagComparison {
    #[must_use]
    pub fn session(&self, key: &str) -> Option<&TagSession> {
        self.sessions.iter().find(|session| session.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSession {
    #[serde(deserialize_with = "required_key")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_keys")]
    pub years: Vec<String>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub metrics: IndexMap<String, PeerList>,
}

impl TagSession {
    /// Peer rows reported for `year`; empty when the year is unknown.
    #[must_use]
    pub fn peers(&self, year: &str) -> &[PeerMetrics] {
        self.metrics
            .get(year)
            .map(|list| list.0.as_slice())
            .unwrap_or_default()
    }

    /// Display label, falling back to the key when the payload has none.
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }
}

/// Ranked peer rows for one session/year bucket.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PeerList(pub Vec<PeerMetrics>);

impl Serialize for PeerList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PeerList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_records(deserializer).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PeerMetrics {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, rename = "isPrimary", deserialize_with = "lenient_bool")]
    pub is_primary: bool,
    #[serde(default, deserialize_with = "lenient_number")]
    pub registered: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub applicants: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub passers: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pass_rate: Option<f64>,
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn key_from_value(value: &Value) -> Option<String> {
    let key = match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!key.is_empty()).then_some(key)
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

fn lenient_points<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Option<f64>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.iter().map(number_from_value).collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(key_from_value(&value).unwrap_or_default())
}

fn required_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    key_from_value(&value)
        .ok_or_else(|| D::Error::custom("key must be a non-empty string or number"))
}

fn optional_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(key_from_value(&value))
}

fn lenient_keys<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.iter().filter_map(key_from_value).collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if records.len() < total {
        debug!(
            dropped = total - records.len(),
            record = std::any::type_name::<T>(),
            "dropped malformed payload records"
        );
    }
    Ok(records)
}

fn lenient_map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(IndexMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| {
            serde_json::from_value(value)
                .ok()
                .map(|parsed| (key, parsed))
        })
        .collect())
}
