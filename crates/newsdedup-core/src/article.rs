use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timezone-less layouts accepted for `publishedAt`. Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Publication time as delivered by a feed.
///
/// Feeds send either epoch milliseconds or a date string; both shapes are
/// accepted on the wire and re-emitted unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublishedAt {
    EpochMillis(i64),
    Text(String),
}

impl PublishedAt {
    /// Epoch milliseconds for this value, or `0` when the text does not parse.
    #[must_use]
    pub fn epoch_millis(&self) -> i64 {
        match self {
            PublishedAt::EpochMillis(ms) => *ms,
            PublishedAt::Text(raw) => parse_date_millis(raw).unwrap_or(0),
        }
    }
}

impl From<&str> for PublishedAt {
    fn from(raw: &str) -> Self {
        PublishedAt::Text(raw.to_string())
    }
}

impl From<i64> for PublishedAt {
    fn from(ms: i64) -> Self {
        PublishedAt::EpochMillis(ms)
    }
}

fn parse_date_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.timestamp_millis());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// A single news item as produced by the ingestion side of the dashboard.
///
/// Fields the deduplicator does not interpret are kept in `extra` so a
/// surviving record is written back exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(
        rename = "publishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<PublishedAt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Article {
    /// Publication time in epoch milliseconds; `0` when absent or unparseable.
    #[must_use]
    pub fn published_millis(&self) -> i64 {
        self.published_at
            .as_ref()
            .map_or(0, PublishedAt::epoch_millis)
    }

    /// Number of optional descriptive fields carried: summary, sentiment label
    /// and category. The numeric sentiment score does not count.
    #[must_use]
    pub fn completeness(&self) -> u8 {
        [&self.summary, &self.sentiment, &self.category]
            .into_iter()
            .map(|field| u8::from(present(field.as_deref()).is_some()))
            .sum()
    }

    /// Feed display name, treating an empty string as absent.
    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        present(self.source.as_deref())
    }

    /// Source link, treating an empty string as absent.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        present(self.url.as_deref())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
