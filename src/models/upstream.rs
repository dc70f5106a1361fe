use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

// ============================================================================
// Ratings
// ============================================================================

/// Shapes a collection manager may use for its `ratings` field
///
/// Sonarr sends a single `{"votes": .., "value": 8.4}` object, Radarr keys
/// such objects by provider (`{"imdb": {..}, "tmdb": {..}}`), and some
/// lookups return a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingPayload {
    /// An object carrying a float `value`
    Score(f64),
    /// An object keyed by provider name, in upstream order
    Providers(Vec<(String, RatingPayload)>),
    List(Vec<RatingPayload>),
    /// Any nested scalar, or an integer `value`
    Unrated,
}

impl RatingPayload {
    /// Classifies a raw `ratings` value
    ///
    /// Only the top level must be an object or an array; nested scalars
    /// become [`RatingPayload::Unrated`].
    pub fn from_value(value: &Value) -> AppResult<Self> {
        match value {
            Value::Object(_) | Value::Array(_) => Ok(Self::classify(value)),
            other => Err(AppError::MalformedRecord(format!(
                "ratings must be an object or a list, got {}",
                json_type_name(other)
            ))),
        }
    }

    fn classify(value: &Value) -> Self {
        match value {
            Value::Object(map) => match map.get("value") {
                Some(Value::Number(n)) if n.is_f64() => {
                    n.as_f64().map(RatingPayload::Score).unwrap_or(RatingPayload::Unrated)
                }
                _ => RatingPayload::Providers(
                    map.iter()
                        .map(|(provider, nested)| (provider.clone(), Self::classify(nested)))
                        .collect(),
                ),
            },
            Value::Array(items) => RatingPayload::List(items.iter().map(Self::classify).collect()),
            _ => RatingPayload::Unrated,
        }
    }

    /// First float score found depth-first, left to right
    pub fn score(&self) -> Option<f64> {
        match self {
            RatingPayload::Score(value) => Some(*value),
            RatingPayload::Providers(providers) => {
                providers.iter().find_map(|(_, nested)| nested.score())
            }
            RatingPayload::List(items) => items.iter().find_map(RatingPayload::score),
            RatingPayload::Unrated => None,
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// TMDB Types
// ============================================================================

/// Entry of `/genre/{kind}/list`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GenreEntry {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<GenreEntry>,
}

/// Paged result envelope shared by `/discover` and `/search`
#[derive(Debug, Deserialize)]
pub struct PagedResults {
    #[serde(default)]
    pub results: Vec<Value>,
}

// ============================================================================
// Collection manager outcomes
// ============================================================================

/// Body sent to Radarr/Sonarr when adding a title
#[derive(Debug, Clone, PartialEq)]
pub struct AddRequest {
    pub title: String,
    /// TMDB id for movies, TVDB id for series
    pub external_id: u64,
    pub quality_profile_id: u32,
    pub root_folder: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

// ============================================================================
// Deluge / Jackett Types
// ============================================================================

/// Torrent status row as reported by `core.get_torrents_status`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Torrent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub total_size: u64,
    #[serde(default, rename(deserialize = "download_payload_rate"))]
    pub download_rate: u64,
    #[serde(default, rename(deserialize = "upload_payload_rate"))]
    pub upload_rate: u64,
    #[serde(default)]
    pub eta: i64,
}

/// Status fields requested from Deluge for every torrent
pub const TORRENT_STATUS_KEYS: [&str; 7] = [
    "name",
    "state",
    "progress",
    "total_size",
    "download_payload_rate",
    "upload_payload_rate",
    "eta",
];

/// Indexer configured in Jackett
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Indexer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub site_link: Option<String>,
    #[serde(default)]
    pub configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_object_rating() {
        let payload = RatingPayload::from_value(&json!({"votes": 120, "value": 8.4})).unwrap();
        assert_eq!(payload, RatingPayload::Score(8.4));
    }

    #[test]
    fn test_provider_keyed_rating_keeps_upstream_order() {
        let payload = RatingPayload::from_value(&json!({
            "tmdb": {"votes": 10, "value": 6.9},
            "imdb": {"votes": 99, "value": 7.8}
        }))
        .unwrap();
        assert_eq!(payload.score(), Some(6.9));
    }

    #[test]
    fn test_integer_value_is_not_a_score() {
        let payload = RatingPayload::from_value(&json!({"value": 7, "votes": 3})).unwrap();
        assert_eq!(payload.score(), None);
    }

    #[test]
    fn test_scalar_ratings_are_malformed() {
        assert!(matches!(
            RatingPayload::from_value(&Value::Null),
            Err(AppError::MalformedRecord(_))
        ));
        assert!(matches!(
            RatingPayload::from_value(&json!(7.5)),
            Err(AppError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_torrent_deserialization() {
        let json = r#"{
            "name": "Big Buck Bunny",
            "state": "Downloading",
            "progress": 42.5,
            "total_size": 276445467,
            "download_payload_rate": 1024,
            "upload_payload_rate": 0,
            "eta": 3600
        }"#;

        let torrent: Torrent = serde_json::from_str(json).unwrap();
        assert_eq!(torrent.name, "Big Buck Bunny");
        assert_eq!(torrent.download_rate, 1024);
        assert_eq!(torrent.eta, 3600);
        assert_eq!(torrent.id, "");
    }

    #[test]
    fn test_indexer_deserialization() {
        let json = r#"{
            "id": "1337x",
            "name": "1337x",
            "type": "public",
            "configured": true,
            "site_link": "https://1337x.to/",
            "language": "en-US"
        }"#;

        let indexer: Indexer = serde_json::from_str(json).unwrap();
        assert_eq!(indexer.id, "1337x");
        assert!(indexer.configured);
        assert_eq!(indexer.site_link.as_deref(), Some("https://1337x.to/"));
    }
}
