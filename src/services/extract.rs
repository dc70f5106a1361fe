//! Defensive field access over raw Radarr/Sonarr/TMDB records.
//!
//! Upstream schemas drift between services and versions, so every accessor
//! degrades to a placeholder or `None` instead of failing on a missing key
//! or an unexpected type. Only [`extract_rating`] can fail, and only when
//! the ratings value is not a container at all.

use serde_json::Value;

use crate::{
    error::AppResult,
    models::{RatingPayload, NOT_AVAILABLE, NO_OVERVIEW, NO_TITLE, NO_YEAR},
};

/// Returns `record[key]` when it is a string
pub fn str_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

pub fn extract_title(record: &Value) -> String {
    str_field(record, "title").unwrap_or(NO_TITLE).to_string()
}

pub fn extract_overview(record: &Value) -> String {
    str_field(record, "overview")
        .unwrap_or(NO_OVERVIEW)
        .to_string()
}

/// Release year of a collection-manager record
///
/// Radarr and Sonarr send the year as an integer; a string year is accepted
/// as well. A year of `0` means the manager does not know it.
pub fn extract_year(record: &Value) -> String {
    match record.get("year") {
        Some(Value::String(year)) if !year.trim().is_empty() => year.trim().to_string(),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(year) if year > 0 => year.to_string(),
            _ => NO_YEAR.to_string(),
        },
        _ => NO_YEAR.to_string(),
    }
}

/// Year prefix of an ISO date such as TMDB's `release_date`
pub fn year_from_date(date: Option<&str>) -> String {
    date.and_then(|d| d.get(..4))
        .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .unwrap_or_else(|| NO_YEAR.to_string())
}

/// First float score inside a `ratings` value
///
/// See [`RatingPayload`] for the accepted shapes.
pub fn extract_rating(ratings: &Value) -> AppResult<Option<f64>> {
    Ok(RatingPayload::from_value(ratings)?.score())
}

/// Renders a score the way clients expect it (`7.5`, `8.0`)
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:?}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Formats a runtime in minutes as `"{h}h {m}m"`
///
/// Values that do not convert to an integer come back unchanged.
pub fn extract_runtime(minutes: &Value) -> String {
    let parsed = match minutes {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i128)),
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    };

    match (parsed, minutes) {
        (Some(total), _) => format!("{}h {}m", total.div_euclid(60), total.rem_euclid(60)),
        (None, Value::String(original)) => original.clone(),
        (None, Value::Null) => NOT_AVAILABLE.to_string(),
        (None, other) => other.to_string(),
    }
}

/// `remoteUrl` of the first image whose `coverType` is `poster`
pub fn extract_poster_url(images: &Value) -> Option<String> {
    images
        .as_array()?
        .iter()
        .find(|image| str_field(image, "coverType") == Some("poster"))
        .and_then(|image| str_field(image, "remoteUrl"))
        .map(str::to_string)
}
