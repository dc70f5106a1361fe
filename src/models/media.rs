use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const NO_TITLE: &str = "No title found";
pub const NO_OVERVIEW: &str = "No overview found";
pub const NO_YEAR: &str = "No year found";
pub const NOT_AVAILABLE: &str = "N/A";

/// Canonical media record returned to clients
///
/// Every field is always serialized; absent upstream values are replaced by
/// the placeholders above.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Media {
    pub name: String,
    pub synopsis: String,
    pub rating: String,
    pub length: String,
    pub thumbnail: String,
    pub watched: bool,
    pub year: String,
}

/// Movie or series, as understood by both the collection managers and TMDB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Path segment used by TMDB (`/discover/tv`, `/search/movie`, ...)
    pub fn tmdb_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    /// Resource name on Radarr/Sonarr (`/movie`, `/series`)
    pub fn arr_resource(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }

    /// Plural noun used in user-facing messages
    pub fn plural(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movies",
            MediaKind::Series => "series",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Series => write!(f, "series"),
        }
    }
}

/// Which upstream field layout a raw record follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    /// Radarr/Sonarr records (`title`, `year`, `ratings`, `images`)
    Library,
    /// TMDB discover results (`original_title`/`original_name`, `release_date`/`first_air_date`)
    Recommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_serializes_every_field() {
        let media = Media {
            name: NO_TITLE.to_string(),
            synopsis: NO_OVERVIEW.to_string(),
            rating: NOT_AVAILABLE.to_string(),
            length: NOT_AVAILABLE.to_string(),
            thumbnail: NOT_AVAILABLE.to_string(),
            watched: false,
            year: NO_YEAR.to_string(),
        };

        let json = serde_json::to_value(&media).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 7);
        assert_eq!(json["watched"], false);
        assert_eq!(json["year"], "No year found");
    }

    #[test]
    fn test_media_kind_paths() {
        assert_eq!(MediaKind::Movie.tmdb_path(), "movie");
        assert_eq!(MediaKind::Series.tmdb_path(), "tv");
        assert_eq!(MediaKind::Series.arr_resource(), "series");
        assert_eq!(MediaKind::Movie.plural(), "movies");
    }
}
