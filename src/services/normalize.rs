use serde_json::Value;

use crate::{
    error::AppResult,
    models::{Media, MediaKind, SchemaVariant, NOT_AVAILABLE, NO_TITLE},
    services::extract::{
        extract_overview, extract_poster_url, extract_rating, extract_runtime, extract_title,
        extract_year, format_score, str_field, year_from_date,
    },
};

/// Converts raw upstream records into [`Media`]
///
/// Holds the TMDB image prefix, which recommendation records need to build
/// a poster URL.
#[derive(Debug, Clone)]
pub struct MediaNormalizer {
    poster_base_url: String,
}

impl MediaNormalizer {
    pub fn new(poster_base_url: impl Into<String>) -> Self {
        Self {
            poster_base_url: poster_base_url.into(),
        }
    }

    /// Builds one [`Media`] from a raw record
    ///
    /// `watched` is taken as given; it is never inferred from the record.
    pub fn normalize(
        &self,
        record: &Value,
        watched: bool,
        kind: MediaKind,
        variant: SchemaVariant,
    ) -> AppResult<Media> {
        match variant {
            SchemaVariant::Library => Self::library_media(record, watched, kind),
            SchemaVariant::Recommendation => Ok(self.recommendation_media(record, watched, kind)),
        }
    }

    /// Normalizes a whole response, failing on the first malformed record
    pub fn normalize_all(
        &self,
        records: &[Value],
        watched: bool,
        kind: MediaKind,
        variant: SchemaVariant,
    ) -> AppResult<Vec<Media>> {
        records
            .iter()
            .map(|record| self.normalize(record, watched, kind, variant))
            .collect()
    }

    fn library_media(record: &Value, watched: bool, kind: MediaKind) -> AppResult<Media> {
        // A null or missing `ratings` means unrated; any other scalar is malformed
        let rating = match record.get("ratings") {
            None | Some(Value::Null) => None,
            Some(ratings) => extract_rating(ratings)?,
        };

        let length = match kind {
            MediaKind::Movie => extract_runtime(record.get("runtime").unwrap_or(&Value::Null)),
            MediaKind::Series => record
                .pointer("/statistics/episodeCount")
                .and_then(Value::as_u64)
                .map(|count| count.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        };

        Ok(Media {
            name: extract_title(record),
            synopsis: extract_overview(record),
            rating: format_score(rating),
            length,
            thumbnail: record
                .get("images")
                .and_then(extract_poster_url)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            watched,
            year: extract_year(record),
        })
    }

    fn recommendation_media(&self, record: &Value, watched: bool, kind: MediaKind) -> Media {
        let (title_key, date_key) = match kind {
            MediaKind::Movie => ("original_title", "release_date"),
            MediaKind::Series => ("original_name", "first_air_date"),
        };

        Media {
            name: str_field(record, title_key).unwrap_or(NO_TITLE).to_string(),
            synopsis: extract_overview(record),
            rating: format_score(record.get("vote_average").and_then(Value::as_f64)),
            // Discover results carry neither runtime nor episode count
            length: NOT_AVAILABLE.to_string(),
            thumbnail: str_field(record, "poster_path")
                .filter(|path| !path.is_empty())
                .map(|path| format!("{}{}", self.poster_base_url, path))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            watched,
            year: year_from_date(str_field(record, date_key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    const POSTER_BASE: &str = "https://image.tmdb.org/t/p/original";

    fn normalizer() -> MediaNormalizer {
        MediaNormalizer::new(POSTER_BASE)
    }

    fn radarr_movie() -> Value {
        json!({
            "id": 7,
            "title": "The Thing",
            "overview": "Antarctic research team meets a shape-shifter.",
            "year": 1982,
            "runtime": 109,
            "genres": ["Horror", "Science Fiction"],
            "ratings": {
                "imdb": {"votes": 450000, "value": 8.2, "type": "user"},
                "tmdb": {"votes": 6500, "value": 8.1, "type": "user"}
            },
            "images": [
                {"coverType": "fanart", "remoteUrl": "https://img/fanart.jpg"},
                {"coverType": "poster", "remoteUrl": "https://img/poster.jpg"}
            ]
        })
    }

    fn sonarr_series() -> Value {
        json!({
            "id": 3,
            "title": "Twin Peaks",
            "year": 1990,
            "ratings": {"votes": 5000, "value": 8.8},
            "statistics": {"episodeCount": 30, "seasonCount": 2},
            "images": [{"coverType": "poster", "remoteUrl": "https://img/tp.jpg"}]
        })
    }

    #[test]
    fn test_library_movie() {
        let media = normalizer()
            .normalize(&radarr_movie(), true, MediaKind::Movie, SchemaVariant::Library)
            .unwrap();

        assert_eq!(
            media,
            Media {
                name: "The Thing".to_string(),
                synopsis: "Antarctic research team meets a shape-shifter.".to_string(),
                rating: "8.2".to_string(),
                length: "1h 49m".to_string(),
                thumbnail: "https://img/poster.jpg".to_string(),
                watched: true,
                year: "1982".to_string(),
            }
        );
    }

    #[test]
    fn test_library_series_uses_episode_count() {
        let media = normalizer()
            .normalize(&sonarr_series(), true, MediaKind::Series, SchemaVariant::Library)
            .unwrap();

        assert_eq!(media.length, "30");
        assert_eq!(media.rating, "8.8");
        assert_eq!(media.synopsis, "No overview found");
    }

    #[test]
    fn test_watched_comes_from_caller() {
        let media = normalizer()
            .normalize(&radarr_movie(), false, MediaKind::Movie, SchemaVariant::Library)
            .unwrap();
        assert!(!media.watched);
    }

    #[test]
    fn test_library_record_with_nothing() {
        let media = normalizer()
            .normalize(&json!({}), true, MediaKind::Series, SchemaVariant::Library)
            .unwrap();

        assert_eq!(media.name, "No title found");
        assert_eq!(media.rating, "N/A");
        assert_eq!(media.length, "N/A");
        assert_eq!(media.thumbnail, "N/A");
        assert_eq!(media.year, "No year found");
    }

    #[test]
    fn test_library_malformed_ratings_propagate() {
        let record = json!({"title": "Broken", "ratings": "high"});
        let result =
            normalizer().normalize(&record, true, MediaKind::Movie, SchemaVariant::Library);
        assert!(matches!(result, Err(AppError::MalformedRecord(_))));
    }

    #[test]
    fn test_recommendation_movie() {
        let record = json!({
            "id": 1091,
            "original_title": "The Thing",
            "title": "The Thing (localized)",
            "overview": "Shape-shifter.",
            "vote_average": 8.1,
            "release_date": "1982-06-25",
            "poster_path": "/tzGY49kseSE9QAKk47uuDGwnSCu.jpg"
        });

        let media = normalizer()
            .normalize(&record, false, MediaKind::Movie, SchemaVariant::Recommendation)
            .unwrap();

        assert_eq!(media.name, "The Thing");
        assert_eq!(media.rating, "8.1");
        assert_eq!(media.length, "N/A");
        assert_eq!(
            media.thumbnail,
            "https://image.tmdb.org/t/p/original/tzGY49kseSE9QAKk47uuDGwnSCu.jpg"
        );
        assert_eq!(media.year, "1982");
        assert!(!media.watched);
    }

    #[test]
    fn test_recommendation_series_keys() {
        let record = json!({
            "original_name": "Dark",
            "first_air_date": "2017-12-01",
            "vote_average": 8,
            "poster_path": null
        });

        let media = normalizer()
            .normalize(&record, false, MediaKind::Series, SchemaVariant::Recommendation)
            .unwrap();

        assert_eq!(media.name, "Dark");
        assert_eq!(media.year, "2017");
        assert_eq!(media.rating, "8.0");
        assert_eq!(media.thumbnail, "N/A");
    }

    #[test]
    fn test_variant_is_explicit() {
        // A library-shaped record read with the recommendation layout finds no title
        let media = normalizer()
            .normalize(&radarr_movie(), false, MediaKind::Movie, SchemaVariant::Recommendation)
            .unwrap();
        assert_eq!(media.name, "No title found");
        assert_eq!(media.length, "N/A");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let record = radarr_movie();
        let first = normalizer()
            .normalize(&record, true, MediaKind::Movie, SchemaVariant::Library)
            .unwrap();
        let second = normalizer()
            .normalize(&record, true, MediaKind::Movie, SchemaVariant::Library)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let records = vec![radarr_movie(), json!({"title": "Second"})];
        let media = normalizer()
            .normalize_all(&records, true, MediaKind::Movie, SchemaVariant::Library)
            .unwrap();
        assert_eq!(media.len(), 2);
        assert_eq!(media[1].name, "Second");
    }
}
