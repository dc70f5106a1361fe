use serde_json::Value;
use std::fmt::Display;

use crate::{
    error::AppResult,
    models::{Media, MediaKind, SchemaVariant},
    services::{genres::dominant_genre, normalize::MediaNormalizer, providers::MetadataService},
};

/// How the genre driving recommendations is identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreSelector {
    /// A genre label from the library, resolved against the TMDB taxonomy
    Name(String),
    /// A TMDB genre id supplied directly; no taxonomy lookup
    Id(u32),
}

impl Display for GenreSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenreSelector::Name(name) => write!(f, "{}", name),
            GenreSelector::Id(id) => write!(f, "genre id {}", id),
        }
    }
}

/// Which discover page to read and how to sort it
#[derive(Debug, Clone)]
pub struct RecommendationOptions {
    pub page: u32,
    pub sort: String,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            page: 2,
            sort: "popularity.desc".to_string(),
        }
    }
}

/// Result of a recommendation request
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    Found(Vec<Media>),
    /// The genre does not exist in the taxonomy; discover was not called
    UnknownGenre(String),
    /// The genre resolved but discover returned nothing
    NothingToRecommend(String),
    /// The metadata service could not be reached or answered with an error
    Unavailable(String),
}

/// Maps a genre to its TMDB id
///
/// Series reuse the movie taxonomy: TMDB's movie and TV genre ids overlap
/// for every genre a library is likely to be dominated by.
pub async fn resolve_genre_id(
    metadata: &dyn MetadataService,
    selector: &GenreSelector,
    kind: MediaKind,
) -> AppResult<Option<u32>> {
    let name = match selector {
        GenreSelector::Id(id) => return Ok(Some(*id)),
        GenreSelector::Name(name) => name,
    };

    let genres = metadata.list_genres(MediaKind::Movie).await?;
    let id = genres
        .iter()
        .find(|genre| genre.name.to_lowercase() == name.to_lowercase())
        .map(|genre| genre.id);

    tracing::debug!(genre = %name, kind = %kind, id = ?id, "Genre resolved");

    Ok(id)
}

/// Candidate titles for a genre, as raw TMDB records
pub async fn fetch_recommendations(
    metadata: &dyn MetadataService,
    genre_id: u32,
    kind: MediaKind,
    options: &RecommendationOptions,
) -> AppResult<Vec<Value>> {
    metadata
        .discover(genre_id, kind, options.page, &options.sort)
        .await
}

/// Recommends titles in the library's dominant genre
///
/// With `selector` set, the library is ignored and the given genre is used.
/// Only [`crate::error::AppError::EmptyInput`] and malformed records escape
/// as errors; upstream failures become [`RecommendationOutcome::Unavailable`].
pub async fn get_recommendations(
    metadata: &dyn MetadataService,
    normalizer: &MediaNormalizer,
    library: &[Value],
    kind: MediaKind,
    selector: Option<GenreSelector>,
    options: &RecommendationOptions,
) -> AppResult<RecommendationOutcome> {
    let selector = match selector {
        Some(selector) => selector,
        None => GenreSelector::Name(dominant_genre(library)?),
    };
    let label = selector.to_string();

    let genre_id = match resolve_genre_id(metadata, &selector, kind).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            tracing::info!(genre = %label, kind = %kind, "Genre not in taxonomy");
            return Ok(RecommendationOutcome::UnknownGenre(label));
        }
        Err(e) => {
            tracing::error!(error = %e, genre = %label, "Genre resolution failed");
            return Ok(RecommendationOutcome::Unavailable(e.to_string()));
        }
    };

    let candidates = match fetch_recommendations(metadata, genre_id, kind, options).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!(error = %e, genre_id = genre_id, "Discover failed");
            return Ok(RecommendationOutcome::Unavailable(e.to_string()));
        }
    };

    let media = normalizer.normalize_all(&candidates, false, kind, SchemaVariant::Recommendation)?;

    tracing::info!(
        genre = %label,
        genre_id = genre_id,
        kind = %kind,
        results = media.len(),
        "Recommendations computed"
    );

    if media.is_empty() {
        return Ok(RecommendationOutcome::NothingToRecommend(label));
    }

    Ok(RecommendationOutcome::Found(media))
}
