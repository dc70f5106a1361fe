use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::MediaKind,
    routes::{warning, AppState},
    services::{
        recommendations::{self, GenreSelector, RecommendationOutcome},
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    /// TMDB genre id; skips the library scan and taxonomy lookup
    #[serde(default)]
    pub genre_id: Option<u32>,
}

/// Handler for movie recommendations endpoint
pub async fn recommend_movies(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Response> {
    recommend(&state, &request_id, MediaKind::Movie, query).await
}

/// Handler for series recommendations endpoint
pub async fn recommend_series(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Response> {
    recommend(&state, &request_id, MediaKind::Series, query).await
}

async fn recommend(
    state: &AppState,
    request_id: &RequestId,
    kind: MediaKind,
    query: RecommendationQuery,
) -> AppResult<Response> {
    tracing::info!(
        request_id = %request_id,
        kind = %kind,
        genre_id = ?query.genre_id,
        "Processing recommendation request"
    );

    let selector = query.genre_id.map(GenreSelector::Id);
    let library = match selector {
        Some(_) => Vec::new(),
        None => state.manager(kind).list_library().await?,
    };

    let outcome = recommendations::get_recommendations(
        state.metadata.as_ref(),
        &state.normalizer,
        &library,
        kind,
        selector,
        &state.recommendation,
    )
    .await?;

    Ok(match outcome {
        RecommendationOutcome::Found(media) => Json(media).into_response(),
        RecommendationOutcome::UnknownGenre(genre) => {
            warning(format!("No {} to recommend for: {}", kind.plural(), genre))
        }
        RecommendationOutcome::NothingToRecommend(genre) => {
            warning(format!("Nothing new to recommend for: {}", genre))
        }
        RecommendationOutcome::Unavailable(message) => {
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": message }))).into_response()
        }
    })
}
