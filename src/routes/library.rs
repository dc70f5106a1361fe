use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{AddOutcome, MediaKind, RemoveOutcome},
    routes::{success, warning, AppState},
    services::library,
};

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
    #[serde(default)]
    pub year: Option<u32>,
}

pub async fn get_movies(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    list_media(&state, MediaKind::Movie).await
}

pub async fn get_series(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    list_media(&state, MediaKind::Series).await
}

pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Response> {
    search_media(&state, MediaKind::Movie, &query.title).await
}

pub async fn search_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Response> {
    search_media(&state, MediaKind::Series, &query.title).await
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Response> {
    add_media(&state, &request_id, MediaKind::Movie, query).await
}

pub async fn add_series(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Response> {
    add_media(&state, &request_id, MediaKind::Series, query).await
}

pub async fn remove_movie(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Response> {
    remove_media(&state, &request_id, MediaKind::Movie, &query.title).await
}

pub async fn remove_series(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Response> {
    remove_media(&state, &request_id, MediaKind::Series, &query.title).await
}

async fn list_media(state: &AppState, kind: MediaKind) -> AppResult<Response> {
    let media = library::list(state.manager(kind), &state.normalizer).await?;
    if media.is_empty() {
        return Ok(warning(format!("No {} found", kind.plural())));
    }
    Ok(Json(media).into_response())
}

async fn search_media(state: &AppState, kind: MediaKind, title: &str) -> AppResult<Response> {
    let media = library::search(state.manager(kind), &state.normalizer, title).await?;
    if media.is_empty() {
        return Ok(warning(format!("No {} found", kind.plural())));
    }
    Ok(Json(media).into_response())
}

async fn add_media(
    state: &AppState,
    request_id: &RequestId,
    kind: MediaKind,
    query: TitleQuery,
) -> AppResult<Response> {
    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        kind = %kind,
        "Processing add request"
    );

    let outcome = library::add(
        state.manager(kind),
        state.metadata.as_ref(),
        &query.title,
        query.year,
        &state.add_settings,
    )
    .await?;

    match outcome {
        AddOutcome::Added => Ok(success(format!(
            "{} {} added to watchlist",
            capitalized(kind),
            query.title.trim()
        ))),
        AddOutcome::AlreadyPresent => Err(AppError::Conflict(format!(
            "{} already in watchlist or invalid title",
            capitalized(kind)
        ))),
    }
}

async fn remove_media(
    state: &AppState,
    request_id: &RequestId,
    kind: MediaKind,
    title: &str,
) -> AppResult<Response> {
    tracing::info!(
        request_id = %request_id,
        title = %title,
        kind = %kind,
        "Processing remove request"
    );

    match library::remove(state.manager(kind), title).await? {
        RemoveOutcome::Removed => Ok(success(format!(
            "{} removed from watch list",
            capitalized(kind)
        ))),
        RemoveOutcome::NotFound => Err(AppError::NotFound(format!(
            "{} not found",
            capitalized(kind)
        ))),
    }
}

fn capitalized(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "Movie",
        MediaKind::Series => "Series",
    }
}
