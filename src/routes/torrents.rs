use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::Torrent,
    routes::AppState,
    services::torrents,
};

#[derive(Debug, Deserialize)]
pub struct RemoveQuery {
    pub torrent_id: String,
    #[serde(default)]
    pub remove_data: bool,
}

#[derive(Debug, Deserialize)]
pub struct MagnetQuery {
    pub magnet_link: String,
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Torrent>>> {
    let torrents = torrents::list_torrents(state.torrents.as_ref()).await?;
    Ok(Json(torrents))
}

pub async fn pause(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(torrent_id): Path<String>,
) -> AppResult<Json<Value>> {
    tracing::info!(request_id = %request_id, torrent_id = %torrent_id, "Pausing torrent");
    torrents::pause(state.torrents.as_ref(), &torrent_id).await?;
    Ok(Json(json!({ "status": "success" })))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RemoveQuery>,
) -> AppResult<Json<Value>> {
    tracing::info!(
        request_id = %request_id,
        torrent_id = %query.torrent_id,
        remove_data = query.remove_data,
        "Removing torrent"
    );
    torrents::remove(state.torrents.as_ref(), &query.torrent_id, query.remove_data).await?;
    Ok(Json(json!({ "status": "success" })))
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<MagnetQuery>,
) -> AppResult<Json<Value>> {
    tracing::info!(request_id = %request_id, "Adding magnet link");
    let torrent_id = torrents::add_magnet(state.torrents.as_ref(), &query.magnet_link).await?;
    Ok(Json(json!({ "status": "success", "torrent_id": torrent_id })))
}
