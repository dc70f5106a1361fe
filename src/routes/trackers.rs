use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{error::AppResult, models::Indexer, routes::AppState};

/// Configured Jackett indexers
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Indexer>>> {
    let indexers = state.indexers.list_indexers().await?;
    tracing::debug!(count = indexers.len(), "Listed indexers");
    Ok(Json(indexers))
}
