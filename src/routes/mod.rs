use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    error::AppResult,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    models::MediaKind,
    services::{
        library::AddSettings,
        providers::{
            http::client_with_timeout, ArrClient, CollectionManager, DelugeClient, IndexerProxy,
            JackettClient, MetadataService, TmdbClient, TorrentDaemon,
        },
        MediaNormalizer, RecommendationOptions,
    },
};

pub mod library;
pub mod recommendations;
pub mod torrents;
pub mod trackers;

/// Upstream collaborators and per-deployment settings shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<dyn CollectionManager>,
    pub series: Arc<dyn CollectionManager>,
    pub metadata: Arc<dyn MetadataService>,
    pub torrents: Arc<dyn TorrentDaemon>,
    pub indexers: Arc<dyn IndexerProxy>,
    pub normalizer: MediaNormalizer,
    pub recommendation: RecommendationOptions,
    pub add_settings: AddSettings,
}

impl AppState {
    /// Builds the reqwest-backed providers described by the configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = client_with_timeout(config.request_timeout())?;

        Ok(Self {
            movies: Arc::new(ArrClient::radarr(
                &config.radarr_url,
                &config.radarr_key,
                client.clone(),
            )),
            series: Arc::new(ArrClient::sonarr(
                &config.sonarr_url,
                &config.sonarr_key,
                client.clone(),
            )),
            metadata: Arc::new(TmdbClient::new(
                &config.tmdb_url,
                &config.tmdb_key,
                &config.tmdb_language,
                client.clone(),
            )),
            torrents: Arc::new(DelugeClient::new(
                &config.deluge_url,
                config.request_timeout(),
            )?),
            indexers: Arc::new(JackettClient::new(
                &config.jackett_url,
                &config.jackett_key,
                client,
            )),
            normalizer: MediaNormalizer::new(&config.tmdb_poster_url),
            recommendation: RecommendationOptions {
                page: config.recommendation_page,
                sort: config.recommendation_sort.clone(),
            },
            add_settings: AddSettings {
                quality_profile_id: config.quality_profile_id,
                movie_root_folder: config.movie_root_folder.clone(),
                series_root_folder: config.series_root_folder.clone(),
            },
        })
    }

    pub fn manager(&self, kind: MediaKind) -> &dyn CollectionManager {
        match kind {
            MediaKind::Movie => self.movies.as_ref(),
            MediaKind::Series => self.series.as_ref(),
        }
    }
}

/// Creates the application router with all routes
///
/// `url_prefix` nests every route, e.g. `/riverr/getmovies`; an empty prefix
/// serves them from the root.
pub fn create_router(state: Arc<AppState>, url_prefix: &str) -> Router {
    let routes = api_routes().with_state(state);

    let prefix = url_prefix.trim().trim_end_matches('/');
    let app = if prefix.is_empty() {
        routes
    } else if prefix.starts_with('/') {
        Router::new().nest(prefix, routes)
    } else {
        Router::new().nest(&format!("/{}", prefix), routes)
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(info))
        .route("/health", get(health_check))
        // Radarr
        .route("/getmovies", get(library::get_movies))
        .route("/recomovies", get(recommendations::recommend_movies))
        .route("/searchmovies", get(library::search_movies))
        .route("/addmovies", post(library::add_movie))
        .route("/removemovies", delete(library::remove_movie))
        // Sonarr
        .route("/gettv", get(library::get_series))
        .route("/recotv", get(recommendations::recommend_series))
        .route("/searchtv", get(library::search_series))
        .route("/addtv", post(library::add_series))
        .route("/removeseries", delete(library::remove_series))
        // Deluge
        .route("/gettorrents", get(torrents::list))
        .route("/pausetorrents/:torrent_id", get(torrents::pause))
        .route("/removetorrents", delete(torrents::remove))
        .route("/addtorrents", post(torrents::add))
        // Jackett
        .route("/gettrackers", get(trackers::list))
}

async fn info() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Riverr API." }))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// `{"warning": ..}` body for empty results that are not failures
pub(crate) fn warning(message: impl Into<String>) -> Response {
    let message: String = message.into();
    (StatusCode::OK, Json(json!({ "warning": message }))).into_response()
}

pub(crate) fn success(message: impl Into<String>) -> Response {
    let message: String = message.into();
    (StatusCode::OK, Json(json!({ "success": message }))).into_response()
}
