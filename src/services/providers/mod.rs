/// Upstream service abstractions
///
/// Each external collaborator (collection managers, the metadata service,
/// the torrent daemon, the indexer proxy) sits behind a trait so the core
/// services can be driven by fakes in tests. Implementations only move
/// JSON; all interpretation of records happens in `services::extract`.
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{AddOutcome, AddRequest, GenreEntry, Indexer, MediaKind, RemoveOutcome},
};

pub mod arr;
pub mod deluge;
pub mod http;
pub mod jackett;
pub mod tmdb;

pub use arr::ArrClient;
pub use deluge::DelugeClient;
pub use jackett::JackettClient;
pub use tmdb::TmdbClient;

/// Radarr/Sonarr style library manager
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CollectionManager: Send + Sync {
    /// Which kind of media this manager tracks
    fn kind(&self) -> MediaKind;

    /// Every title currently in the library, as raw records
    async fn list_library(&self) -> AppResult<Vec<Value>>;

    /// Searches the manager's own lookup endpoint
    async fn lookup(&self, term: &str) -> AppResult<Vec<Value>>;

    /// Adds a title; a duplicate or rejected title is [`AddOutcome::AlreadyPresent`]
    async fn add(&self, request: AddRequest) -> AppResult<AddOutcome>;

    /// Removes a title by the manager's internal id
    async fn remove(&self, id: u64) -> AppResult<RemoveOutcome>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Genre taxonomy, discovery and search (TMDB)
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataService: Send + Sync {
    async fn list_genres(&self, kind: MediaKind) -> AppResult<Vec<GenreEntry>>;

    /// One page of titles in a genre, in the requested sort order
    async fn discover(
        &self,
        genre_id: u32,
        kind: MediaKind,
        page: u32,
        sort: &str,
    ) -> AppResult<Vec<Value>>;

    async fn search(&self, title: &str, kind: MediaKind, year: Option<u32>)
        -> AppResult<Vec<Value>>;

    /// Ids of the same title on other services (`imdb_id`, `tvdb_id`, ...)
    async fn external_ids(&self, id: u64, kind: MediaKind) -> AppResult<Value>;
}

/// Remote procedure calls against the torrent daemon
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TorrentDaemon: Send + Sync {
    async fn call(&self, method: &str, params: Vec<Value>) -> AppResult<Value>;
}

/// Torrent indexer aggregator (Jackett)
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait IndexerProxy: Send + Sync {
    async fn list_indexers(&self) -> AppResult<Vec<Indexer>>;
}
