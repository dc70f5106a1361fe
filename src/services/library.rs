use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{AddOutcome, AddRequest, Media, MediaKind, RemoveOutcome, SchemaVariant},
    services::{
        extract::extract_title,
        normalize::MediaNormalizer,
        providers::{CollectionManager, MetadataService},
    },
};

/// Where and how new titles are added to the collection managers
#[derive(Debug, Clone)]
pub struct AddSettings {
    pub quality_profile_id: u32,
    pub movie_root_folder: String,
    pub series_root_folder: String,
}

impl AddSettings {
    pub fn root_folder(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Movie => &self.movie_root_folder,
            MediaKind::Series => &self.series_root_folder,
        }
    }
}

/// Every title in the manager's library, marked as watched
pub async fn list(
    manager: &dyn CollectionManager,
    normalizer: &MediaNormalizer,
) -> AppResult<Vec<Media>> {
    let records = manager.list_library().await?;
    normalizer.normalize_all(&records, true, manager.kind(), SchemaVariant::Library)
}

/// Lookup results, which are never marked as watched
pub async fn search(
    manager: &dyn CollectionManager,
    normalizer: &MediaNormalizer,
    term: &str,
) -> AppResult<Vec<Media>> {
    if term.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search term cannot be empty".to_string(),
        ));
    }

    let records = manager.lookup(term.trim()).await?;
    normalizer.normalize_all(&records, false, manager.kind(), SchemaVariant::Library)
}

/// Id the collection manager expects for a title
///
/// Radarr keys movies by TMDB id, so the first search hit is used directly.
/// Sonarr keys series by TVDB id, which TMDB exposes through `external_ids`.
pub async fn resolve_external_id(
    metadata: &dyn MetadataService,
    title: &str,
    kind: MediaKind,
    year: Option<u32>,
) -> AppResult<Option<u64>> {
    let results = metadata.search(title, kind, year).await?;
    let Some(tmdb_id) = results.first().and_then(|r| r.get("id")).and_then(Value::as_u64)
    else {
        tracing::warn!(title = %title, kind = %kind, "No metadata match for title");
        return Ok(None);
    };

    match kind {
        MediaKind::Movie => Ok(Some(tmdb_id)),
        MediaKind::Series => {
            let ids = metadata.external_ids(tmdb_id, kind).await?;
            Ok(ids.get("tvdb_id").and_then(Value::as_u64))
        }
    }
}

pub async fn add(
    manager: &dyn CollectionManager,
    metadata: &dyn MetadataService,
    title: &str,
    year: Option<u32>,
    settings: &AddSettings,
) -> AppResult<AddOutcome> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    let kind = manager.kind();
    let external_id = resolve_external_id(metadata, title, kind, year)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No {} found for: {}", kind, title)))?;

    manager
        .add(AddRequest {
            title: title.to_string(),
            external_id,
            quality_profile_id: settings.quality_profile_id,
            root_folder: settings.root_folder(kind).to_string(),
        })
        .await
}

/// Removes the first library title whose name matches, ignoring case
pub async fn remove(manager: &dyn CollectionManager, title: &str) -> AppResult<RemoveOutcome> {
    let wanted = title.trim().to_lowercase();
    let records = manager.list_library().await?;

    let Some(record) = records
        .iter()
        .find(|record| extract_title(record).to_lowercase() == wanted)
    else {
        return Ok(RemoveOutcome::NotFound);
    };

    let id = record.get("id").and_then(Value::as_u64).ok_or_else(|| {
        AppError::MalformedRecord(format!("{} record for '{}' has no id", manager.name(), title))
    })?;

    manager.remove(id).await
}
