/// Radarr / Sonarr provider
///
/// Both managers share the v3 API layout: `GET /{resource}` for the library,
/// `GET /{resource}/lookup?term=` for search, `POST /{resource}` to add and
/// `DELETE /{resource}/{id}` to remove, authenticated with `X-Api-Key`.
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{AddOutcome, AddRequest, MediaKind, RemoveOutcome},
    services::providers::{http::UpstreamHttp, CollectionManager},
};

const API_KEY_HEADER: &str = "X-Api-Key";
const SONARR_LANGUAGE_PROFILE_ID: u32 = 1;

#[derive(Clone)]
pub struct ArrClient {
    http: UpstreamHttp,
    api_key: String,
    kind: MediaKind,
}

impl ArrClient {
    pub fn radarr(api_url: impl Into<String>, api_key: impl Into<String>, client: Client) -> Self {
        Self::new(MediaKind::Movie, api_url, api_key, client)
    }

    pub fn sonarr(api_url: impl Into<String>, api_key: impl Into<String>, client: Client) -> Self {
        Self::new(MediaKind::Series, api_url, api_key, client)
    }

    fn new(
        kind: MediaKind,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let service = match kind {
            MediaKind::Movie => "radarr",
            MediaKind::Series => "sonarr",
        };

        Self {
            http: UpstreamHttp::new(service, api_url, client),
            api_key: api_key.into(),
            kind,
        }
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("/{}{}", self.kind.arr_resource(), suffix)
    }

    /// Request body for `POST /movie` or `POST /series`
    fn add_body(&self, request: &AddRequest) -> Value {
        match self.kind {
            MediaKind::Movie => json!({
                "title": request.title,
                "tmdbId": request.external_id,
                "qualityProfileId": request.quality_profile_id,
                "rootFolderPath": request.root_folder,
                "monitored": true,
                "addOptions": { "searchForMovie": true },
            }),
            MediaKind::Series => json!({
                "title": request.title,
                "tvdbId": request.external_id,
                "qualityProfileId": request.quality_profile_id,
                "languageProfileId": SONARR_LANGUAGE_PROFILE_ID,
                "rootFolderPath": request.root_folder,
                "monitored": true,
                "seasonFolder": true,
                "seriesType": "standard",
                "addOptions": {
                    "ignoreEpisodesWithFiles": false,
                    "ignoreEpisodesWithoutFiles": false,
                    "searchForMissingEpisodes": true,
                },
            }),
        }
    }
}

#[async_trait::async_trait]
impl CollectionManager for ArrClient {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    async fn list_library(&self) -> AppResult<Vec<Value>> {
        let request = self
            .http
            .request(Method::GET, &self.endpoint(""))
            .header(API_KEY_HEADER, &self.api_key);

        let records: Vec<Value> = self.http.json(request).await?;

        tracing::info!(
            results = records.len(),
            provider = self.name(),
            "Library fetched"
        );

        Ok(records)
    }

    async fn lookup(&self, term: &str) -> AppResult<Vec<Value>> {
        let request = self
            .http
            .request(Method::GET, &self.endpoint("/lookup"))
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("term", term)]);

        let records: Vec<Value> = self.http.json(request).await?;

        tracing::info!(
            term = %term,
            results = records.len(),
            provider = self.name(),
            "Lookup completed"
        );

        Ok(records)
    }

    async fn add(&self, request: AddRequest) -> AppResult<AddOutcome> {
        let body = self.add_body(&request);
        let response = self
            .http
            .send(
                self.http
                    .request(Method::POST, &self.endpoint(""))
                    .header(API_KEY_HEADER, &self.api_key)
                    .json(&body),
            )
            .await?;

        // Validation failures (already added, unknown id) come back as 400
        if response.status() == StatusCode::BAD_REQUEST {
            tracing::info!(title = %request.title, provider = self.name(), "Add rejected");
            return Ok(AddOutcome::AlreadyPresent);
        }

        self.http.ensure_success(response).await?;

        tracing::info!(
            title = %request.title,
            external_id = request.external_id,
            provider = self.name(),
            "Title added"
        );

        Ok(AddOutcome::Added)
    }

    async fn remove(&self, id: u64) -> AppResult<RemoveOutcome> {
        let response = self
            .http
            .send(
                self.http
                    .request(Method::DELETE, &self.endpoint(&format!("/{}", id)))
                    .header(API_KEY_HEADER, &self.api_key),
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(RemoveOutcome::NotFound);
        }

        self.http.ensure_success(response).await?;

        tracing::info!(id = id, provider = self.name(), "Title removed");

        Ok(RemoveOutcome::Removed)
    }

    fn name(&self) -> &'static str {
        self.http.service()
    }
}
