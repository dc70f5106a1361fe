/// TMDB metadata provider
///
/// Authenticates with a v4 read access token sent as a bearer header.
/// Every request carries the configured `language`.
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{GenreEntry, GenreListResponse, MediaKind, PagedResults},
    services::providers::{http::UpstreamHttp, MetadataService},
};

#[derive(Clone)]
pub struct TmdbClient {
    http: UpstreamHttp,
    token: String,
    language: String,
}

impl TmdbClient {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        language: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            http: UpstreamHttp::new("tmdb", api_url, client),
            token: token.into(),
            language: language.into(),
        }
    }

    fn get(&self, endpoint: &str) -> RequestBuilder {
        self.http
            .request(Method::GET, endpoint)
            .bearer_auth(&self.token)
            .header("accept", "application/json")
            .query(&[("language", self.language.as_str())])
    }
}

/// Query parameter TMDB uses to narrow a search by year
fn year_param(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "year",
        MediaKind::Series => "first_air_date_year",
    }
}

#[async_trait::async_trait]
impl MetadataService for TmdbClient {
    async fn list_genres(&self, kind: MediaKind) -> AppResult<Vec<GenreEntry>> {
        let endpoint = format!("/genre/{}/list", kind.tmdb_path());
        let response: GenreListResponse = self.http.json(self.get(&endpoint)).await?;

        tracing::debug!(
            kind = %kind,
            genres = response.genres.len(),
            provider = "tmdb",
            "Genre taxonomy fetched"
        );

        Ok(response.genres)
    }

    async fn discover(
        &self,
        genre_id: u32,
        kind: MediaKind,
        page: u32,
        sort: &str,
    ) -> AppResult<Vec<Value>> {
        let endpoint = format!("/discover/{}", kind.tmdb_path());
        let request = self.get(&endpoint).query(&[
            ("with_genres", genre_id.to_string()),
            ("page", page.to_string()),
            ("sort_by", sort.to_string()),
        ]);

        let response: PagedResults = self.http.json(request).await?;

        tracing::info!(
            genre_id = genre_id,
            kind = %kind,
            page = page,
            results = response.results.len(),
            provider = "tmdb",
            "Discover completed"
        );

        Ok(response.results)
    }

    async fn search(
        &self,
        title: &str,
        kind: MediaKind,
        year: Option<u32>,
    ) -> AppResult<Vec<Value>> {
        let endpoint = format!("/search/{}", kind.tmdb_path());
        let mut request = self.get(&endpoint).query(&[("query", title)]);
        if let Some(year) = year {
            request = request.query(&[(year_param(kind), year.to_string())]);
        }

        let response: PagedResults = self.http.json(request).await?;

        tracing::info!(
            query = %title,
            kind = %kind,
            results = response.results.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(response.results)
    }

    async fn external_ids(&self, id: u64, kind: MediaKind) -> AppResult<Value> {
        let endpoint = format!("/{}/{}/external_ids", kind.tmdb_path(), id);
        self.http.json(self.get(&endpoint)).await
    }
}
