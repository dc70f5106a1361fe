/// Jackett indexer proxy provider
use reqwest::{Client, Method};

use crate::{
    error::AppResult,
    models::Indexer,
    services::providers::{http::UpstreamHttp, IndexerProxy},
};

#[derive(Clone)]
pub struct JackettClient {
    http: UpstreamHttp,
    api_key: String,
}

impl JackettClient {
    pub fn new(indexers_url: impl Into<String>, api_key: impl Into<String>, client: Client) -> Self {
        Self {
            http: UpstreamHttp::new("jackett", indexers_url, client),
            api_key: api_key.into(),
        }
    }
}

#[async_trait::async_trait]
impl IndexerProxy for JackettClient {
    async fn list_indexers(&self) -> AppResult<Vec<Indexer>> {
        let request = self
            .http
            .request(Method::GET, "")
            .header("X-Api-Key", &self.api_key)
            .query(&[("apikey", self.api_key.as_str()), ("configured", "true")]);

        let indexers: Vec<Indexer> = self.http.json(request).await?;

        tracing::info!(
            indexers = indexers.len(),
            provider = "jackett",
            "Indexers fetched"
        );

        Ok(indexers)
    }
}
