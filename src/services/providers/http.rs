use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Builds the reqwest client shared by the plain JSON providers
pub fn client_with_timeout(timeout: Duration) -> AppResult<Client> {
    Ok(Client::builder()
        .user_agent(concat!("riverr-api/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?)
}

/// HTTP access to one upstream service
///
/// Every transport failure, timeout, or unsuccessful status is reported as
/// [`AppError::Upstream`] tagged with the service name.
#[derive(Clone)]
pub struct UpstreamHttp {
    client: Client,
    base_url: String,
    service: &'static str,
}

impl UpstreamHttp {
    pub fn new(service: &'static str, base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service,
        }
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Build full URL from endpoint
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client.request(method, self.url(endpoint))
    }

    /// Sends a request without judging the response status
    pub async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        request.send().await.map_err(|e| {
            tracing::error!(provider = self.service, error = %e, "Upstream request failed");
            AppError::upstream(self.service, e.to_string())
        })
    }

    /// Sends a request and decodes a successful JSON body
    pub async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.send(request).await?;
        let response = self.ensure_success(response).await?;

        response.json::<T>().await.map_err(|e| {
            tracing::error!(provider = self.service, error = %e, "Failed to decode upstream response");
            AppError::upstream(self.service, format!("Failed to decode JSON: {}", e))
        })
    }

    /// Turns a non-2xx response into an upstream error carrying status and body
    pub async fn ensure_success(&self, response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            provider = self.service,
            status = status.as_u16(),
            "Upstream returned an error status"
        );

        Err(AppError::upstream(
            self.service,
            format!("API returned status {}: {}", status, body),
        ))
    }
}
