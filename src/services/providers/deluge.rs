/// Deluge web JSON-RPC provider
///
/// Requests are `{"id", "method", "params"}` envelopes posted to the web UI's
/// `/json` endpoint. The session cookie issued by `auth.login` is kept in the
/// client's cookie store, so this client must not share a reqwest client
/// with the other providers.
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    services::providers::{http::UpstreamHttp, TorrentDaemon},
};

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<i64>,
}

#[derive(Clone)]
pub struct DelugeClient {
    http: UpstreamHttp,
    next_id: Arc<AtomicU64>,
}

impl DelugeClient {
    pub fn new(json_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http: UpstreamHttp::new("deluge", json_url, client),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }
}

/// Extracts `result` from a response envelope, or the daemon's error
fn unwrap_envelope(method: &str, envelope: RpcEnvelope) -> AppResult<Value> {
    match envelope.error {
        Some(error) => {
            tracing::error!(
                method = %method,
                code = ?error.code,
                message = %error.message,
                "Deluge RPC error"
            );
            Err(AppError::Rpc(format!("{}: {}", method, error.message)))
        }
        None => Ok(envelope.result),
    }
}

#[async_trait::async_trait]
impl TorrentDaemon for DelugeClient {
    async fn call(&self, method: &str, params: Vec<Value>) -> AppResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "id": id,
            "method": method,
            "params": params,
        });

        let request = self.http.request(Method::POST, "").json(&payload);
        let envelope: RpcEnvelope = self.http.json(request).await?;

        tracing::debug!(method = %method, id = id, "Deluge RPC completed");

        unwrap_envelope(method, envelope)
    }
}
