use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riverr_api::{
    config::Config,
    routes::{create_router, AppState},
    services::torrents,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riverr_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let state = AppState::from_config(&config).context("Failed to build upstream clients")?;

    // The Deluge session cookie is reused by every torrent route
    torrents::login(state.torrents.as_ref(), &config.deluge_key)
        .await
        .context("Failed to log in to Deluge")?;

    let app = create_router(Arc::new(state), &config.url_prefix);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, prefix = %config.url_prefix, "Riverr API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
