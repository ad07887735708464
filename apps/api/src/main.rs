mod config;
mod errors;
mod image_client;
mod llm_client;
mod models;
mod quotes;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::image_client::UnsplashClient;
use crate::llm_client::LlmClient;
use crate::quotes::orchestrator::QuoteOrchestrator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Devotions API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
        config.llm_timeout,
    )
    .context("Failed to build LLM client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.llm_timeout
    );

    // Initialize image search client
    let unsplash = UnsplashClient::new(
        config.unsplash_access_key.clone(),
        config.image_search_url.clone(),
        config.image_timeout,
    )
    .context("Failed to build image search client")?;
    info!(
        "Image search client initialized (timeout: {:?})",
        config.image_timeout
    );

    let download_client = reqwest::Client::builder()
        .timeout(config.image_timeout)
        .build()
        .context("Failed to build download client")?;

    let orchestrator = QuoteOrchestrator::new(Arc::new(llm), Arc::new(unsplash));
    let state = AppState::new(orchestrator, download_client);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
