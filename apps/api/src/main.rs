mod analysis;
mod config;
mod errors;
mod fallback;
mod jobs;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{mask_key, Config};
use crate::jobs::JobStore;
use crate::llm_client::Orchestrator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_name}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Architect API v{}", env!("CARGO_PKG_VERSION"));

    match &config.openrouter_api_key {
        Some(key) => info!("OPENROUTER_API_KEY present (masked: {})", mask_key(key)),
        None => warn!("OPENROUTER_API_KEY not set; the primary AI provider is disabled"),
    }
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY not set; the secondary AI provider is disabled");
    }
    if config.openrouter_api_key.is_none()
        && config.openai_api_key.is_none()
        && !config.allow_local_scoring
    {
        warn!("no AI provider configured and ALLOW_LOCAL_SCORING is off; AI endpoints will fail");
    }

    let orchestrator = Arc::new(Orchestrator::from_config(&config));
    info!("AI orchestrator initialized");

    let state = AppState {
        orchestrator,
        jobs: JobStore::default(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
