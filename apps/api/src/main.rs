mod config;
mod contract;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::generator::LlmNameGenerator;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Menei API v{}", env!("CARGO_PKG_VERSION"));

    // One LLM client for the life of the process
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.llm_timeout,
    )?;
    if llm.has_api_key() {
        info!(
            "LLM client initialized (model: {}, timeout: {:?})",
            llm_client::MODEL,
            config.llm_timeout
        );
    } else {
        error!(
            "OPENAI_API_KEY is not set: every /api/generate request will fail \
             with a configuration error"
        );
    }

    let state = AppState {
        generator: Arc::new(LlmNameGenerator(llm)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        // TODO: restrict CORS to the form's origin once it is deployed
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
