mod chains;
mod config;
mod errors;
mod llm_client;
mod lookup;
mod prompt;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::lookup::{GoogleSearch, Wikipedia};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required secrets)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TouchGrass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.request_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize lookups
    let search = GoogleSearch::new(
        config.google_api_key.clone(),
        config.google_cse_id.clone(),
        &config.google_search_url,
        config.request_timeout,
    )?;
    let encyclopedia = Wikipedia::new(&config.wikipedia_api_url, config.request_timeout)?;
    info!("Lookup clients initialized (search + encyclopedia)");

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        search: Arc::new(search),
        encyclopedia: Arc::new(encyclopedia),
        sessions: SessionStore::new(),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
