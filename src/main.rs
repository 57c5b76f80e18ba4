//! Solace — emotional wellness triage service entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at configured level
//!   4. Build the LLM provider and engine
//!   5. Serve until ctrl-c

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use solace::config;
use solace::content::ContentLibrary;
use solace::engine::Engine;
use solace::error::AppError;
use solace::llm::providers;
use solace::logger;
use solace::server::{self, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let config = config::load()?;
    logger::init(&config.log_level)?;

    info!(
        service = %config.service_name,
        bind = %config.server.bind,
        provider = %config.llm.provider,
        log_level = %config.log_level,
        "config loaded"
    );

    let provider = providers::build(&config.llm, config.llm_api_key.clone())
        .map_err(|e| AppError::Config(e.to_string()))?;
    if provider.is_none() {
        info!("running with deterministic classification only");
    }

    let engine = Engine::new(provider, ContentLibrary::standard());
    let state = AppState {
        service_name: Arc::from(config.service_name.as_str()),
        engine: Arc::new(engine),
    };

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
            signal_token.cancel();
        }
    });

    server::run(&config.server.bind, state, shutdown).await
}
