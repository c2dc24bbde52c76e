mod catalog;
mod config;
mod conversation;
mod errors;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::conversation::coach::Coach;
use crate::routes::build_router;
use crate::state::AppState;

const BIND_RETRY_DELAY: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Coach API v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Arc::new(
        Catalog::load(config.catalog_path.as_deref()).context("Failed to load content catalog")?,
    );

    let rng = match config.rng_seed {
        Some(seed) => {
            info!(seed, "Using seeded randomness");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let coach = Coach::new(catalog, config.pacing, rng);
    info!(pacing = ?config.pacing, "Coach initialized");

    let state = AppState { coach };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = bind_with_retry(addr, config.bind_retries).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Binds the listener, retrying while the address is not yet available.
async fn bind_with_retry(addr: SocketAddr, retries: u32) -> Result<TcpListener> {
    let mut attempt = 0;
    loop {
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if attempt < retries => {
                attempt += 1;
                warn!(%addr, attempt, "Bind failed ({e}), retrying");
                tokio::time::sleep(BIND_RETRY_DELAY).await;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to bind {addr} after {attempt} retries"))
            }
        }
    }
}
