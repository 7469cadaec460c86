//! Neutral News — Binary Entrypoint
//! Boots the Axum HTTP server: configuration, metrics, the aggregation
//! pipeline, and the background trending refresher.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use neutral_news::api::{self, AppState};
use neutral_news::config::AppConfig;
use neutral_news::metrics::Metrics;
use neutral_news::pipeline::Pipeline;
use neutral_news::trending::{self, TrendingCache};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("neutral_news=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AppConfig::from_env();
    let metrics = Metrics::init(cfg.trending.refresh_secs);

    let pipeline = Arc::new(Pipeline::from_config(&cfg));
    tracing::info!(
        providers = ?pipeline.provider_names(),
        "configured news providers"
    );

    let cache = TrendingCache::new();
    trending::spawn_refresher(Arc::clone(&pipeline), cache.clone(), cfg.trending);

    let state = AppState::new(pipeline, cache);
    let app = api::create_router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .with_context(|| format!("binding port {}", cfg.port))?;
    tracing::info!(port = cfg.port, "listening");
    axum::serve(listener, app).await.context("serving http")?;

    Ok(())
}
