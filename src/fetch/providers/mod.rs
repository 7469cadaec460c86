// src/fetch/providers/mod.rs
//! One adapter per upstream news API. Each adapter owns its credentials and
//! HTTP client, maps its provider-specific payload into [`Article`]s, and
//! normalizes the outlet name so the rest of the pipeline sees one shape.

pub mod gnews;
pub mod guardian;
pub mod mediastack;
pub mod newsapi_ai;
pub mod newsapi_org;
pub mod nyt;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::fetch::NewsProvider;

/// Explicit ordered provider collection from configuration. Disabled or
/// keyless providers never get constructed.
pub fn enabled_providers(cfg: &AppConfig) -> Vec<Arc<dyn NewsProvider>> {
    let days_back = cfg.limits.days_back;
    let mut out: Vec<Arc<dyn NewsProvider>> = Vec::new();
    if cfg.newsapi_org.is_active() {
        out.push(Arc::new(newsapi_org::NewsApiOrg::new(
            cfg.newsapi_org.api_key.clone(),
            days_back,
        )));
    }
    if cfg.guardian.is_active() {
        out.push(Arc::new(guardian::Guardian::new(
            cfg.guardian.api_key.clone(),
            days_back,
        )));
    }
    if cfg.gnews.is_active() {
        out.push(Arc::new(gnews::GNews::new(
            cfg.gnews.api_key.clone(),
            days_back,
        )));
    }
    if cfg.nyt.is_active() {
        out.push(Arc::new(nyt::NewYorkTimes::new(
            cfg.nyt.api_key.clone(),
            days_back,
        )));
    }
    if cfg.mediastack.is_active() {
        out.push(Arc::new(mediastack::Mediastack::new(
            cfg.mediastack.api_key.clone(),
            days_back,
        )));
    }
    if cfg.newsapi_ai.is_active() {
        out.push(Arc::new(newsapi_ai::NewsApiAi::new(
            cfg.newsapi_ai.api_key.clone(),
            days_back,
        )));
    }
    out
}

/// Shared HTTP client settings for all adapters. The total request timeout
/// stays under the orchestrator's own deadline handling.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("neutral-news/0.1")
        .connect_timeout(Duration::from_secs(4))
        .timeout(Duration::from_secs(10))
        .build()
        .expect("reqwest client")
}

/// Start of the search window as `YYYY-MM-DD`.
pub(crate) fn window_start(days_back: i64) -> String {
    (Utc::now() - chrono::Duration::days(days_back))
        .format("%Y-%m-%d")
        .to_string()
}

/// Lenient RFC 3339 timestamp parsing; providers occasionally omit or mangle
/// dates and `published_at` is optional anyway.
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Map a body that failed to decode into a `ProviderError`.
pub(crate) fn malformed(provider: &'static str, err: impl std::fmt::Display) -> ProviderError {
    ProviderError::Malformed {
        provider,
        detail: err.to_string(),
    }
}
