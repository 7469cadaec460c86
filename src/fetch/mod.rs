// src/fetch/mod.rs
//! Multi-provider fetch orchestration.
//!
//! Every enabled provider is queried concurrently for one topic; a single
//! provider's failure or timeout is recorded as a warning and never aborts
//! the others. Candidate order is provider-registration order, then each
//! provider's own result order — downstream stages assume nothing more.

pub mod providers;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

use crate::article::Article;
use crate::config::AppConfig;
use crate::error::ProviderError;

/// One news API, translated to the canonical article shape.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch up to `limit` articles about `topic`. Malformed entries are
    /// dropped inside the adapter, never propagated.
    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<Article>, ProviderError>;
    fn name(&self) -> &'static str;
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "fetch_articles_total",
            "Articles returned by providers before dedup."
        );
        describe_counter!("fetch_provider_errors_total", "Provider fetch failures.");
        describe_counter!("fetch_provider_timeouts_total", "Provider deadline misses.");
        describe_histogram!("fetch_provider_ms", "Per-provider fetch time in milliseconds.");
    });
}

/// Fans one topic out to every configured provider.
pub struct FetchOrchestrator {
    providers: Vec<Arc<dyn NewsProvider>>,
    per_provider_timeout: Duration,
    articles_per_provider: usize,
}

impl FetchOrchestrator {
    pub fn new(
        providers: Vec<Arc<dyn NewsProvider>>,
        per_provider_timeout: Duration,
        articles_per_provider: usize,
    ) -> Self {
        Self {
            providers,
            per_provider_timeout,
            articles_per_provider,
        }
    }

    /// Build from configuration; disabled or keyless providers are simply
    /// not constructed.
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            providers::enabled_providers(cfg),
            Duration::from_secs(cfg.limits.provider_timeout_secs),
            cfg.limits.max_articles_per_api,
        )
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Query all providers concurrently; collect candidates and one warning
    /// string per failed provider.
    pub async fn gather(&self, topic: &str) -> (Vec<Article>, Vec<String>) {
        ensure_metrics_described();

        if self.providers.is_empty() {
            return (Vec::new(), vec!["no news providers are enabled".to_string()]);
        }

        let timeout_secs = self.per_provider_timeout.as_secs();
        let mut handles = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let topic = topic.to_string();
            let limit = self.articles_per_provider;
            let deadline = self.per_provider_timeout;
            let name = provider.name();
            handles.push((
                name,
                tokio::spawn(async move {
                    let t0 = Instant::now();
                    let res = tokio::time::timeout(deadline, provider.fetch(&topic, limit)).await;
                    histogram!("fetch_provider_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
                    res
                }),
            ));
        }

        let mut candidates = Vec::new();
        let mut warnings = Vec::new();
        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(Ok(mut articles))) => {
                    tracing::debug!(provider = name, count = articles.len(), "provider ok");
                    counter!("fetch_articles_total").increment(articles.len() as u64);
                    candidates.append(&mut articles);
                }
                Ok(Ok(Err(e))) => {
                    tracing::warn!(provider = name, error = %e, "provider error");
                    counter!("fetch_provider_errors_total").increment(1);
                    warnings.push(e.to_string());
                }
                Ok(Err(_elapsed)) => {
                    let e = ProviderError::Timeout {
                        provider: name,
                        secs: timeout_secs,
                    };
                    tracing::warn!(provider = name, "provider timeout");
                    counter!("fetch_provider_timeouts_total").increment(1);
                    warnings.push(e.to_string());
                }
                Err(join_err) => {
                    tracing::error!(provider = name, error = %join_err, "provider task failed");
                    counter!("fetch_provider_errors_total").increment(1);
                    warnings.push(format!("{name}: fetch task failed"));
                }
            }
        }

        (candidates, warnings)
    }
}
