// src/trending.rs
//! Background trending-topics panel.
//!
//! A single refresher task recomputes the panel on a fixed interval; readers
//! take an `Arc` snapshot and never observe a half-built refresh. The topic
//! list comes from the Google Trends daily-trends feed, with a static
//! fallback so the panel survives that feed being down.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use metrics::gauge;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::config::TrendingSettings;
use crate::pipeline::Pipeline;

const DAILY_TRENDS_URL: &str = "https://trends.google.com/trends/api/dailytrends";

/// XSSI guard prefix on the daily-trends payload.
const XSSI_PREFIX: &str = ")]}',";

/// Shown when the trends feed is unavailable.
pub const FALLBACK_TOPICS: [&str; 4] = [
    "Climate Change",
    "Artificial Intelligence",
    "Elections",
    "Global Economy",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub summary: String,
    pub articles: Vec<TrendingLink>,
}

pub type TrendingSnapshot = Arc<HashMap<String, TrendingTopic>>;

/// Process-wide cache: single background writer, any number of readers.
/// `store` swaps the whole map atomically; readers keep whatever snapshot
/// they already hold.
#[derive(Clone, Default)]
pub struct TrendingCache {
    inner: Arc<RwLock<TrendingSnapshot>>,
}

impl TrendingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TrendingSnapshot {
        self.inner.read().expect("trending cache poisoned").clone()
    }

    pub fn store(&self, map: HashMap<String, TrendingTopic>) {
        let mut guard = self.inner.write().expect("trending cache poisoned");
        *guard = Arc::new(map);
    }
}

/// Pull the XSSI-prefixed daily-trends JSON apart into topic strings.
pub fn parse_daily_trends(body: &str) -> anyhow::Result<Vec<String>> {
    #[derive(Deserialize)]
    struct Payload {
        default: DefaultBlock,
    }
    #[derive(Deserialize)]
    struct DefaultBlock {
        #[serde(rename = "trendingSearchesDays", default)]
        days: Vec<Day>,
    }
    #[derive(Deserialize)]
    struct Day {
        #[serde(rename = "trendingSearches", default)]
        searches: Vec<Search>,
    }
    #[derive(Deserialize)]
    struct Search {
        title: Title,
    }
    #[derive(Deserialize)]
    struct Title {
        query: String,
    }

    let json = body.strip_prefix(XSSI_PREFIX).unwrap_or(body).trim_start();
    let payload: Payload = serde_json::from_str(json)?;
    let topics: Vec<String> = payload
        .default
        .days
        .into_iter()
        .flat_map(|d| d.searches)
        .map(|s| s.title.query)
        .filter(|t| !t.trim().is_empty())
        .collect();
    Ok(topics)
}

async fn fetch_topics(http: &reqwest::Client, limit: usize) -> Vec<String> {
    let fallback = || {
        FALLBACK_TOPICS
            .iter()
            .take(limit)
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
    };

    let resp = match http
        .get(DAILY_TRENDS_URL)
        .query(&[("hl", "en-US"), ("tz", "360"), ("geo", "US")])
        .send()
        .await
    {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => {
            tracing::warn!(status = %r.status(), "trends feed returned non-success");
            return fallback();
        }
        Err(e) => {
            tracing::warn!(error = %e, "trends feed unreachable");
            return fallback();
        }
    };

    let body = match resp.text().await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "trends feed body unreadable");
            return fallback();
        }
    };

    match parse_daily_trends(&body) {
        Ok(mut topics) if !topics.is_empty() => {
            topics.truncate(limit);
            topics
        }
        Ok(_) => fallback(),
        Err(e) => {
            tracing::warn!(error = %e, "trends feed unparsable");
            fallback()
        }
    }
}

/// One refresh round: fetch topics, then rebuild the snapshot from them.
pub async fn refresh_once(
    pipeline: &Pipeline,
    cache: &TrendingCache,
    http: &reqwest::Client,
    cfg: TrendingSettings,
) {
    let topics = fetch_topics(http, cfg.topics_limit).await;
    refresh_with_topics(pipeline, cache, cfg, topics).await;
}

/// Aggregate each topic through the normal pipeline and swap the snapshot,
/// but only when at least one topic produced articles; a round that yields
/// nothing leaves the previous snapshot in place.
pub async fn refresh_with_topics(
    pipeline: &Pipeline,
    cache: &TrendingCache,
    cfg: TrendingSettings,
    topics: Vec<String>,
) {
    let mut map = HashMap::with_capacity(topics.len());

    for topic in topics {
        let result = pipeline.handle_query(&topic).await;
        if result.error.is_some() || result.articles.is_empty() {
            tracing::debug!(topic, "trending topic yielded nothing");
            continue;
        }
        let links = result
            .articles
            .iter()
            .take(cfg.articles_per_topic)
            .map(|a| TrendingLink {
                title: a.title.clone(),
                url: a.url.clone(),
            })
            .collect();
        map.insert(
            topic.clone(),
            TrendingTopic {
                topic,
                summary: result.summary,
                articles: links,
            },
        );
    }

    if map.is_empty() {
        tracing::warn!("trending refresh produced no topics; keeping previous snapshot");
        return;
    }

    tracing::info!(topics = map.len(), "trending snapshot refreshed");
    cache.store(map);
    gauge!("trending_last_refresh_ts").set(chrono::Utc::now().timestamp() as f64);
}

/// Spawn the interval-driven refresher. The first tick fires immediately so
/// the panel fills shortly after boot.
pub fn spawn_refresher(
    pipeline: Arc<Pipeline>,
    cache: TrendingCache,
    cfg: TrendingSettings,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let http = reqwest::Client::builder()
            .user_agent("neutral-news/0.1")
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        let mut ticker = tokio::time::interval(Duration::from_secs(cfg.refresh_secs.max(1)));
        loop {
            ticker.tick().await;
            refresh_once(&pipeline, &cache, &http, cfg).await;
        }
    })
}
