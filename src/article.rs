// src/article.rs
//! Canonical article model and the per-request result bundle.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fetched news item, normalized from a provider payload.
///
/// Created by a provider adapter, enriched with `sentiment_score` by the
/// analyzer, never mutated after scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub url: String,
    /// Canonical display name of the originating outlet.
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Signed polarity in [-1, 1]; `None` until the scorer runs.
    pub sentiment_score: Option<f32>,
}

impl Article {
    pub fn new(title: String, content: String, url: String, source: String) -> Self {
        Self {
            title,
            content,
            url,
            source,
            published_at: None,
            sentiment_score: None,
        }
    }
}

/// Aggregate statistics over the selected article set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub average_sentiment: f32,
    /// Article count per outlet. BTreeMap keeps serialization deterministic.
    pub source_distribution: BTreeMap<String, usize>,
    /// 0–100 measure of how evenly articles spread across outlets.
    pub balance_score: u8,
}

impl Metadata {
    pub fn empty() -> Self {
        Self {
            average_sentiment: 0.0,
            source_distribution: BTreeMap::new(),
            balance_score: 0,
        }
    }
}

/// Output bundle for one aggregation request.
///
/// Exactly one of three shapes reaches the caller: a populated result
/// (optionally with `warning`), an empty result with `warning` set
/// ("no articles found"), or `error` set when the request failed outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResult {
    pub articles: Vec<Article>,
    /// Neutral synthesis text; empty when summarization failed.
    pub summary: String,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AggregationResult {
    /// "No articles found" outcome: not an error, warning explains why.
    pub fn empty(warning: String) -> Self {
        Self {
            articles: Vec::new(),
            summary: String::new(),
            metadata: Metadata::empty(),
            warning: Some(warning),
            error: None,
        }
    }

    /// Whole-request failure.
    pub fn failed(error: String) -> Self {
        Self {
            articles: Vec::new(),
            summary: String::new(),
            metadata: Metadata::empty(),
            warning: None,
            error: Some(error),
        }
    }
}
