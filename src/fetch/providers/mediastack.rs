// src/fetch/providers/mediastack.rs
//! Mediastack live-news adapter.
//!
//! Mediastack reports quota exhaustion inside an HTTP-200 body, so the
//! payload parser owns that detection.

use async_trait::async_trait;
use serde::Deserialize;

use crate::article::Article;
use crate::error::ProviderError;
use crate::fetch::NewsProvider;
use crate::normalize::normalize_text;

use super::{http_client, malformed, parse_timestamp, window_start};

const PROVIDER: &str = "Mediastack";
const ENDPOINT: &str = "https://api.mediastack.com/v1/news";

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    data: Vec<RawArticle>,
    #[serde(default)]
    error: Option<RawError>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<String>,
    published_at: Option<String>,
}

pub struct Mediastack {
    http: reqwest::Client,
    api_key: String,
    days_back: i64,
}

impl Mediastack {
    pub fn new(api_key: String, days_back: i64) -> Self {
        Self {
            http: http_client(),
            api_key,
            days_back,
        }
    }

    fn parse_payload(body: &str) -> Result<Vec<Article>, ProviderError> {
        let payload: Payload =
            serde_json::from_str(body).map_err(|e| malformed(PROVIDER, e))?;

        if let Some(err) = payload.error {
            let message = err.message.unwrap_or_default();
            if message.to_ascii_lowercase().contains("usage limit") {
                return Err(ProviderError::Quota { provider: PROVIDER });
            }
            return Err(ProviderError::Malformed {
                provider: PROVIDER,
                detail: message,
            });
        }

        let mut out = Vec::with_capacity(payload.data.len());
        for raw in payload.data {
            let title = normalize_text(raw.title.as_deref().unwrap_or_default());
            let content = normalize_text(raw.description.as_deref().unwrap_or_default());
            let url = raw.url.unwrap_or_default();
            if title.is_empty() || content.is_empty() || url.is_empty() {
                continue;
            }
            let source = raw
                .source
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| PROVIDER.to_string());

            let mut article = Article::new(title, content, url, source);
            article.published_at = parse_timestamp(raw.published_at.as_deref());
            out.push(article);
        }
        Ok(out)
    }
}

#[async_trait]
impl NewsProvider for Mediastack {
    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<Article>, ProviderError> {
        let date = window_start(self.days_back);
        let limit = limit.to_string();
        let resp = self
            .http
            .get(ENDPOINT)
            .query(&[
                ("access_key", self.api_key.as_str()),
                ("keywords", topic),
                ("date", date.as_str()),
                ("languages", "en"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Http {
                provider: PROVIDER,
                source: e,
            })?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::Quota { provider: PROVIDER });
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| ProviderError::Http {
            provider: PROVIDER,
            source: e,
        })?;
        Self::parse_payload(&body)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}
