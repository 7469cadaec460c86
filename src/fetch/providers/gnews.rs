// src/fetch/providers/gnews.rs
//! GNews search adapter.

use async_trait::async_trait;
use serde::Deserialize;

use crate::article::Article;
use crate::error::ProviderError;
use crate::fetch::NewsProvider;
use crate::normalize::normalize_text;

use super::{http_client, malformed, parse_timestamp, window_start};

const PROVIDER: &str = "GNews";
const ENDPOINT: &str = "https://gnews.io/api/v4/search";

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

pub struct GNews {
    http: reqwest::Client,
    api_key: String,
    days_back: i64,
}

impl GNews {
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

        let mut out = Vec::with_capacity(payload.articles.len());
        for raw in payload.articles {
            let title = normalize_text(raw.title.as_deref().unwrap_or_default());
            let content = normalize_text(
                raw.content
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .or(raw.description.as_deref())
                    .unwrap_or_default(),
            );
            let url = raw.url.unwrap_or_default();
            if title.is_empty() || content.is_empty() || url.is_empty() {
                continue;
            }
            // GNews attributes the true outlet per article.
            let source = raw
                .source
                .and_then(|s| s.name)
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| PROVIDER.to_string());

            let mut article = Article::new(title, content, url, source);
            article.published_at = parse_timestamp(raw.published_at.as_deref());
            out.push(article);
        }
        Ok(out)
    }
}

#[async_trait]
impl NewsProvider for GNews {
    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<Article>, ProviderError> {
        let from = window_start(self.days_back);
        let max = limit.to_string();
        let resp = self
            .http
            .get(ENDPOINT)
            .query(&[
                ("q", topic),
                ("from", from.as_str()),
                ("max", max.as_str()),
                ("token", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Http {
                provider: PROVIDER,
                source: e,
            })?;

        let status = resp.status();
        // 403 covers both bad keys and exhausted subscriptions on GNews.
        if status.as_u16() == 403 || status.as_u16() == 429 {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_payload_with_source_attribution() {
        let body = r#"{
            "totalArticles": 2,
            "articles": [
                {
                    "title": "Storm forces evacuations on coast",
                    "description": "Thousands moved inland overnight.",
                    "content": "Thousands moved inland overnight as the storm strengthened.",
                    "url": "https://example.test/gnews/1",
                    "publishedAt": "2025-08-21T04:30:00Z",
                    "source": {"name": "Coastal Post", "url": "https://coastalpost.test"}
                },
                {
                    "title": "Wire item without body",
                    "description": "",
                    "content": "",
                    "url": "https://example.test/gnews/2",
                    "source": {"name": "Wire"}
                }
            ]
        }"#;
        let out = GNews::parse_payload(body).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, "Coastal Post");
        assert_eq!(out[0].title, "Storm forces evacuations on coast");
    }
}
