// src/fetch/providers/newsapi_org.rs
//! NewsAPI.org `everything` search adapter.

use async_trait::async_trait;
use serde::Deserialize;

use crate::article::Article;
use crate::error::ProviderError;
use crate::fetch::NewsProvider;
use crate::normalize::normalize_text;

use super::{http_client, malformed, parse_timestamp, window_start};

const PROVIDER: &str = "NewsAPI.org";
const ENDPOINT: &str = "https://newsapi.org/v2/everything";

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

pub struct NewsApiOrg {
    http: reqwest::Client,
    api_key: String,
    days_back: i64,
}

impl NewsApiOrg {
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
            // NewsAPI.org carries the true outlet per article.
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
impl NewsProvider for NewsApiOrg {
    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<Article>, ProviderError> {
        let from = window_start(self.days_back);
        let page_size = limit.to_string();
        let resp = self
            .http
            .get(ENDPOINT)
            .query(&[
                ("q", topic),
                ("from", from.as_str()),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_payload_and_drops_malformed_entries() {
        let body = r#"{
            "status": "ok",
            "articles": [
                {
                    "source": {"id": null, "name": "Example Times"},
                    "title": "Summit reaches <b>deal</b>",
                    "description": "Leaders agreed on a framework.",
                    "content": "Leaders agreed on a framework after two days.",
                    "url": "https://example.test/a",
                    "publishedAt": "2025-08-20T10:15:00Z"
                },
                {
                    "source": {"id": null, "name": "Empty Outlet"},
                    "title": "",
                    "description": "No headline on this one.",
                    "url": "https://example.test/b"
                },
                {
                    "source": null,
                    "title": "Fallback source",
                    "description": "Body text.",
                    "url": "https://example.test/c"
                }
            ]
        }"#;
        let out = NewsApiOrg::parse_payload(body).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Summit reaches deal");
        assert_eq!(out[0].source, "Example Times");
        assert!(out[0].published_at.is_some());
        assert_eq!(out[1].source, "NewsAPI.org");
    }

    #[test]
    fn garbage_body_is_a_malformed_error() {
        assert!(matches!(
            NewsApiOrg::parse_payload("<html>nope</html>"),
            Err(ProviderError::Malformed { .. })
        ));
    }
}
