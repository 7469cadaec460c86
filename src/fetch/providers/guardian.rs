// src/fetch/providers/guardian.rs
//! The Guardian content search adapter.

use async_trait::async_trait;
use serde::Deserialize;

use crate::article::Article;
use crate::error::ProviderError;
use crate::fetch::NewsProvider;
use crate::normalize::normalize_text;

use super::{http_client, malformed, parse_timestamp, window_start};

const PROVIDER: &str = "The Guardian";
const ENDPOINT: &str = "https://content.guardianapis.com/search";

#[derive(Debug, Deserialize)]
struct Payload {
    response: Inner,
}

#[derive(Debug, Deserialize)]
struct Inner {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(rename = "webTitle")]
    web_title: Option<String>,
    #[serde(rename = "webUrl")]
    web_url: Option<String>,
    #[serde(rename = "webPublicationDate")]
    web_publication_date: Option<String>,
    #[serde(default)]
    fields: Option<RawFields>,
}

#[derive(Debug, Deserialize)]
struct RawFields {
    #[serde(rename = "trailText")]
    trail_text: Option<String>,
}

pub struct Guardian {
    http: reqwest::Client,
    api_key: String,
    days_back: i64,
}

impl Guardian {
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

        let mut out = Vec::with_capacity(payload.response.results.len());
        for raw in payload.response.results {
            let title = normalize_text(raw.web_title.as_deref().unwrap_or_default());
            // trailText is HTML-laden; fall back to the headline when absent.
            let content = {
                let trail = raw
                    .fields
                    .as_ref()
                    .and_then(|f| f.trail_text.as_deref())
                    .unwrap_or_default();
                let cleaned = normalize_text(trail);
                if cleaned.is_empty() { title.clone() } else { cleaned }
            };
            let url = raw.web_url.unwrap_or_default();
            if title.is_empty() || url.is_empty() {
                continue;
            }

            let mut article = Article::new(title, content, url, PROVIDER.to_string());
            article.published_at = parse_timestamp(raw.web_publication_date.as_deref());
            out.push(article);
        }
        Ok(out)
    }
}

#[async_trait]
impl NewsProvider for Guardian {
    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<Article>, ProviderError> {
        let from = window_start(self.days_back);
        let page_size = limit.to_string();
        let resp = self
            .http
            .get(ENDPOINT)
            .query(&[
                ("q", topic),
                ("from-date", from.as_str()),
                ("page-size", page_size.as_str()),
                ("show-fields", "trailText"),
                ("api-key", self.api_key.as_str()),
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
