// src/fetch/providers/nyt.rs
//! New York Times Article Search adapter.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::article::Article;
use crate::error::ProviderError;
use crate::fetch::NewsProvider;
use crate::normalize::normalize_text;

use super::{http_client, malformed, parse_timestamp};

const PROVIDER: &str = "New York Times";
const ENDPOINT: &str = "https://api.nytimes.com/svc/search/v2/articlesearch.json";

#[derive(Debug, Deserialize)]
struct Payload {
    response: Inner,
}

#[derive(Debug, Deserialize)]
struct Inner {
    #[serde(default)]
    docs: Vec<RawDoc>,
}

#[derive(Debug, Deserialize)]
struct RawDoc {
    headline: Option<RawHeadline>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    lead_paragraph: Option<String>,
    web_url: Option<String>,
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawHeadline {
    main: Option<String>,
}

pub struct NewYorkTimes {
    http: reqwest::Client,
    api_key: String,
    days_back: i64,
}

impl NewYorkTimes {
    pub fn new(api_key: String, days_back: i64) -> Self {
        Self {
            http: http_client(),
            api_key,
            days_back,
        }
    }

    /// Article Search wants `begin_date` as compact `YYYYMMDD`.
    fn begin_date(&self) -> String {
        (Utc::now() - chrono::Duration::days(self.days_back))
            .format("%Y%m%d")
            .to_string()
    }

    fn parse_payload(body: &str) -> Result<Vec<Article>, ProviderError> {
        let payload: Payload =
            serde_json::from_str(body).map_err(|e| malformed(PROVIDER, e))?;

        let mut out = Vec::with_capacity(payload.response.docs.len());
        for raw in payload.response.docs {
            let title = normalize_text(
                raw.headline
                    .as_ref()
                    .and_then(|h| h.main.as_deref())
                    .unwrap_or_default(),
            );
            let content = normalize_text(
                raw.abstract_text
                    .as_deref()
                    .filter(|a| !a.trim().is_empty())
                    .or(raw.lead_paragraph.as_deref())
                    .unwrap_or_default(),
            );
            let url = raw.web_url.unwrap_or_default();
            if title.is_empty() || content.is_empty() || url.is_empty() {
                continue;
            }

            let mut article = Article::new(title, content, url, PROVIDER.to_string());
            article.published_at = parse_timestamp(raw.pub_date.as_deref());
            out.push(article);
        }
        Ok(out)
    }
}

#[async_trait]
impl NewsProvider for NewYorkTimes {
    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<Article>, ProviderError> {
        // Article Search pages in fixed blocks of 10; the caller's limit is
        // applied after parsing.
        let begin = self.begin_date();
        let resp = self
            .http
            .get(ENDPOINT)
            .query(&[
                ("q", topic),
                ("begin_date", begin.as_str()),
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
        let mut articles = Self::parse_payload(&body)?;
        articles.truncate(limit);
        Ok(articles)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}
