// src/fetch/providers/newsapi_ai.rs
//! NewsAPI.ai (Event Registry) article search adapter.

use async_trait::async_trait;
use serde::Deserialize;

use crate::article::Article;
use crate::error::ProviderError;
use crate::fetch::NewsProvider;
use crate::normalize::normalize_text;

use super::{http_client, malformed, parse_timestamp, window_start};

const PROVIDER: &str = "NewsAPI.ai";
const ENDPOINT: &str = "https://api.newsapi.ai/api/v1/article/getArticles";

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    articles: Option<Inner>,
}

#[derive(Debug, Deserialize)]
struct Inner {
    #[serde(default)]
    results: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    body: Option<String>,
    url: Option<String>,
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    title: Option<String>,
}

pub struct NewsApiAi {
    http: reqwest::Client,
    api_key: String,
    days_back: i64,
}

impl NewsApiAi {
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

        let results = payload.articles.map(|a| a.results).unwrap_or_default();
        let mut out = Vec::with_capacity(results.len());
        for raw in results {
            let title = normalize_text(raw.title.as_deref().unwrap_or_default());
            let content = normalize_text(raw.body.as_deref().unwrap_or_default());
            let url = raw.url.unwrap_or_default();
            if title.is_empty() || content.is_empty() || url.is_empty() {
                continue;
            }
            let source = raw
                .source
                .and_then(|s| s.title)
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| PROVIDER.to_string());

            let mut article = Article::new(title, content, url, source);
            article.published_at = parse_timestamp(raw.date_time.as_deref());
            out.push(article);
        }
        Ok(out)
    }
}

#[async_trait]
impl NewsProvider for NewsApiAi {
    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<Article>, ProviderError> {
        let date_start = window_start(self.days_back);
        let count = limit.to_string();
        let resp = self
            .http
            .get(ENDPOINT)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("keyword", topic),
                ("dateStart", date_start.as_str()),
                ("lang", "eng"),
                ("articlesCount", count.as_str()),
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
    fn maps_nested_results() {
        let body = r#"{
            "articles": {
                "results": [
                    {
                        "title": "Central bank holds rates",
                        "body": "Policymakers voted unanimously to keep rates unchanged.",
                        "url": "https://example.test/ai/1",
                        "dateTime": "2025-08-21T12:00:00Z",
                        "source": {"title": "Finance Daily"}
                    }
                ],
                "totalResults": 1
            }
        }"#;
        let out = NewsApiAi::parse_payload(body).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, "Finance Daily");
    }

    #[test]
    fn missing_articles_key_yields_empty() {
        let out = NewsApiAi::parse_payload(r#"{"info": "no results"}"#).unwrap();
        assert!(out.is_empty());
    }
}
