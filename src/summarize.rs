// src/summarize.rs
//! Neutral summary generation over the selected article set.
//!
//! The prompt/response contract lives here; the upstream model is an
//! external collaborator. Failure is always recoverable: the pipeline
//! degrades to an empty summary plus a warning.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::article::Article;
use crate::config::SummarizerSettings;
use crate::error::SummarizerError;

/// Per-article snippet cap before the text goes upstream.
const SNIPPET_CHARS: usize = 150;

const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, articles: &[Article], topic: &str)
        -> Result<String, SummarizerError>;
    fn name(&self) -> &'static str;
}

pub type DynSummarizer = Arc<dyn Summarizer>;

/// Factory: disabled or keyless config yields the no-op implementation.
pub fn build_summarizer(cfg: &SummarizerSettings) -> DynSummarizer {
    if cfg.is_active() {
        Arc::new(OpenAiSummarizer::new(cfg.api_key.clone(), None))
    } else {
        Arc::new(DisabledSummarizer)
    }
}

/// Assemble the neutral-synthesis prompt from numbered article snippets.
/// Content is truncated per article; the title stands in for an empty body.
pub fn build_prompt(articles: &[Article], topic: &str) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(
        "You are an expert in summarizing news articles neutrally. Your task is to \
         generate a balanced summary from the following articles about \"",
    );
    prompt.push_str(topic);
    prompt.push_str(
        "\", ensuring that you present a fair and unbiased view covering all \
         perspectives present.\n\n",
    );
    for (i, article) in articles.iter().enumerate() {
        let text = if article.content.trim().is_empty() {
            &article.title
        } else {
            &article.content
        };
        let snippet: String = text.chars().take(SNIPPET_CHARS).collect();
        prompt.push_str(&format!("Article {}:\n{}\n\n", i + 1, snippet));
    }
    prompt.push_str(
        "Please generate a summary that is approximately 150 words long, focusing on \
         the main points and maintaining neutrality. The summary needs to be straight \
         to the point and easy to read. Use simple language (B1 English).\n",
    );
    prompt
}

/// OpenAI chat-completions implementation. Requires an API key; timeouts are
/// enforced by the client so a stuck upstream surfaces as an error, not a hang.
pub struct OpenAiSummarizer {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiSummarizer {
    pub fn new(api_key: String, model_override: Option<&str>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("neutral-news/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(20))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key,
            model: model_override.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(
        &self,
        articles: &[Article],
        topic: &str,
    ) -> Result<String, SummarizerError> {
        if self.api_key.is_empty() {
            return Err(SummarizerError::Disabled);
        }

        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
            max_tokens: u32,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let prompt = build_prompt(articles, topic);
        let req = Req {
            model: &self.model,
            messages: vec![Msg {
                role: "user",
                content: &prompt,
            }],
            temperature: 0.2,
            max_tokens: 200,
        };

        let resp = self
            .http
            .post(OPENAI_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SummarizerError::Status(status.as_u16()));
        }

        let body: Resp = resp.json().await?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .unwrap_or("");
        if content.is_empty() {
            return Err(SummarizerError::EmptyCompletion);
        }
        Ok(content.to_string())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Always fails with `Disabled`; the pipeline turns that into an empty
/// summary plus a warning.
pub struct DisabledSummarizer;

#[async_trait]
impl Summarizer for DisabledSummarizer {
    async fn summarize(
        &self,
        _articles: &[Article],
        _topic: &str,
    ) -> Result<String, SummarizerError> {
        Err(SummarizerError::Disabled)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic implementation for tests and local runs.
#[derive(Clone)]
pub struct FixedSummarizer {
    pub text: String,
}

#[async_trait]
impl Summarizer for FixedSummarizer {
    async fn summarize(
        &self,
        _articles: &[Article],
        _topic: &str,
    ) -> Result<String, SummarizerError> {
        Ok(self.text.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, content: &str) -> Article {
        Article::new(
            title.into(),
            content.into(),
            "https://example.test".into(),
            "Test".into(),
        )
    }

    #[test]
    fn prompt_numbers_articles_and_truncates() {
        let long_body = "word ".repeat(100);
        let arts = vec![
            article("First story", "Short body."),
            article("Second story", &long_body),
        ];
        let prompt = build_prompt(&arts, "test topic");
        assert!(prompt.contains("Article 1:\nShort body."));
        assert!(prompt.contains("Article 2:\n"));
        assert!(prompt.contains("\"test topic\""));
        // the long body appears truncated, never whole
        assert!(!prompt.contains(&long_body));
    }

    #[test]
    fn prompt_falls_back_to_title_for_empty_content() {
        let arts = vec![article("Headline only", "  ")];
        let prompt = build_prompt(&arts, "topic");
        assert!(prompt.contains("Article 1:\nHeadline only"));
    }

    #[tokio::test]
    async fn disabled_summarizer_reports_disabled() {
        let s = DisabledSummarizer;
        let err = s.summarize(&[], "x").await.unwrap_err();
        assert!(matches!(err, SummarizerError::Disabled));
    }

    #[test]
    fn factory_honors_config() {
        let off = build_summarizer(&SummarizerSettings::default());
        assert_eq!(off.name(), "disabled");
        let on = build_summarizer(&SummarizerSettings {
            enabled: true,
            api_key: "sk-test".into(),
        });
        assert_eq!(on.name(), "openai");
    }
}
