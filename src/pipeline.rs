// src/pipeline.rs
//! End-to-end aggregation for one topic: fetch, dedup, score, select,
//! aggregate, summarize.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::article::AggregationResult;
use crate::config::{AppConfig, Limits};
use crate::dedup;
use crate::fetch::FetchOrchestrator;
use crate::selection;
use crate::sentiment::SentimentAnalyzer;
use crate::stats;
use crate::summarize::{build_summarizer, DynSummarizer};

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("pipeline_queries_total", "Aggregation requests started.");
        describe_counter!(
            "pipeline_empty_results_total",
            "Requests that ended with no articles."
        );
        describe_counter!(
            "pipeline_dedup_removed_total",
            "Candidates dropped as duplicates."
        );
        describe_counter!(
            "pipeline_summary_failures_total",
            "Requests degraded to an empty summary."
        );
    });
}

/// Owns the stages; one instance serves all requests (each request is
/// otherwise stateless).
pub struct Pipeline {
    orchestrator: FetchOrchestrator,
    analyzer: SentimentAnalyzer,
    summarizer: DynSummarizer,
    limits: Limits,
}

impl Pipeline {
    pub fn new(orchestrator: FetchOrchestrator, summarizer: DynSummarizer, limits: Limits) -> Self {
        Self {
            orchestrator,
            analyzer: SentimentAnalyzer::new(),
            summarizer,
            limits,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            FetchOrchestrator::from_config(cfg),
            build_summarizer(&cfg.summarizer),
            cfg.limits,
        )
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.orchestrator.provider_names()
    }

    /// Run one bounded aggregation request.
    ///
    /// Provider failures, thin results and summarizer failures degrade into
    /// `warning`; `error` is reserved for the request being unusable at all.
    pub async fn handle_query(&self, topic: &str) -> AggregationResult {
        ensure_metrics_described();
        counter!("pipeline_queries_total").increment(1);

        let topic = topic.trim();
        if topic.is_empty() {
            return AggregationResult::failed("no query provided".to_string());
        }

        let (candidates, mut warnings) = self.orchestrator.gather(topic).await;
        let fetched = candidates.len();

        let unique = dedup::dedupe(candidates);
        counter!("pipeline_dedup_removed_total").increment((fetched - unique.len()) as u64);
        tracing::debug!(
            topic,
            fetched,
            unique = unique.len(),
            "candidates after dedup"
        );

        let scored: Vec<_> = unique
            .into_iter()
            .map(|mut a| {
                a.sentiment_score = Some(self.analyzer.score_article(&a));
                a
            })
            .collect();

        let selected =
            selection::select(scored, self.limits.max_total, self.limits.max_per_source);

        if selected.is_empty() {
            counter!("pipeline_empty_results_total").increment(1);
            warnings.push(format!("no articles found for '{topic}'"));
            return AggregationResult::empty(warnings.join("; "));
        }
        if selected.len() < self.limits.min_viable {
            warnings.push(format!(
                "only {} article(s) found for '{topic}'",
                selected.len()
            ));
        }

        let metadata = stats::aggregate(&selected);

        let summary = match self.summarizer.summarize(&selected, topic).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(topic, error = %e, "summarization failed");
                counter!("pipeline_summary_failures_total").increment(1);
                warnings.push(format!("summary unavailable: {e}"));
                String::new()
            }
        };

        AggregationResult {
            articles: selected,
            summary,
            metadata,
            warning: if warnings.is_empty() {
                None
            } else {
                Some(warnings.join("; "))
            },
            error: None,
        }
    }
}
