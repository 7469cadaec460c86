// tests/pipeline_e2e.rs
//
// Full pipeline runs against mock providers and a mock summarizer:
// fetch -> dedup -> sentiment -> selection -> stats -> summary.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use neutral_news::article::Article;
use neutral_news::config::Limits;
use neutral_news::error::ProviderError;
use neutral_news::fetch::{FetchOrchestrator, NewsProvider};
use neutral_news::pipeline::Pipeline;
use neutral_news::summarize::{DisabledSummarizer, FixedSummarizer};

/// Distinct headlines with little lexical overlap so only the intended
/// exact-title duplicates collide in dedup.
const HEADLINES: &[(&str, &str)] = &[
    ("Quantum lab opens in Austin", "Researchers unveiled a cryogenic facility downtown."),
    ("Ferry workers end strike", "Union members accepted the revised wage offer."),
    ("Museum returns bronze artifacts", "The collection travels back to Lagos next month."),
    ("Wheat prices climb on dry weather", "Forecasts show little rain across the plains."),
    ("City council approves bike lanes", "Construction begins along the riverfront in spring."),
    ("Volcano monitoring network expands", "Seismometers were installed on the northern ridge."),
    ("Startup ships solar microgrids", "Rural clinics received the first container units."),
    ("Historic theater reopens downtown", "Restoration took four years and private donations."),
    ("Fishing quota talks stall", "Delegates adjourned without setting herring limits."),
    ("New bridge toll takes effect", "Commuters face higher charges from Monday."),
    ("Glacier survey finds faster melt", "Satellite data covered three decades of change."),
    ("Library digitizes rare manuscripts", "Scholars can browse the folios online."),
    ("Transit agency tests battery buses", "Twelve vehicles join the downtown loop."),
    ("Vineyards adapt to early harvest", "Growers picked grapes three weeks ahead of custom."),
    ("Hospital expands cardiac wing", "The unit adds forty beds and two theaters."),
    ("Chess prodigy wins national title", "The fourteen-year-old swept the final round."),
    ("Port dredging project funded", "Deeper berths will admit larger container ships."),
    ("Observatory spots distant comet", "Astronomers expect naked-eye visibility by winter."),
    ("Farmers market moves indoors", "Vendors relocate to the renovated depot hall."),
    ("Marathon route changes announced", "Organizers rerouted miles nine through twelve."),
    ("Orchard blight contained", "Inspectors cleared the remaining county groves."),
    ("Coastal trail section reopens", "Crews repaired storm damage near the lighthouse."),
];

struct MockProvider {
    name: &'static str,
    source: &'static str,
    articles: Vec<Article>,
}

impl MockProvider {
    fn from_range(name: &'static str, source: &'static str, range: std::ops::Range<usize>) -> Self {
        let articles = range
            .map(|i| {
                let (title, content) = HEADLINES[i];
                Article::new(
                    title.to_string(),
                    content.to_string(),
                    format!("https://example.test/{}/{i}", name),
                    source.to_string(),
                )
            })
            .collect();
        Self {
            name,
            source,
            articles,
        }
    }

    /// Append exact-title copies of another provider's stories.
    fn with_duplicates_of(mut self, indices: &[usize]) -> Self {
        for &i in indices {
            let (title, content) = HEADLINES[i];
            self.articles.push(Article::new(
                title.to_string(),
                content.to_string(),
                format!("https://example.test/{}/dup{i}", self.name),
                self.source.to_string(),
            ));
        }
        self
    }
}

#[async_trait]
impl NewsProvider for MockProvider {
    async fn fetch(&self, _topic: &str, _limit: usize) -> Result<Vec<Article>, ProviderError> {
        Ok(self.articles.clone())
    }
    fn name(&self) -> &'static str {
        self.name
    }
}

struct FailingProvider;

#[async_trait]
impl NewsProvider for FailingProvider {
    async fn fetch(&self, _topic: &str, _limit: usize) -> Result<Vec<Article>, ProviderError> {
        Err(ProviderError::Status {
            provider: "Broken",
            status: 500,
        })
    }
    fn name(&self) -> &'static str {
        "Broken"
    }
}

struct SlowProvider;

#[async_trait]
impl NewsProvider for SlowProvider {
    async fn fetch(&self, _topic: &str, _limit: usize) -> Result<Vec<Article>, ProviderError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Vec::new())
    }
    fn name(&self) -> &'static str {
        "Slow"
    }
}

fn limits() -> Limits {
    Limits {
        max_articles_per_api: 10,
        days_back: 7,
        max_total: 10,
        max_per_source: 4,
        min_viable: 3,
        provider_timeout_secs: 1,
    }
}

fn pipeline_with(providers: Vec<Arc<dyn NewsProvider>>, summary: &str) -> Pipeline {
    let orchestrator = FetchOrchestrator::new(providers, Duration::from_secs(1), 10);
    Pipeline::new(
        orchestrator,
        Arc::new(FixedSummarizer {
            text: summary.to_string(),
        }),
        limits(),
    )
}

#[tokio::test]
async fn election_scenario_selects_bounded_diverse_subset() {
    // 10 + 8 + 6 articles, two exact-duplicate titles across providers.
    let providers: Vec<Arc<dyn NewsProvider>> = vec![
        Arc::new(MockProvider::from_range("alpha", "Alpha Wire", 0..10)),
        Arc::new(MockProvider::from_range("beta", "Beta Times", 10..16).with_duplicates_of(&[0, 1])),
        Arc::new(MockProvider::from_range("gamma", "Gamma Post", 16..22)),
    ];
    let pipeline = pipeline_with(providers, "A balanced summary.");

    let result = pipeline.handle_query("Election 2025").await;

    assert!(result.error.is_none());
    assert_eq!(result.articles.len(), 10);
    assert_eq!(result.summary, "A balanced summary.");

    for source in ["Alpha Wire", "Beta Times", "Gamma Post"] {
        let n = result.articles.iter().filter(|a| a.source == source).count();
        assert!(n <= 4, "{source} holds {n} slots");
    }

    let meta = &result.metadata;
    let dist_sum: usize = meta.source_distribution.values().sum();
    assert_eq!(dist_sum, 10);
    // greedy fill: 4 + 4 + 2 across three sources -> deterministic balance
    assert_eq!(meta.source_distribution["Alpha Wire"], 4);
    assert_eq!(meta.source_distribution["Beta Times"], 4);
    assert_eq!(meta.source_distribution["Gamma Post"], 2);
    assert_eq!(meta.balance_score, 80);

    // every returned article carries the invariant fields
    for a in &result.articles {
        assert!(!a.title.is_empty());
        assert!(!a.url.is_empty());
        let s = a.sentiment_score.expect("scored");
        assert!((-1.0..=1.0).contains(&s));
    }
}

#[tokio::test]
async fn all_providers_failing_is_not_an_error() {
    let providers: Vec<Arc<dyn NewsProvider>> =
        vec![Arc::new(FailingProvider), Arc::new(FailingProvider)];
    let pipeline = pipeline_with(providers, "unused");

    let result = pipeline.handle_query("anything").await;

    assert!(result.articles.is_empty());
    assert!(result.error.is_none());
    assert!(result.summary.is_empty());
    let warning = result.warning.expect("warning set");
    assert!(warning.contains("no articles found"));
    assert!(warning.contains("Broken"));
}

#[tokio::test]
async fn one_failing_provider_does_not_abort_the_rest() {
    let providers: Vec<Arc<dyn NewsProvider>> = vec![
        Arc::new(FailingProvider),
        Arc::new(MockProvider::from_range("alpha", "Alpha Wire", 0..4)),
    ];
    let pipeline = pipeline_with(providers, "ok");

    let result = pipeline.handle_query("anything").await;

    assert_eq!(result.articles.len(), 4);
    assert!(result.error.is_none());
    let warning = result.warning.expect("warning for the failed provider");
    assert!(warning.contains("Broken"));
}

#[tokio::test]
async fn slow_provider_times_out_instead_of_hanging() {
    let providers: Vec<Arc<dyn NewsProvider>> = vec![
        Arc::new(SlowProvider),
        Arc::new(MockProvider::from_range("alpha", "Alpha Wire", 0..4)),
    ];
    let pipeline = pipeline_with(providers, "ok");

    let result = pipeline.handle_query("anything").await;

    assert_eq!(result.articles.len(), 4);
    let warning = result.warning.expect("timeout warning");
    assert!(warning.contains("Slow"), "warning was: {warning}");
}

#[tokio::test]
async fn summarizer_failure_degrades_to_empty_summary() {
    let providers: Vec<Arc<dyn NewsProvider>> =
        vec![Arc::new(MockProvider::from_range("alpha", "Alpha Wire", 0..4))];
    let orchestrator = FetchOrchestrator::new(providers, Duration::from_secs(1), 10);
    let pipeline = Pipeline::new(orchestrator, Arc::new(DisabledSummarizer), limits());

    let result = pipeline.handle_query("anything").await;

    assert_eq!(result.articles.len(), 4);
    assert!(result.error.is_none());
    assert!(result.summary.is_empty());
    let warning = result.warning.expect("summary warning");
    assert!(warning.contains("summary unavailable"));
}

#[tokio::test]
async fn thin_results_carry_a_warning() {
    let providers: Vec<Arc<dyn NewsProvider>> =
        vec![Arc::new(MockProvider::from_range("alpha", "Alpha Wire", 0..2))];
    let pipeline = pipeline_with(providers, "short");

    let result = pipeline.handle_query("anything").await;

    assert_eq!(result.articles.len(), 2);
    assert!(result.error.is_none());
    let warning = result.warning.expect("thin-results warning");
    assert!(warning.contains("only 2"), "warning was: {warning}");
}

#[tokio::test]
async fn blank_topic_is_a_request_error() {
    let pipeline = pipeline_with(Vec::new(), "unused");
    let result = pipeline.handle_query("   ").await;
    assert!(result.error.is_some());
    assert!(result.articles.is_empty());
}
