// src/config.rs
//! Runtime configuration, resolved once at startup from the environment
//! (a `.env` file is loaded in dev by the binary before this runs).
//!
//! Every provider is an explicit entry here: enabled iff its `USE_*` flag is
//! truthy AND its key is present. Adapters never look at ambient environment
//! state themselves.

use std::env;

/// Credentials and enablement for one upstream API.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub enabled: bool,
    pub api_key: String,
}

impl ProviderSettings {
    fn from_env(flag: &str, key: &str) -> Self {
        Self {
            enabled: env_flag(flag),
            api_key: env::var(key).unwrap_or_default(),
        }
    }

    /// A provider participates only when switched on and credentialed.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

/// Bounds applied to fetching and selection.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Upper bound on articles requested from each API.
    pub max_articles_per_api: usize,
    /// Search window in days.
    pub days_back: i64,
    /// Total cap on the selected set.
    pub max_total: usize,
    /// Per-outlet cap on the selected set.
    pub max_per_source: usize,
    /// Below this count the result carries a "thin results" warning.
    pub min_viable: usize,
    /// Deadline for each provider call.
    pub provider_timeout_secs: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_articles_per_api: 10,
            days_back: 7,
            max_total: 10,
            max_per_source: 4,
            min_viable: 3,
            provider_timeout_secs: 5,
        }
    }
}

/// Background trending-panel refresh settings.
#[derive(Debug, Clone, Copy)]
pub struct TrendingSettings {
    pub refresh_secs: u64,
    pub topics_limit: usize,
    pub articles_per_topic: usize,
}

impl Default for TrendingSettings {
    fn default() -> Self {
        Self {
            refresh_secs: 1800,
            topics_limit: 4,
            articles_per_topic: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SummarizerSettings {
    pub enabled: bool,
    pub api_key: String,
}

impl SummarizerSettings {
    pub fn is_active(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub newsapi_org: ProviderSettings,
    pub guardian: ProviderSettings,
    pub gnews: ProviderSettings,
    pub nyt: ProviderSettings,
    pub mediastack: ProviderSettings,
    pub newsapi_ai: ProviderSettings,
    pub summarizer: SummarizerSettings,
    pub limits: Limits,
    pub trending: TrendingSettings,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Limits::default();
        let trending_defaults = TrendingSettings::default();
        Self {
            newsapi_org: ProviderSettings::from_env("USE_NEWSAPI_ORG", "NEWSAPI_ORG_KEY"),
            guardian: ProviderSettings::from_env("USE_GUARDIAN", "GUARDIAN_API_KEY"),
            gnews: ProviderSettings::from_env("USE_GNEWS", "GNEWS_API_KEY"),
            nyt: ProviderSettings::from_env("USE_NYT", "NYT_API_KEY"),
            mediastack: ProviderSettings::from_env("USE_MEDIASTACK", "MEDIASTACK_API_KEY"),
            newsapi_ai: ProviderSettings::from_env("USE_NEWSAPI_AI", "NEWSAPI_AI_KEY"),
            summarizer: SummarizerSettings {
                enabled: env_flag("USE_SUMMARIZER"),
                api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            },
            limits: Limits {
                max_articles_per_api: env_parse(
                    "MAX_ARTICLES_PER_API",
                    defaults.max_articles_per_api,
                ),
                days_back: env_parse("DEFAULT_DAYS_BACK", defaults.days_back),
                max_total: env_parse("MAX_TOTAL_ARTICLES", defaults.max_total),
                max_per_source: env_parse("MAX_ARTICLES_PER_SOURCE", defaults.max_per_source),
                min_viable: env_parse("MIN_VIABLE_ARTICLES", defaults.min_viable),
                provider_timeout_secs: env_parse(
                    "PROVIDER_TIMEOUT_SECS",
                    defaults.provider_timeout_secs,
                ),
            },
            trending: TrendingSettings {
                refresh_secs: env_parse("TRENDING_REFRESH_SECS", trending_defaults.refresh_secs),
                topics_limit: env_parse("TRENDING_TOPICS_LIMIT", trending_defaults.topics_limit),
                articles_per_topic: env_parse(
                    "TRENDING_ARTICLES_PER_TOPIC",
                    trending_defaults.articles_per_topic,
                ),
            },
            port: env_parse("PORT", 8000),
        }
    }
}

/// Truthy flag parsing: `1`, `true`, `yes`, `on` (case-insensitive).
fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
