// src/error.rs
//! Error taxonomy for the aggregation pipeline.
//!
//! Both error kinds are recovered locally: a `ProviderError` costs one
//! source and becomes a warning, a `SummarizerError` costs the summary
//! text. Neither aborts a request.

use thiserror::Error;

/// One provider adapter's fetch failed.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider}: request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: unexpected status {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider}: timed out after {secs}s")]
    Timeout { provider: &'static str, secs: u64 },

    #[error("{provider}: usage quota exhausted")]
    Quota { provider: &'static str },

    #[error("{provider}: malformed response: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },
}

/// The summarization call failed or returned nothing usable.
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("summarizer is disabled")]
    Disabled,

    #[error("summarizer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("summarizer returned status {0}")]
    Status(u16),

    #[error("summarizer returned an empty completion")]
    EmptyCompletion,
}
