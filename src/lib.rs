// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod article;
pub mod config;
pub mod dedup;
pub mod error;
pub mod fetch;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod selection;
pub mod sentiment;
pub mod stats;
pub mod summarize;
pub mod trending;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::article::{AggregationResult, Article, Metadata};
pub use crate::pipeline::Pipeline;
