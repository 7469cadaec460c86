// src/stats.rs
//! Aggregate statistics over the selected article set.

use std::collections::BTreeMap;

use crate::article::{Article, Metadata};

/// Compute average sentiment, per-source histogram and balance score.
pub fn aggregate(articles: &[Article]) -> Metadata {
    let average_sentiment = if articles.is_empty() {
        0.0
    } else {
        let sum: f32 = articles
            .iter()
            .map(|a| a.sentiment_score.unwrap_or(0.0))
            .sum();
        sum / articles.len() as f32
    };

    let mut source_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for a in articles {
        *source_distribution.entry(a.source.clone()).or_insert(0) += 1;
    }

    Metadata {
        average_sentiment,
        balance_score: balance_score(&source_distribution),
        source_distribution,
    }
}

/// 0–100 evenness of the source distribution.
///
/// With k distinct sources the ideal share is 1/k. Total absolute deviation
/// from that ideal, normalized by its maximum `2 - 2/k`, inverted and scaled
/// to 0–100. Defined as 0 for an empty distribution and 100 for a single
/// source (zero attainable deviation).
pub fn balance_score(distribution: &BTreeMap<String, usize>) -> u8 {
    let k = distribution.len();
    if k == 0 {
        return 0;
    }
    if k == 1 {
        return 100;
    }

    let total: usize = distribution.values().sum();
    let ideal = 1.0 / k as f64;
    let deviation: f64 = distribution
        .values()
        .map(|&c| (c as f64 / total as f64 - ideal).abs())
        .sum();
    let max_deviation = 2.0 - 2.0 / k as f64;
    let normalized = (deviation / max_deviation).clamp(0.0, 1.0);

    (100.0 * (1.0 - normalized)).round() as u8
}
