// src/selection.rs
//! Bounded, source-diverse subset selection.
//!
//! Greedy single pass in the order received after dedup: admit an article
//! unless its outlet already holds `max_per_source` slots or the total cap
//! is reached. No global optimization; determinism matters more here than
//! a perfectly even split.

use std::collections::HashMap;

use crate::article::Article;

pub fn select(articles: Vec<Article>, max_total: usize, max_per_source: usize) -> Vec<Article> {
    if max_total == 0 || max_per_source == 0 {
        return Vec::new();
    }

    let mut per_source: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(max_total.min(articles.len()));

    for article in articles {
        if out.len() >= max_total {
            break;
        }
        let taken = per_source.entry(article.source.clone()).or_insert(0);
        if *taken >= max_per_source {
            continue;
        }
        *taken += 1;
        out.push(article);
    }

    out
}
