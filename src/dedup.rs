// src/dedup.rs
//! Near-duplicate removal over the merged candidate list.
//!
//! Two articles are duplicates when their normalized titles match exactly,
//! or when the Sørensen–Dice similarity of normalized title+content reaches
//! [`NEAR_DUPLICATE_THRESHOLD`] (wire-service copy re-run by multiple
//! outlets rarely matches character-for-character). First-seen wins; later
//! instances are dropped whole, no field merging.

use std::collections::HashSet;

use crate::article::Article;

/// Sørensen–Dice score at or above which two articles count as one story.
pub const NEAR_DUPLICATE_THRESHOLD: f64 = 0.82;

/// Content prefix folded into the similarity key.
const KEY_CONTENT_CHARS: usize = 400;

/// Case-fold, strip punctuation, collapse whitespace.
pub fn normalize_title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = true;
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            for lc in ch.to_lowercase() {
                out.push(lc);
            }
            prev_space = false;
        } else if !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim_end().to_string()
}

fn similarity_key(article: &Article) -> String {
    let body: String = article.content.chars().take(KEY_CONTENT_CHARS).collect();
    let mut key = normalize_title(&article.title);
    key.push(' ');
    key.push_str(&normalize_title(&body));
    key
}

/// Order-preserving, first-seen-wins dedup. Pure; idempotent.
pub fn dedupe(candidates: Vec<Article>) -> Vec<Article> {
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut kept_keys: Vec<String> = Vec::new();
    let mut kept: Vec<Article> = Vec::with_capacity(candidates.len());

    for article in candidates {
        let title = normalize_title(&article.title);
        if !seen_titles.insert(title) {
            continue;
        }

        let key = similarity_key(&article);
        let near_dup = kept_keys
            .iter()
            .any(|k| strsim::sorensen_dice(k, &key) >= NEAR_DUPLICATE_THRESHOLD);
        if near_dup {
            continue;
        }

        kept_keys.push(key);
        kept.push(article);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, content: &str, source: &str) -> Article {
        Article::new(
            title.to_string(),
            content.to_string(),
            format!("https://example.test/{}", normalize_title(title).replace(' ', "-")),
            source.to_string(),
        )
    }

    #[test]
    fn normalize_title_folds_case_and_punctuation() {
        assert_eq!(
            normalize_title("  Breaking: Markets RALLY, again!  "),
            "breaking markets rally again"
        );
    }

    #[test]
    fn exact_title_match_keeps_first_instance() {
        let input = vec![
            article("Summit ends without deal", "Reuters wire copy.", "Reuters"),
            article("Summit Ends Without Deal!", "Syndicated copy.", "GNews"),
        ];
        let out = dedupe(input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, "Reuters");
    }

    #[test]
    fn near_duplicate_content_is_dropped() {
        let body = "Delegates left the climate summit late on Friday after marathon \
                    talks failed to produce a binding agreement on emission targets.";
        let input = vec![
            article("Climate summit talks collapse", body, "The Guardian"),
            article(
                "Climate summit talks collapse in final hours",
                body,
                "Mediastack",
            ),
            article("Stocks close higher", "Unrelated market wrap.", "NYT"),
        ];
        let out = dedupe(input);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].source, "The Guardian");
        assert_eq!(out[1].source, "NYT");
    }

    #[test]
    fn dedupe_is_idempotent() {
        let body = "Shared story body used across outlets for the same event.";
        let input = vec![
            article("Election results confirmed", body, "A"),
            article("Election results confirmed", body, "B"),
            article("Turnout hits record high", "Different story entirely.", "C"),
        ];
        let once = dedupe(input);
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
