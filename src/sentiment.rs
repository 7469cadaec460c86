// src/sentiment.rs
//! Deterministic lexicon-based polarity scoring.
//!
//! Sentiment is advisory metadata, not a gating condition: any input for
//! which the scorer has nothing to say (empty text, no lexicon hits) scores
//! exactly 0.0, and nothing here can fail a request.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::article::Article;

/// Word weights in [-3, 3], embedded at build time.
static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Max absolute lexicon weight; normalization denominator per hit.
const MAX_WORD_WEIGHT: f32 = 3.0;

/// Title contributes 30%, content 70% (headlines overstate polarity).
const TITLE_WEIGHT: f32 = 0.3;
const CONTENT_WEIGHT: f32 = 0.7;

#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        *LEXICON.get(w).unwrap_or(&0)
    }

    /// Score one text in [-1, 1]. Deterministic for identical input.
    ///
    /// Negation: a negator within the previous 1..=3 tokens inverts the sign
    /// of the hit ("no progress" reads negative, not positive).
    pub fn score_text(&self, text: &str) -> f32 {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut sum: i32 = 0;
        let mut hits: usize = 0;

        for i in 0..tokens.len() {
            let base = self.word_score(tokens[i].as_str());
            if base == 0 {
                continue;
            }
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            sum += if negated { -base } else { base };
            hits += 1;
        }

        if hits == 0 {
            return 0.0;
        }
        (sum as f32 / (MAX_WORD_WEIGHT * hits as f32)).clamp(-1.0, 1.0)
    }

    /// Blended article score: 0.3 × title + 0.7 × content, clamped.
    /// With an empty content field the title carries the full weight.
    pub fn score_article(&self, article: &Article) -> f32 {
        let title = self.score_text(&article.title);
        if article.content.trim().is_empty() {
            return title.clamp(-1.0, 1.0);
        }
        let content = self.score_text(&article.content);
        (TITLE_WEIGHT * title + CONTENT_WEIGHT * content).clamp(-1.0, 1.0)
    }
}

/// Lower-cased tokens. Apostrophes survive tokenization so contracted
/// negators ("isn't", "won't") stay whole; curly quotes are folded first.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '\u{2019}')
        .map(|t| t.trim_matches(['\'', '\u{2019}']))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase().replace('\u{2019}', "'"))
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not" | "no" | "never" | "isn't" | "wasn't" | "aren't" | "won't" | "can't" | "cannot"
            | "without"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_scores_zero() {
        let a = SentimentAnalyzer::new();
        assert_eq!(a.score_text(""), 0.0);
        assert_eq!(a.score_text("   "), 0.0);
    }

    #[test]
    fn neutral_text_scores_zero() {
        let a = SentimentAnalyzer::new();
        assert_eq!(a.score_text("The committee met on Tuesday afternoon."), 0.0);
    }

    #[test]
    fn polarity_signs_match_lexicon() {
        let a = SentimentAnalyzer::new();
        assert!(a.score_text("Historic breakthrough celebrated as a triumph") > 0.0);
        assert!(a.score_text("Deadly attack leaves dozens killed") < 0.0);
    }

    #[test]
    fn negation_flips_sign() {
        let a = SentimentAnalyzer::new();
        let plain = a.score_text("talks produced progress");
        let negated = a.score_text("talks produced no progress");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn contracted_negators_flip_sign() {
        let a = SentimentAnalyzer::new();
        assert!(a.score_text("leaders can't claim a win yet") < 0.0);
        assert!(a.score_text("leaders claim a win") > 0.0);
    }

    #[test]
    fn scores_stay_clamped() {
        let a = SentimentAnalyzer::new();
        let extreme = "catastrophe disaster tragedy massacre war crisis ".repeat(20);
        let s = a.score_text(&extreme);
        assert!((-1.0..=1.0).contains(&s));
        assert!(s <= -0.9);
    }

    #[test]
    fn article_blend_falls_back_to_title() {
        let a = SentimentAnalyzer::new();
        let mut art = Article::new(
            "Record victory celebrated".into(),
            String::new(),
            "https://example.test/1".into(),
            "Test".into(),
        );
        assert!(a.score_article(&art) > 0.0);
        art.content = "A deadly crash killed several people.".into();
        assert!(a.score_article(&art) < 0.0);
    }
}
