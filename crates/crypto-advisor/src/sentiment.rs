//! Headline Sentiment Scoring
//!
//! VADER compound polarity per title, nudged by a small crypto/finance
//! keyword lexicon that VADER's general-purpose dictionary misses.

use serde::Serialize;
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::model::NewsArticle;

const BULLISH_KEYWORDS: &[(&str, f64)] = &[
    ("surge", 0.4),
    ("surges", 0.4),
    ("surged", 0.4),
    ("surging", 0.4),
    ("rally", 0.4),
    ("rallies", 0.4),
    ("rallied", 0.4),
    ("soar", 0.5),
    ("soars", 0.5),
    ("soared", 0.5),
    ("soaring", 0.5),
    ("bullish", 0.5),
    ("all-time high", 0.5),
    ("record high", 0.4),
    ("breakout", 0.3),
    ("adoption", 0.2),
    ("partnership", 0.2),
    ("upgrade", 0.3),
    ("breakthrough", 0.4),
    ("approval", 0.3),
];

const BEARISH_KEYWORDS: &[(&str, f64)] = &[
    ("crash", -0.5),
    ("crashes", -0.5),
    ("crashed", -0.5),
    ("plunge", -0.5),
    ("plunges", -0.5),
    ("plunged", -0.5),
    ("dump", -0.4),
    ("dumped", -0.4),
    ("bearish", -0.5),
    ("collapse", -0.5),
    ("collapsed", -0.5),
    ("lawsuit", -0.4),
    ("lawsuits", -0.4),
    ("ban", -0.4),
    ("bans", -0.4),
    ("banned", -0.4),
    ("hack", -0.5),
    ("hacks", -0.5),
    ("hacked", -0.5),
    ("exploit", -0.4),
    ("exploits", -0.4),
    ("stolen", -0.5),
    ("scam", -0.6),
    ("scams", -0.6),
    ("fraud", -0.5),
    ("outage", -0.3),
    ("sell-off", -0.4),
    ("delisted", -0.4),
];

/// Weight of the keyword boost relative to the VADER compound score
const KEYWORD_WEIGHT: f64 = 0.5;

/// Sentiment of an article set
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SentimentResult {
    /// One score per title, in input order
    pub per_article_scores: Vec<f64>,

    /// Mean of `per_article_scores`; exactly 0 for no articles
    pub average_score: f64,
}

/// Thread-safe headline scorer. Build once and share.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score one title in [-1, 1]; blank titles are neutral
    pub fn score_title(&self, title: &str) -> f64 {
        if title.trim().is_empty() {
            return 0.0;
        }

        let compound = self
            .analyzer
            .polarity_scores(title)
            .get("compound")
            .copied()
            .unwrap_or(0.0);

        let combined = compound + keyword_boost(title) * KEYWORD_WEIGHT;
        if combined.is_finite() {
            combined.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    /// Score each title independently and average them
    pub fn score_titles<S: AsRef<str>>(&self, titles: &[S]) -> SentimentResult {
        let per_article_scores: Vec<f64> = titles
            .iter()
            .map(|t| self.score_title(t.as_ref()))
            .collect();

        let average_score = if per_article_scores.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = per_article_scores.len() as f64;
            per_article_scores.iter().sum::<f64>() / count
        };

        SentimentResult {
            per_article_scores,
            average_score,
        }
    }

    pub fn score_articles(&self, articles: &[NewsArticle]) -> SentimentResult {
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        self.score_titles(&titles)
    }
}

/// Phrases match as substrings, single words only as whole words
/// ("ban" must not fire on "bank").
fn keyword_boost(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .collect();

    BULLISH_KEYWORDS
        .iter()
        .chain(BEARISH_KEYWORDS)
        .filter(|(keyword, _)| {
            if keyword.contains(' ') {
                lower.contains(keyword)
            } else {
                words.contains(keyword)
            }
        })
        .map(|(_, weight)| weight)
        .sum()
}
