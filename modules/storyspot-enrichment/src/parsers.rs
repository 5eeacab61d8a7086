//! Heuristic extraction of structured results from free-form generated text.
//!
//! Every parser is total: off-format input yields fewer (or zero) items,
//! never an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use storyspot_common::{Intensity, RecommendationList, Sentiment, SentimentResult, TagList};

pub const EMOTIONS: [&str; 6] = ["joy", "sadness", "anger", "fear", "surprise", "love"];
pub const THEMES: [&str; 5] = [
    "adventure",
    "discovery",
    "personal growth",
    "connection",
    "transformation",
];

pub const MAX_LABELS: usize = 3;
pub const MAX_TAGS: usize = 10;
pub const MAX_RECOMMENDATIONS: usize = 4;

// A run of letters and blanks ending at a colon, a newline or the end of text.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z][A-Za-z \t\r]*)(?::|\n|$)").unwrap());
static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\s*").unwrap());
static LIST_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\d").unwrap());

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

pub fn parse_sentiment(text: &str) -> SentimentResult {
    let lower = text.to_lowercase();

    SentimentResult {
        overall_sentiment: extract_sentiment(&lower),
        emotional_intensity: extract_intensity(&lower),
        primary_emotions: vocabulary_hits(&lower, &EMOTIONS),
        themes: vocabulary_hits(&lower, &THEMES),
    }
}

fn extract_sentiment(lower: &str) -> Sentiment {
    if lower.contains("positive") {
        Sentiment::Positive
    } else if lower.contains("negative") {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn extract_intensity(lower: &str) -> Intensity {
    if lower.contains("intense") || lower.contains("strong") {
        Intensity::High
    } else if lower.contains("moderate") {
        Intensity::Medium
    } else {
        Intensity::Low
    }
}

/// Vocabulary entries present in `lower`, in vocabulary order.
fn vocabulary_hits(lower: &str, vocabulary: &[&str]) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|label| lower.contains(**label))
        .take(MAX_LABELS)
        .map(|label| label.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Lowercased label runs, first appearance wins, at most [`MAX_TAGS`].
pub fn parse_tags(text: &str) -> TagList {
    let mut seen = HashSet::new();

    TAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .take(MAX_TAGS)
        .collect()
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// Items of a numbered list (`1. ...`). An item runs until the next line
/// that starts with a digit, or the end of text.
pub fn parse_recommendations(text: &str) -> RecommendationList {
    let mut items = Vec::new();
    let mut pos = 0;

    while items.len() < MAX_RECOMMENDATIONS {
        let Some(marker) = LIST_MARKER_RE.find_at(text, pos) else {
            break;
        };

        let rest = &text[marker.end()..];
        let end = LIST_BOUNDARY_RE
            .find(rest)
            .map_or(rest.len(), |boundary| boundary.start());

        let item = rest[..end].trim();
        if !item.is_empty() {
            items.push(item.to_string());
        }

        pos = marker.end() + end;
    }

    items
}
