//! Distance to confidence conversion and result records.

use serde::Serialize;

use tgpt_core::types::{Item, NfrCategory};

pub const SNIPPET_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

/// `1 / (1 + distance)`: exactly 1 at distance 0, strictly decreasing, and
/// never 0 (infinite distances clamp to the smallest positive `f64`).
pub fn to_score(distance: f32) -> f64 {
    let d = f64::from(distance.max(0.0));
    (1.0 / (1.0 + d)).max(f64::MIN_POSITIVE)
}

/// First `max_chars` characters followed by `...`. The marker is appended
/// even when the text is shorter.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let mut s: String = text.chars().take(max_chars).collect();
    s.push_str(ELLIPSIS);
    s
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentHit {
    pub title: String,
    pub snippet: String,
    pub url: Option<String>,
    pub score: f64,
}

impl DocumentHit {
    pub fn assemble(item: &Item, distance: f32, snippet_chars: usize) -> Self {
        Self { title: item.title.clone(), snippet: snippet(&item.text, snippet_chars), url: item.url.clone(), score: to_score(distance) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySuggestion {
    pub category: NfrCategory,
    pub description: &'static str,
    pub confidence: f64,
}

impl CategorySuggestion {
    pub fn assemble(category: NfrCategory, distance: f32) -> Self {
        Self { category, description: category.description(), confidence: to_score(distance) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let text = "é".repeat(300);
        let s = snippet(&text, SNIPPET_CHARS);
        assert_eq!(s.chars().count(), SNIPPET_CHARS + ELLIPSIS.len());
    }

    #[test]
    fn short_text_still_gets_marker() {
        assert_eq!(snippet("short", SNIPPET_CHARS), "short...");
        assert_eq!(snippet("", SNIPPET_CHARS), "...");
    }

    #[test]
    fn infinite_distance_stays_positive() {
        assert!(to_score(f32::INFINITY) > 0.0);
        assert_eq!(to_score(0.0), 1.0);
    }
}
