//! Lexical helpers shared by the optimizer, validator and scorer.
//!
//! Similarity here is purely word-overlap based; no stemming or semantics.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Word-set similarity above which two steps count as saying the same thing.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

static RE_AMBIGUOUS_PRONOUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(it|this|that|they|these|those)\b").expect("valid regex"));

/// Goal markers, in priority order.
pub static RE_GOAL_MARKERS: Lazy<Vec<Regex>> =
    Lazy::new(|| marker_patterns(&["goal:", "objective:", "purpose:", "aim:"]));

/// Context markers, in the order their text is collected.
pub static RE_CONTEXT_MARKERS: Lazy<Vec<Regex>> =
    Lazy::new(|| marker_patterns(&["context:", "background:", "given:", "assuming:"]));

fn marker_patterns(markers: &[&str]) -> Vec<Regex> {
    markers
        .iter()
        .map(|marker| {
            Regex::new(&format!("(?i){}", regex::escape(marker))).expect("valid regex")
        })
        .collect()
}

/// Byte offset just past the first case-insensitive match of `marker` in `text`.
pub fn marker_end(text: &str, marker: &Regex) -> Option<usize> {
    marker.find(text).map(|m| m.end())
}

/// Lowercase, drop everything but letters/digits/whitespace, collapse runs of
/// whitespace.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn word_set(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Jaccard index of the two texts' normalized word sets.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    set_similarity(&word_set(a), &word_set(b))
}

/// Jaccard index of two precomputed word sets; two empty sets score 0.
pub fn set_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

pub fn is_similar(a: &str, b: &str) -> bool {
    jaccard_similarity(a, b) > SIMILARITY_THRESHOLD
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn first_words(text: &str, count: usize) -> String {
    text.split_whitespace()
        .take(count)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First `count` characters, respecting char boundaries.
pub fn take_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

pub fn count_ambiguous_pronouns(text: &str) -> usize {
    RE_AMBIGUOUS_PRONOUN.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Given:   Initial DATA!! "), "given initial data");
        assert_eq!(normalize("a-b c"), "ab c");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn test_jaccard_similarity() {
        assert_eq!(jaccard_similarity("a b c", "A, b. c!"), 1.0);
        assert_eq!(jaccard_similarity("a b", "c d"), 0.0);
        assert!((jaccard_similarity("a b c d", "a b c e") - 0.6).abs() < 1e-9);
        assert_eq!(jaccard_similarity("", "!!"), 0.0);
    }

    #[test]
    fn test_similarity_threshold_is_exclusive() {
        // 7 shared of 10 distinct words is exactly 0.7
        let a = "one two three four five six seven eight";
        let b = "one two three four five six seven nine ten";
        assert!((jaccard_similarity(a, b) - 0.7).abs() < 1e-9);
        assert!(!is_similar(a, b));
    }

    #[test]
    fn test_first_words_and_take_chars() {
        assert_eq!(first_words("one two  three", 2), "one two");
        assert_eq!(first_words("one", 5), "one");
        assert_eq!(take_chars("héllo", 2), "hé");
    }

    #[test]
    fn test_marker_end_is_case_insensitive() {
        let goal = &RE_GOAL_MARKERS[0];
        assert_eq!(marker_end("Intro. GOAL: x", goal), Some(12));
        assert_eq!(marker_end("goals x", goal), None);
        assert_eq!(marker_end("Given: a", &RE_CONTEXT_MARKERS[2]), Some(6));
    }

    #[test]
    fn test_count_ambiguous_pronouns() {
        assert_eq!(count_ambiguous_pronouns("This is it, and THAT is those."), 4);
        assert_eq!(count_ambiguous_pronouns("Itinerary thesis thatch"), 0);
    }
}
