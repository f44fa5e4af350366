//! Text tokenization.
//!
//! Turns raw prose into the word stream that [`Document`](crate::Document)
//! counts. No stemming or stop-word removal happens here; the only
//! normalization is lowercasing and trimming surrounding punctuation.

/// Extract words from text, splitting on whitespace and stripping punctuation.
///
/// Apostrophes and hyphens survive inside and at the edges of a word so that
/// contractions ("don't") and compounds ("well-known") stay intact.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}
