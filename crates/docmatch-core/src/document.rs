//! Word-frequency documents.
//!
//! A [`Document`] is the only input a comparator sees: a name plus a mapping
//! from word to occurrence count. Words keep the order in which they were
//! first seen so that anything derived from a document (report rows in
//! particular) comes out in a stable order.

use std::collections::HashMap;

use crate::markdown;
use crate::text;

/// A named word-frequency profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    name: String,
    words: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Document {
    /// Build a document from `(word, count)` pairs.
    ///
    /// Repeated words have their counts summed. Counts are taken as given:
    /// a zero count produced upstream is kept, not filtered.
    pub fn from_counts<N, I, W>(name: N, counts: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (W, usize)>,
        W: Into<String>,
    {
        let mut doc = Self {
            name: name.into(),
            ..Self::default()
        };
        for (word, count) in counts {
            doc.add(word.into(), count);
        }
        doc
    }

    /// Build a document by counting each word occurrence once.
    pub fn from_words<N, I, W>(name: N, words: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        Self::from_counts(name, words.into_iter().map(|w| (w, 1)))
    }

    /// Tokenize plain text and count its words.
    #[tracing::instrument(skip(text), fields(text_len = text.len()))]
    pub fn from_text(name: &str, text: &str) -> Self {
        Self::from_words(name, text::extract_words(text))
    }

    /// Strip markdown to prose, then tokenize and count.
    #[tracing::instrument(skip(text), fields(text_len = text.len()))]
    pub fn from_markdown(name: &str, text: &str) -> Self {
        Self::from_text(name, &markdown::strip_to_prose(text))
    }

    fn add(&mut self, word: String, count: usize) {
        match self.index.get(&word) {
            Some(&slot) => self.words[slot].1 += count,
            None => {
                self.index.insert(word.clone(), self.words.len());
                self.words.push((word, count));
            }
        }
    }

    /// Identifying label, usually the file path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every distinct word with its count, in first-seen order.
    pub fn word_appearances(&self) -> impl Iterator<Item = (&str, usize)> {
        self.words.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Occurrence count for `word`, if it appears at all.
    pub fn appearances(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&slot| self.words[slot].1)
    }

    /// Number of distinct words.
    pub fn distinct_words(&self) -> usize {
        self.words.len()
    }

    /// Sum of all occurrence counts.
    pub fn total_words(&self) -> usize {
        self.words.iter().map(|(_, c)| c).sum()
    }

    /// Whether the document has no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
