//! Document comparators.
//!
//! A [`Comparator`] turns a pair of documents into a [`MatchingReport`].
//! [`WordCounter`] is the word-frequency implementation: it compares how often
//! each word occurs on either side, after discounting words that come from a
//! shared sample (for instance an assignment template every student starts
//! from).

use std::collections::HashMap;

use tracing::debug;

use crate::document::Document;
use crate::report::{ColumnFormat, DetailRow, MatchingReport, MatchingScore};

/// Something that compares two documents.
pub trait Comparator {
    /// Human-readable comparator name, copied into every report.
    fn label(&self) -> &'static str;

    /// Run the comparison.
    fn run(&self) -> MatchingReport;
}

/// Word-frequency comparator.
///
/// For every word seen on either side the match is `min / max` of the two
/// occurrence counts, or 0 when the word is missing from one side. Row order
/// is first-seen order: left words as they appear in the left document,
/// followed by words that only occur on the right.
#[derive(Debug, Clone, Copy)]
pub struct WordCounter<'a> {
    left: &'a Document,
    right: &'a Document,
    sample: Option<&'a Document>,
}

/// Report label for [`WordCounter`].
pub const WORD_COUNTER_LABEL: &str = "Document Word Counter";

/// Columns of a [`WordCounter`] report.
pub const WORD_COUNTER_COLUMNS: &[(&str, ColumnFormat)] = &[
    ("Word", ColumnFormat::Plain),
    ("Left count", ColumnFormat::Plain),
    ("Right count", ColumnFormat::Plain),
    ("Match", ColumnFormat::Percentage),
];

impl<'a> WordCounter<'a> {
    /// Compare `left` against `right`, discounting `sample` if given.
    pub const fn new(left: &'a Document, right: &'a Document, sample: Option<&'a Document>) -> Self {
        Self {
            left,
            right,
            sample,
        }
    }
}

impl Comparator for WordCounter<'_> {
    fn label(&self) -> &'static str {
        WORD_COUNTER_LABEL
    }

    #[tracing::instrument(skip(self), fields(left = self.left.name(), right = self.right.name()))]
    fn run(&self) -> MatchingReport {
        let mut table = CounterTable::default();
        for (word, count) in self.left.word_appearances() {
            table.entry(word).left += count;
        }
        for (word, count) in self.right.word_appearances() {
            table.entry(word).right += count;
        }
        let tallied = table.len();

        if let Some(sample) = self.sample {
            table.discount(sample);
        }

        let mut score = MatchingScore::default();
        let rows: Vec<DetailRow> = table
            .into_counts()
            .map(|(word, counts)| {
                let matching = counts.ratio();
                score.add_match(matching);
                DetailRow {
                    word: word.to_string(),
                    left: counts.left,
                    right: counts.right,
                    matching,
                }
            })
            .collect();

        debug!(
            tallied,
            discounted = tallied - rows.len(),
            rows = rows.len(),
            score = score.score(),
            "word counts compared"
        );

        MatchingReport::new(
            self.left.name(),
            self.right.name(),
            self.label(),
            WORD_COUNTER_COLUMNS,
            rows,
            &score,
        )
    }
}

/// Occurrences of one word on each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counts {
    left: usize,
    right: usize,
}

impl Counts {
    fn ratio(self) -> f64 {
        if self.left == 0 || self.right == 0 {
            return 0.0;
        }
        let (low, high) = if self.left < self.right {
            (self.left, self.right)
        } else {
            (self.right, self.left)
        };
        low as f64 / high as f64
    }
}

/// Insertion-ordered word -> counts table, local to one run.
#[derive(Debug, Default)]
struct CounterTable<'d> {
    slots: Vec<(&'d str, Counts)>,
    index: HashMap<&'d str, usize>,
}

impl<'d> CounterTable<'d> {
    fn entry(&mut self, word: &'d str) -> &mut Counts {
        let slot = *self.index.entry(word).or_insert_with(|| {
            self.slots.push((word, Counts::default()));
            self.slots.len() - 1
        });
        &mut self.slots[slot].1
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    /// Subtract sample occurrences from both sides, floored at zero, and drop
    /// discounted words left with nothing on either side. Sample words the
    /// table has never seen are ignored. Words the sample does not mention
    /// are kept, even when both of their counts are zero.
    fn discount(&mut self, sample: &Document) {
        let mut touched = vec![false; self.slots.len()];
        for (word, count) in sample.word_appearances() {
            if let Some(&slot) = self.index.get(word) {
                let counts = &mut self.slots[slot].1;
                counts.left = counts.left.saturating_sub(count);
                counts.right = counts.right.saturating_sub(count);
                touched[slot] = true;
            }
        }
        self.slots = std::mem::take(&mut self.slots)
            .into_iter()
            .zip(touched)
            .filter(|((_, counts), touched)| !touched || counts.left != 0 || counts.right != 0)
            .map(|(slot, _)| slot)
            .collect();
        // Slots moved; the index is stale from here on and is not used again.
        self.index.clear();
    }

    fn into_counts(self) -> impl Iterator<Item = (&'d str, Counts)> {
        self.slots.into_iter()
    }
}

/// Compare every unordered pair of `documents` with [`WordCounter`].
///
/// Pairs come out in input order: `(0, 1), (0, 2), ..., (1, 2), ...`.
/// `on_pair` is called after each comparison, which lets callers drive a
/// progress indicator.
#[tracing::instrument(skip_all, fields(documents = documents.len(), sample = sample.is_some()))]
pub fn compare_all<F>(
    documents: &[Document],
    sample: Option<&Document>,
    mut on_pair: F,
) -> Vec<MatchingReport>
where
    F: FnMut(&MatchingReport),
{
    let mut reports = Vec::with_capacity(pair_count(documents.len()));
    for (i, left) in documents.iter().enumerate() {
        for right in &documents[i + 1..] {
            let report = WordCounter::new(left, right, sample).run();
            on_pair(&report);
            reports.push(report);
        }
    }
    reports
}

/// Number of unordered pairs among `n` documents.
pub const fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
