//! Matching reports produced by comparators.
//!
//! All structs derive `Serialize` and `Deserialize` so the CLI can emit them
//! directly as JSON.

use serde::{Deserialize, Serialize};

/// How a detail column should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFormat {
    /// Print the value as-is.
    Plain,
    /// Print a `[0, 1]` ratio as a percentage with two decimals.
    Percentage,
}

impl ColumnFormat {
    /// Render a single cell.
    pub fn render(self, value: &DetailValue<'_>) -> String {
        match (self, value) {
            (Self::Percentage, DetailValue::Ratio(r)) => format_percentage(*r),
            (_, DetailValue::Text(t)) => (*t).to_string(),
            (_, DetailValue::Count(c)) => c.to_string(),
            (Self::Plain, DetailValue::Ratio(r)) => r.to_string(),
        }
    }
}

/// Format a ratio as `xx.xx%`.
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// A borrowed cell value from a [`DetailRow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailValue<'a> {
    /// A word.
    Text(&'a str),
    /// An occurrence count.
    Count(usize),
    /// A match ratio.
    Ratio(f64),
}

/// Per-word comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    /// The word being compared.
    pub word: String,
    /// Occurrences on the left, after sample discounting.
    pub left: usize,
    /// Occurrences on the right, after sample discounting.
    pub right: usize,
    /// `min / max` of the two counts, or 0 when either side is 0.
    #[serde(rename = "match")]
    pub matching: f64,
}

impl DetailRow {
    /// The row's cells in caption order.
    pub fn values(&self) -> [DetailValue<'_>; 4] {
        [
            DetailValue::Text(&self.word),
            DetailValue::Count(self.left),
            DetailValue::Count(self.right),
            DetailValue::Ratio(self.matching),
        ]
    }
}

/// Accumulates per-row match values into an aggregate score.
///
/// The aggregate is the arithmetic mean of every value added, zero matches
/// included. An accumulator with nothing added scores 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchingScore {
    sum: f64,
    count: usize,
}

impl MatchingScore {
    /// Feed one match value.
    pub fn add_match(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Number of values added.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Mean of the values added so far.
    pub fn score(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// The result of one comparator run over a pair of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingReport {
    left: String,
    right: String,
    label: String,
    detail_caption: Vec<String>,
    detail_format: Vec<ColumnFormat>,
    rows: Vec<DetailRow>,
    score: f64,
}

impl MatchingReport {
    /// Assemble a report. The score is taken from `score` once, here.
    pub fn new(
        left: &str,
        right: &str,
        label: &str,
        columns: &[(&str, ColumnFormat)],
        rows: Vec<DetailRow>,
        score: &MatchingScore,
    ) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            label: label.to_string(),
            detail_caption: columns.iter().map(|(c, _)| (*c).to_string()).collect(),
            detail_format: columns.iter().map(|(_, f)| *f).collect(),
            rows,
            score: score.score(),
        }
    }

    /// Name of the left document.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Name of the right document.
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Name of the comparator that produced this report.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column headers for [`rows`](Self::rows).
    pub fn detail_caption(&self) -> &[String] {
        &self.detail_caption
    }

    /// Display hint per column.
    pub fn detail_format(&self) -> &[ColumnFormat] {
        &self.detail_format
    }

    /// Per-word results.
    pub fn rows(&self) -> &[DetailRow] {
        &self.rows
    }

    /// Aggregate matching score in `[0, 1]`.
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Whether the aggregate score reaches `threshold`.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.score >= threshold
    }

    /// Render every row using the per-column formats.
    pub fn rendered_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.values()
                    .into_iter()
                    .zip(&self.detail_format)
                    .map(|(value, format)| format.render(&value))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[(&str, ColumnFormat)] = &[
        ("Word", ColumnFormat::Plain),
        ("Left count", ColumnFormat::Plain),
        ("Right count", ColumnFormat::Plain),
        ("Match", ColumnFormat::Percentage),
    ];

    fn row(word: &str, left: usize, right: usize, matching: f64) -> DetailRow {
        DetailRow {
            word: word.to_string(),
            left,
            right,
            matching,
        }
    }

    #[test]
    fn empty_score_is_zero() {
        let score = MatchingScore::default();
        assert_eq!(score.count(), 0);
        assert_eq!(score.score(), 0.0);
    }

    #[test]
    fn score_is_mean_including_zeros() {
        let mut score = MatchingScore::default();
        score.add_match(1.0);
        score.add_match(0.0);
        score.add_match(0.5);
        score.add_match(0.5);
        assert_eq!(score.count(), 4);
        assert!((score.score() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn percentage_has_two_decimals() {
        assert_eq!(format_percentage(1.0), "100.00%");
        assert_eq!(format_percentage(0.5), "50.00%");
        assert_eq!(format_percentage(1.0 / 3.0), "33.33%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn renders_rows_with_column_formats() {
        let mut score = MatchingScore::default();
        score.add_match(0.5);
        let report = MatchingReport::new(
            "a.txt",
            "b.txt",
            "Test",
            COLUMNS,
            vec![row("x", 4, 2, 0.5)],
            &score,
        );
        assert_eq!(
            report.rendered_rows(),
            vec![vec!["x", "4", "2", "50.00%"]]
        );
        assert_eq!(report.detail_caption().len(), 4);
        assert_eq!(report.detail_format()[3], ColumnFormat::Percentage);
    }

    #[test]
    fn plain_ratio_renders_raw_value() {
        assert_eq!(
            ColumnFormat::Plain.render(&DetailValue::Ratio(0.25)),
            "0.25"
        );
    }

    #[test]
    fn exceeds_is_inclusive() {
        let mut score = MatchingScore::default();
        score.add_match(0.75);
        let report = MatchingReport::new("a", "b", "Test", COLUMNS, Vec::new(), &score);
        assert!(report.exceeds(0.75));
        assert!(report.exceeds(0.5));
        assert!(!report.exceeds(0.8));
    }

    #[test]
    fn serializes_match_field_name() {
        let json = serde_json::to_value(row("cat", 2, 0, 0.0)).unwrap();
        assert_eq!(json["word"], "cat");
        assert_eq!(json["match"], 0.0);
        assert!(json.get("matching").is_none());
    }
}
