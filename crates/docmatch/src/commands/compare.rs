//! Compare command: word-frequency comparison of two documents.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};

use docmatch_core::report::format_percentage;
use docmatch_core::{Comparator, DisplayLevel, MatchingReport, WordCounter};

use super::{load_document, load_sample, validate_threshold};

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Left document.
    pub left: Utf8PathBuf,

    /// Right document.
    pub right: Utf8PathBuf,

    /// Template document whose words are discounted from both sides.
    #[arg(long, value_name = "FILE")]
    pub sample: Option<Utf8PathBuf>,

    /// Flag the pair when the score reaches this value (0-1).
    #[arg(long)]
    pub threshold: Option<f64>,

    /// How much to print.
    #[arg(long, value_enum)]
    pub display: Option<DisplayLevel>,
}

/// Settings from configuration that `compare` falls back to.
#[derive(Debug, Clone, Default)]
pub struct CompareDefaults {
    /// Sample document from config.
    pub sample: Option<Utf8PathBuf>,
    /// Threshold from config.
    pub threshold: Option<f64>,
    /// Display level from config.
    pub display: DisplayLevel,
}

/// JSON shape of a single comparison.
#[derive(Serialize)]
pub(crate) struct PairOutput<'a> {
    #[serde(flatten)]
    pub report: &'a MatchingReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    pub flagged: bool,
}

impl<'a> PairOutput<'a> {
    pub(crate) fn new(report: &'a MatchingReport, threshold: Option<f64>) -> Self {
        Self {
            report,
            threshold,
            flagged: threshold.is_some_and(|t| report.exceeds(t)),
        }
    }
}

/// Compare two documents and print the matching report.
#[instrument(name = "cmd_compare", skip_all, fields(left = %args.left, right = %args.right))]
pub fn cmd_compare(
    args: CompareArgs,
    global_json: bool,
    defaults: CompareDefaults,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        sample = ?args.sample,
        threshold = ?args.threshold,
        display = ?args.display,
        "executing compare command"
    );

    let threshold = validate_threshold(args.threshold.or(defaults.threshold))?;
    let display = args.display.unwrap_or(defaults.display);
    let sample_path = args.sample.or(defaults.sample);

    let left = load_document(&args.left, max_input_bytes)?;
    let right = load_document(&args.right, max_input_bytes)?;
    let sample = load_sample(sample_path.as_deref(), max_input_bytes)?;

    let report = WordCounter::new(&left, &right, sample.as_ref()).run();
    let output = PairOutput::new(&report, threshold);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if display == DisplayLevel::Full {
            print_details(&report);
            println!();
        }
        match threshold {
            Some(_) if output.flagged => {}
            Some(max) => println!(
                "{} {} and {} match {} (threshold: {})",
                "PASS:".if_supports_color(Stream::Stdout, |t| t.green()),
                report.left(),
                report.right(),
                format_percentage(report.score()),
                format_percentage(max),
            ),
            None => println!("{}", format_percentage(report.score())),
        }
    }

    // The verdict sets the exit status in every output mode
    if let Some(max) = threshold.filter(|_| output.flagged) {
        bail!(
            "{} and {} match {} (threshold: {}). Probable copy.",
            report.left(),
            report.right(),
            format_percentage(report.score()),
            format_percentage(max),
        );
    }

    Ok(())
}

/// Print the per-word table, columns padded to their widest cell.
pub(crate) fn print_details(report: &MatchingReport) {
    for line in detail_lines(report) {
        println!("{line}");
    }
}

fn detail_lines(report: &MatchingReport) -> Vec<String> {
    let caption = report.detail_caption();
    let cells = report.rendered_rows();

    let widths: Vec<usize> = (0..caption.len())
        .map(|col| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(caption[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_line = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, &width))| {
                if col == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format!(
        "{} ({} vs {})",
        report
            .label()
            .if_supports_color(Stream::Stdout, |t| t.bold()),
        report.left(),
        report.right()
    ));
    let header = format_line(caption);
    lines.push(
        header
            .if_supports_color(Stream::Stdout, |t| t.underline())
            .to_string(),
    );
    lines.extend(cells.iter().map(|row| format_line(row.as_slice())));
    lines
}
