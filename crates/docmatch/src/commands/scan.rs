//! Scan command: compare every pair of documents in a directory.

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, instrument, warn};

use docmatch_core::comparator::pair_count;
use docmatch_core::report::format_percentage;
use docmatch_core::{DisplayLevel, MatchingReport, compare_all};

use super::compare::{PairOutput, print_details};
use super::{load_document, load_sample, validate_threshold};

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory holding the documents to compare.
    pub dir: Utf8PathBuf,

    /// Template document whose words are discounted from every pair.
    #[arg(long, value_name = "FILE")]
    pub sample: Option<Utf8PathBuf>,

    /// Flag pairs whose score reaches this value (0-1).
    #[arg(long)]
    pub threshold: Option<f64>,

    /// How much to print.
    #[arg(long, value_enum)]
    pub display: Option<DisplayLevel>,

    /// File extension to include (repeatable; defaults to config or txt, md).
    #[arg(short, long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,
}

/// Settings from configuration that `scan` falls back to.
#[derive(Debug, Clone, Default)]
pub struct ScanDefaults {
    /// Sample document from config.
    pub sample: Option<Utf8PathBuf>,
    /// Threshold from config.
    pub threshold: Option<f64>,
    /// Display level from config.
    pub display: DisplayLevel,
    /// Extensions from config.
    pub extensions: Vec<String>,
}

/// Compare all documents in a directory pairwise.
#[instrument(name = "cmd_scan", skip_all, fields(dir = %args.dir))]
pub fn cmd_scan(
    args: ScanArgs,
    global_json: bool,
    defaults: ScanDefaults,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        sample = ?args.sample,
        threshold = ?args.threshold,
        extensions = ?args.extensions,
        "executing scan command"
    );

    let threshold = validate_threshold(args.threshold.or(defaults.threshold))?;
    let display = args.display.unwrap_or(defaults.display);
    let sample_path = args.sample.or(defaults.sample);
    let extensions = if args.extensions.is_empty() {
        defaults.extensions
    } else {
        args.extensions
    };

    let files = collect_files(&args.dir, &extensions, sample_path.as_deref())?;
    if files.len() < 2 {
        bail!(
            "{} has {} matching document(s); need at least 2 to compare",
            args.dir,
            files.len()
        );
    }

    let sample = load_sample(sample_path.as_deref(), max_input_bytes)?;
    let documents = files
        .iter()
        .map(|path| load_document(path, max_input_bytes))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let pb = ProgressBar::new(pair_count(documents.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Comparing [{bar:30}] {pos}/{len} ({eta})")
            .context("invalid progress bar template")?,
    );
    if global_json {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    let mut reports = compare_all(&documents, sample.as_ref(), |_| pb.inc(1));
    pb.finish_and_clear();

    reports.sort_by(|a, b| b.score().total_cmp(&a.score()));

    let flagged = threshold.map_or(0, |t| reports.iter().filter(|r| r.exceeds(t)).count());
    debug!(pairs = reports.len(), flagged, "scan finished");

    if global_json {
        let output: Vec<PairOutput<'_>> = reports
            .iter()
            .map(|r| PairOutput::new(r, threshold))
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for report in &reports {
            print_summary_line(report, threshold);
            if display == DisplayLevel::Full {
                print_details(report);
                println!();
            }
        }
        if let Some(max) = threshold
            && flagged == 0
        {
            println!(
                "{} no pair reaches {}",
                "PASS:".if_supports_color(Stream::Stdout, |t| t.green()),
                format_percentage(max)
            );
        }
    }

    if let Some(max) = threshold
        && flagged > 0
    {
        bail!(
            "{flagged} of {} pairs reach the threshold ({}). Probable copies.",
            reports.len(),
            format_percentage(max)
        );
    }

    Ok(())
}

fn print_summary_line(report: &MatchingReport, threshold: Option<f64>) {
    let score = format!("{:>7}", format_percentage(report.score()));
    if threshold.is_some_and(|t| report.exceeds(t)) {
        println!(
            "{}  {}  {}  {}",
            score.if_supports_color(Stream::Stdout, |t| t.red()),
            report.left(),
            report.right(),
            "FLAGGED".if_supports_color(Stream::Stdout, |t| t.red())
        );
    } else {
        println!("{score}  {}  {}", report.left(), report.right());
    }
}

/// Files in `dir` (not recursive) with one of `extensions`, sorted by path.
///
/// The sample document is skipped if it lives in the same directory.
fn collect_files(
    dir: &Utf8Path,
    extensions: &[String],
    sample: Option<&Utf8Path>,
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let entries = dir
        .read_dir_utf8()
        .with_context(|| format!("failed to read directory {dir}"))?;

    let sample = sample.and_then(|p| p.canonicalize_utf8().ok());
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read directory {dir}"))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let wanted = path
            .extension()
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if !wanted {
            continue;
        }
        if sample.is_some() && path.canonicalize_utf8().ok() == sample {
            warn!(file = %path, "skipping sample document found in scan directory");
            continue;
        }
        files.push(path.to_path_buf());
    }
    files.sort();
    Ok(files)
}
