//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use tracing::debug;

use docmatch_core::Document;

pub mod compare;
pub mod info;
pub mod scan;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Load a file as a word-frequency [`Document`] named after its path.
///
/// Markdown files (`.md`, any case) are reduced to prose first.
pub fn load_document(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<Document> {
    let content = read_input_file(path, max_bytes)?;
    let is_markdown = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
    let doc = if is_markdown {
        Document::from_markdown(path.as_str(), &content)
    } else {
        Document::from_text(path.as_str(), &content)
    };
    debug!(
        file = %path,
        distinct = doc.distinct_words(),
        total = doc.total_words(),
        "document loaded"
    );
    Ok(doc)
}

/// Load the optional sample document.
pub fn load_sample(
    path: Option<&Utf8Path>,
    max_bytes: Option<usize>,
) -> anyhow::Result<Option<Document>> {
    path.map(|p| load_document(p, max_bytes).with_context(|| format!("failed to load sample {p}")))
        .transpose()
}

/// Reject thresholds outside `[0, 1]`.
pub fn validate_threshold(threshold: Option<f64>) -> anyhow::Result<Option<f64>> {
    match threshold {
        Some(t) if !(0.0..=1.0).contains(&t) => {
            anyhow::bail!("threshold must be between 0 and 1, got {t}")
        }
        other => Ok(other),
    }
}
