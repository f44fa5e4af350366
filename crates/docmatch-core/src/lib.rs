//! Core library for docmatch.
//!
//! Detects probable plagiarism by comparing how often each word occurs in two
//! documents, optionally ignoring vocabulary shared with a sample (template)
//! document.
//!
//! # Modules
//!
//! - [`document`] - Word-frequency documents
//! - [`comparator`] - The [`Comparator`] trait and the [`WordCounter`] comparator
//! - [`report`] - Matching reports and score accumulation
//! - [`text`] / [`markdown`] - Tokenization helpers
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use docmatch_core::{Comparator, Document, WordCounter};
//!
//! let left = Document::from_text("left.txt", "the cat sat on the mat");
//! let right = Document::from_text("right.txt", "the cat sat on a hat");
//! let report = WordCounter::new(&left, &right, None).run();
//!
//! assert_eq!(report.label(), "Document Word Counter");
//! assert!(report.score() > 0.0 && report.score() < 1.0);
//! ```
#![deny(unsafe_code)]

pub mod comparator;
pub mod config;
pub mod document;
pub mod error;
pub mod markdown;
pub mod report;
pub mod text;

pub use comparator::{Comparator, WordCounter, compare_all};
pub use config::{Config, ConfigLoader, ConfigSources, DisplayLevel, LogLevel};
pub use document::Document;
pub use error::{ConfigError, ConfigResult};
pub use report::{ColumnFormat, DetailRow, MatchingReport, MatchingScore};

/// Default per-document input size limit: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
