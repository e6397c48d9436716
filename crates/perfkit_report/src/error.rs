//! Top-level error type for report generation.

use std::path::PathBuf;

/// "Report run failed" errors. Every variant aborts the run before the
/// workbook is saved.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Summary document cannot be opened or read.
    #[error("Failed to read summary {}: {source}", path.display())]
    InputRead {
        /// Summary document path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Summary document is not valid JSON.
    #[error("Failed to parse summary {}: {source}", path.display())]
    InputParse {
        /// Summary document path.
        path: PathBuf,
        /// Underlying JSON syntax error.
        #[source]
        source: serde_json::Error,
    },

    /// Summary document is valid JSON but lacks a required key or has a wrong type.
    #[error("Invalid summary {}: {message}", path.display())]
    Schema {
        /// Summary document path.
        path: PathBuf,
        /// Field-level detail.
        message: String,
    },

    /// Companion percentile CSV exists but cannot be read or is malformed.
    #[error("Invalid steady-state percentiles {}: {message}", path.display())]
    Companion {
        /// Companion CSV path.
        path: PathBuf,
        /// Detail text.
        message: String,
    },

    /// Workbook encoding or saving failed.
    #[error("Workbook error: {0}")]
    Xlsx(String),
}
