//! Error types for the portfolio-md library.
//!
//! Only file-system and configuration problems are errors. The markdown
//! scanners themselves never fail: a malformed line is skipped and a missing
//! field falls back to an empty or default value, so a half-written profile
//! still produces a page.
//!
//! * [`PortfolioError`]: **Fatal**. The data directory is missing, a file
//!   requested explicitly cannot be read, the output cannot be written, or the
//!   configuration is invalid.
//!
//! * [`DocumentError`]: **Non-fatal**. One document of a data directory could
//!   not be read. Recorded in [`crate::output::LoadStats`] while the remaining
//!   documents load normally.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the portfolio-md library.
#[derive(Debug, Error)]
pub enum PortfolioError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The data directory does not exist or is not a directory.
    #[error("Data directory not found: '{path}'\nPass the directory that holds personal.md and friends.")]
    DataDirNotFound { path: PathBuf },

    /// A markdown file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output could not be serialised.
    #[error("Failed to serialise output: {0}")]
    Serialize(#[from] serde_json::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortfolioError {
    /// Downgrade a fatal read error to a per-document error.
    pub fn into_document_error(self, document: crate::config::Document) -> DocumentError {
        match self {
            PortfolioError::FileNotFound { path } => DocumentError::Missing { document, path },
            other => DocumentError::Unreadable {
                document,
                detail: other.to_string(),
            },
        }
    }
}

/// A non-fatal error for a single document of a data directory.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// The document's file does not exist; its record uses defaults.
    #[error("{document}: no file at '{path}', using defaults")]
    Missing {
        document: crate::config::Document,
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("{document}: {detail}")]
    Unreadable {
        document: crate::config::Document,
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Document;

    #[test]
    fn data_dir_not_found_display() {
        let e = PortfolioError::DataDirNotFound {
            path: PathBuf::from("/nope/data"),
        };
        assert!(e.to_string().contains("/nope/data"), "got: {e}");
    }

    #[test]
    fn missing_file_downgrades_to_missing() {
        let e = PortfolioError::FileNotFound {
            path: PathBuf::from("data/personal.md"),
        };
        match e.into_document_error(Document::Personal) {
            DocumentError::Missing { document, path } => {
                assert_eq!(document, Document::Personal);
                assert_eq!(path, PathBuf::from("data/personal.md"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn permission_denied_downgrades_to_unreadable() {
        let e = PortfolioError::PermissionDenied {
            path: PathBuf::from("data/last-updated.md"),
        };
        let doc = e.into_document_error(Document::LastUpdated);
        assert!(matches!(doc, DocumentError::Unreadable { .. }));
        assert!(doc.to_string().contains("Permission denied"));
    }

    #[test]
    fn document_error_names_document() {
        let e = DocumentError::Missing {
            document: Document::Research,
            path: PathBuf::from("x.md"),
        };
        assert!(e.to_string().starts_with("research-history"), "got: {e}");
    }
}
