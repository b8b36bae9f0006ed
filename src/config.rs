//! Configuration types for loading a portfolio data directory.
//!
//! Everything the loader needs is held in [`PortfolioConfig`], built via its
//! [`PortfolioConfigBuilder`]: where the data lives, what each document is
//! called, and which fallback strings to use when a document omits a value.

use crate::error::PortfolioError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Fallback for [`crate::pipeline::extract::extract_last_updated`].
pub const DEFAULT_LAST_UPDATED: &str = "2024年7月28日";

/// The markdown documents a data directory may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Document {
    /// `personal.md`: the English-keyed profile document.
    Personal,
    /// `personal-info.md`: `# 基本情報` profile.
    PersonalInfo,
    /// `development-experience.md`: awards, tech stack and projects.
    Development,
    /// `research-history.md`: keywords, abstract and papers.
    Research,
    /// `internship-history.md`: one subsection per internship.
    Internship,
    /// `last-updated.md`: a single `最終更新日:` line.
    LastUpdated,
}

impl Document {
    /// Every document, in load order.
    pub const ALL: [Document; 6] = [
        Document::Personal,
        Document::PersonalInfo,
        Document::Development,
        Document::Research,
        Document::Internship,
        Document::LastUpdated,
    ];

    /// File name used when the config does not override it.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Document::Personal => "personal.md",
            Document::PersonalInfo => "personal-info.md",
            Document::Development => "development-experience.md",
            Document::Research => "research-history.md",
            Document::Internship => "internship-history.md",
            Document::LastUpdated => "last-updated.md",
        }
    }

    /// Guess the document kind from a file name such as `research-history.md`.
    pub fn from_file_name(name: &str) -> Option<Document> {
        Document::ALL
            .into_iter()
            .find(|doc| doc.default_file_name() == name)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.default_file_name();
        f.write_str(name.trim_end_matches(".md"))
    }
}

/// Configuration for loading a portfolio.
///
/// # Example
/// ```rust
/// use portfolio_md::{Document, PortfolioConfig};
///
/// let config = PortfolioConfig::builder()
///     .data_dir("site/data")
///     .file_name(Document::Personal, "me.md")
///     .build()
///     .unwrap();
/// assert!(config.path_of(Document::Personal).ends_with("me.md"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Directory holding the markdown documents. Default: `data`.
    pub data_dir: PathBuf,

    /// Per-document file-name overrides, relative to `data_dir`.
    pub file_names: BTreeMap<Document, String>,

    /// Returned when `last-updated.md` has no `最終更新日:` line.
    pub last_updated_fallback: String,

    /// Returned when no `**氏名**:` line is present. Default: empty.
    pub default_name: String,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_names: BTreeMap::new(),
            last_updated_fallback: DEFAULT_LAST_UPDATED.to_string(),
            default_name: String::new(),
        }
    }
}

impl PortfolioConfig {
    /// Create a new builder for `PortfolioConfig`.
    pub fn builder() -> PortfolioConfigBuilder {
        PortfolioConfigBuilder {
            config: Self::default(),
        }
    }

    /// File name of `document`, honouring overrides.
    pub fn file_name(&self, document: Document) -> &str {
        self.file_names
            .get(&document)
            .map(String::as_str)
            .unwrap_or_else(|| document.default_file_name())
    }

    /// Full path of `document` inside the data directory.
    pub fn path_of(&self, document: Document) -> PathBuf {
        self.data_dir.join(self.file_name(document))
    }
}

/// Builder for [`PortfolioConfig`].
#[derive(Debug)]
pub struct PortfolioConfigBuilder {
    config: PortfolioConfig,
}

impl PortfolioConfigBuilder {
    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.data_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn file_name(mut self, document: Document, name: impl Into<String>) -> Self {
        self.config.file_names.insert(document, name.into());
        self
    }

    pub fn last_updated_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.config.last_updated_fallback = fallback.into();
        self
    }

    pub fn default_name(mut self, name: impl Into<String>) -> Self {
        self.config.default_name = name.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PortfolioConfig, PortfolioError> {
        let c = &self.config;
        if c.data_dir.as_os_str().is_empty() {
            return Err(PortfolioError::InvalidConfig(
                "data directory must not be empty".into(),
            ));
        }
        for (document, name) in &c.file_names {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(PortfolioError::InvalidConfig(format!(
                    "file name for {document} must not be empty"
                )));
            }
            if Path::new(trimmed).is_absolute() {
                return Err(PortfolioError::InvalidConfig(format!(
                    "file name for {document} must be relative to the data directory, got '{trimmed}'"
                )));
            }
        }
        Ok(self.config)
    }
}
