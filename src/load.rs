//! Loading entry points.
//!
//! [`load_portfolio`] reads every document of a data directory concurrently
//! and runs each through its scanner. Documents are independent, so one
//! missing or unreadable file only leaves its own record at the default; the
//! load fails only when the data directory itself is missing.

use crate::config::{Document, PortfolioConfig, DEFAULT_LAST_UPDATED};
use crate::error::PortfolioError;
use crate::output::{LoadStats, PortfolioOutput};
use crate::pipeline::{extract, input, personal, records, sections};
use crate::view::SiteView;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Load and parse every document under `config.data_dir`.
///
/// # Errors
/// Returns `Err` only when the data directory does not exist. Per-document
/// failures are recorded in `output.stats.errors`.
pub async fn load_portfolio(config: &PortfolioConfig) -> Result<PortfolioOutput, PortfolioError> {
    let start = Instant::now();
    info!("Loading portfolio from {}", config.data_dir.display());

    input::check_data_dir(&config.data_dir).await?;

    let reads = Document::ALL.into_iter().map(|document| async move {
        let path = config.path_of(document);
        (document, input::read_markdown(&path).await)
    });
    let results = futures::future::join_all(reads).await;

    let mut contents = BTreeMap::new();
    let mut stats = LoadStats::default();
    for (document, result) in results {
        match result {
            Ok(content) => {
                debug!("Loaded {} ({} bytes)", document, content.len());
                contents.insert(document, content);
                stats.loaded += 1;
            }
            Err(e) => {
                let e = e.into_document_error(document);
                warn!("Skipping {}", e);
                stats.errors.push(e);
            }
        }
    }

    let mut output = assemble(&contents, config);
    stats.duration_ms = start.elapsed().as_millis() as u64;
    output.stats = stats;

    info!(
        "Portfolio loaded: {}/{} documents, {}ms",
        output.stats.loaded,
        Document::ALL.len(),
        output.stats.duration_ms
    );

    Ok(output)
}

/// Run every scanner over the documents that were read.
fn assemble(contents: &BTreeMap<Document, String>, config: &PortfolioConfig) -> PortfolioOutput {
    let text = |document: Document| contents.get(&document).map(String::as_str).unwrap_or("");

    let personal = personal::parse_personal(text(Document::Personal));
    let info_tree = sections::parse_sections(text(Document::PersonalInfo));
    let dev_tree = sections::parse_sections(text(Document::Development));
    let development = records::development_experience(&dev_tree);
    let view = SiteView::build(&personal, &development);

    PortfolioOutput {
        personal_info: records::personal_info(&info_tree),
        summary: extract::extract_personal_info(text(Document::PersonalInfo)),
        development_summary: extract::extract_development(text(Document::Development)),
        sections_summary: extract::extract_sections(text(Document::Development)),
        research: records::research_history(&sections::parse_sections(text(Document::Research))),
        publications: extract::extract_publications(text(Document::Research)),
        internships: records::internship_history(&sections::parse_sections(text(
            Document::Internship,
        ))),
        internship_summaries: extract::extract_internships(text(Document::Internship)),
        last_updated: extract::extract_last_updated(
            text(Document::LastUpdated),
            &config.last_updated_fallback,
        ),
        name: extract::extract_personal_name(text(Document::PersonalInfo), &config.default_name),
        personal,
        development,
        view,
        stats: LoadStats::default(),
    }
}

/// Load a data directory and write the output as pretty JSON.
///
/// Uses atomic write (temp file in the target directory + persist) so a
/// reader never sees a partial file.
pub async fn load_to_file(
    config: &PortfolioConfig,
    output_path: impl AsRef<Path>,
) -> Result<LoadStats, PortfolioError> {
    let output = load_portfolio(config).await?;
    let json = serde_json::to_string_pretty(&output)?;
    let path = output_path.as_ref().to_path_buf();

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| PortfolioError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    let target = path.clone();
    tokio::task::spawn_blocking(move || write_atomic(&dir, &target, json.as_bytes()))
        .await
        .map_err(|e| PortfolioError::Internal(format!("write task failed: {e}")))??;

    info!("Wrote {}", path.display());
    Ok(output.stats)
}

fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), PortfolioError> {
    let failed = |source| PortfolioError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(failed)?;
    tmp.write_all(bytes).map_err(failed)?;
    tmp.write_all(b"\n").map_err(failed)?;
    tmp.persist(path).map_err(|e| failed(e.error))?;
    Ok(())
}

/// Synchronous wrapper around [`load_portfolio`].
///
/// Creates a temporary tokio runtime internally.
pub fn load_portfolio_sync(config: &PortfolioConfig) -> Result<PortfolioOutput, PortfolioError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PortfolioError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(load_portfolio(config))
}

/// Parse a single document of the given kind into JSON.
pub fn parse_document(document: Document, content: &str) -> Result<Value, PortfolioError> {
    let value = match document {
        Document::Personal => serde_json::to_value(personal::parse_personal(content))?,
        Document::PersonalInfo => {
            serde_json::to_value(records::personal_info(&sections::parse_sections(content)))?
        }
        Document::Development => serde_json::to_value(records::development_experience(
            &sections::parse_sections(content),
        ))?,
        Document::Research => {
            serde_json::to_value(records::research_history(&sections::parse_sections(content)))?
        }
        Document::Internship => serde_json::to_value(records::internship_history(
            &sections::parse_sections(content),
        ))?,
        Document::LastUpdated => {
            Value::String(extract::extract_last_updated(content, DEFAULT_LAST_UPDATED))
        }
    };
    Ok(value)
}

// ── Raw documents ─────────────────────────────────────────────────────────

/// The text of the five Japanese documents, read as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocuments {
    pub personal_info: String,
    pub development_experience: String,
    pub research_history: String,
    pub internship_history: String,
    pub last_updated: String,
}

/// Read the five Japanese documents. Unlike [`load_portfolio`], any missing
/// or unreadable file is an error.
pub async fn read_raw_documents(config: &PortfolioConfig) -> Result<RawDocuments, PortfolioError> {
    input::check_data_dir(&config.data_dir).await?;

    let read = |document: Document| {
        let path = config.path_of(document);
        async move { input::read_markdown(&path).await }
    };

    let (personal_info, development_experience, research_history, internship_history, last_updated) =
        futures::try_join!(
            read(Document::PersonalInfo),
            read(Document::Development),
            read(Document::Research),
            read(Document::Internship),
            read(Document::LastUpdated)
        )?;

    Ok(RawDocuments {
        personal_info,
        development_experience,
        research_history,
        internship_history,
        last_updated,
    })
}
