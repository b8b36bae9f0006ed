//! # portfolio-md
//!
//! Turn the hand-written markdown behind a personal portfolio site into
//! typed records: profile, education, laboratories, job history, research,
//! awards, projects and tech stack.
//!
//! ## Why line scanners?
//!
//! The documents are small, written by one person, and only loosely follow
//! markdown conventions: `**key**: value` list items, `#`/`##`/`###`
//! nesting, plain `key: value` lines. A full CommonMark parser would still
//! leave all the field picking to do. Instead each document goes through a
//! regex-driven line scanner that keeps partial records in a little state
//! and flushes them on heading boundaries. Scanners never fail: a line they
//! do not recognise is skipped and a missing field falls back to a default.
//!
//! ## Pipeline Overview
//!
//! ```text
//! data/
//!  │
//!  ├─ 1. Input     read each document concurrently (tokio)
//!  ├─ 2. Scan      personal.md scanner / generic section tree / extractors
//!  ├─ 3. Records   typed records picked out of the section trees
//!  ├─ 4. View      period strings and timelines for the pages
//!  └─ 5. Output    one PortfolioOutput + per-document stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use portfolio_md::{load_portfolio, PortfolioConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PortfolioConfig::builder().data_dir("data").build()?;
//!     let output = load_portfolio(&config).await?;
//!     println!("{} ({})", output.name, output.last_updated);
//!     for lab in &output.view.laboratories {
//!         println!("{}: {}", lab.name, lab.period);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Single documents can be parsed without touching the file system:
//!
//! ```rust
//! use portfolio_md::pipeline::personal::parse_personal;
//!
//! let data = parse_personal("# Skills\n- Rust (2023/04)\n");
//! assert_eq!(data.skills[0].date.as_deref(), Some("2023/04"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `portfolio` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! portfolio-md = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod fields;
pub mod load;
pub mod output;
pub mod pipeline;
pub mod tech_icons;
pub mod timeline;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{Document, PortfolioConfig, PortfolioConfigBuilder};
pub use error::{DocumentError, PortfolioError};
pub use load::{
    load_portfolio, load_portfolio_sync, load_to_file, parse_document, read_raw_documents,
    RawDocuments,
};
pub use output::{LoadStats, PortfolioOutput};
pub use pipeline::personal::{parse_personal, PersonalData};
pub use pipeline::sections::{parse_sections, SectionTree};
pub use tech_icons::tech_icon;
pub use view::SiteView;
