//! CLI binary for portfolio-md.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `PortfolioConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use portfolio_md::config::DEFAULT_LAST_UPDATED;
use portfolio_md::pipeline::{extract, input, sections};
use portfolio_md::{
    load_portfolio, load_to_file, parse_document, Document, PortfolioConfig, PortfolioOutput,
};
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summary of a data directory
  portfolio data/

  # Everything as JSON
  portfolio data/ --json > portfolio.json

  # Write JSON atomically to a file
  portfolio data/ -o build/portfolio.json

  # Parse one document; the kind is inferred from the file name
  portfolio data/research-history.md

  # Force the kind, or dump the raw section tree
  portfolio notes.md --kind internship
  portfolio notes.md --kind sections

DATA DIRECTORY:
  personal.md                 English-keyed profile (Profile, Skills, Education, …)
  personal-info.md            # 基本情報
  development-experience.md   # アプリ開発経験
  research-history.md         # 研究内容
  internship-history.md       # インターンシップ歴
  last-updated.md             最終更新日: …

  Missing documents are reported and their records left empty.

ENVIRONMENT VARIABLES:
  PORTFOLIO_OUTPUT                 Default for --output
  PORTFOLIO_LAST_UPDATED_FALLBACK  Default for --last-updated-fallback
  PORTFOLIO_DEFAULT_NAME           Default for --default-name
  RUST_LOG                         Override the log filter (e.g. portfolio_md=debug)
"#;

/// Parse portfolio markdown into typed records.
#[derive(Parser, Debug)]
#[command(
    name = "portfolio",
    version,
    about = "Parse portfolio markdown (profile, education, jobs, research, awards) into typed records",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Data directory, or a single markdown document.
    input: PathBuf,

    /// Parser to use for a single document (default: inferred from the file name).
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    /// Print JSON instead of a summary.
    #[arg(long, env = "PORTFOLIO_JSON")]
    json: bool,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long, env = "PORTFOLIO_OUTPUT")]
    output: Option<PathBuf>,

    /// Footer date used when last-updated.md has none.
    #[arg(long, env = "PORTFOLIO_LAST_UPDATED_FALLBACK")]
    last_updated_fallback: Option<String>,

    /// Header name used when personal-info.md has none.
    #[arg(long, env = "PORTFOLIO_DEFAULT_NAME")]
    default_name: Option<String>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PORTFOLIO_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PORTFOLIO_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Personal,
    PersonalInfo,
    Development,
    Research,
    Internship,
    LastUpdated,
    /// The generic section tree, before any record is picked out.
    Sections,
}

impl KindArg {
    fn document(self) -> Option<Document> {
        match self {
            KindArg::Personal => Some(Document::Personal),
            KindArg::PersonalInfo => Some(Document::PersonalInfo),
            KindArg::Development => Some(Document::Development),
            KindArg::Research => Some(Document::Research),
            KindArg::Internship => Some(Document::Internship),
            KindArg::LastUpdated => Some(Document::LastUpdated),
            KindArg::Sections => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.input.is_dir() {
        run_directory(&cli).await
    } else {
        run_document(&cli).await
    }
}

// ── Data directory ───────────────────────────────────────────────────────────

async fn run_directory(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;

    if let Some(ref output_path) = cli.output {
        let stats = load_to_file(&config, output_path)
            .await
            .context("Loading portfolio failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {}/{} documents  {}ms  →  {}",
                if stats.failed() == 0 {
                    green("✔")
                } else {
                    yellow("⚠")
                },
                stats.loaded,
                Document::ALL.len(),
                stats.duration_ms,
                bold(&output_path.display().to_string()),
            );
        }
        return Ok(());
    }

    let output = load_portfolio(&config)
        .await
        .context("Loading portfolio failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        print_summary(&output);
    }
    Ok(())
}

/// Map CLI args to `PortfolioConfig`.
fn build_config(cli: &Cli) -> Result<PortfolioConfig> {
    let mut builder = PortfolioConfig::builder().data_dir(&cli.input);
    if let Some(ref fallback) = cli.last_updated_fallback {
        builder = builder.last_updated_fallback(fallback.clone());
    }
    if let Some(ref name) = cli.default_name {
        builder = builder.default_name(name.clone());
    }
    builder.build().context("Invalid configuration")
}

fn print_summary(output: &PortfolioOutput) {
    let name = if output.name.is_empty() {
        output.personal.profile.name.as_str()
    } else {
        output.name.as_str()
    };
    println!("{}  {}", bold(name), dim(&format!("最終更新日: {}", output.last_updated)));

    let personal = &output.personal;
    let rows = [
        ("Skills", personal.skills.len()),
        ("Education", personal.education.len()),
        ("Laboratories", personal.laboratories.len()),
        ("Job history", personal.job_history.len()),
        ("Research", personal.research.len()),
        ("Award categories", personal.awards.len()),
        ("Projects", personal.projects.len()),
        ("Tech events", output.development.events.len()),
        ("Papers", output.research.papers.len()),
        ("Internships", output.internships.len()),
    ];
    for (label, count) in rows {
        println!("  {label:<18}{count:>3}");
    }

    for error in &output.stats.errors {
        eprintln!("{} {}", yellow("⚠"), error);
    }
    eprintln!(
        "{}",
        dim(&format!(
            "{}/{} documents in {}ms",
            output.stats.loaded,
            Document::ALL.len(),
            output.stats.duration_ms
        ))
    );
}

// ── Single document ──────────────────────────────────────────────────────────

async fn run_document(cli: &Cli) -> Result<()> {
    let content = input::read_markdown(&cli.input)
        .await
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let value = match resolve_kind(cli)? {
        None => Value::Object(sections::parse_sections(&content)),
        Some(Document::LastUpdated) => Value::String(extract::extract_last_updated(
            &content,
            cli.last_updated_fallback
                .as_deref()
                .unwrap_or(DEFAULT_LAST_UPDATED),
        )),
        Some(document) => parse_document(document, &content).context("Failed to parse document")?,
    };

    let json = serde_json::to_string_pretty(&value).context("Failed to serialise output")?;
    match cli.output {
        Some(ref path) => {
            tokio::fs::write(path, format!("{json}\n"))
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !cli.quiet {
                eprintln!("{}  →  {}", green("✔"), bold(&path.display().to_string()));
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// `--kind`, or the document named by the file. `None` means the raw tree.
fn resolve_kind(cli: &Cli) -> Result<Option<Document>> {
    if let Some(kind) = cli.kind {
        return Ok(kind.document());
    }
    let document = file_name(&cli.input)
        .and_then(Document::from_file_name)
        .with_context(|| {
            format!(
                "Cannot tell which document {} is; pass --kind",
                cli.input.display()
            )
        })?;
    Ok(Some(document))
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()
}
