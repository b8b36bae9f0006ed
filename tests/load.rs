//! Integration tests for loading a whole data directory.
//!
//! The fixtures in `./test_cases/data/` are a complete, realistic data
//! directory. Tests that need missing or broken documents build their own
//! directory with `tempfile`.
//!
//! Run with:
//!   RUST_LOG=portfolio_md=debug cargo test --test load -- --nocapture

use portfolio_md::pipeline::records::ONGOING_END_DATE;
use portfolio_md::{
    load_portfolio, load_portfolio_sync, load_to_file, read_raw_documents, Document,
    DocumentError, PortfolioConfig, PortfolioError,
};
use std::path::{Path, PathBuf};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Route library logs to the test output; safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases/data")
}

fn config_for(dir: &Path) -> PortfolioConfig {
    PortfolioConfig::builder().data_dir(dir).build().unwrap()
}

/// Copy a subset of the fixtures into a fresh temp directory.
fn partial_data_dir(documents: &[Document]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for document in documents {
        let name = document.default_file_name();
        std::fs::copy(data_dir().join(name), dir.path().join(name)).unwrap();
    }
    dir
}

// ── Full directory ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_fixture_directory() {
    init_tracing();
    let output = load_portfolio(&config_for(&data_dir())).await.unwrap();

    assert_eq!(output.stats.loaded, Document::ALL.len());
    assert!(output.stats.errors.is_empty(), "{:?}", output.stats.errors);

    assert_eq!(output.name, "山田 太郎");
    assert_eq!(output.last_updated, "2025年1月12日");
    assert_eq!(output.summary.github, "taro-yamada");
    assert_eq!(output.summary.toeic, 815);
}

#[tokio::test]
async fn test_personal_document() {
    let output = load_portfolio(&config_for(&data_dir())).await.unwrap();
    let personal = &output.personal;

    assert_eq!(personal.profile.grade, "修士1年");
    assert_eq!(personal.profile.atcoder_rank.as_deref(), Some("水色"));
    assert_eq!(personal.skills.len(), 3);
    assert_eq!(personal.education.len(), 3);
    assert_eq!(personal.laboratories.len(), 1);
    assert_eq!(personal.job_history.len(), 2);
    assert_eq!(personal.research.len(), 2);
    assert_eq!(personal.awards.len(), 2);
    assert_eq!(personal.projects.len(), 2);
    assert_eq!(personal.projects[1].name, "kakeibo");
}

#[tokio::test]
async fn test_section_tree_records() {
    let output = load_portfolio(&config_for(&data_dir())).await.unwrap();

    let info = &output.personal_info;
    assert_eq!(info.affiliation.lab.url, "https://vision.example.ac.jp");
    assert_eq!(info.contact.github.username, "@taro-yamada");
    assert_eq!(info.certifications.len(), 2);

    let dev = &output.development;
    assert_eq!(dev.events.len(), 2);
    assert_eq!(dev.events[1].date.month, 12);
    assert_eq!(dev.tech_stack.backend, vec!["Go", "Python", "FastAPI"]);
    assert_eq!(dev.projects.len(), 2);

    let research = &output.research;
    assert_eq!(research.keywords.len(), 3);
    assert_eq!(research.papers.len(), 2);
    assert_eq!(research.papers[0].title, "軽量な物体検出モデルの検討");
    assert!(research.research_content.starts_with("製造現場"));

    let companies: Vec<_> = output.internships.iter().map(|i| i.company.as_str()).collect();
    assert_eq!(
        companies,
        vec!["合同会社テストラボ", "株式会社ミライ", "株式会社サンプルテック"]
    );
    assert_eq!(output.internships[0].end_date, ONGOING_END_DATE);
}

#[tokio::test]
async fn test_legacy_extractor_summaries() {
    let output = load_portfolio(&config_for(&data_dir())).await.unwrap();

    let sections = &output.sections_summary;
    let ranks: Vec<_> = sections
        .awards
        .iter()
        .map(|a| a.rank.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(ranks, vec!["1st", "Special"]);
    assert_eq!(sections.technologies.len(), 4);
    assert!(sections.projects.is_empty());

    assert_eq!(output.publications.len(), 1);
    assert_eq!(output.publications[0].title, "軽量な物体検出モデルの検討");
    assert_eq!(output.publications[0].date, "2025年3月");

    let summaries = &output.internship_summaries;
    assert_eq!(summaries.len(), 4);
    assert_eq!(summaries[0].company, "株式会社サンプルテック");
    assert_eq!(summaries[0].period, "2023年8月〜2023年9月");
    assert_eq!(summaries[3].company, "説明会のみ");
    assert_eq!(summaries[3].period, "");
}

#[tokio::test]
async fn test_view_and_timelines() {
    let output = load_portfolio(&config_for(&data_dir())).await.unwrap();
    let view = &output.view;

    assert_eq!(view.laboratories[0].period, "2022/04 〜 現在");
    assert_eq!(view.internships[1].period, "2024/10 〜 現在");

    let link = view.timelines.internships[0].link.as_ref().unwrap();
    assert_eq!(link.label, "株式会社サンプルテックのホームページを開く");

    // Newest award first.
    assert_eq!(view.timelines.awards[0].title, "Hack Day 2023");
    assert_eq!(view.timelines.awards[0].meta, "2023年12月");
}

// ── Missing and broken documents ─────────────────────────────────────────────

#[tokio::test]
async fn test_missing_documents_use_defaults() {
    init_tracing();
    let dir = partial_data_dir(&[Document::Personal]);
    let config = PortfolioConfig::builder()
        .data_dir(dir.path())
        .last_updated_fallback("不明")
        .default_name("ゲスト")
        .build()
        .unwrap();

    let output = load_portfolio(&config).await.unwrap();
    assert_eq!(output.stats.loaded, 1);
    assert_eq!(output.stats.failed(), 5);
    assert!(output
        .stats
        .errors
        .iter()
        .all(|e| matches!(e, DocumentError::Missing { .. })));

    assert_eq!(output.personal.profile.name, "山田 太郎");
    assert_eq!(output.name, "ゲスト");
    assert_eq!(output.last_updated, "不明");
    assert!(output.internships.is_empty());
}

#[tokio::test]
async fn test_non_utf8_document_is_skipped() {
    init_tracing();
    let dir = partial_data_dir(&[Document::Personal, Document::LastUpdated]);
    std::fs::write(
        dir.path().join(Document::Research.default_file_name()),
        [0xff, 0xfe, 0xfd],
    )
    .unwrap();

    let output = load_portfolio(&config_for(dir.path())).await.unwrap();
    let unreadable: Vec<_> = output
        .stats
        .errors
        .iter()
        .filter_map(|e| match e {
            DocumentError::Unreadable { document, .. } => Some(*document),
            _ => None,
        })
        .collect();
    assert_eq!(unreadable, vec![Document::Research]);
    assert_eq!(output.last_updated, "2025年1月12日");
}

#[tokio::test]
async fn test_missing_data_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_portfolio(&config_for(&dir.path().join("nope")))
        .await
        .unwrap_err();
    assert!(matches!(err, PortfolioError::DataDirNotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_file_name_override() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("footer.md"), "最終更新日: 2030年1月1日\n").unwrap();

    let config = PortfolioConfig::builder()
        .data_dir(dir.path())
        .file_name(Document::LastUpdated, "footer.md")
        .build()
        .unwrap();
    let output = load_portfolio(&config).await.unwrap();
    assert_eq!(output.last_updated, "2030年1月1日");
}

// ── Raw documents ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_read_raw_documents() {
    let raw = read_raw_documents(&config_for(&data_dir())).await.unwrap();
    assert!(raw.personal_info.contains("# 基本情報"));
    assert!(raw.last_updated.contains("最終更新日"));
}

#[tokio::test]
async fn test_read_raw_documents_requires_every_file() {
    let dir = partial_data_dir(&[Document::PersonalInfo, Document::Development]);
    let err = read_raw_documents(&config_for(dir.path())).await.unwrap_err();
    assert!(matches!(err, PortfolioError::FileNotFound { .. }), "got: {err:?}");
}

// ── Output ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_to_file_writes_json() {
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("nested/portfolio.json");

    let stats = load_to_file(&config_for(&data_dir()), &out_path).await.unwrap();
    assert_eq!(stats.loaded, Document::ALL.len());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json["name"], "山田 太郎");
    assert_eq!(json["personal"]["jobHistory"][0]["hpLink"], "https://sample-tech.example.com");
    assert_eq!(json["internships"][0]["endDate"], ONGOING_END_DATE);

    // Only the final file is left behind.
    let entries: Vec<_> = std::fs::read_dir(out_path.parent().unwrap())
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_load_portfolio_sync() {
    let output = load_portfolio_sync(&config_for(&data_dir())).unwrap();
    assert_eq!(output.stats.loaded, Document::ALL.len());
}
