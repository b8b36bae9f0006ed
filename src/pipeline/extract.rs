//! Per-document line extractors for the Japanese-labelled documents.
//!
//! Each extractor looks for a handful of known labels (`**氏名**:`,
//! `## 受賞歴`, `最終更新日:` …) line by line and ignores everything else.
//! They predate the generic section tree and are still used by pages that
//! only need a summary (the header name, the footer date, award cards).

use crate::pipeline::scan;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_AT_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[@(.*?)\]").unwrap());

static RE_TOEIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)\s*点").unwrap());

static RE_AWARD_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"- \*\*(.*?)\*\*:\s*(.*?)\s*\((.*?)\)").unwrap());

static RE_TECH_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"- \*\*(.*?)\*\*:\s*(.*)").unwrap());

static RE_AWARD_LOOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*:\s*(.*?)\s*\((.*?)\)").unwrap());

static RE_PUBLICATION_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.").unwrap());

static RE_PUBLICATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[0-9]+\.\s*\*\*"(.*?)"\*\*"#).unwrap());

static RE_INTERNSHIP_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^## [0-9]+\.\s*(.*)").unwrap());

static RE_INTERNSHIP_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*期間\*\*:\s*(.*)").unwrap());

static RE_PROJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.\s*\*\*(.*?)\*\*\s*-\s*(.*)").unwrap());

/// Date shown for publications; the list itself carries none.
pub const DEFAULT_PUBLICATION_DATE: &str = "2025年3月";

/// Placeholder for project fields the document does not describe yet.
pub const PROJECT_TECH_PLACEHOLDER: &str = "詳細は準備中";
pub const PROJECT_METRICS_PLACEHOLDER: &str = "準備中";

// ── Records ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalSummary {
    pub name: String,
    pub affiliation: String,
    pub grade: String,
    /// GitHub handle without the `@`.
    pub github: String,
    pub atcoder: String,
    pub toeic: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub title: String,
    pub event: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechCategory {
    pub category: String,
    pub items: Vec<String>,
    /// Badge colour, `#rrggbb`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub name: String,
    pub description: String,
    pub tech: String,
    pub metrics: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipSummary {
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentSummary {
    pub awards: Vec<Award>,
    pub technologies: Vec<TechCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub awards: Vec<Award>,
    pub technologies: Vec<TechCategory>,
    pub projects: Vec<ProjectSummary>,
}

// ── Personal ──────────────────────────────────────────────────────────────

/// Value of a `- **label**: value` line with the prefix removed.
fn labelled_value(line: &str, label: &str) -> Option<String> {
    let marker = format!("**{label}**:");
    if !line.contains(&marker) {
        return None;
    }
    Some(line.replacen(&format!("- {marker}"), "", 1).trim().to_string())
}

fn at_handle(line: &str) -> Option<String> {
    RE_AT_HANDLE.captures(line).map(|caps| caps[1].to_string())
}

/// Extract the profile header from `personal-info.md`. Later lines win.
pub fn extract_personal_info(content: &str) -> PersonalSummary {
    let mut summary = PersonalSummary::default();

    for line in content.split('\n') {
        if let Some(name) = labelled_value(line, "氏名") {
            summary.name = name;
        }
        if let Some(affiliation) = labelled_value(line, "所属") {
            summary.affiliation = affiliation;
        }
        if let Some(grade) = labelled_value(line, "学年") {
            summary.grade = grade;
        }
        if line.contains("**GitHub**:") {
            if let Some(handle) = at_handle(line) {
                summary.github = handle;
            }
        }
        if line.contains("**AtCoder**:") {
            if let Some(handle) = at_handle(line) {
                summary.atcoder = handle;
            }
        }
        if line.contains("**TOEIC**:") {
            if let Some(score) = RE_TOEIC
                .captures(line)
                .and_then(|caps| caps[1].parse().ok())
            {
                summary.toeic = score;
            }
        }
    }

    summary
}

/// Extract the header name, or `fallback` when no `**氏名**:` line exists.
pub fn extract_personal_name(content: &str, fallback: &str) -> String {
    content
        .split('\n')
        .filter_map(|line| labelled_value(line, "氏名"))
        .last()
        .unwrap_or_else(|| fallback.to_string())
}

// ── Development ───────────────────────────────────────────────────────────

/// Badge colour for a tech-stack category.
pub fn category_color(category: &str) -> &'static str {
    if category.contains("フロントエンド") {
        "#61dafb"
    } else if category.contains("バックエンド") {
        "#68d391"
    } else if category.contains("インフラ") {
        "#fbb6ce"
    } else if category.contains("モバイル") {
        "#a78bfa"
    } else {
        "#8b7cf6"
    }
}

fn tech_category(category: &str, items: &str) -> TechCategory {
    TechCategory {
        category: category.to_string(),
        items: items.split(',').map(|t| t.trim().to_string()).collect(),
        color: category_color(category).to_string(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DevSection {
    None,
    Awards,
    Tech,
    Projects,
}

/// Extract awards and the tech stack from `development-experience.md`.
pub fn extract_development(content: &str) -> DevelopmentSummary {
    let mut summary = DevelopmentSummary::default();
    let mut section = DevSection::None;

    for line in content.split('\n') {
        if line.contains("## 受賞歴") {
            section = DevSection::Awards;
        } else if line.contains("## 技術") {
            section = DevSection::Tech;
        } else if line.contains("## 個人開発") {
            section = DevSection::Projects;
        } else if section == DevSection::Awards && line.trim().starts_with("- **") {
            // - **TechSummerCamp2024**: 最優秀賞 (2024 年 9 月)
            if let Some(caps) = RE_AWARD_ITEM.captures(line) {
                summary.awards.push(Award {
                    title: caps[1].to_string(),
                    event: caps[2].to_string(),
                    date: caps[3].to_string(),
                    rank: None,
                });
            }
        } else if section == DevSection::Tech && line.trim().starts_with("- **") {
            if let Some(caps) = RE_TECH_ITEM.captures(line) {
                summary.technologies.push(tech_category(&caps[1], &caps[2]));
            }
        }
    }

    summary
}

fn award_rank(event: &str) -> &'static str {
    if event.contains("最優秀") {
        "1st"
    } else if event.contains("企業") {
        "Special"
    } else {
        "1st"
    }
}

/// Extract awards, technologies and projects by splitting on `## `.
///
/// A chunk is matched by the keyword anywhere in it, so one chunk may feed
/// several lists.
pub fn extract_sections(content: &str) -> SectionSummary {
    let mut summary = SectionSummary::default();

    for chunk in content.split("## ") {
        let list_lines = || {
            chunk
                .split('\n')
                .filter(|line| line.trim().starts_with('-'))
        };

        if chunk.contains("受賞歴") {
            for line in list_lines() {
                if let Some(caps) = RE_AWARD_LOOSE.captures(line) {
                    summary.awards.push(Award {
                        title: caps[1].to_string(),
                        event: caps[2].to_string(),
                        date: caps[3].to_string(),
                        rank: Some(award_rank(&caps[2]).to_string()),
                    });
                }
            }
        }

        if chunk.contains("技術スタック") {
            for line in list_lines() {
                if let Some((category, items)) = scan::bold_key_value(line) {
                    summary.technologies.push(tech_category(category, items));
                }
            }
        }

        if chunk.contains("個人開発プロジェクト") {
            for caps in RE_PROJECT.captures_iter(chunk) {
                summary.projects.push(ProjectSummary {
                    name: caps[1].to_string(),
                    description: caps[2].trim_end().to_string(),
                    tech: PROJECT_TECH_PLACEHOLDER.to_string(),
                    metrics: PROJECT_METRICS_PLACEHOLDER.to_string(),
                });
            }
        }
    }

    summary
}

// ── Research & internships ────────────────────────────────────────────────

/// Extract numbered `N. **"title"**` entries under `## 発表論文`.
pub fn extract_publications(content: &str) -> Vec<Publication> {
    let mut publications = Vec::new();
    let mut in_publications = false;

    for line in content.split('\n') {
        if line.contains("## 発表論文") {
            in_publications = true;
        } else if in_publications && RE_PUBLICATION_START.is_match(line.trim()) {
            if let Some(caps) = RE_PUBLICATION.captures(line) {
                publications.push(Publication {
                    title: caps[1].to_string(),
                    date: DEFAULT_PUBLICATION_DATE.to_string(),
                });
            }
        }
    }

    publications
}

/// Extract `## N. company` internships and their `**期間**:` line.
pub fn extract_internships(content: &str) -> Vec<InternshipSummary> {
    let mut internships = Vec::new();
    let mut current: Option<InternshipSummary> = None;

    for line in content.split('\n') {
        if let Some(caps) = RE_INTERNSHIP_HEADING.captures(line) {
            internships.extend(current.take());
            current = Some(InternshipSummary {
                company: caps[1].to_string(),
                ..InternshipSummary::default()
            });
        } else if let Some(internship) = current.as_mut() {
            if let Some(caps) = RE_INTERNSHIP_PERIOD.captures(line) {
                internship.period = caps[1].to_string();
            }
        }
    }

    internships.extend(current);
    internships
}

// ── Footer ────────────────────────────────────────────────────────────────

/// Extract the `最終更新日:` value. The last `最終更新日:` line wins; an
/// empty value falls back to `fallback`.
pub fn extract_last_updated(content: &str, fallback: &str) -> String {
    let mut last_updated = String::new();
    for line in content.split('\n') {
        if line.contains("最終更新日:") {
            last_updated = line.replacen("最終更新日:", "", 1).trim().to_string();
        }
    }

    if last_updated.is_empty() {
        fallback.to_string()
    } else {
        last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personal_info() {
        let md = "\
# 基本情報
- **氏名**: 山田 太郎
- **所属**: 〇〇大学 情報学部
- **学年**: 学部4年
- **GitHub**: [@taro](https://github.com/taro)
- **AtCoder**: [@taro_y](https://atcoder.jp/users/taro_y)
- **TOEIC**: 815 点
";
        let info = extract_personal_info(md);
        assert_eq!(
            info,
            PersonalSummary {
                name: "山田 太郎".into(),
                affiliation: "〇〇大学 情報学部".into(),
                grade: "学部4年".into(),
                github: "taro".into(),
                atcoder: "taro_y".into(),
                toeic: 815,
            }
        );
    }

    #[test]
    fn test_personal_info_without_list_marker() {
        // Only `- **氏名**:` is removed; a bare label stays in the value.
        let info = extract_personal_info("**氏名**: 太郎");
        assert_eq!(info.name, "**氏名**: 太郎");
    }

    #[test]
    fn test_github_without_handle_keeps_default() {
        let info = extract_personal_info("- **GitHub**: https://github.com/taro");
        assert_eq!(info.github, "");
    }

    #[test]
    fn test_personal_name_fallback() {
        assert_eq!(extract_personal_name("nothing here", "名無し"), "名無し");
        assert_eq!(
            extract_personal_name("- **氏名**: 一郎\n- **氏名**: 二郎", "名無し"),
            "二郎"
        );
    }

    #[test]
    fn test_development_awards_and_tech() {
        let md = "\
# アプリ開発経験
## 受賞歴
- **TechSummerCamp2024**: 最優秀賞 (2024 年 9 月)
- **ハッカソン**: 企業賞
## 技術スタック
- **フロントエンド**: React, Next.js, TypeScript
- **クラウド**: AWS
## 個人開発
- **should not**: be read (x)
";
        let dev = extract_development(md);
        assert_eq!(
            dev.awards,
            vec![Award {
                title: "TechSummerCamp2024".into(),
                event: "最優秀賞".into(),
                date: "2024 年 9 月".into(),
                rank: None,
            }]
        );
        assert_eq!(dev.technologies.len(), 2);
        assert_eq!(dev.technologies[0].items, vec!["React", "Next.js", "TypeScript"]);
        assert_eq!(dev.technologies[0].color, "#61dafb");
        assert_eq!(dev.technologies[1].color, "#8b7cf6");
    }

    #[test]
    fn test_category_colors() {
        assert_eq!(category_color("バックエンド"), "#68d391");
        assert_eq!(category_color("インフラ・クラウド"), "#fbb6ce");
        assert_eq!(category_color("モバイル"), "#a78bfa");
    }

    #[test]
    fn test_sections_with_ranks_and_projects() {
        let md = "\
# 開発経験

## 受賞歴
- **技育CAMP**: 最優秀賞 (2024年9月)
- **Hack Day**: 企業賞 (2023年12月)
- **LT大会**: 優秀賞 (2023年6月)

## 技術スタック
- **バックエンド**: Go, Python

## 個人開発プロジェクト
1. **portfolio** - Astro で作ったポートフォリオ
2. **bot** - Slack bot
";
        let summary = extract_sections(md);
        let ranks: Vec<_> = summary
            .awards
            .iter()
            .map(|a| a.rank.as_deref().unwrap())
            .collect();
        assert_eq!(ranks, vec!["1st", "Special", "1st"]);
        assert_eq!(summary.technologies[0].items, vec!["Go", "Python"]);
        assert_eq!(
            summary.projects,
            vec![
                ProjectSummary {
                    name: "portfolio".into(),
                    description: "Astro で作ったポートフォリオ".into(),
                    tech: PROJECT_TECH_PLACEHOLDER.into(),
                    metrics: PROJECT_METRICS_PLACEHOLDER.into(),
                },
                ProjectSummary {
                    name: "bot".into(),
                    description: "Slack bot".into(),
                    tech: PROJECT_TECH_PLACEHOLDER.into(),
                    metrics: PROJECT_METRICS_PLACEHOLDER.into(),
                },
            ]
        );
    }

    #[test]
    fn test_publications() {
        let md = "\
# 研究
1. **\"ignored before section\"**
## 発表論文
1. **\"Vision Transformer の軽量化\"**
   - 著者: 山田
2. not bold
";
        let pubs = extract_publications(md);
        assert_eq!(
            pubs,
            vec![Publication {
                title: "Vision Transformer の軽量化".into(),
                date: DEFAULT_PUBLICATION_DATE.into(),
            }]
        );
    }

    #[test]
    fn test_internships() {
        let md = "\
# インターンシップ歴
**期間**: before any heading
## 1. 株式会社サンプル
- **期間**: 2024年8月〜2024年9月
## 2. 合同会社テスト
- **役職**: エンジニア
";
        let internships = extract_internships(md);
        assert_eq!(internships.len(), 2);
        assert_eq!(internships[0].company, "株式会社サンプル");
        assert_eq!(internships[0].period, "2024年8月〜2024年9月");
        assert_eq!(internships[1].period, "");
        assert!(internships.iter().all(|i| i.description.is_empty()));
    }

    #[test]
    fn test_last_updated() {
        assert_eq!(
            extract_last_updated("最終更新日: 2025年1月5日\n", "fallback"),
            "2025年1月5日"
        );
        assert_eq!(
            extract_last_updated("最終更新日: A\n最終更新日: B", "fallback"),
            "B"
        );
        assert_eq!(extract_last_updated("", "2024年7月28日"), "2024年7月28日");
        assert_eq!(extract_last_updated("最終更新日:   ", "fb"), "fb");
        // An empty later line still overrides an earlier value.
        assert_eq!(extract_last_updated("最終更新日: A\n最終更新日:", "fb"), "fb");
    }
}
