//! Scanner for `personal.md`, the English-keyed profile document.
//!
//! ```text
//! # Profile                     # Job History
//! name: 山田 太郎               ## 株式会社サンプル
//! grade: 修士1年                start-month: 2024/08
//!                               finish-month:
//! # Skills                      position: バックエンドエンジニア
//! - 基本情報技術者 (2023/04)
//!                               # Awards
//! # Education                   ## ハッカソン
//! 2020/04 - 2024/03: 〇〇大学   - 技育CAMP 最優秀賞
//! ```
//!
//! Sections are matched case-insensitively on the `#` title. Laboratory,
//! job-history and project records are opened by a `##` heading and only
//! kept once their required fields arrived; research records are opened by
//! each `title:` line.

use crate::pipeline::scan::{self, Line};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_SKILL_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([0-9]{4}/[0-9]{2})\)").unwrap());

static RE_EDUCATION_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}/[0-9]{2}").unwrap());

// ── Records ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub department: String,
    pub grade: String,
    pub mail: String,
    pub github: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atcoder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atcoder_rank: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// `YYYY/MM` the skill was acquired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub period: String,
    pub institution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laboratory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    pub start_month: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_month: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHistory {
    pub company: String,
    pub start_month: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp_link: Option<String>,
    pub position: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Research {
    pub title: String,
    pub authors: String,
    pub conference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
}

/// Everything `personal.md` describes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub profile: Profile,
    pub skills: Vec<Skill>,
    pub education: Vec<Education>,
    pub laboratories: Vec<Laboratory>,
    pub job_history: Vec<JobHistory>,
    pub research: Vec<Research>,
    pub awards: Vec<AwardCategory>,
    pub projects: Vec<Project>,
}

// ── Scanner ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Profile,
    Skills,
    Education,
    Laboratory,
    JobHistory,
    Research,
    Awards,
    Projects,
    Other,
}

impl Section {
    fn from_title(title: &str) -> Section {
        match title.to_lowercase().as_str() {
            "profile" => Section::Profile,
            "skills" => Section::Skills,
            "education" => Section::Education,
            "laboratory" => Section::Laboratory,
            "job history" => Section::JobHistory,
            "research" => Section::Research,
            "awards" => Section::Awards,
            "projects" => Section::Projects,
            _ => Section::Other,
        }
    }
}

/// Partial records waiting for their closing heading.
#[derive(Default)]
struct Pending {
    lab: Option<Laboratory>,
    job: Option<JobHistory>,
    research: Option<Research>,
    project: Option<Project>,
    award_category: String,
    award_items: Vec<String>,
}

/// Parse `personal.md`.
pub fn parse_personal(content: &str) -> PersonalData {
    let mut result = PersonalData::default();
    let mut pending = Pending::default();
    let mut section = Section::None;

    for raw in content.split('\n') {
        let line = raw.trim();

        match scan::classify(line) {
            Line::Section(title) => {
                save_all(&mut result, &mut pending);
                section = Section::from_title(title);
                continue;
            }
            Line::Subsection(title) => {
                save_sub_records(&mut result, &mut pending);
                open_sub_record(section, title, &mut result, &mut pending);
                continue;
            }
            _ => {}
        }

        match section {
            Section::Profile => profile_line(line, &mut result.profile),
            Section::Skills => {
                if let Some(text) = line.strip_prefix("- ") {
                    result.skills.push(parse_skill(text.trim()));
                }
            }
            Section::Education => {
                if RE_EDUCATION_LINE.is_match(line) {
                    if let Some((period, institution)) = scan::split_key_value(line) {
                        result.education.push(Education {
                            period: period.to_string(),
                            institution: institution.to_string(),
                        });
                    }
                }
            }
            Section::Laboratory => {
                if let (Some(lab), Some((key, value))) =
                    (pending.lab.as_mut(), scan::split_key_value(line))
                {
                    match key {
                        "site-url" => lab.site_url = Some(value.to_string()),
                        "start-month" => lab.start_month = value.to_string(),
                        "finish-month" => lab.finish_month = non_empty(value),
                        _ => {}
                    }
                }
            }
            Section::JobHistory => {
                if let (Some(job), Some((key, value))) =
                    (pending.job.as_mut(), scan::split_key_value(line))
                {
                    match key {
                        "start-month" => job.start_month = value.to_string(),
                        "finish-month" => job.finish_month = non_empty(value),
                        "HP-link" => job.hp_link = Some(value.to_string()),
                        "position" => job.position = value.to_string(),
                        _ => {}
                    }
                }
            }
            Section::Research => {
                if let Some((key, value)) = scan::split_key_value(line) {
                    research_line(key, value, &mut result, &mut pending);
                }
            }
            Section::Awards => {
                if let Some(item) = line.strip_prefix("- ") {
                    pending.award_items.push(item.trim().to_string());
                }
            }
            Section::Projects => {
                if let (Some(project), Some((key, value))) =
                    (pending.project.as_mut(), scan::split_key_value(line))
                {
                    match key {
                        "title" => project.title = value.to_string(),
                        "description" => project.description = value.to_string(),
                        "site-url" => project.site_url = Some(value.to_string()),
                        _ => {}
                    }
                }
            }
            Section::None | Section::Other => {}
        }
    }

    save_all(&mut result, &mut pending);
    result
}

fn profile_line(line: &str, profile: &mut Profile) {
    let Some((key, value)) = scan::split_key_value(line) else {
        return;
    };
    let value = value.to_string();
    match key.to_lowercase().as_str() {
        "name" => profile.name = value,
        "department" => profile.department = value,
        "grade" => profile.grade = value,
        "mail" => profile.mail = value,
        "github" => profile.github = value,
        "atcoder" => profile.atcoder = Some(value),
        "atcoderrank" => profile.atcoder_rank = Some(value),
        _ => {}
    }
}

fn parse_skill(text: &str) -> Skill {
    match RE_SKILL_DATE.captures(text) {
        Some(caps) => Skill {
            name: text.replacen(&caps[0], "", 1).trim().to_string(),
            date: Some(caps[1].to_string()),
        },
        None => Skill {
            name: text.to_string(),
            date: None,
        },
    }
}

fn research_line(key: &str, value: &str, result: &mut PersonalData, pending: &mut Pending) {
    match key {
        "title" => {
            if let Some(previous) = pending.research.take().filter(|r| !r.title.is_empty()) {
                result.research.push(previous);
            }
            pending.research = Some(Research {
                title: value.to_string(),
                ..Research::default()
            });
        }
        "authors" => research_mut(pending).authors = value.to_string(),
        "conference" => research_mut(pending).conference = value.to_string(),
        "site-url" => research_mut(pending).site_url = Some(value.to_string()),
        _ => {}
    }
}

/// Fields before the first `title:` still land on an (untitled) record.
fn research_mut(pending: &mut Pending) -> &mut Research {
    pending.research.get_or_insert_with(Research::default)
}

fn open_sub_record(section: Section, title: &str, result: &mut PersonalData, pending: &mut Pending) {
    let name = title.to_string();
    match section {
        Section::Laboratory => {
            pending.lab = Some(Laboratory {
                name,
                ..Laboratory::default()
            })
        }
        Section::JobHistory => {
            pending.job = Some(JobHistory {
                company: name,
                ..JobHistory::default()
            })
        }
        Section::Projects => {
            pending.project = Some(Project {
                name,
                ..Project::default()
            })
        }
        Section::Awards => {
            push_award_category(result, pending);
            pending.award_items.clear();
            pending.award_category = name;
        }
        _ => {}
    }
}

/// Keep laboratory, job and project records once their required fields
/// are set. Incomplete records stay pending.
fn save_sub_records(result: &mut PersonalData, pending: &mut Pending) {
    if let Some(lab) = pending
        .lab
        .take_if(|lab| !lab.name.is_empty() && !lab.start_month.is_empty())
    {
        result.laboratories.push(lab);
    }
    if let Some(job) = pending
        .job
        .take_if(|job| !job.company.is_empty() && !job.start_month.is_empty())
    {
        result.job_history.push(job);
    }
    if let Some(project) = pending
        .project
        .take_if(|p| !p.name.is_empty() && !p.title.is_empty())
    {
        result.projects.push(project);
    }
}

fn save_all(result: &mut PersonalData, pending: &mut Pending) {
    save_sub_records(result, pending);

    if let Some(research) = pending.research.take_if(|r| !r.title.is_empty()) {
        result.research.push(research);
    }
    push_award_category(result, pending);
}

/// Push the open award category when it has items.
fn push_award_category(result: &mut PersonalData, pending: &mut Pending) {
    if !pending.award_category.is_empty() && !pending.award_items.is_empty() {
        result.awards.push(AwardCategory {
            category: std::mem::take(&mut pending.award_category),
            items: std::mem::take(&mut pending.award_items),
        });
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
