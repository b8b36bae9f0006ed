//! Typed records picked out of a [`SectionTree`].
//!
//! The documents behind these builders are free-form Japanese markdown run
//! through [`parse_sections`](crate::pipeline::sections::parse_sections).
//! Every builder is total: missing sections, missing keys and values of an
//! unexpected shape all fall back to empty defaults.

use crate::pipeline::scan::{self, GitHubAccount, Link};
use crate::pipeline::sections::{str_field, string_or_empty, SectionTree};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Reverse;

static RE_TECH_EVENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*?)\s*\(([0-9]{4})年([0-9]{1,2})月\)").unwrap());

static RE_PAPER_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[0-9]+\.\s*"?(.+?)"?$"#).unwrap());

static RE_PERIOD_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})年([0-9]{1,2})月$").unwrap());

/// Sort key for internships that are still running.
pub const ONGOING_END_DATE: &str = "9999-12-31";

/// Sort key for internships whose end month cannot be read.
pub const UNKNOWN_END_DATE: &str = "0000-00-00";

static EMPTY: Value = Value::Null;

/// `tree[key]`, or null when absent.
fn section<'a>(tree: &'a SectionTree, key: &str) -> &'a Value {
    tree.get(key).unwrap_or(&EMPTY)
}

/// `value[key]`, or null when absent or when `value` is not an object.
fn child<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(&EMPTY)
}

// ── Personal info ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub university: String,
    pub faculty: String,
    pub lab: Link,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub github: GitHubAccount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub affiliation: Affiliation,
    pub year: String,
    pub contact: Contact,
    pub toeic: u32,
    pub certifications: Vec<String>,
}

/// Build [`PersonalInfo`] from the `基本情報` section.
pub fn personal_info(tree: &SectionTree) -> PersonalInfo {
    let info = section(tree, "基本情報");

    PersonalInfo {
        name: string_or_empty(info, "氏名"),
        affiliation: Affiliation {
            university: string_or_empty(info, "大学"),
            faculty: string_or_empty(info, "学部・学科"),
            lab: scan::parse_link(str_field(info, "研究室").unwrap_or_default()),
        },
        year: string_or_empty(info, "学年"),
        contact: Contact {
            email: string_or_empty(info, "メール"),
            github: scan::parse_github(str_field(info, "GitHub").unwrap_or_default()),
        },
        toeic: parse_toeic(str_field(info, "TOEIC").unwrap_or_default()),
        certifications: string_list(child(info, "資格")),
    }
}

/// `"815点"` → 815. Anything unreadable is 0.
fn parse_toeic(text: &str) -> u32 {
    let digits: String = text
        .replacen('点', "", 1)
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// A string or a list of strings as a list. Empty strings are dropped.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

// ── Development experience ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: u32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechEvent {
    pub name: String,
    pub award: String,
    pub date: YearMonth,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub mobile: Vec<String>,
    pub infrastructure: Vec<String>,
    pub database: Vec<String>,
    pub other: Vec<String>,
}

impl TechStack {
    /// Bucket for a Japanese category heading.
    fn bucket_mut(&mut self, category: &str) -> Option<&mut Vec<String>> {
        match category {
            "フロントエンド" => Some(&mut self.frontend),
            "バックエンド" => Some(&mut self.backend),
            "モバイル" => Some(&mut self.mobile),
            "インフラ" => Some(&mut self.infrastructure),
            "データベース" => Some(&mut self.database),
            "その他" => Some(&mut self.other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevProject {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentExperience {
    pub events: Vec<TechEvent>,
    pub tech_stack: TechStack,
    pub projects: Vec<DevProject>,
}

/// Build [`DevelopmentExperience`] from the `アプリ開発経験` section.
pub fn development_experience(tree: &SectionTree) -> DevelopmentExperience {
    let dev = section(tree, "アプリ開発経験");

    let events = match child(dev, "技術系イベント受賞歴") {
        Value::Object(entries) => entries
            .iter()
            .filter_map(|(name, details)| parse_tech_event(name, details.as_str()?))
            .collect(),
        _ => Vec::new(),
    };

    DevelopmentExperience {
        events,
        tech_stack: tech_stack(child(dev, "技術スタック")),
        projects: dev_projects(child(dev, "個人開発プロジェクト")),
    }
}

/// `"最優秀賞 (2024年9月)"` under the event name → [`TechEvent`].
fn parse_tech_event(name: &str, details: &str) -> Option<TechEvent> {
    let caps = RE_TECH_EVENT.captures(details)?;
    Some(TechEvent {
        name: name.to_string(),
        award: caps[1].to_string(),
        date: YearMonth {
            year: caps[2].parse().ok()?,
            month: caps[3].parse().ok()?,
        },
    })
}

fn tech_stack(value: &Value) -> TechStack {
    let mut stack = TechStack::default();
    let Value::Object(categories) = value else {
        return stack;
    };

    for (category, techs) in categories {
        if let (Some(techs), Some(bucket)) = (techs.as_str(), stack.bucket_mut(category)) {
            *bucket = scan::split_list(techs);
        }
    }
    stack
}

fn dev_projects(value: &Value) -> Vec<DevProject> {
    match value {
        Value::Object(projects) => projects
            .keys()
            .map(|title| DevProject {
                title: title.clone(),
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|item| scan::strip_list_marker(item).trim())
            .filter(|title| !title.is_empty())
            .map(|title| DevProject {
                title: title.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

// ── Research history ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub authors: String,
    pub conference: String,
    pub r#abstract: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchHistory {
    pub keywords: Vec<String>,
    pub papers: Vec<Paper>,
    pub research_content: String,
}

/// Build [`ResearchHistory`] from the `研究内容` section.
pub fn research_history(tree: &SectionTree) -> ResearchHistory {
    let research = section(tree, "研究内容");

    let keywords = match child(research, "研究キーワード") {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|keyword| scan::strip_list_marker(keyword).to_string())
            .collect(),
        _ => Vec::new(),
    };

    let papers = match child(research, "発表済み論文") {
        Value::Array(items) => items.iter().filter_map(parse_paper).collect(),
        _ => Vec::new(),
    };

    ResearchHistory {
        keywords,
        papers,
        research_content: text_content(child(research, "研究概要")),
    }
}

/// A `### N. "title"` item that names its conference.
fn parse_paper(item: &Value) -> Option<Paper> {
    let conference = str_field(item, "発表会議").filter(|c| !c.is_empty())?;
    let name = str_field(item, "name").unwrap_or_default();

    let title = match RE_PAPER_TITLE.replace(name, "$1") {
        stripped if stripped.is_empty() => name.to_string(),
        stripped => stripped.into_owned(),
    };

    Some(Paper {
        title,
        authors: string_or_empty(item, "著者"),
        conference: conference.to_string(),
        r#abstract: string_or_empty(item, "アブストラクト"),
    })
}

/// Free text, or the lines of a plain list joined by newlines.
fn text_content(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

// ── Internship history ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub company: String,
    pub period: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    /// `YYYY-MM-31` sort key derived from the period.
    pub end_date: String,
}

/// Build the internships of the `インターンシップ歴` section, most recent
/// first.
pub fn internship_history(tree: &SectionTree) -> Vec<Internship> {
    let Value::Object(companies) = section(tree, "インターンシップ歴") else {
        return Vec::new();
    };

    let mut internships: Vec<Internship> = companies
        .iter()
        .filter_map(|(company, data)| {
            let info = internship_fields(data);
            let period = str_field(&info, "期間").filter(|p| !p.is_empty())?;

            Some(Internship {
                company: scan::strip_ordinal(company).to_string(),
                period: period.to_string(),
                position: string_or_empty(&info, "役職"),
                content: str_field(&info, "業務内容").map(str::to_string),
                tech_stack: internship_tech(child(&info, "使用技術")),
                end_date: end_date_key(period),
            })
        })
        .collect();

    // Stable: equal keys keep document order.
    internships.sort_by_key(|internship| Reverse(internship.end_date.clone()));
    internships
}

/// Subsection content as an object. A plain list of `**key**: value`
/// strings is folded into one; the last value of a key wins.
fn internship_fields(data: &Value) -> Value {
    match data {
        Value::Object(_) => data.clone(),
        Value::Array(items) => {
            let mut fields = Map::new();
            for (key, value) in items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(scan::bold_key_value)
            {
                fields.insert(key.to_string(), Value::String(value.to_string()));
            }
            Value::Object(fields)
        }
        _ => Value::Object(Map::new()),
    }
}

fn internship_tech(value: &Value) -> Option<Vec<String>> {
    let techs = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Value::String(s) if !s.is_empty() => scan::split_list(s),
        _ => Vec::new(),
    };
    (!techs.is_empty()).then_some(techs)
}

/// Sort key for a period such as `2024年8月〜2024年9月`.
pub fn end_date_key(period: &str) -> String {
    if period.contains("現在") {
        return ONGOING_END_DATE.to_string();
    }
    match RE_PERIOD_END.captures(period) {
        Some(caps) => format!("{}-{:0>2}-31", &caps[1], &caps[2]),
        None => UNKNOWN_END_DATE.to_string(),
    }
}
