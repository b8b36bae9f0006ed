//! Line-level helpers shared by every scanner.
//!
//! Each helper is a pure function over one line (or one value) of markdown.
//! The regexes are compiled once and reused by all scanners.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ── Regexes ───────────────────────────────────────────────────────────────

/// `**key**: value`, matched anywhere in the line.
static RE_BOLD_KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*:\s*(.*)").unwrap());

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

static RE_GITHUB_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[@(.*?)\]\((.*?)\)").unwrap());

static RE_COMMA_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,、]\s*").unwrap());

static RE_ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.\s*").unwrap());

static RE_LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-\s*").unwrap());

// ── Headings ──────────────────────────────────────────────────────────────

/// Classification of a trimmed markdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `# title`
    Section(&'a str),
    /// `## title`
    Subsection(&'a str),
    /// `### title`
    Item(&'a str),
    /// `- content`
    ListItem(&'a str),
    /// Any other line starting with `#` (`####`, `#tag`, a bare `#`).
    OtherHeading,
    /// Empty after trimming.
    Blank,
    /// Anything else.
    Text(&'a str),
}

/// Classify one line. The line is trimmed first.
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("# ") {
        Line::Section(rest.trim())
    } else if let Some(rest) = line.strip_prefix("## ") {
        Line::Subsection(rest.trim())
    } else if let Some(rest) = line.strip_prefix("### ") {
        Line::Item(rest.trim())
    } else if line.starts_with('#') {
        Line::OtherHeading
    } else if let Some(rest) = line.strip_prefix("- ") {
        Line::ListItem(rest.trim())
    } else if line.is_empty() {
        Line::Blank
    } else {
        Line::Text(line)
    }
}

// ── Key/value ─────────────────────────────────────────────────────────────

/// Extract `(key, value)` from a `**key**: value` fragment.
pub fn bold_key_value(text: &str) -> Option<(&str, &str)> {
    let caps = RE_BOLD_KEY_VALUE.captures(text)?;
    let key = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str();
    Some((key, value))
}

/// Split `key: value` at the first colon, trimming both halves.
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}

// ── Links ─────────────────────────────────────────────────────────────────

/// A `[name](url)` link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// A GitHub account written as `[@user](url)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubAccount {
    /// Handle including the leading `@`.
    pub username: String,
    pub url: String,
}

/// Parse the first markdown link in `text`; without one the whole text is
/// the name.
pub fn parse_link(text: &str) -> Link {
    match RE_LINK.captures(text) {
        Some(caps) => Link {
            name: caps[1].to_string(),
            url: caps[2].to_string(),
        },
        None => Link {
            name: text.to_string(),
            url: String::new(),
        },
    }
}

/// Parse `[@user](url)`; without one the whole text is the username.
pub fn parse_github(text: &str) -> GitHubAccount {
    match RE_GITHUB_LINK.captures(text) {
        Some(caps) => GitHubAccount {
            username: format!("@{}", &caps[1]),
            url: caps[2].to_string(),
        },
        None => GitHubAccount {
            username: text.to_string(),
            url: String::new(),
        },
    }
}

// ── Small text helpers ────────────────────────────────────────────────────

/// Split `React, Vue、Svelte` into trimmed items.
pub fn split_list(text: &str) -> Vec<String> {
    RE_COMMA_SPLIT
        .split(text)
        .map(|item| item.trim().to_string())
        .collect()
}

/// Drop a leading `1. ` style ordinal.
pub fn strip_ordinal(text: &str) -> &str {
    match RE_ORDINAL.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Drop a leading `- ` list marker.
pub fn strip_list_marker(text: &str) -> &str {
    match RE_LIST_MARKER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}
