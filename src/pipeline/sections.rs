//! Generic section tree: the loosest scanner.
//!
//! Turns any document into a JSON-like map keyed by `#` section and `##`
//! subsection titles, without knowing what the document is about. The typed
//! builders in [`crate::pipeline::records`] pick fields out of the tree.
//!
//! ```text
//! # 基本情報                 {"基本情報": {
//! - **氏名**: 山田太郎          "氏名": "山田太郎",
//! ## 資格                       "資格": ["基本情報技術者"]
//! - 基本情報技術者            }}
//! ```
//!
//! Values are strings, arrays or objects. A `###` heading opens an item
//! object `{ "name": ... }` that collects the following bold key/value
//! lines and is pushed onto the enclosing subsection at the next boundary.

use crate::pipeline::scan::{self, Line};
use serde_json::{Map, Value};

/// A parsed section tree.
pub type SectionTree = Map<String, Value>;

/// Parse `content` into a section tree.
pub fn parse_sections(content: &str) -> SectionTree {
    let mut scanner = Scanner::default();
    for line in content.split('\n') {
        scanner.line(line);
    }
    scanner.finish()
}

#[derive(Default)]
struct Scanner {
    result: SectionTree,
    section: String,
    subsection: String,
    item: Map<String, Value>,
    text: String,
}

impl Scanner {
    fn line(&mut self, raw: &str) {
        match scan::classify(raw) {
            Line::Section(title) => {
                self.flush_text();
                self.finish_item();
                self.section = title.to_string();
                self.result
                    .insert(self.section.clone(), Value::Object(Map::new()));
                self.subsection.clear();
            }
            Line::Subsection(title) => {
                self.flush_text();
                self.finish_item();
                self.subsection = title.to_string();
                if !self.section.is_empty() {
                    let subsection = self.subsection.clone();
                    self.section_object()
                        .insert(subsection, Value::Array(Vec::new()));
                }
            }
            Line::Item(title) => {
                self.flush_text();
                self.finish_item();
                self.item = Map::new();
                self.item
                    .insert("name".to_string(), Value::String(title.to_string()));
            }
            Line::ListItem(content) => match scan::bold_key_value(content) {
                Some((key, value)) => self.key_value(key, value),
                None if self.in_subsection() => {
                    self.subsection_array()
                        .push(Value::String(content.to_string()));
                }
                None => {}
            },
            Line::Text(text) => match scan::bold_key_value(text) {
                Some((key, value)) => self.key_value(key, value),
                None => {
                    self.text.push_str(text);
                    self.text.push('\n');
                }
            },
            Line::Blank => {
                self.flush_text();
                self.finish_item();
            }
            Line::OtherHeading => {}
        }
    }

    fn finish(mut self) -> SectionTree {
        self.flush_text();
        self.finish_item();
        self.result
    }

    fn in_subsection(&self) -> bool {
        !self.section.is_empty() && !self.subsection.is_empty()
    }

    /// Route a key/value pair to the open item, subsection or section.
    fn key_value(&mut self, key: &str, value: &str) {
        let value = value.to_string();
        if !self.item.is_empty() {
            append_value(&mut self.item, key, value);
        } else if self.in_subsection() {
            append_value(self.subsection_object(), key, value);
        } else if !self.section.is_empty() {
            append_value(self.section_object(), key, value);
        }
    }

    fn finish_item(&mut self) {
        if self.item.len() > 1 && self.in_subsection() {
            let item = std::mem::take(&mut self.item);
            self.subsection_array().push(Value::Object(item));
        }
    }

    fn flush_text(&mut self) {
        let text = std::mem::take(&mut self.text);
        let text = text.trim();
        if text.is_empty() || self.section.is_empty() {
            return;
        }

        let text = Value::String(text.to_string());
        if self.subsection.is_empty() {
            self.result.insert(self.section.clone(), text);
        } else {
            let subsection = self.subsection.clone();
            self.section_object().entry(subsection).or_insert(text);
        }
    }

    // ── Coercions ─────────────────────────────────────────────────────────

    /// The open section as an object; any other value is replaced.
    fn section_object(&mut self) -> &mut Map<String, Value> {
        let slot = self
            .result
            .entry(self.section.clone())
            .or_insert(Value::Null);
        coerce_object(slot)
    }

    /// The open subsection as an object; any other value is replaced.
    fn subsection_object(&mut self) -> &mut Map<String, Value> {
        let subsection = self.subsection.clone();
        let slot = self
            .section_object()
            .entry(subsection)
            .or_insert(Value::Null);
        coerce_object(slot)
    }

    /// The open subsection as an array; any other value is replaced.
    fn subsection_array(&mut self) -> &mut Vec<Value> {
        let subsection = self.subsection.clone();
        let slot = self
            .section_object()
            .entry(subsection)
            .or_insert(Value::Null);
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(items) => items,
            _ => unreachable!("slot was just made an array"),
        }
    }
}

fn coerce_object(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just made an object"),
    }
}

/// Add `key: value`, turning repeated keys into arrays. An empty string
/// counts as absent and is overwritten.
fn append_value(target: &mut Map<String, Value>, key: &str, value: String) {
    let value = Value::String(value);
    match target.get_mut(key) {
        Some(Value::Array(items)) => {
            items.push(value);
            return;
        }
        Some(existing) if is_present(existing) => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, value]);
            return;
        }
        _ => {}
    }
    target.insert(key.to_string(), value);
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

// ── Value accessors ───────────────────────────────────────────────────────

/// Borrow a string field; for a repeated key the first value is used.
pub fn str_field<'a>(map: &'a Value, key: &str) -> Option<&'a str> {
    match map.get(key)? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.iter().find_map(Value::as_str),
        _ => None,
    }
}

/// A string field, or `""`.
pub fn string_or_empty(map: &Value, key: &str) -> String {
    str_field(map, key).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_key_values() {
        let tree = parse_sections("# 基本情報\n- **氏名**: 山田太郎\n- **学年**: 修士1年\n");
        assert_eq!(
            Value::Object(tree),
            json!({ "基本情報": { "氏名": "山田太郎", "学年": "修士1年" } })
        );
    }

    #[test]
    fn test_subsection_list() {
        let tree = parse_sections("# 研究内容\n## 研究キーワード\n- 画像認識\n- 深層学習\n");
        assert_eq!(
            tree["研究内容"]["研究キーワード"],
            json!(["画像認識", "深層学習"])
        );
    }

    #[test]
    fn test_subsection_key_values_become_object() {
        let md = "# インターンシップ歴\n## 1. 株式会社サンプル\n- **期間**: 2024年8月〜2024年9月\n- **役職**: バックエンド\n";
        let tree = parse_sections(md);
        assert_eq!(
            tree["インターンシップ歴"]["1. 株式会社サンプル"],
            json!({ "期間": "2024年8月〜2024年9月", "役職": "バックエンド" })
        );
    }

    #[test]
    fn test_items_flush_on_blank_line() {
        let md = "# 研究内容\n## 発表済み論文\n### 1. \"論文A\"\n- **著者**: 山田\n- **発表会議**: MIRU\n\n### 2. \"論文B\"\n- **発表会議**: CVPR\n";
        let tree = parse_sections(md);
        assert_eq!(
            tree["研究内容"]["発表済み論文"],
            json!([
                { "name": "1. \"論文A\"", "著者": "山田", "発表会議": "MIRU" },
                { "name": "2. \"論文B\"", "発表会議": "CVPR" }
            ])
        );
    }

    #[test]
    fn test_item_with_only_name_is_kept_open() {
        // The item has a single key when the blank line arrives, so it stays
        // open and collects the key/value that follows.
        let md = "# S\n## Sub\n### Thing\n\n- **k**: v\n";
        let tree = parse_sections(md);
        assert_eq!(tree["S"]["Sub"], json!([{ "name": "Thing", "k": "v" }]));
    }

    #[test]
    fn test_repeated_keys_accumulate() {
        let md = "# 基本情報\n- **資格**: A\n- **資格**: B\n- **資格**: C\n";
        let tree = parse_sections(md);
        assert_eq!(tree["基本情報"]["資格"], json!(["A", "B", "C"]));
    }

    #[test]
    fn test_empty_value_is_overwritten() {
        let md = "# S\n- **k**:\n- **k**: v\n";
        let tree = parse_sections(md);
        assert_eq!(tree["S"]["k"], json!("v"));
    }

    #[test]
    fn test_section_text_replaces_object() {
        let md = "# 研究概要\nこれは研究の概要です。\n二行目。\n";
        let tree = parse_sections(md);
        assert_eq!(tree["研究概要"], json!("これは研究の概要です。\n二行目。"));
    }

    #[test]
    fn test_subsection_text_does_not_replace_list() {
        let md = "# 研究内容\n## 研究概要\n本文です。\n";
        let tree = parse_sections(md);
        // `## ` already stored an empty array, so the text is not stored.
        assert_eq!(tree["研究内容"]["研究概要"], json!([]));
    }

    #[test]
    fn test_lines_before_first_section_are_dropped() {
        let md = "- **orphan**: value\nfree text\n# S\n- **k**: v\n";
        let tree = parse_sections(md);
        assert_eq!(Value::Object(tree), json!({ "S": { "k": "v" } }));
    }

    #[test]
    fn test_deep_headings_are_ignored() {
        let md = "# S\n#### ignored\n- **k**: v\n";
        let tree = parse_sections(md);
        assert_eq!(Value::Object(tree), json!({ "S": { "k": "v" } }));
    }

    #[test]
    fn test_plain_list_after_key_values_replaces_object() {
        let md = "# S\n## Sub\n- **k**: v\n- plain\n";
        let tree = parse_sections(md);
        assert_eq!(tree["S"]["Sub"], json!(["plain"]));
    }

    #[test]
    fn test_str_field_takes_first_of_repeated() {
        let value = json!({ "a": ["x", "y"], "b": "z", "c": {} });
        assert_eq!(str_field(&value, "a"), Some("x"));
        assert_eq!(str_field(&value, "b"), Some("z"));
        assert_eq!(str_field(&value, "c"), None);
        assert_eq!(string_or_empty(&value, "missing"), "");
    }

    #[test]
    fn test_document_order_preserved() {
        let tree = parse_sections("# B\n- **k**: 1\n# A\n- **k**: 2\n");
        let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["B", "A"]);
    }
}
