//! Display names for markdown field and category keys.
//!
//! The markdown documents use short English keys (`start-month`, `HP-link`);
//! pages show the Japanese label. Unknown keys are displayed as written.

/// Profile, education and job-history keys.
pub const PROFILE_FIELD_NAMES: &[(&str, &str)] = &[
    ("name", "氏名"),
    ("department", "所属"),
    ("grade", "学年"),
    ("mail", "メールアドレス"),
    ("GitHub", "GitHub"),
    ("Education", "学歴"),
    ("Job History", "インターン経験"),
    ("start-month", "開始時期"),
    ("finish-month", "終了時期"),
    ("HP-link", "Webサイト"),
    ("position", "職種"),
];

/// Research keys.
pub const RESEARCH_FIELD_NAMES: &[(&str, &str)] = &[
    ("Research", "研究"),
    ("abstract", "研究概要"),
    ("papers", "論文発表実績"),
    ("title", "タイトル"),
    ("conference", "学会"),
    ("note", "備考"),
];

/// Development, award and tech-stack keys.
pub const DEVELOPMENT_FIELD_NAMES: &[(&str, &str)] = &[
    ("Development", "開発"),
    ("Award", "受賞歴"),
    ("Tech icons", "技術スタック"),
    ("frontend", "フロントエンド"),
    ("backend", "バックエンド"),
    ("Infrastructure", "インフラストラクチャ"),
    ("Individuals", "個人開発"),
];

/// Tech-stack category labels, accepting either language.
pub const CATEGORY_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("frontend", "Frontend"),
    ("backend", "Backend"),
    ("Infrastructure", "Infrastructure"),
    ("フロントエンド", "Frontend"),
    ("バックエンド", "Backend"),
    ("インフラストラクチャ", "Infrastructure"),
];

fn lookup<'a>(tables: &[&'static [(&'static str, &'static str)]], key: &'a str) -> &'a str {
    // Later tables win on duplicate keys.
    tables
        .iter()
        .rev()
        .find_map(|table| table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v))
        .unwrap_or(key)
}

/// Display label for a markdown field key.
///
/// ```rust
/// use portfolio_md::fields::display_name;
///
/// assert_eq!(display_name("HP-link"), "Webサイト");
/// assert_eq!(display_name("hobby"), "hobby");
/// ```
pub fn display_name(field: &str) -> &str {
    lookup(
        &[PROFILE_FIELD_NAMES, RESEARCH_FIELD_NAMES, DEVELOPMENT_FIELD_NAMES],
        field,
    )
}

/// Display label for a tech-stack category.
pub fn category_display_name(category: &str) -> &str {
    lookup(&[CATEGORY_DISPLAY_NAMES], category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_fields() {
        assert_eq!(display_name("name"), "氏名");
        assert_eq!(display_name("Job History"), "インターン経験");
        assert_eq!(display_name("finish-month"), "終了時期");
    }

    #[test]
    fn research_and_development_fields() {
        assert_eq!(display_name("papers"), "論文発表実績");
        assert_eq!(display_name("Tech icons"), "技術スタック");
        assert_eq!(display_name("Individuals"), "個人開発");
    }

    #[test]
    fn keys_are_case_sensitive() {
        assert_eq!(display_name("github"), "github");
        assert_eq!(display_name("GitHub"), "GitHub");
    }

    #[test]
    fn unknown_field_passes_through() {
        assert_eq!(display_name(""), "");
        assert_eq!(display_name("hobbies"), "hobbies");
    }

    #[test]
    fn categories_in_both_languages() {
        assert_eq!(category_display_name("frontend"), "Frontend");
        assert_eq!(category_display_name("バックエンド"), "Backend");
        assert_eq!(category_display_name("インフラストラクチャ"), "Infrastructure");
        assert_eq!(category_display_name("mobile"), "mobile");
    }
}
