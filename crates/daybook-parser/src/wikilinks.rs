//! Page reference extraction
//!
//! A reference is the text between `[[` and the next `]]`. Nested brackets are
//! not supported: the name may not contain `]`. Names are trimmed, empty names
//! are discarded and duplicates collapse onto their first occurrence.

use regex::Regex;
use std::sync::LazyLock;

static WIKILINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("wikilink regex"));

/// Extract distinct page names referenced by `text`, in first-seen order
pub fn parse_links(text: &str) -> Vec<String> {
    // Quick check before running the regex
    if !text.contains("[[") {
        return Vec::new();
    }

    let mut links: Vec<String> = Vec::new();
    for cap in WIKILINK_REGEX.captures_iter(text) {
        let name = cap[1].trim();
        if name.is_empty() || links.iter().any(|l| l == name) {
            continue;
        }
        links.push(name.to_string());
    }
    links
}

/// The literal token a block must contain to reference the page `title`
pub fn link_token(title: &str) -> String {
    format!("[[{}]]", title)
}
