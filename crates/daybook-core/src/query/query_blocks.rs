//! Query block syntax
//!
//! A block whose whole trimmed text is `{{query <body>}}` embeds a view:
//!
//! ```text
//! {{query status:TODO tag:work contains:plan scope:current}}
//! ```
//!
//! The `query` keyword is case-insensitive. The body must be on one line.

use regex::Regex;
use std::sync::LazyLock;

use super::spec::ViewSpec;

static QUERY_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\{\{query\s+(.+?)\}\}$").expect("query block regex"));

/// Extract the view spec embedded in a block's text
pub fn parse_query_block(text: &str) -> Option<ViewSpec> {
    let text = text.trim();
    if !text.starts_with("{{") {
        return None;
    }
    let cap = QUERY_BLOCK_REGEX.captures(text)?;
    Some(ViewSpec::parse_body(cap[1].trim()))
}

pub fn is_query_block(text: &str) -> bool {
    parse_query_block(text).is_some()
}

pub(crate) fn render(body: &str) -> String {
    format!("{{{{query {}}}}}", body)
}
