//! Combined annotation extraction
//!
//! [`AnnotationParser`] bundles a compiled tag matcher with link extraction.
//! The free functions [`extract_tags`] and [`extract_links`] use a shared
//! parser built from the default charset.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::charset::TagCharset;
use crate::error::ParserResult;
use crate::tags::TagExtractor;
use crate::wikilinks::parse_links;

static DEFAULT_PARSER: LazyLock<AnnotationParser> = LazyLock::new(AnnotationParser::default);

/// Tags and page references found in one block of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    /// Distinct tags without the leading `#`, first-seen order
    pub tags: Vec<String>,
    /// Distinct trimmed page names, first-seen order
    pub links: Vec<String>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.links.is_empty()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn has_link(&self, title: &str) -> bool {
        self.links.iter().any(|l| l == title)
    }
}

/// Annotation parser for a configured tag charset
#[derive(Debug, Clone)]
pub struct AnnotationParser {
    tags: TagExtractor,
}

impl AnnotationParser {
    /// Build a parser accepting `charset` in tag bodies
    pub fn new(charset: TagCharset) -> ParserResult<Self> {
        Ok(Self {
            tags: TagExtractor::new(charset)?,
        })
    }

    pub fn charset(&self) -> &TagCharset {
        self.tags.charset()
    }

    /// Distinct tags in `text`
    pub fn tags(&self, text: &str) -> Vec<String> {
        self.tags.extract(text)
    }

    /// Distinct page names referenced in `text`
    pub fn links(&self, text: &str) -> Vec<String> {
        parse_links(text)
    }

    /// Check for a single tag without building the full tag list
    pub fn has_tag(&self, text: &str, tag: &str) -> bool {
        self.tags.contains(text, tag)
    }

    /// Both annotation kinds at once
    pub fn annotate(&self, text: &str) -> Annotations {
        Annotations {
            tags: self.tags(text),
            links: self.links(text),
        }
    }
}

impl Default for AnnotationParser {
    fn default() -> Self {
        Self::new(TagCharset::default()).expect("default tag charset compiles")
    }
}

/// Extract tags with the default charset (ASCII plus Hangul syllables)
pub fn extract_tags(text: &str) -> Vec<String> {
    DEFAULT_PARSER.tags(text)
}

/// Extract page references
pub fn extract_links(text: &str) -> Vec<String> {
    DEFAULT_PARSER.links(text)
}
