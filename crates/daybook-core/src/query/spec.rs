//! View specs
//!
//! A [`ViewSpec`] is normalized when it is built: unknown status or scope
//! tokens become `ALL`, tags lose a leading `#`, and empty strings mean
//! "no filter". Evaluation never has to second-guess its input.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::BlockStatus;
use crate::query::query_blocks;

/// Status stage of a view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(BlockStatus),
}

impl StatusFilter {
    /// Parse a status token; anything other than a known status is `All`
    pub fn parse(token: &str) -> Self {
        BlockStatus::parse(token).map_or(Self::All, Self::Only)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn matches(self, status: BlockStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl From<String> for StatusFilter {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl From<BlockStatus> for StatusFilter {
    fn from(status: BlockStatus) -> Self {
        Self::Only(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which documents a view spans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scope {
    /// Only the document the view is evaluated against
    Current,
    #[default]
    All,
}

impl Scope {
    /// `current` in any case is `Current`; everything else is `All`
    pub fn parse(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("current") {
            Self::Current
        } else {
            Self::All
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "CURRENT",
            Self::All => "ALL",
        }
    }
}

impl From<String> for Scope {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.as_str().to_string()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of a view spec: absent tag/text are empty strings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawViewSpec {
    status: StatusFilter,
    tag: String,
    text: String,
    scope: Scope,
}

/// Filter predicate over the block corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawViewSpec", into = "RawViewSpec")]
pub struct ViewSpec {
    pub status: StatusFilter,
    tag: Option<String>,
    text: Option<String>,
    pub scope: Scope,
}

fn normalize_tag(tag: &str) -> Option<String> {
    let tag = tag.trim();
    let tag = tag.strip_prefix('#').unwrap_or(tag);
    (!tag.is_empty()).then(|| tag.to_string())
}

fn normalize_text(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

impl From<RawViewSpec> for ViewSpec {
    fn from(raw: RawViewSpec) -> Self {
        Self {
            status: raw.status,
            tag: normalize_tag(&raw.tag),
            text: normalize_text(&raw.text),
            scope: raw.scope,
        }
    }
}

impl From<ViewSpec> for RawViewSpec {
    fn from(spec: ViewSpec) -> Self {
        Self {
            status: spec.status,
            tag: spec.tag.unwrap_or_default(),
            text: spec.text.unwrap_or_default(),
            scope: spec.scope,
        }
    }
}

impl ViewSpec {
    /// Match everything: `{status: ALL, scope: ALL}`
    pub fn new() -> Self {
        Self::default()
    }

    /// Spec inserted by a bare "add query block" action
    pub fn current_todos() -> Self {
        Self::new()
            .with_status(StatusFilter::Only(BlockStatus::Todo))
            .with_scope(Scope::Current)
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the tag filter; a leading `#` is dropped, empty clears it
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = normalize_tag(tag);
        self
    }

    /// Set the substring filter; empty clears it
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = normalize_text(text);
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Number of active filter stages, scope included
    pub fn constraint_count(&self) -> usize {
        usize::from(self.scope == Scope::Current)
            + usize::from(self.status != StatusFilter::All)
            + usize::from(self.tag.is_some())
            + usize::from(self.text.is_some())
    }

    /// Parse the body of a query block (`status:TODO tag:work ...`)
    pub fn parse_body(body: &str) -> Self {
        let mut spec = Self::new();
        for token in body.split_whitespace() {
            let mut parts = token.split(':');
            let key = parts.next().unwrap_or_default();
            let value = parts.next().unwrap_or_default().trim();
            if value.is_empty() {
                continue;
            }
            match key.to_lowercase().as_str() {
                "status" => spec.status = StatusFilter::parse(value),
                "tag" => spec.tag = normalize_tag(value),
                "contains" | "text" => spec.text = normalize_text(value),
                "scope" => spec.scope = Scope::parse(value),
                other => tracing::debug!("Ignoring query key '{}'", other),
            }
        }
        spec
    }

    /// Short description, e.g. `scope:current · status:TODO · #work`
    pub fn subtitle(&self) -> String {
        let mut parts = vec![match self.scope {
            Scope::Current => "scope:current".to_string(),
            Scope::All => "scope:all".to_string(),
        }];
        if let StatusFilter::Only(status) = self.status {
            parts.push(format!("status:{}", status));
        }
        if let Some(tag) = &self.tag {
            parts.push(format!("#{}", tag));
        }
        if let Some(text) = &self.text {
            parts.push(format!("contains:{}", text));
        }
        parts.join(" · ")
    }

    /// Body of the equivalent query block
    pub fn to_body(&self) -> String {
        let mut parts = Vec::new();
        if let StatusFilter::Only(status) = self.status {
            parts.push(format!("status:{}", status));
        }
        if let Some(tag) = &self.tag {
            parts.push(format!("tag:{}", tag));
        }
        if let Some(text) = &self.text {
            parts.push(format!("contains:{}", text));
        }
        parts.push(format!("scope:{}", self.scope.as_str().to_lowercase()));
        parts.join(" ")
    }

    /// Full block text, `{{query ...}}`
    pub fn to_query_block(&self) -> String {
        query_blocks::render(&self.to_body())
    }
}

impl fmt::Display for ViewSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subtitle())
    }
}
