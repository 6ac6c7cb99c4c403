use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::block::Block;
use super::timestamp::{self, Timestamp};

/// Which map a document lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Keyed by calendar date, `YYYY-MM-DD` with an optional ` (n)` suffix
    Journal,
    /// Keyed by its display title, case-sensitive
    Page,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Journal => "journal",
            DocumentKind::Page => "page",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "journal" => Ok(DocumentKind::Journal),
            "page" => Ok(DocumentKind::Page),
            other => Err(format!("unknown document kind '{}'", other)),
        }
    }
}

/// Address of a document: kind plus id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocRef {
    pub kind: DocumentKind,
    pub id: String,
}

impl DocRef {
    pub fn new(kind: DocumentKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn journal(id: impl Into<String>) -> Self {
        Self::new(DocumentKind::Journal, id)
    }

    pub fn page(id: impl Into<String>) -> Self {
        Self::new(DocumentKind::Page, id)
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// A journal or page: an ordered list of blocks
///
/// The kind is not stored on the document; it is implied by the store map
/// that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a document whose title equals its id
    pub fn new(id: impl Into<String>, now: Timestamp, blocks: Vec<Block>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            created_at: now,
            blocks,
        }
    }

    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == block_id)
    }

    pub fn position(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }
}
