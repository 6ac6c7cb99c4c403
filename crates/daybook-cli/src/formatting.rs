//! Output helpers shared by the commands
//!
//! Every command prints either human-oriented lines or, with `--json`, one
//! pretty-printed JSON document built from the view types below.

use anyhow::{bail, Result};
use colored::{ColoredString, Colorize};
use serde::Serialize;

use daybook_core::model::timestamp;
use daybook_core::text::shorten;
use daybook_core::{Block, BlockStatus, CorpusEntry, Document, DocumentKind, SavedView, TagCount};

/// Characters of an id shown in listings
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

pub fn status_label(status: BlockStatus) -> ColoredString {
    let label = format!("[{}]", status);
    match status {
        BlockStatus::Todo => label.yellow(),
        BlockStatus::Doing => label.cyan(),
        BlockStatus::Done => label.green(),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolve a full id from an exact id or a unique prefix
pub fn resolve_id<'a, I>(candidates: I, prefix: &str, what: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matches: Vec<&str> = Vec::new();
    for id in candidates {
        if id == prefix {
            return Ok(id.to_string());
        }
        if !prefix.is_empty() && id.starts_with(prefix) {
            matches.push(id);
        }
    }
    match matches.as_slice() {
        [single] => Ok((*single).to_string()),
        [] => bail!("No {} matches '{}'", what, prefix),
        many => bail!(
            "'{}' is ambiguous: {} {}s match ({})",
            prefix,
            many.len(),
            what,
            many.iter().map(|id| short_id(id)).collect::<Vec<_>>().join(", ")
        ),
    }
}

/// Corpus row as printed in JSON
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: String,
    pub text: String,
    pub status: BlockStatus,
    pub scope_type: DocumentKind,
    pub scope_id: String,
    pub scope_title: String,
    pub updated_at: String,
}

impl From<&CorpusEntry<'_>> for EntryView {
    fn from(entry: &CorpusEntry<'_>) -> Self {
        Self {
            id: entry.block.id.clone(),
            text: entry.block.text.clone(),
            status: entry.block.status,
            scope_type: entry.scope_kind,
            scope_id: entry.scope_id.to_string(),
            scope_title: entry.scope_title.to_string(),
            updated_at: timestamp::format(&entry.block.updated_at),
        }
    }
}

pub fn entry_views(entries: &[CorpusEntry<'_>], limit: usize) -> Vec<EntryView> {
    entries.iter().take(limit).map(EntryView::from).collect()
}

/// `[TODO] 1a2b3c4d  text · journal · 2024-01-01`
pub fn entry_line(entry: &CorpusEntry<'_>, width: usize) -> String {
    format!(
        "{} {}  {} {}",
        status_label(entry.block.status),
        short_id(&entry.block.id).dimmed(),
        shorten(&entry.block.text, width),
        format!("· {} · {}", entry.scope_kind, entry.scope_title).dimmed()
    )
}

pub fn print_entries(entries: &[CorpusEntry<'_>], limit: usize, width: usize, empty: &str) {
    if entries.is_empty() {
        println!("{}", empty.dimmed());
        return;
    }
    for entry in entries.iter().take(limit) {
        println!("{}", entry_line(entry, width));
    }
    if entries.len() > limit {
        println!("{}", format!("… {} more", entries.len() - limit).dimmed());
    }
}

/// Document row for `dbk docs`
#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub kind: DocumentKind,
    pub id: String,
    pub title: String,
    pub blocks: usize,
}

impl DocumentSummary {
    pub fn new(kind: DocumentKind, doc: &Document) -> Self {
        Self {
            kind,
            id: doc.id.clone(),
            title: doc.title.clone(),
            blocks: doc.blocks.len(),
        }
    }
}

/// Inline query results under a query block
#[derive(Debug, Serialize)]
pub struct QueryView {
    pub subtitle: String,
    pub total: usize,
    pub results: Vec<EntryView>,
}

/// One block of `dbk show`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    pub id: String,
    pub text: String,
    pub status: BlockStatus,
    pub tags: Vec<String>,
    pub links: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryView>,
}

impl BlockView {
    pub fn new(
        block: &Block,
        tags: Vec<String>,
        links: Vec<String>,
        query: Option<QueryView>,
    ) -> Self {
        Self {
            id: block.id.clone(),
            text: block.text.clone(),
            status: block.status,
            tags,
            links,
            created_at: timestamp::format(&block.created_at),
            updated_at: timestamp::format(&block.updated_at),
            query,
        }
    }
}

/// The current document for `dbk show`
#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub kind: DocumentKind,
    pub id: String,
    pub title: String,
    pub blocks: Vec<BlockView>,
}

/// Saved view row
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSummary {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub created_at: String,
}

impl From<&SavedView> for ViewSummary {
    fn from(view: &SavedView) -> Self {
        Self {
            id: view.id.clone(),
            name: view.name.clone(),
            subtitle: view.query.subtitle(),
            created_at: timestamp::format(&view.created_at),
        }
    }
}

pub fn tag_line(count: &TagCount) -> String {
    format!("{} ({})", format!("#{}", count.tag).magenta(), count.count)
}
