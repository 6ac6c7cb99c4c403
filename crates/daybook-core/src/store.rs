//! Document Store
//!
//! Owns every journal and page. Both maps preserve insertion order; the
//! corpus walks journals first, then pages, each in insertion order, and that
//! order is the tiebreaker of every stable sort downstream.
//!
//! Block-lifecycle operations are limited to insert-at-front, remove-by-id
//! and replace-by-id within one document. Blocks never move between
//! documents and documents are never deleted.

use indexmap::IndexMap;
use tracing::debug;

use crate::environment::Environment;
use crate::error::{CoreError, CoreResult};
use crate::model::{Block, DocRef, Document, DocumentKind};

/// Seed text of a page created by [`DocumentStore::ensure_page`]
pub fn page_seed_text(title: &str) -> String {
    format!("[[{}]] page created.", title)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    journals: IndexMap<String, Document>,
    pages: IndexMap<String, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from snapshot maps
    pub fn from_parts(
        journals: IndexMap<String, Document>,
        pages: IndexMap<String, Document>,
    ) -> Self {
        Self { journals, pages }
    }

    pub fn into_parts(self) -> (IndexMap<String, Document>, IndexMap<String, Document>) {
        (self.journals, self.pages)
    }

    pub fn journal_map(&self) -> &IndexMap<String, Document> {
        &self.journals
    }

    pub fn page_map(&self) -> &IndexMap<String, Document> {
        &self.pages
    }

    fn map(&self, kind: DocumentKind) -> &IndexMap<String, Document> {
        match kind {
            DocumentKind::Journal => &self.journals,
            DocumentKind::Page => &self.pages,
        }
    }

    fn map_mut(&mut self, kind: DocumentKind) -> &mut IndexMap<String, Document> {
        match kind {
            DocumentKind::Journal => &mut self.journals,
            DocumentKind::Page => &mut self.pages,
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn contains(&self, kind: DocumentKind, id: &str) -> bool {
        self.map(kind).contains_key(id)
    }

    /// Look up a document by kind and exact id
    pub fn get_document(&self, kind: DocumentKind, id: &str) -> CoreResult<&Document> {
        self.map(kind)
            .get(id)
            .ok_or_else(|| CoreError::not_found(kind, id))
    }

    pub fn get(&self, doc: &DocRef) -> CoreResult<&Document> {
        self.get_document(doc.kind, &doc.id)
    }

    pub fn get_mut(&mut self, doc: &DocRef) -> CoreResult<&mut Document> {
        self.map_mut(doc.kind)
            .get_mut(&doc.id)
            .ok_or_else(|| CoreError::not_found(doc.kind, doc.id.clone()))
    }

    /// Every document with its kind: journals first, then pages
    pub fn documents(&self) -> impl Iterator<Item = (DocumentKind, &Document)> {
        self.journals
            .values()
            .map(|d| (DocumentKind::Journal, d))
            .chain(self.pages.values().map(|d| (DocumentKind::Page, d)))
    }

    /// Journals ordered by id, newest date first
    pub fn journals_newest_first(&self) -> Vec<&Document> {
        let mut journals: Vec<&Document> = self.journals.values().collect();
        journals.sort_by(|a, b| b.id.cmp(&a.id));
        journals
    }

    /// Pages ordered by title
    pub fn pages_by_title(&self) -> Vec<&Document> {
        let mut pages: Vec<&Document> = self.pages.values().collect();
        pages.sort_by(|a, b| a.title.cmp(&b.title));
        pages
    }

    pub fn document_count(&self) -> usize {
        self.journals.len() + self.pages.len()
    }

    pub fn block_count(&self) -> usize {
        self.documents().map(|(_, d)| d.blocks.len()).sum()
    }

    /// Find the document owning `block_id`
    pub fn locate_block(&self, block_id: &str) -> Option<DocRef> {
        self.documents()
            .find(|(_, doc)| doc.block(block_id).is_some())
            .map(|(kind, doc)| DocRef::new(kind, doc.id.clone()))
    }

    pub fn find_block(&self, block_id: &str) -> Option<(DocRef, &Block)> {
        self.documents().find_map(|(kind, doc)| {
            doc.block(block_id)
                .map(|block| (DocRef::new(kind, doc.id.clone()), block))
        })
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// First free journal id for `date`: the date itself, else `date (n)`
    /// for the smallest `n >= 2` not in use
    pub fn next_journal_id(&self, date: &str) -> String {
        if !self.journals.contains_key(date) {
            return date.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{} ({})", date, n);
            if !self.journals.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Create a new journal for `date` with one empty block, disambiguating
    /// the id when that date already has a journal
    pub fn create_journal(&mut self, env: &Environment, date: &str) -> &Document {
        let id = self.next_journal_id(date);
        if id != date {
            debug!("Journal {} exists, creating {}", date, id);
        }
        let document = Document::new(id.clone(), env.now(), vec![env.new_block("")]);
        self.journals.entry(id).or_insert(document)
    }

    /// Return the journal for exactly `date`, creating it if absent
    pub fn ensure_journal(&mut self, env: &Environment, date: &str) -> &Document {
        self.journals
            .entry(date.to_string())
            .or_insert_with(|| Document::new(date, env.now(), vec![env.new_block("")]))
    }

    /// Return the page titled `title` (surrounding whitespace trimmed),
    /// creating it with a seed block if absent. Idempotent.
    pub fn ensure_page(&mut self, env: &Environment, title: &str) -> CoreResult<&Document> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::EmptyTitle);
        }
        Ok(self.pages.entry(title.to_string()).or_insert_with(|| {
            Document::new(title, env.now(), vec![env.new_block(page_seed_text(title))])
        }))
    }

    /// Insert an already-built document, replacing any with the same id
    pub fn insert_document(&mut self, kind: DocumentKind, document: Document) {
        self.map_mut(kind).insert(document.id.clone(), document);
    }

    // ------------------------------------------------------------------
    // Block lifecycle
    // ------------------------------------------------------------------

    /// Prepend a block to a document
    pub fn insert_block_front(&mut self, doc: &DocRef, block: Block) -> CoreResult<()> {
        self.get_mut(doc)?.blocks.insert(0, block);
        Ok(())
    }

    /// Remove a block from a document and return it
    pub fn remove_block(&mut self, doc: &DocRef, block_id: &str) -> CoreResult<Block> {
        let document = self.get_mut(doc)?;
        let index = document
            .position(block_id)
            .ok_or_else(|| CoreError::block_not_found(block_id))?;
        Ok(document.blocks.remove(index))
    }

    /// Swap in `block` for the block with the same id, returning the old one
    pub fn replace_block(&mut self, doc: &DocRef, block: Block) -> CoreResult<Block> {
        let document = self.get_mut(doc)?;
        let slot = document
            .block_mut(&block.id)
            .ok_or_else(|| CoreError::block_not_found(block.id.clone()))?;
        Ok(std::mem::replace(slot, block))
    }

    pub fn block_mut(&mut self, doc: &DocRef, block_id: &str) -> CoreResult<&mut Block> {
        self.get_mut(doc)?
            .block_mut(block_id)
            .ok_or_else(|| CoreError::block_not_found(block_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_environment, ManualClock};

    fn env() -> Environment {
        test_environment(ManualClock::new_year()).1
    }

    #[test]
    fn test_create_journal_disambiguates() {
        let env = env();
        let mut store = DocumentStore::new();

        assert_eq!(store.create_journal(&env, "2024-01-01").id, "2024-01-01");
        assert_eq!(store.create_journal(&env, "2024-01-01").id, "2024-01-01 (2)");
        assert_eq!(store.create_journal(&env, "2024-01-01").id, "2024-01-01 (3)");
        assert_eq!(store.journal_map().len(), 3);
    }

    #[test]
    fn test_disambiguation_fills_smallest_gap() {
        let env = env();
        let mut store = DocumentStore::new();
        store.create_journal(&env, "2024-01-01");
        let third = Document::new("2024-01-01 (3)", env.now(), Vec::new());
        store.insert_document(DocumentKind::Journal, third);

        assert_eq!(store.next_journal_id("2024-01-01"), "2024-01-01 (2)");
    }

    #[test]
    fn test_new_journal_has_one_empty_block() {
        let env = env();
        let mut store = DocumentStore::new();
        let journal = store.create_journal(&env, "2024-01-01");
        assert_eq!(journal.title, "2024-01-01");
        assert_eq!(journal.blocks.len(), 1);
        assert_eq!(journal.blocks[0].text, "");
    }

    #[test]
    fn test_ensure_journal_does_not_disambiguate() {
        let env = env();
        let mut store = DocumentStore::new();
        let first = store.ensure_journal(&env, "2024-01-01").blocks[0].id.clone();
        let again = store.ensure_journal(&env, "2024-01-01").blocks[0].id.clone();
        assert_eq!(first, again);
        assert_eq!(store.journal_map().len(), 1);
    }

    #[test]
    fn test_ensure_page_is_idempotent() {
        let env = env();
        let mut store = DocumentStore::new();
        let created = store.ensure_page(&env, "ProjectX").unwrap().clone();
        let again = store.ensure_page(&env, "ProjectX").unwrap().clone();

        assert_eq!(created, again);
        assert_eq!(store.page_map().len(), 1);
        assert_eq!(created.blocks.len(), 1);
        assert_eq!(created.blocks[0].text, "[[ProjectX]] page created.");
    }

    #[test]
    fn test_ensure_page_trims_but_keeps_case() {
        let env = env();
        let mut store = DocumentStore::new();
        store.ensure_page(&env, "  Foo ").unwrap();
        store.ensure_page(&env, "foo").unwrap();

        assert!(store.contains(DocumentKind::Page, "Foo"));
        assert!(store.contains(DocumentKind::Page, "foo"));
        assert_eq!(store.page_map().len(), 2);
    }

    #[test]
    fn test_ensure_page_rejects_blank_title() {
        let env = env();
        let mut store = DocumentStore::new();
        assert_eq!(store.ensure_page(&env, "   ").unwrap_err(), CoreError::EmptyTitle);
    }

    #[test]
    fn test_get_document_not_found() {
        let store = DocumentStore::new();
        let err = store.get_document(DocumentKind::Page, "Missing").unwrap_err();
        assert_eq!(err, CoreError::not_found(DocumentKind::Page, "Missing"));
    }

    #[test]
    fn test_block_lifecycle() {
        let env = env();
        let mut store = DocumentStore::new();
        let doc = DocRef::journal(store.create_journal(&env, "2024-01-01").id.clone());

        let block = env.new_block("first");
        let id = block.id.clone();
        store.insert_block_front(&doc, block).unwrap();
        assert_eq!(store.get(&doc).unwrap().blocks[0].id, id);
        assert_eq!(store.locate_block(&id), Some(doc.clone()));

        let mut edited = store.find_block(&id).unwrap().1.clone();
        edited.set_text("edited", env.now());
        let old = store.replace_block(&doc, edited).unwrap();
        assert_eq!(old.text, "first");
        assert_eq!(store.get(&doc).unwrap().blocks[0].text, "edited");

        let removed = store.remove_block(&doc, &id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.locate_block(&id).is_none());
        assert!(store.remove_block(&doc, &id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_listing_orders() {
        let env = env();
        let mut store = DocumentStore::new();
        store.ensure_journal(&env, "2024-01-01");
        store.ensure_journal(&env, "2024-03-01");
        store.ensure_journal(&env, "2024-02-01");
        store.ensure_page(&env, "beta").unwrap();
        store.ensure_page(&env, "Alpha").unwrap();

        let journals: Vec<&str> = store
            .journals_newest_first()
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(journals, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);

        let pages: Vec<&str> = store.pages_by_title().iter().map(|d| d.title.as_str()).collect();
        assert_eq!(pages, vec!["Alpha", "beta"]);

        let walk: Vec<&str> = store.documents().map(|(_, d)| d.id.as_str()).collect();
        assert_eq!(walk, vec!["2024-01-01", "2024-03-01", "2024-02-01", "beta", "Alpha"]);
    }
}
