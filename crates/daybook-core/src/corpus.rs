//! Corpus Index
//!
//! A flat projection of every block together with its owning document. The
//! projection borrows from the store and is rebuilt on demand; at note-taking
//! scale a full walk is cheaper than keeping an incremental index coherent.

use crate::model::{Block, DocRef, DocumentKind};
use crate::store::DocumentStore;

/// One block plus where it lives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorpusEntry<'a> {
    pub block: &'a Block,
    pub scope_kind: DocumentKind,
    pub scope_id: &'a str,
    /// Owning document's title at the time of the walk
    pub scope_title: &'a str,
}

impl<'a> CorpusEntry<'a> {
    /// Owned address of the owning document
    pub fn scope(&self) -> DocRef {
        DocRef::new(self.scope_kind, self.scope_id)
    }

    /// Check if the entry belongs to `doc`
    pub fn is_in(&self, doc: &DocRef) -> bool {
        self.scope_kind == doc.kind && self.scope_id == doc.id
    }
}

impl DocumentStore {
    /// Walk every block: journals first, then pages, each in insertion
    /// order, blocks in document order
    pub fn corpus(&self) -> Vec<CorpusEntry<'_>> {
        let mut entries = Vec::with_capacity(self.block_count());
        for (kind, doc) in self.documents() {
            for block in &doc.blocks {
                entries.push(CorpusEntry {
                    block,
                    scope_kind: kind,
                    scope_id: &doc.id,
                    scope_title: &doc.title,
                });
            }
        }
        entries
    }
}
