//! Reference Materializer
//!
//! Scans every block for `[[links]]` and ensures a page exists for each.
//! Runs after every text mutation and before any query or backlink request,
//! so a link typed moments ago resolves immediately.
//!
//! Cost is O(total blocks × average text length) per pass. Parsed links are
//! cached per block, keyed by `(id, updated_at)` plus a hash of the text, so
//! unchanged blocks are not re-scanned.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use tracing::{debug, info};

use crate::environment::Environment;
use crate::model::{Block, DocumentKind, Timestamp};
use crate::store::DocumentStore;
use daybook_parser::parse_links;

#[derive(Debug, Clone)]
struct CachedLinks {
    updated_at: Timestamp,
    text_hash: u64,
    links: Vec<String>,
}

fn text_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Link materializer with a per-block parse cache
#[derive(Debug, Clone, Default)]
pub struct Materializer {
    cache: HashMap<String, CachedLinks>,
}

impl Materializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks with cached link sets
    pub fn cached_blocks(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn links_for(&mut self, block: &Block) -> &[String] {
        let hash = text_hash(&block.text);
        let entry = self
            .cache
            .entry(block.id.clone())
            .or_insert_with(|| CachedLinks {
                updated_at: block.updated_at,
                text_hash: hash,
                links: parse_links(&block.text),
            });
        if entry.updated_at != block.updated_at || entry.text_hash != hash {
            entry.updated_at = block.updated_at;
            entry.text_hash = hash;
            entry.links = parse_links(&block.text);
        }
        &entry.links
    }

    /// Ensure every referenced page exists. Returns the titles created by
    /// this pass, in first-reference order; a second pass returns nothing.
    pub fn materialize(&mut self, store: &mut DocumentStore, env: &Environment) -> Vec<String> {
        let mut seen_blocks: HashSet<String> = HashSet::new();
        let mut referenced: Vec<String> = Vec::new();
        let mut referenced_set: HashSet<String> = HashSet::new();

        for (_, doc) in store.documents() {
            for block in &doc.blocks {
                seen_blocks.insert(block.id.clone());
                for link in self.links_for(block) {
                    if referenced_set.insert(link.clone()) {
                        referenced.push(link.clone());
                    }
                }
            }
        }
        self.cache.retain(|id, _| seen_blocks.contains(id));

        let mut created = Vec::new();
        for title in referenced {
            if store.contains(DocumentKind::Page, &title) {
                continue;
            }
            // Link names are trimmed and non-empty, so this cannot fail
            if store.ensure_page(env, &title).is_ok() {
                info!("Created page '{}' from reference", title);
                created.push(title);
            }
        }

        debug!(
            "Materialized {} blocks, {} new pages",
            seen_blocks.len(),
            created.len()
        );
        created
    }
}

/// One uncached materialization pass
pub fn materialize(store: &mut DocumentStore, env: &Environment) -> Vec<String> {
    Materializer::new().materialize(store, env)
}
