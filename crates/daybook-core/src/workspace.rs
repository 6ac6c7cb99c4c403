//! Workspace: the state of one running instance
//!
//! Every mutating method applies its change, re-runs the materializer and
//! persists the snapshot, in that order. Save failures are logged and never
//! returned. Read methods can therefore assume every `[[link]]` resolves.

use tracing::{debug, info, warn};

use crate::corpus::CorpusEntry;
use crate::defaults::default_snapshot;
use crate::environment::Environment;
use crate::error::{CoreError, CoreResult};
use crate::materializer::Materializer;
use crate::model::{Block, BlockStatus, DocRef, Document};
use crate::query::{parse_query_block, QueryEngine, TagCount, ViewSpec};
use crate::snapshot::{PanelTab, Passthrough, Snapshot, SnapshotStore, UiState};
use crate::store::DocumentStore;
use crate::views::SavedView;
use daybook_parser::AnnotationParser;

#[derive(Debug)]
pub struct Workspace<S: SnapshotStore> {
    store: DocumentStore,
    views: Vec<SavedView>,
    ui: UiState,
    passthrough: Passthrough,
    env: Environment,
    parser: AnnotationParser,
    materializer: Materializer,
    backend: S,
}

impl<S: SnapshotStore> Workspace<S> {
    /// Load the stored snapshot, or build and save the default state when
    /// there is none (or it does not parse)
    pub fn open(backend: S, env: Environment, parser: AnnotationParser) -> Self {
        let (snapshot, fresh) = match backend.load() {
            Some(snapshot) => (snapshot, false),
            None => {
                info!("Starting from the default state");
                (default_snapshot(&env), true)
            }
        };
        let (store, ui, views, passthrough) = snapshot.into_parts();
        let mut workspace = Self {
            store,
            views,
            ui,
            passthrough,
            env,
            parser,
            materializer: Materializer::new(),
            backend,
        };

        let created = workspace.materializer.materialize(&mut workspace.store, &workspace.env);
        let repaired = workspace.repair_current();
        if fresh || repaired || !created.is_empty() {
            workspace.persist();
        }
        workspace
    }

    /// Point the ui at today's journal when the current document is gone
    fn repair_current(&mut self) -> bool {
        if self.store.get(&self.ui.current()).is_ok() {
            return false;
        }
        let today = self.env.today();
        warn!(
            "Current {} '{}' does not exist, opening journal {}",
            self.ui.current_type, self.ui.current_id, today
        );
        let id = self.store.ensure_journal(&self.env, &today).id.clone();
        self.ui.set_current(DocRef::journal(id));
        true
    }

    fn commit(&mut self) {
        self.materializer.materialize(&mut self.store, &self.env);
        self.persist();
    }

    fn persist(&self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.backend.save(&snapshot) {
            warn!("Failed to save snapshot: {}", e);
        }
    }

    fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.parser)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Saved views, newest first
    pub fn views(&self) -> &[SavedView] {
        &self.views
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn parser(&self) -> &AnnotationParser {
        &self.parser
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn current(&self) -> DocRef {
        self.ui.current()
    }

    pub fn current_document(&self) -> CoreResult<&Document> {
        self.store.get(&self.ui.current())
    }

    /// Journals, newest date first
    pub fn journals(&self) -> Vec<&Document> {
        self.store.journals_newest_first()
    }

    /// Pages by title
    pub fn pages(&self) -> Vec<&Document> {
        self.store.pages_by_title()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.store, &self.ui, &self.views, &self.passthrough)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn navigate(&mut self, doc: DocRef) -> CoreResult<()> {
        self.store.get(&doc)?;
        debug!("Navigating to {}", doc);
        self.ui.set_current(doc);
        self.persist();
        Ok(())
    }

    pub fn set_panel_tab(&mut self, tab: PanelTab) {
        self.ui.panel_tab = tab;
        self.persist();
    }

    /// Open today's journal, creating it with one empty block if absent
    pub fn open_today(&mut self) -> DocRef {
        let today = self.env.today();
        let doc = DocRef::journal(self.store.ensure_journal(&self.env, &today).id.clone());
        self.ui.set_current(doc.clone());
        self.commit();
        doc
    }

    /// Create another journal for today and open it
    pub fn new_journal(&mut self) -> DocRef {
        let today = self.env.today();
        let doc = DocRef::journal(self.store.create_journal(&self.env, &today).id.clone());
        self.ui.set_current(doc.clone());
        self.commit();
        doc
    }

    /// Open the page `name`, creating it if needed. A blank name does nothing.
    pub fn new_page(&mut self, name: &str) -> Option<DocRef> {
        if name.trim().is_empty() {
            return None;
        }
        self.follow_link(name).ok()
    }

    /// Open the page a `[[title]]` points at, creating it if needed
    pub fn follow_link(&mut self, title: &str) -> CoreResult<DocRef> {
        let doc = DocRef::page(self.store.ensure_page(&self.env, title)?.id.clone());
        self.ui.set_current(doc.clone());
        self.commit();
        Ok(doc)
    }

    // ------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------

    /// Insert a block at the top of the current document
    pub fn add_block(&mut self, text: &str) -> CoreResult<String> {
        let block = self.env.new_block(text);
        let id = block.id.clone();
        self.store.insert_block_front(&self.ui.current(), block)?;
        self.commit();
        Ok(id)
    }

    /// Insert a query block; `None` inserts the current-document TODO view
    pub fn add_query_block(&mut self, spec: Option<&ViewSpec>) -> CoreResult<String> {
        let text = match spec {
            Some(spec) => spec.to_query_block(),
            None => ViewSpec::current_todos().to_query_block(),
        };
        self.add_block(&text)
    }

    fn locate(&self, block_id: &str) -> CoreResult<DocRef> {
        self.store
            .locate_block(block_id)
            .ok_or_else(|| CoreError::block_not_found(block_id))
    }

    pub fn edit_block(&mut self, block_id: &str, text: &str) -> CoreResult<()> {
        let doc = self.locate(block_id)?;
        let now = self.env.now();
        self.store.block_mut(&doc, block_id)?.set_text(text, now);
        self.commit();
        Ok(())
    }

    /// Advance a block's status, returning the new status
    pub fn cycle_block(&mut self, block_id: &str) -> CoreResult<BlockStatus> {
        let doc = self.locate(block_id)?;
        let now = self.env.now();
        let status = self.store.block_mut(&doc, block_id)?.cycle_status(now);
        self.commit();
        Ok(status)
    }

    pub fn delete_block(&mut self, block_id: &str) -> CoreResult<Block> {
        let doc = self.locate(block_id)?;
        let removed = self.store.remove_block(&doc, block_id)?;
        self.commit();
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Evaluate `spec` against the current document
    pub fn evaluate(&self, spec: &ViewSpec) -> Vec<CorpusEntry<'_>> {
        self.engine().evaluate(&self.store, spec, &self.ui.current())
    }

    /// Results of the query embedded in `block_id`, evaluated against the
    /// current document. `None` if the block is not a query block.
    pub fn query_block_results(
        &self,
        block_id: &str,
    ) -> CoreResult<Option<Vec<CorpusEntry<'_>>>> {
        let (_, block) = self
            .store
            .find_block(block_id)
            .ok_or_else(|| CoreError::block_not_found(block_id))?;
        Ok(parse_query_block(&block.text).map(|spec| self.evaluate(&spec)))
    }

    /// Blocks elsewhere that reference the current document
    pub fn backlinks(&self) -> CoreResult<Vec<CorpusEntry<'_>>> {
        self.engine().backlinks(&self.store, &self.ui.current())
    }

    pub fn tag_frequencies(&self) -> Vec<TagCount> {
        self.engine().tag_frequencies(&self.store)
    }

    pub fn blocks_with_tag(&self, tag: &str) -> Vec<CorpusEntry<'_>> {
        self.engine().blocks_with_tag(&self.store, tag)
    }

    // ------------------------------------------------------------------
    // Saved views
    // ------------------------------------------------------------------

    /// Save `spec` under `name` as the newest view. A blank name saves nothing.
    pub fn save_view(&mut self, name: &str, spec: ViewSpec) -> Option<SavedView> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let view = SavedView::new(self.env.next_id(), name, spec, self.env.now());
        self.views.insert(0, view.clone());
        self.persist();
        Some(view)
    }

    /// Remove a saved view; `false` if no view has that id
    pub fn remove_view(&mut self, view_id: &str) -> bool {
        let before = self.views.len();
        self.views.retain(|view| view.id != view_id);
        let removed = self.views.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn view(&self, view_id: &str) -> Option<&SavedView> {
        self.views.iter().find(|view| view.id == view_id)
    }

    /// Evaluate a saved view against the current document
    pub fn run_view(&self, view_id: &str) -> CoreResult<Vec<CorpusEntry<'_>>> {
        let view = self.view(view_id).ok_or_else(|| CoreError::ViewNotFound {
            id: view_id.to_string(),
        })?;
        Ok(self.evaluate(&view.query))
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Discard everything and rebuild the default state
    pub fn reset(&mut self) {
        info!("Resetting workspace");
        let (store, ui, views, passthrough) = default_snapshot(&self.env).into_parts();
        self.store = store;
        self.ui = ui;
        self.views = views;
        self.passthrough = passthrough;
        self.materializer.clear_cache();
        self.commit();
    }
}
