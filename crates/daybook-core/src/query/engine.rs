//! Evaluation over the corpus
//!
//! Every stage is a filter, applied in a fixed order (scope, status, tag,
//! substring) and followed by a stable sort on `updated_at`, newest first.
//! Entries with equal timestamps keep corpus order. The engine returns the
//! full matching set; callers take their own bounded prefix.

use indexmap::IndexMap;
use serde::Serialize;

use super::spec::{Scope, ViewSpec};
use crate::corpus::CorpusEntry;
use crate::error::CoreResult;
use crate::model::{DocRef, DocumentKind};
use crate::store::DocumentStore;
use daybook_parser::{link_token, AnnotationParser};

/// One row of the tag panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    /// Number of blocks carrying the tag
    pub count: usize,
}

/// Query evaluation bound to an annotation parser
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'p> {
    parser: &'p AnnotationParser,
}

impl<'p> QueryEngine<'p> {
    pub fn new(parser: &'p AnnotationParser) -> Self {
        Self { parser }
    }

    /// Evaluate `spec` with `current` as the document for `scope:current`
    pub fn evaluate<'s>(
        &self,
        store: &'s DocumentStore,
        spec: &ViewSpec,
        current: &DocRef,
    ) -> Vec<CorpusEntry<'s>> {
        let mut entries = store.corpus();

        if spec.scope == Scope::Current {
            entries.retain(|entry| entry.is_in(current));
        }
        entries.retain(|entry| spec.status.matches(entry.block.status));
        if let Some(tag) = spec.tag() {
            entries.retain(|entry| self.parser.has_tag(&entry.block.text, tag));
        }
        if let Some(text) = spec.text() {
            let needle = text.to_lowercase();
            entries.retain(|entry| entry.block.text.to_lowercase().contains(&needle));
        }

        // `sort_by` is stable
        entries.sort_by(|a, b| b.block.updated_at.cmp(&a.block.updated_at));
        entries
    }

    /// Blocks in other documents that reference `current`, in corpus order
    ///
    /// A page is referenced by the literal `[[Title]]` token or by a parsed
    /// link to its title. A journal is referenced by any occurrence of its
    /// id in the block text.
    pub fn backlinks<'s>(
        &self,
        store: &'s DocumentStore,
        current: &DocRef,
    ) -> CoreResult<Vec<CorpusEntry<'s>>> {
        let document = store.get(current)?;
        let title = document.title.as_str();
        let token = match current.kind {
            DocumentKind::Page => link_token(title),
            DocumentKind::Journal => document.id.clone(),
        };

        let mut entries = store.corpus();
        entries.retain(|entry| {
            if entry.is_in(current) {
                return false;
            }
            let text = &entry.block.text;
            text.contains(&token)
                || (current.kind == DocumentKind::Page
                    && self.parser.links(text).iter().any(|link| link == title))
        });
        Ok(entries)
    }

    /// Blocks per tag, most frequent first; ties keep first-seen order
    pub fn tag_frequencies(&self, store: &DocumentStore) -> Vec<TagCount> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for entry in store.corpus() {
            for tag in self.parser.tags(&entry.block.text) {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }

        let mut frequencies: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect();
        frequencies.sort_by(|a, b| b.count.cmp(&a.count));
        frequencies
    }

    /// Blocks carrying `tag` (leading `#` optional), in corpus order
    pub fn blocks_with_tag<'s>(&self, store: &'s DocumentStore, tag: &str) -> Vec<CorpusEntry<'s>> {
        let tag = tag.trim();
        let tag = tag.strip_prefix('#').unwrap_or(tag);
        if tag.is_empty() {
            return Vec::new();
        }
        let mut entries = store.corpus();
        entries.retain(|entry| self.parser.has_tag(&entry.block.text, tag));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::model::{Block, BlockStatus};
    use crate::query::StatusFilter;
    use crate::test_support::{test_environment, ManualClock};
    use proptest::prelude::*;

    struct Fixture {
        env: Environment,
        store: DocumentStore,
        journal: DocRef,
        parser: AnnotationParser,
    }

    impl Fixture {
        fn new() -> Self {
            let (_, env) = test_environment(ManualClock::new_year());
            let mut store = DocumentStore::new();
            let journal = DocRef::journal(store.create_journal(&env, "2024-01-01").id.clone());
            // Drop the empty seed block so fixtures only see what tests add
            let seed = store.get(&journal).unwrap().blocks[0].id.clone();
            store.remove_block(&journal, &seed).unwrap();
            Self {
                env,
                store,
                journal,
                parser: AnnotationParser::default(),
            }
        }

        fn add(&mut self, doc: &DocRef, text: &str, status: BlockStatus) -> String {
            let mut block: Block = self.env.new_block(text);
            block.status = status;
            let id = block.id.clone();
            self.store.insert_block_front(doc, block).unwrap();
            id
        }

        fn page(&mut self, title: &str) -> DocRef {
            self.store.ensure_page(&self.env, title).unwrap();
            DocRef::page(title)
        }

        fn engine(&self) -> QueryEngine<'_> {
            QueryEngine::new(&self.parser)
        }
    }

    fn ids(entries: &[CorpusEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.block.id.clone()).collect()
    }

    #[test]
    fn test_current_scope_todo() {
        let mut fx = Fixture::new();
        let journal = fx.journal.clone();
        let todo = fx.add(&journal, "write report", BlockStatus::Todo);
        fx.add(&journal, "ship it", BlockStatus::Done);
        let other = fx.page("Elsewhere");
        fx.add(&other, "foreign todo", BlockStatus::Todo);

        let spec = ViewSpec::current_todos();
        let results = fx.engine().evaluate(&fx.store, &spec, &journal);
        assert_eq!(ids(&results), vec![todo]);
    }

    #[test]
    fn test_tag_filter_is_exact_and_case_sensitive() {
        let mut fx = Fixture::new();
        let journal = fx.journal.clone();
        let hit = fx.add(&journal, "a #work item", BlockStatus::Todo);
        fx.add(&journal, "a #Work item", BlockStatus::Todo);
        fx.add(&journal, "a #workshop item", BlockStatus::Todo);
        fx.add(&journal, "a#work glued", BlockStatus::Todo);

        let spec = ViewSpec::new().with_tag("#work");
        assert_eq!(ids(&fx.engine().evaluate(&fx.store, &spec, &journal)), vec![hit]);
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let mut fx = Fixture::new();
        let journal = fx.journal.clone();
        let hit = fx.add(&journal, "Quarterly PLAN", BlockStatus::Doing);
        fx.add(&journal, "unrelated", BlockStatus::Doing);

        let spec = ViewSpec::new().with_text("plan");
        assert_eq!(ids(&fx.engine().evaluate(&fx.store, &spec, &journal)), vec![hit]);
    }

    #[test]
    fn test_sorted_newest_first_with_stable_ties() {
        let mut fx = Fixture::new();
        let journal = fx.journal.clone();
        let first = fx.add(&journal, "first", BlockStatus::Todo);
        let second = fx.add(&journal, "second", BlockStatus::Todo);
        let third = fx.add(&journal, "third", BlockStatus::Todo);

        // `second` and `third` collide; `first` becomes the newest
        let stamp = fx.store.find_block(&second).unwrap().1.updated_at;
        fx.store.block_mut(&journal, &third).unwrap().updated_at = stamp;
        let newer = stamp + chrono::Duration::seconds(5);
        fx.store.block_mut(&journal, &first).unwrap().updated_at = newer;

        let results = fx.engine().evaluate(&fx.store, &ViewSpec::new(), &journal);
        // Corpus order is third, second, first (insert-at-front)
        assert_eq!(ids(&results), vec![first, third, second]);
    }

    #[test]
    fn test_page_backlinks() {
        let mut fx = Fixture::new();
        let journal = fx.journal.clone();
        let foo = fx.page("Foo");
        let hit = fx.add(&journal, "see [[Foo]]", BlockStatus::Todo);
        let padded = fx.add(&journal, "see [[ Foo ]]", BlockStatus::Done);
        fx.add(&journal, "see [[Food]]", BlockStatus::Todo);

        let backlinks = fx.engine().backlinks(&fx.store, &foo).unwrap();
        // Corpus order; the seed block of Foo itself is excluded
        assert_eq!(ids(&backlinks), vec![padded, hit]);
    }

    #[test]
    fn test_journal_backlinks_match_id_substring() {
        let mut fx = Fixture::new();
        let journal = fx.journal.clone();
        fx.add(&journal, "see [[Foo]]", BlockStatus::Todo);
        let foo = fx.page("Foo");
        let mention = fx.add(&foo, "met on 2024-01-01", BlockStatus::Todo);

        let backlinks = fx.engine().backlinks(&fx.store, &journal).unwrap();
        assert_eq!(ids(&backlinks), vec![mention]);
    }

    #[test]
    fn test_backlinks_for_missing_document() {
        let fx = Fixture::new();
        let err = fx
            .engine()
            .backlinks(&fx.store, &DocRef::page("Ghost"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_tag_frequencies() {
        let mut fx = Fixture::new();
        let journal = fx.journal.clone();
        fx.add(&journal, "#a #b", BlockStatus::Todo);
        fx.add(&journal, "#b #b #c", BlockStatus::Todo);
        fx.add(&journal, "#c", BlockStatus::Todo);

        let counts = fx.engine().tag_frequencies(&fx.store);
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.tag.as_str(), c.count)).collect();
        // Corpus order is "#c", "#b #b #c", "#a #b": c and b tie at 2
        assert_eq!(pairs, vec![("c", 2), ("b", 2), ("a", 1)]);
    }

    #[test]
    fn test_blocks_with_tag() {
        let mut fx = Fixture::new();
        let journal = fx.journal.clone();
        let older = fx.add(&journal, "#x one", BlockStatus::Todo);
        let newer = fx.add(&journal, "two #x", BlockStatus::Done);
        fx.add(&journal, "three", BlockStatus::Todo);

        let engine = fx.engine();
        assert_eq!(ids(&engine.blocks_with_tag(&fx.store, "#x")), vec![newer, older]);
        assert!(engine.blocks_with_tag(&fx.store, "#").is_empty());
    }

    fn any_spec() -> impl Strategy<Value = ViewSpec> {
        (
            prop_oneof![
                Just(StatusFilter::All),
                Just(StatusFilter::Only(BlockStatus::Todo)),
                Just(StatusFilter::Only(BlockStatus::Done)),
            ],
            prop_oneof![Just(""), Just("a"), Just("b")],
            prop_oneof![Just(""), Just("x"), Just("A")],
            prop_oneof![Just(Scope::All), Just(Scope::Current)],
        )
            .prop_map(|(status, tag, text, scope)| {
                ViewSpec::new()
                    .with_status(status)
                    .with_tag(tag)
                    .with_text(text)
                    .with_scope(scope)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn adding_constraints_never_grows_results(
            blocks in prop::collection::vec(("[ax #ab]{0,12}", 0usize..3, any::<bool>()), 0..12),
            spec in any_spec(),
            extra in any_spec(),
        ) {
            let mut fx = Fixture::new();
            let journal = fx.journal.clone();
            let page = fx.page("P");
            for (text, status, on_page) in &blocks {
                let doc = if *on_page { &page } else { &journal };
                fx.add(doc, text, BlockStatus::ALL[*status]);
            }

            // Add every constraint `extra` sets that `spec` leaves open
            let mut narrowed = spec.clone();
            if spec.status == StatusFilter::All {
                narrowed = narrowed.with_status(extra.status);
            }
            if let (None, Some(tag)) = (spec.tag(), extra.tag()) {
                narrowed = narrowed.with_tag(tag);
            }
            if let (None, Some(text)) = (spec.text(), extra.text()) {
                narrowed = narrowed.with_text(text);
            }
            if extra.scope == Scope::Current {
                narrowed = narrowed.with_scope(Scope::Current);
            }
            prop_assert!(narrowed.constraint_count() >= spec.constraint_count());

            let engine = fx.engine();
            let broad = engine.evaluate(&fx.store, &spec, &journal).len();
            let narrow = engine.evaluate(&fx.store, &narrowed, &journal).len();
            prop_assert!(narrow <= broad);
        }

        #[test]
        fn results_are_sorted_newest_first(
            texts in prop::collection::vec("[ab #]{0,8}", 0..10),
            spec in any_spec(),
        ) {
            let mut fx = Fixture::new();
            let journal = fx.journal.clone();
            for text in &texts {
                fx.add(&journal, text, BlockStatus::Todo);
            }
            let results = fx.engine().evaluate(&fx.store, &spec, &journal);
            for pair in results.windows(2) {
                prop_assert!(pair[0].block.updated_at >= pair[1].block.updated_at);
            }
        }
    }
}
