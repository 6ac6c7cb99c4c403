//! First-run state

use indexmap::IndexMap;

use crate::environment::Environment;
use crate::model::{DocRef, Document};
use crate::query::ViewSpec;
use crate::snapshot::{Passthrough, Snapshot, UiState};

pub const WELCOME_TEXT: &str = "What should I do today? #work [[ProjectX]]";
pub const CYCLE_HINT_TEXT: &str = "Cycle TODO/DOING/DONE with the cycle shortcut.";
pub const DASHBOARD_TITLE: &str = "Dashboard";
pub const DASHBOARD_TEXT: &str = "[[Dashboard]] collects query blocks.";

/// Today's journal with a few starter blocks, a `Dashboard` page, no saved
/// views, and the ui on today's journal
pub fn default_snapshot(env: &Environment) -> Snapshot {
    let today = env.today();
    let journal = Document::new(
        today.clone(),
        env.now(),
        vec![
            env.new_block(WELCOME_TEXT),
            env.new_block(CYCLE_HINT_TEXT),
            env.new_block(ViewSpec::current_todos().to_query_block()),
        ],
    );
    let dashboard = Document::new(
        DASHBOARD_TITLE,
        env.now(),
        vec![
            env.new_block(DASHBOARD_TEXT),
            env.new_block("{{query status:DOING scope:all}}"),
        ],
    );

    let mut journals = IndexMap::new();
    journals.insert(today.clone(), journal);
    let mut pages = IndexMap::new();
    pages.insert(DASHBOARD_TITLE.to_string(), dashboard);

    Snapshot {
        ui: UiState::new(DocRef::journal(today)),
        journals,
        pages,
        views: Vec::new(),
        passthrough: Passthrough::default(),
    }
}
