//! Daybook core
//!
//! Journals and pages holding ordered blocks, plus the engine that keeps
//! them cross-referenced:
//!
//! - [`store::DocumentStore`] owns every document
//! - [`materializer::Materializer`] creates pages implied by `[[links]]`
//! - [`corpus`] flattens blocks with their owning document
//! - [`query::QueryEngine`] filters the corpus and computes backlinks
//! - [`workspace::Workspace`] sequences mutate → materialize → persist
//!
//! Everything is synchronous and single-threaded. The store is an explicit
//! value handed to each operation; the clock, id generator and snapshot
//! backend are injected.

pub mod annotations;
pub mod corpus;
pub mod defaults;
pub mod environment;
pub mod error;
pub mod materializer;
pub mod model;
pub mod query;
pub mod snapshot;
pub mod store;
pub mod test_support;
pub mod text;
pub mod views;
pub mod workspace;

pub use annotations::{parser_from_config, AnnotationParser, Annotations};
pub use corpus::CorpusEntry;
pub use environment::{Clock, Environment, IdGenerator, SystemClock, UuidGenerator};
pub use error::{CoreError, CoreResult};
pub use materializer::Materializer;
pub use model::{Block, BlockStatus, DocRef, Document, DocumentKind, Timestamp};
pub use query::{QueryEngine, Scope, StatusFilter, TagCount, ViewSpec};
pub use snapshot::{
    JsonFileStore, MemoryStore, PanelTab, Passthrough, Snapshot, SnapshotStore, UiState, ViewsKey,
};
pub use store::DocumentStore;
pub use views::SavedView;
pub use workspace::Workspace;
