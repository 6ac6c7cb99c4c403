//! Data model: blocks, documents and workflow status

mod block;
mod document;
mod status;
pub mod timestamp;

pub use block::Block;
pub use document::{DocRef, Document, DocumentKind};
pub use status::BlockStatus;
pub use timestamp::Timestamp;
