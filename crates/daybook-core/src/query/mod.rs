//! Query/View Engine
//!
//! - [`ViewSpec`]: normalized filter predicate (status, tag, substring, scope)
//! - [`query_blocks`]: the `{{query ...}}` text form embedded in blocks
//! - [`QueryEngine`]: evaluation, backlinks and the tag panel

mod engine;
pub mod query_blocks;
mod spec;

pub use engine::{QueryEngine, TagCount};
pub use query_blocks::{is_query_block, parse_query_block};
pub use spec::{Scope, StatusFilter, ViewSpec};
