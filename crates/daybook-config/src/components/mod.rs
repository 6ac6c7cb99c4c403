//! Configuration components for daybook
//!
//! One small, focused section per concern.

pub mod display;
pub mod logging;
pub mod parser;
pub mod storage;

pub use display::*;
pub use logging::*;
pub use parser::*;
pub use storage::*;
