//! # Daybook Configuration Library
//!
//! Layered configuration for daybook: built-in defaults, then a TOML file,
//! then environment variables, then command line overrides applied by the
//! caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daybook_config::ConfigLoader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load()?;
//!     println!("snapshot at {}", config.storage.snapshot_path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
mod config;
mod error;
mod loader;

pub use components::*;
pub use config::*;
pub use error::*;
pub use loader::*;
