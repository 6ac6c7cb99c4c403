//! Storage component configuration
//!
//! Where the snapshot blob lives.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage component configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON snapshot file
    pub snapshot_path: PathBuf,
}

impl StorageConfig {
    /// Platform default snapshot location, falling back to the working directory
    pub fn default_snapshot_path() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join("daybook").join("snapshot.json"))
            .unwrap_or_else(|| PathBuf::from("./daybook-snapshot.json"))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: Self::default_snapshot_path(),
        }
    }
}
