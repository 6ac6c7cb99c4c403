//! Display component configuration
//!
//! The query engine always returns full result sets; these are the bounded
//! prefixes front-ends take for each panel.

use serde::{Deserialize, Serialize};

/// Result limits and snippet width
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows shown under an inline query block
    pub query_limit: usize,
    /// Rows shown per saved view
    pub view_limit: usize,
    /// Rows shown in the backlinks panel
    pub backlink_limit: usize,
    /// Tags shown in the tag cloud and per-tag listing
    pub tag_limit: usize,
    /// Characters kept when shortening block text
    pub snippet_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            query_limit: 10,
            view_limit: 5,
            backlink_limit: 30,
            tag_limit: 30,
            snippet_width: 120,
        }
    }
}
