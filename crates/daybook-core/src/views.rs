//! Saved views: named, persisted view specs

use serde::{Deserialize, Serialize};

use crate::model::timestamp::{self, Timestamp};
use crate::query::ViewSpec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedView {
    pub id: String,
    pub name: String,
    pub query: ViewSpec,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

impl SavedView {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        query: ViewSpec,
        now: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            query,
            created_at: now,
        }
    }
}
