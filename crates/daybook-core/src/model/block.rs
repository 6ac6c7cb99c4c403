use serde::{Deserialize, Serialize};

use super::status::BlockStatus;
use super::timestamp::{self, Timestamp};

/// A single status-bearing unit of text owned by one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Unique across the whole corpus, never reused
    pub id: String,
    pub text: String,
    pub status: BlockStatus,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

impl Block {
    /// Create a TODO block stamped at `now`
    pub fn new(id: impl Into<String>, text: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            status: BlockStatus::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the text; always bumps `updated_at`
    pub fn set_text(&mut self, text: impl Into<String>, now: Timestamp) {
        self.text = text.into();
        self.updated_at = now;
    }

    /// Advance the status one step in the cycle and return it
    pub fn cycle_status(&mut self, now: Timestamp) -> BlockStatus {
        self.status = self.status.cycle();
        self.updated_at = now;
        self.status
    }
}
