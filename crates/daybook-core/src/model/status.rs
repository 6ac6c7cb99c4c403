//! Block workflow status
//!
//! Three states in a fixed cycle: TODO → DOING → DONE → TODO. There is no
//! terminal state and no other transition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl BlockStatus {
    /// All statuses in cycle order
    pub const ALL: [BlockStatus; 3] = [BlockStatus::Todo, BlockStatus::Doing, BlockStatus::Done];

    /// The next status in the cycle
    pub fn cycle(self) -> Self {
        match self {
            BlockStatus::Todo => BlockStatus::Doing,
            BlockStatus::Doing => BlockStatus::Done,
            BlockStatus::Done => BlockStatus::Todo,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockStatus::Todo => "TODO",
            BlockStatus::Doing => "DOING",
            BlockStatus::Done => "DONE",
        }
    }

    /// Parse a status token, ignoring ASCII case
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown status '{}'", s))
    }
}
