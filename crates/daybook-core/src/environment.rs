//! Collaborators the core consumes from its host: a clock and an id source
//!
//! Both are injected through [`Environment`] so tests can pin time and ids.

use chrono::{Local, SubsecRound, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::model::{Block, Timestamp};

/// Source of the current time and today's date
///
/// Timestamps are expected at millisecond precision so that snapshots
/// round-trip exactly.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Today's date as `YYYY-MM-DD`
    fn today(&self) -> String;
}

/// Collision-free opaque id source
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Wall clock; `today` uses the local calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().trunc_subsecs(3)
    }

    fn today(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Clock and id generator handed to every creating or mutating operation
#[derive(Clone)]
pub struct Environment {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Environment {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock with UUID ids
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn today(&self) -> String {
        self.clock.today()
    }

    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    /// A fresh TODO block with a new id, stamped now
    pub fn new_block(&self, text: impl Into<String>) -> Block {
        Block::new(self.next_id(), text, self.now())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}
