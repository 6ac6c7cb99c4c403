//! Deterministic collaborators for tests
//!
//! [`ManualClock`] advances by a fixed step on every reading so successive
//! mutations get strictly increasing timestamps; [`SequentialIds`] yields
//! `block-1`, `block-2`, ...

use chrono::{Duration, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::environment::{Clock, Environment, IdGenerator};
use crate::model::{timestamp, Timestamp};

/// Clock under test control
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
    step: Duration,
    today: Mutex<Option<String>>,
}

impl ManualClock {
    /// Clock fixed at `start` that never advances by itself
    pub fn fixed(start: Timestamp) -> Self {
        Self::ticking(start, Duration::zero())
    }

    /// Clock that returns `start`, then advances `step` after every reading
    pub fn ticking(start: Timestamp, step: Duration) -> Self {
        Self {
            now: Mutex::new(start),
            step,
            today: Mutex::new(None),
        }
    }

    /// Ticking clock starting at 2024-01-01 09:00:00Z with 1 ms steps
    pub fn new_year() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .unwrap_or_default();
        Self::ticking(start, Duration::milliseconds(1))
    }

    /// Fixed clock at an RFC 3339 instant
    pub fn at(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self::fixed(timestamp::parse(rfc3339)?))
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    pub fn set(&self, to: Timestamp) {
        *self.now.lock() = to;
    }

    /// Pin `today()` independently of the current instant
    pub fn set_today(&self, date: impl Into<String>) {
        *self.today.lock() = Some(date.into());
    }

    /// Current instant without advancing
    pub fn peek(&self) -> Timestamp {
        *self.now.lock()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let mut now = self.now.lock();
        let reading = *now;
        *now += self.step;
        reading
    }

    fn today(&self) -> String {
        if let Some(date) = self.today.lock().clone() {
            return date;
        }
        self.peek().format("%Y-%m-%d").to_string()
    }
}

/// Ids `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("block")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

/// Environment backed by a shared [`ManualClock`] and [`SequentialIds`]
pub fn test_environment(clock: ManualClock) -> (Arc<ManualClock>, Environment) {
    let clock = Arc::new(clock);
    let env = Environment::new(clock.clone(), Arc::new(SequentialIds::default()));
    (clock, env)
}
