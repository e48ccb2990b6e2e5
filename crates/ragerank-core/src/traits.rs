//! Collaborator traits the core depends on.
//!
//! Persistence backends live in `ragerank-storage`; renderers and the
//! celebration sink live in `ragerank-report` and `ragerank-cli`.

use std::cell::Cell;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::BoardResult;
use crate::model::TeacherId;

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Whole-collection blob storage keyed by a fixed storage identifier.
///
/// Writes overwrite the previous blob entirely. Implementations report
/// failures as `BoardError::PersistenceUnavailable`.
pub trait Persistence {
    /// Read the blob stored under `key`, or `None` if nothing was saved yet.
    fn read_all(&self, key: &str) -> BoardResult<Option<String>>;

    /// Replace the blob stored under `key`.
    fn write_all(&mut self, key: &str, blob: &str) -> BoardResult<()>;
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn read_all(&self, key: &str) -> BoardResult<Option<String>> {
        (**self).read_all(key)
    }

    fn write_all(&mut self, key: &str, blob: &str) -> BoardResult<()> {
        (**self).write_all(key, blob)
    }
}

// ---------------------------------------------------------------------------
// Celebration hook
// ---------------------------------------------------------------------------

/// Fire-and-forget sink invoked when a pending score crosses the
/// celebration threshold upward.
pub trait CelebrationHook {
    fn celebrate(&mut self);
}

impl<F: FnMut()> CelebrationHook for F {
    fn celebrate(&mut self) {
        self()
    }
}

/// Hook that ignores every trigger.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl CelebrationHook for NoopHook {
    fn celebrate(&mut self) {}
}

// ---------------------------------------------------------------------------
// Identifier generation
// ---------------------------------------------------------------------------

/// Supplies a fresh, never-reused id on every call.
pub trait IdGenerator {
    fn next_id(&mut self) -> TeacherId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> TeacherId {
        TeacherId::new(Uuid::new_v4())
    }
}

/// Deterministic ids `1, 2, 3, ...` encoded as UUIDs. Useful in tests.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u128) -> Self {
        Self { next: first }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TeacherId {
        let id = TeacherId::new(Uuid::from_u128(self.next));
        self.next += 1;
        id
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of history timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
