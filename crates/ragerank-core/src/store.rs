//! Entity store: owns the collection and keeps it in sync with persistence.
//!
//! Persistence failures never fail a mutation. The change is applied in
//! memory and the failure comes back as the warning of a [`Reported`].

use serde::{Deserialize, Serialize};

use crate::engine::{Adjustment, CommitOutcome, EngineConfig, ScoreEngine};
use crate::error::{BoardError, BoardResult, Reported};
use crate::model::{ColorTag, Collection, TeacherId, TeacherRecord};
use crate::ranking::{self, Standing};
use crate::traits::{
    CelebrationHook, Clock, IdGenerator, NoopHook, Persistence, SystemClock, UuidGenerator,
};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "teacher_rage_rank_data";

/// Suffix of the key a malformed blob is copied to before it is replaced.
pub const MALFORMED_BACKUP_SUFFIX: &str = ".malformed";

/// Record installed on first run so the board is never empty.
pub const BOOTSTRAP_NAME: &str = "M. Dupont";
pub const BOOTSTRAP_SUBJECT: &str = "Mathématiques";
pub const BOOTSTRAP_COLOR: ColorTag = ColorTag::Red;
pub const BOOTSTRAP_SCORE: u32 = 42;

/// Configuration for the entity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key under which the whole collection is persisted.
    pub storage_key: String,
    /// Persist after pending-only changes, not just after commits.
    pub persist_pending: bool,
    pub engine: EngineConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persist_pending: true,
            engine: EngineConfig::default(),
        }
    }
}

/// In-memory teacher collection backed by a [`Persistence`] collaborator.
pub struct EntityStore<P: Persistence> {
    persistence: P,
    config: StoreConfig,
    engine: ScoreEngine,
    collection: Collection,
    hook: Box<dyn CelebrationHook>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    /// Set when saved state exists but could not be read back. Saves are
    /// refused until a later load succeeds.
    degraded: Option<String>,
}

impl<P: Persistence> EntityStore<P> {
    /// Create an empty store. Call [`EntityStore::load`] to read saved state.
    pub fn new(persistence: P, config: StoreConfig) -> Self {
        let engine = ScoreEngine::new(config.engine);
        Self {
            persistence,
            config,
            engine,
            collection: Collection::new(),
            hook: Box::new(NoopHook),
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
            degraded: None,
        }
    }

    /// Create a store and immediately load it.
    pub fn open(persistence: P, config: StoreConfig) -> Reported<Self> {
        let mut store = Self::new(persistence, config);
        let warning = store.load().warning;
        Reported::with_warning(store, warning)
    }

    pub fn with_hook(mut self, hook: impl CelebrationHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    pub fn get(&self, id: TeacherId) -> BoardResult<&TeacherRecord> {
        self.collection.get(id)
    }

    /// Leaderboard rows in display order.
    pub fn standings(&self) -> Vec<Standing> {
        ranking::standings(&self.collection)
    }

    /// Reload the collection from persistence.
    ///
    /// Falls back to the bootstrap collection when nothing was saved yet,
    /// when the store cannot be read, or when the saved blob is malformed.
    /// The last two cases are returned as a warning. Histories longer than
    /// the configured cap lose their oldest snapshots.
    ///
    /// Saved state is never destroyed here. A malformed blob is copied to
    /// `<key>.malformed` before the bootstrap replaces it. An unreadable
    /// store puts the board in degraded mode, where every save is refused
    /// until a load succeeds.
    pub fn load(&mut self) -> Reported<&Collection> {
        let key = self.config.storage_key.clone();
        self.degraded = None;
        let warning = match self.persistence.read_all(&key) {
            Ok(Some(blob)) => match self.decode(&blob) {
                Ok(mut collection) => {
                    let dropped = collection.trim_histories(self.config.engine.max_history);
                    if dropped > 0 {
                        tracing::info!(key = %key, dropped, "trimmed histories to the cap");
                    }
                    tracing::info!(key = %key, teachers = collection.len(), "loaded collection");
                    self.collection = collection;
                    return Reported::ok(&self.collection);
                }
                Err(e) => {
                    tracing::warn!(key = %key, "discarding persisted state: {e}");
                    let backup = format!("{key}{MALFORMED_BACKUP_SUFFIX}");
                    if let Err(backup_err) = self.persistence.write_all(&backup, &blob) {
                        tracing::warn!(key = %backup, "could not back up malformed state: {backup_err}");
                        self.degraded =
                            Some(format!("malformed state under '{key}' was not backed up"));
                    }
                    Some(e)
                }
            },
            Ok(None) => {
                tracing::info!(key = %key, "no saved state, installing bootstrap teacher");
                None
            }
            Err(e) => {
                tracing::warn!(key = %key, "could not read saved state: {e}");
                self.degraded = Some(format!("saved state under '{key}' could not be read"));
                Some(e)
            }
        };

        self.collection = self.bootstrap_collection();
        let save_warning = match &self.degraded {
            Some(_) => None,
            None => self.save().err(),
        };
        Reported::with_warning(&self.collection, warning.or(save_warning))
    }

    /// Whether saves are currently refused because saved state could not be read.
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    /// Write the whole collection to persistence.
    pub fn save(&mut self) -> BoardResult<()> {
        if let Some(reason) = &self.degraded {
            return Err(BoardError::PersistenceUnavailable(format!(
                "{reason}, refusing to overwrite it"
            )));
        }
        let blob = serde_json::to_string(&self.collection)
            .map_err(|e| BoardError::PersistenceUnavailable(format!("serialize: {e}")))?;
        self.persistence
            .write_all(&self.config.storage_key, &blob)
            .inspect_err(|e| tracing::warn!("save failed, keeping changes in memory: {e}"))
    }

    /// Create a zero-score teacher and persist.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        subject: impl Into<String>,
        color: ColorTag,
    ) -> Reported<TeacherRecord> {
        let record = TeacherRecord::seeded(
            self.ids.next_id(),
            name,
            subject,
            color,
            0,
            self.clock.now(),
        );
        tracing::debug!(teacher = %record.id, name = %record.name, "teacher added");
        self.collection.push(record.clone());
        let warning = self.save().err();
        Reported::with_warning(record, warning)
    }

    /// Delete the teacher with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: TeacherId) -> Reported<Option<TeacherRecord>> {
        match self.collection.remove(id) {
            Some(record) => {
                tracing::debug!(teacher = %id, "teacher removed");
                let warning = self.save().err();
                Reported::with_warning(Some(record), warning)
            }
            None => Reported::ok(None),
        }
    }

    /// Move the pending score of `id` by `delta`.
    pub fn adjust_pending(&mut self, id: TeacherId, delta: i64) -> BoardResult<Reported<Adjustment>> {
        let record = self.collection.get_mut(id)?;
        let adjustment = self.engine.adjust_pending(record, delta, self.hook.as_mut());
        let warning = if self.config.persist_pending && adjustment.previous != adjustment.current {
            self.save().err()
        } else {
            None
        };
        Ok(Reported::with_warning(adjustment, warning))
    }

    /// Commit the pending score of `id`.
    pub fn commit(&mut self, id: TeacherId) -> BoardResult<Reported<CommitOutcome>> {
        let record = self.collection.get_mut(id)?;
        let outcome = self.engine.commit(record, self.clock.as_ref());
        let warning = if outcome.is_committed() {
            self.save().err()
        } else {
            None
        };
        Ok(Reported::with_warning(outcome, warning))
    }

    fn decode(&self, blob: &str) -> BoardResult<Collection> {
        let collection: Collection = serde_json::from_str(blob)
            .map_err(|e| BoardError::MalformedPersistedState(e.to_string()))?;
        collection.validate()?;
        Ok(collection)
    }

    fn bootstrap_collection(&mut self) -> Collection {
        Collection::from_records(vec![TeacherRecord::seeded(
            self.ids.next_id(),
            BOOTSTRAP_NAME,
            BOOTSTRAP_SUBJECT,
            BOOTSTRAP_COLOR,
            BOOTSTRAP_SCORE,
            self.clock.now(),
        )])
    }
}
