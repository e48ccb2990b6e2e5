//! ragerank-core — score state machine and ranking engine.
//!
//! Teachers carry a pending score the user adjusts freely and a committed
//! score that drives the dense ranking and the bounded history log. The
//! [`store::EntityStore`] ties the pieces to a persistence collaborator.

pub mod engine;
pub mod error;
pub mod model;
pub mod ranking;
pub mod store;
pub mod traits;

pub use engine::{Adjustment, CommitOutcome, EngineConfig, ScoreEngine, CONFETTI_THRESHOLD};
pub use error::{BoardError, BoardResult, Reported};
pub use model::{ColorTag, Collection, HistoryEntry, TeacherId, TeacherRecord, MAX_HISTORY};
pub use ranking::{display_order, medal_tier, rank, rank_of, standings, Medal, Standing};
pub use store::{EntityStore, StoreConfig, DEFAULT_STORAGE_KEY};
