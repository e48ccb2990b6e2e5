//! Core data model types for ragerank.
//!
//! A [`TeacherRecord`] carries two scores: the pending one the user is
//! adjusting and the committed one that ranking and history are based on.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BoardError, BoardResult};

/// Maximum number of history snapshots kept per teacher.
pub const MAX_HISTORY: usize = 50;

/// Opaque, stable teacher identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherId(Uuid);

impl TeacherId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeacherId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(TeacherId)
            .map_err(|e| format!("invalid teacher id '{s}': {e}"))
    }
}

/// Display theme of a teacher card. Has no effect on ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Red,
    Blue,
    Green,
    Purple,
    Orange,
    Yellow,
}

impl ColorTag {
    pub const ALL: [ColorTag; 6] = [
        ColorTag::Red,
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Purple,
        ColorTag::Orange,
        ColorTag::Yellow,
    ];

    /// CSS hex value used by the renderers.
    pub fn hex(&self) -> &'static str {
        match self {
            ColorTag::Red => "#f87171",
            ColorTag::Blue => "#60a5fa",
            ColorTag::Green => "#4ade80",
            ColorTag::Purple => "#c084fc",
            ColorTag::Orange => "#fb923c",
            ColorTag::Yellow => "#fbbf24",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTag::Red => write!(f, "red"),
            ColorTag::Blue => write!(f, "blue"),
            ColorTag::Green => write!(f, "green"),
            ColorTag::Purple => write!(f, "purple"),
            ColorTag::Orange => write!(f, "orange"),
            ColorTag::Yellow => write!(f, "yellow"),
        }
    }
}

impl FromStr for ColorTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(ColorTag::Red),
            "blue" => Ok(ColorTag::Blue),
            "green" => Ok(ColorTag::Green),
            "purple" => Ok(ColorTag::Purple),
            "orange" => Ok(ColorTag::Orange),
            "yellow" => Ok(ColorTag::Yellow),
            other => Err(format!("unknown color: {other}")),
        }
    }
}

/// One committed-score snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub score: u32,
}

/// A tracked teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRecord {
    pub id: TeacherId,
    pub name: String,
    pub subject: String,
    pub color: ColorTag,
    /// Score being adjusted, not yet reflected in history.
    pub pending_score: u32,
    /// Last saved score. Ranking is computed from this value.
    pub committed_score: u32,
    /// Committed-score timeline, oldest first.
    pub history: VecDeque<HistoryEntry>,
}

impl TeacherRecord {
    /// Create a record whose pending and committed scores both equal `seed`,
    /// with a single history entry at `created_at`.
    pub fn seeded(
        id: TeacherId,
        name: impl Into<String>,
        subject: impl Into<String>,
        color: ColorTag,
        seed: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut history = VecDeque::with_capacity(1);
        history.push_back(HistoryEntry {
            timestamp: created_at,
            score: seed,
        });
        Self {
            id,
            name: name.into(),
            subject: subject.into(),
            color,
            pending_score: seed,
            committed_score: seed,
            history,
        }
    }

    /// `true` when the pending score differs from the committed one.
    pub fn is_dirty(&self) -> bool {
        self.pending_score != self.committed_score
    }

    pub fn last_snapshot(&self) -> Option<&HistoryEntry> {
        self.history.back()
    }
}

/// The set of tracked teachers.
///
/// Order inside the collection carries no meaning; display order is derived
/// by [`crate::ranking::display_order`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<TeacherRecord>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TeacherRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeacherRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[TeacherRecord] {
        &self.records
    }

    pub fn contains(&self, id: TeacherId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn get(&self, id: TeacherId) -> BoardResult<&TeacherRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(BoardError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: TeacherId) -> BoardResult<&mut TeacherRecord> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(BoardError::NotFound(id))
    }

    pub fn push(&mut self, record: TeacherRecord) {
        self.records.push(record);
    }

    /// Remove the record with `id`. Returns `None` if absent.
    pub fn remove(&mut self, id: TeacherId) -> Option<TeacherRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Structural validation for collections read back from storage.
    ///
    /// History length is not checked here; see [`Collection::trim_histories`].
    pub fn validate(&self) -> BoardResult<()> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !seen.insert(record.id) {
                return Err(BoardError::MalformedPersistedState(format!(
                    "duplicate teacher id {}",
                    record.id
                )));
            }
            if record.history.is_empty() {
                return Err(BoardError::MalformedPersistedState(format!(
                    "teacher {} has an empty history",
                    record.id
                )));
            }
            let ordered = record
                .history
                .iter()
                .zip(record.history.iter().skip(1))
                .all(|(a, b)| a.timestamp <= b.timestamp);
            if !ordered {
                return Err(BoardError::MalformedPersistedState(format!(
                    "teacher {} history is not in chronological order",
                    record.id
                )));
            }
        }
        Ok(())
    }

    /// Drop the oldest snapshots of every history longer than `max_history`.
    /// Returns how many entries were dropped in total.
    pub fn trim_histories(&mut self, max_history: usize) -> usize {
        let cap = max_history.max(1);
        let mut dropped = 0;
        for record in &mut self.records {
            while record.history.len() > cap {
                record.history.pop_front();
                dropped += 1;
            }
        }
        dropped
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a TeacherRecord;
    type IntoIter = std::slice::Iter<'a, TeacherRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
