//! Dense ranking over committed scores.
//!
//! Rank is the position of a record's committed score among the distinct
//! committed scores of the collection, highest first. Tied scores share a
//! rank and the next distinct score is exactly one further down. Display
//! order is a separate concern and its tie-break is not part of the contract.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};

use serde::{Deserialize, Serialize};

use crate::error::BoardResult;
use crate::model::{ColorTag, Collection, TeacherId, TeacherRecord};

/// Podium tier derived from a dense rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
    None,
}

impl Medal {
    pub fn emoji(&self) -> &'static str {
        match self {
            Medal::Gold => "🥇",
            Medal::Silver => "🥈",
            Medal::Bronze => "🥉",
            Medal::None => "",
        }
    }

    pub fn is_podium(&self) -> bool {
        !matches!(self, Medal::None)
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Medal::Gold => write!(f, "gold"),
            Medal::Silver => write!(f, "silver"),
            Medal::Bronze => write!(f, "bronze"),
            Medal::None => write!(f, "none"),
        }
    }
}

/// Map a dense rank to its medal.
pub fn medal_tier(rank: usize) -> Medal {
    match rank {
        0 => Medal::Gold,
        1 => Medal::Silver,
        2 => Medal::Bronze,
        _ => Medal::None,
    }
}

/// Dense, 0-based rank of `record` by committed score, descending.
///
/// Computed as the number of distinct committed scores in `collection`
/// strictly greater than the record's own.
pub fn rank(record: &TeacherRecord, collection: &Collection) -> usize {
    distinct_scores(collection)
        .range((Excluded(record.committed_score), Unbounded))
        .count()
}

/// Dense rank of the record with `id`.
pub fn rank_of(id: TeacherId, collection: &Collection) -> BoardResult<usize> {
    let record = collection.get(id)?;
    Ok(rank(record, collection))
}

fn distinct_scores(collection: &Collection) -> BTreeSet<u32> {
    collection.iter().map(|r| r.committed_score).collect()
}

/// Records sorted by committed score, highest first.
///
/// Ties keep collection order, which is not part of the ranking contract.
pub fn display_order(collection: &Collection) -> Vec<&TeacherRecord> {
    let mut ordered: Vec<&TeacherRecord> = collection.iter().collect();
    ordered.sort_by(|a, b| b.committed_score.cmp(&a.committed_score));
    ordered
}

/// One row of the leaderboard as consumed by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: TeacherId,
    pub name: String,
    pub subject: String,
    pub color: ColorTag,
    pub rank: usize,
    pub medal: Medal,
    pub pending_score: u32,
    pub committed_score: u32,
    /// Unsaved changes are present.
    pub dirty: bool,
    pub history_len: usize,
}

/// Leaderboard rows in display order.
pub fn standings(collection: &Collection) -> Vec<Standing> {
    let scores = distinct_scores(collection);
    // Distinct scores descending; index = dense rank.
    let descending: Vec<u32> = scores.iter().rev().copied().collect();

    display_order(collection)
        .into_iter()
        .map(|record| {
            let rank = descending
                .iter()
                .position(|&s| s == record.committed_score)
                .unwrap_or(descending.len());
            Standing {
                id: record.id,
                name: record.name.clone(),
                subject: record.subject.clone(),
                color: record.color,
                rank,
                medal: medal_tier(rank),
                pending_score: record.pending_score,
                committed_score: record.committed_score,
                dirty: record.is_dirty(),
                history_len: record.history.len(),
            }
        })
        .collect()
}
