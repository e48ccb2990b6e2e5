//! Score engine: pending-score adjustment and commit.
//!
//! Pending changes never touch history or ranking. `commit` is the only
//! path that moves a pending score into `committed_score` and the history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{HistoryEntry, TeacherRecord, MAX_HISTORY};
use crate::traits::{CelebrationHook, Clock};

/// Pending score at which the celebration hook fires.
pub const CONFETTI_THRESHOLD: u32 = 40;

/// Configuration for the score engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upward crossing of this value fires the celebration hook.
    pub celebration_threshold: u32,
    /// History cap; older snapshots are evicted first.
    pub max_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            celebration_threshold: CONFETTI_THRESHOLD,
            max_history: MAX_HISTORY,
        }
    }
}

/// What an `adjust_pending` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    pub previous: u32,
    pub current: u32,
    /// The celebration hook was invoked by this call.
    pub celebrated: bool,
}

/// What a `commit` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitOutcome {
    /// Pending already equalled committed; nothing changed.
    Unchanged,
    /// A new snapshot was appended.
    Committed {
        entry: HistoryEntry,
        /// Number of old snapshots dropped to respect the cap.
        evicted: usize,
    },
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed { .. })
    }
}

/// `true` iff `before` is below `threshold` and `after` is at or above it.
pub fn crosses_threshold(before: u32, after: u32, threshold: u32) -> bool {
    before < threshold && after >= threshold
}

/// Apply `delta` to `score`, clamping at zero and saturating at `u32::MAX`.
pub fn apply_delta(score: u32, delta: i64) -> u32 {
    let next = i64::from(score).saturating_add(delta);
    next.clamp(0, i64::from(u32::MAX)) as u32
}

/// Stateless score operations parameterized by [`EngineConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine {
    config: EngineConfig,
}

impl ScoreEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Move the pending score by `delta`, clamped at zero.
    ///
    /// Fires `hook` exactly once when the pending score goes from below the
    /// threshold to at or above it. Staying above or crossing downward never
    /// fires.
    pub fn adjust_pending(
        &self,
        record: &mut TeacherRecord,
        delta: i64,
        hook: &mut dyn CelebrationHook,
    ) -> Adjustment {
        let previous = record.pending_score;
        let current = apply_delta(previous, delta);
        record.pending_score = current;

        let celebrated = crosses_threshold(previous, current, self.config.celebration_threshold);
        if celebrated {
            tracing::debug!(teacher = %record.id, previous, current, "celebration threshold crossed");
            hook.celebrate();
        }

        Adjustment {
            previous,
            current,
            celebrated,
        }
    }

    /// Save the pending score into `committed_score` and append a snapshot.
    ///
    /// The snapshot timestamp is never earlier than the previous one, so a
    /// clock stepping backwards cannot break history ordering.
    pub fn commit(&self, record: &mut TeacherRecord, clock: &dyn Clock) -> CommitOutcome {
        if !record.is_dirty() {
            return CommitOutcome::Unchanged;
        }

        record.committed_score = record.pending_score;
        let timestamp = monotonic(clock.now(), record.last_snapshot().map(|e| e.timestamp));
        let entry = HistoryEntry {
            timestamp,
            score: record.committed_score,
        };
        record.history.push_back(entry);

        let mut evicted = 0;
        while record.history.len() > self.config.max_history.max(1) {
            record.history.pop_front();
            evicted += 1;
        }

        tracing::debug!(
            teacher = %record.id,
            score = record.committed_score,
            history_len = record.history.len(),
            evicted,
            "score committed"
        );

        CommitOutcome::Committed { entry, evicted }
    }
}

fn monotonic(now: DateTime<Utc>, last: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match last {
        Some(last) if last > now => last,
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorTag, TeacherId};
    use crate::traits::{ManualClock, NoopHook};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn record(seed: u32) -> TeacherRecord {
        TeacherRecord::seeded(
            TeacherId::nil(),
            "Mme Leroy",
            "Physique",
            ColorTag::Green,
            seed,
            start(),
        )
    }

    #[test]
    fn threshold_crossing_is_an_edge() {
        assert!(crosses_threshold(39, 40, 40));
        assert!(crosses_threshold(0, 100, 40));
        assert!(!crosses_threshold(40, 41, 40));
        assert!(!crosses_threshold(41, 39, 40));
        assert!(!crosses_threshold(10, 39, 40));
    }

    #[test]
    fn apply_delta_clamps_at_zero() {
        assert_eq!(apply_delta(3, -10), 0);
        assert_eq!(apply_delta(0, -1), 0);
        assert_eq!(apply_delta(5, 2), 7);
        assert_eq!(apply_delta(u32::MAX, 1), u32::MAX);
        assert_eq!(apply_delta(1, i64::MIN), 0);
    }

    #[test]
    fn pending_never_goes_negative() {
        let engine = ScoreEngine::default();
        let mut r = record(2);
        for _ in 0..10 {
            engine.adjust_pending(&mut r, -1, &mut NoopHook);
        }
        assert_eq!(r.pending_score, 0);
        assert_eq!(r.committed_score, 2);
    }

    #[test]
    fn crossing_from_39_fires_once() {
        let engine = ScoreEngine::default();
        let mut r = record(39);
        let mut fired = 0;
        let mut hook = || fired += 1;

        let adj = engine.adjust_pending(&mut r, 1, &mut hook);
        assert!(adj.celebrated);
        assert_eq!((adj.previous, adj.current), (39, 40));

        engine.adjust_pending(&mut r, 0, &mut hook);
        engine.adjust_pending(&mut r, 5, &mut hook);
        engine.adjust_pending(&mut r, -5, &mut hook);
        drop(hook);
        assert_eq!(fired, 1);
    }

    #[test]
    fn dropping_below_and_recrossing_fires_again() {
        let engine = ScoreEngine::default();
        let mut r = record(39);
        let mut fired = 0;
        let mut hook = || fired += 1;

        engine.adjust_pending(&mut r, 1, &mut hook);
        let down = engine.adjust_pending(&mut r, -1, &mut hook);
        assert!(!down.celebrated);
        engine.adjust_pending(&mut r, 1, &mut hook);
        drop(hook);
        assert_eq!(fired, 2);
    }

    #[test]
    fn starting_above_threshold_never_fires() {
        let engine = ScoreEngine::default();
        let mut r = record(42);
        let mut fired = 0;
        let mut hook = || fired += 1;
        engine.adjust_pending(&mut r, 1, &mut hook);
        engine.adjust_pending(&mut r, 10, &mut hook);
        drop(hook);
        assert_eq!(fired, 0);
    }

    #[test]
    fn adjust_leaves_committed_state_alone() {
        let engine = ScoreEngine::default();
        let mut r = record(5);
        engine.adjust_pending(&mut r, 3, &mut NoopHook);
        assert_eq!(r.pending_score, 8);
        assert_eq!(r.committed_score, 5);
        assert_eq!(r.history.len(), 1);
        assert!(r.is_dirty());
    }

    #[test]
    fn commit_appends_snapshot() {
        let engine = ScoreEngine::default();
        let clock = ManualClock::new(start());
        let mut r = record(0);
        engine.adjust_pending(&mut r, 7, &mut NoopHook);
        clock.advance(Duration::minutes(1));

        let outcome = engine.commit(&mut r, &clock);
        assert!(outcome.is_committed());
        assert_eq!(r.committed_score, 7);
        assert_eq!(r.history.len(), 2);
        assert_eq!(r.history[1].score, 7);
        assert_eq!(r.history[1].timestamp, start() + Duration::minutes(1));
        assert!(!r.is_dirty());
    }

    #[test]
    fn commit_twice_is_idempotent() {
        let engine = ScoreEngine::default();
        let clock = ManualClock::new(start());
        let mut r = record(0);
        engine.adjust_pending(&mut r, 4, &mut NoopHook);

        assert!(engine.commit(&mut r, &clock).is_committed());
        let before = r.clone();
        assert_eq!(engine.commit(&mut r, &clock), CommitOutcome::Unchanged);
        assert_eq!(r, before);
    }

    #[test]
    fn history_is_capped_fifo() {
        let engine = ScoreEngine::default();
        let clock = ManualClock::new(start());
        let mut r = record(0);

        for i in 1..=51u32 {
            clock.advance(Duration::seconds(1));
            engine.adjust_pending(&mut r, 1, &mut NoopHook);
            engine.commit(&mut r, &clock);
            assert_eq!(r.pending_score, i);
        }

        assert_eq!(r.history.len(), MAX_HISTORY);
        // Seed (0) and the first two commits (1, 2) were evicted.
        assert_eq!(r.history.front().unwrap().score, 2);
        assert_eq!(r.history.back().unwrap().score, 51);
        let scores: Vec<u32> = r.history.iter().map(|e| e.score).collect();
        assert_eq!(scores, (2..=51).collect::<Vec<_>>());
    }

    #[test]
    fn commit_reports_evictions() {
        let engine = ScoreEngine::new(EngineConfig {
            celebration_threshold: CONFETTI_THRESHOLD,
            max_history: 2,
        });
        let clock = ManualClock::new(start());
        let mut r = record(0);
        engine.adjust_pending(&mut r, 1, &mut NoopHook);
        assert_eq!(
            engine.commit(&mut r, &clock),
            CommitOutcome::Committed {
                entry: HistoryEntry {
                    timestamp: start(),
                    score: 1
                },
                evicted: 0
            }
        );
        engine.adjust_pending(&mut r, 1, &mut NoopHook);
        match engine.commit(&mut r, &clock) {
            CommitOutcome::Committed { evicted, .. } => assert_eq!(evicted, 1),
            CommitOutcome::Unchanged => panic!("expected a commit"),
        }
    }

    #[test]
    fn backwards_clock_keeps_history_ordered() {
        let engine = ScoreEngine::default();
        let clock = ManualClock::new(start());
        let mut r = record(0);
        clock.set(start() - Duration::hours(3));
        engine.adjust_pending(&mut r, 1, &mut NoopHook);
        engine.commit(&mut r, &clock);
        assert_eq!(r.history[1].timestamp, start());
    }

    #[test]
    fn custom_threshold() {
        let engine = ScoreEngine::new(EngineConfig {
            celebration_threshold: 10,
            max_history: MAX_HISTORY,
        });
        let mut r = record(9);
        let mut fired = false;
        engine.adjust_pending(&mut r, 1, &mut || fired = true);
        assert!(fired);
    }
}
