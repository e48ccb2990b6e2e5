//! JSON leaderboard export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ragerank_core::model::{Collection, HistoryEntry, TeacherId};
use ragerank_core::ranking::{standings, Standing};

/// Snapshot of the board as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardExport {
    pub generated_at: DateTime<Utc>,
    /// Rows in display order.
    pub standings: Vec<Standing>,
    pub histories: Vec<TeacherHistory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherHistory {
    pub id: TeacherId,
    pub entries: Vec<HistoryEntry>,
}

impl LeaderboardExport {
    pub fn from_collection(collection: &Collection, generated_at: DateTime<Utc>) -> Self {
        let standings = standings(collection);
        let histories = standings
            .iter()
            .filter_map(|s| collection.get(s.id).ok())
            .map(|r| TeacherHistory {
                id: r.id,
                entries: r.history.iter().copied().collect(),
            })
            .collect();
        Self {
            generated_at,
            standings,
            histories,
        }
    }

    /// Save the export as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize export")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write export to {}", path.display()))?;
        Ok(())
    }

    /// Load an export from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read export from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse export JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ragerank_core::model::{ColorTag, TeacherRecord};
    use ragerank_core::ranking::Medal;
    use uuid::Uuid;

    fn make_collection() -> Collection {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        Collection::from_records(
            [(1, 10), (2, 30), (3, 30)]
                .into_iter()
                .map(|(n, score)| {
                    TeacherRecord::seeded(
                        TeacherId::new(Uuid::from_u128(n)),
                        format!("T{n}"),
                        "SES",
                        ColorTag::Green,
                        score,
                        at,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn export_carries_standings_and_histories() {
        let now = Utc.timestamp_opt(1_700_000_500, 0).unwrap();
        let export = LeaderboardExport::from_collection(&make_collection(), now);
        assert_eq!(export.standings.len(), 3);
        assert_eq!(export.histories.len(), 3);
        assert_eq!(export.standings[0].medal, Medal::Gold);
        assert_eq!(export.standings[1].medal, Medal::Gold);
        assert_eq!(export.standings[2].medal, Medal::Silver);
        for (row, history) in export.standings.iter().zip(&export.histories) {
            assert_eq!(row.id, history.id);
        }
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        let now = Utc.timestamp_opt(1_700_000_500, 0).unwrap();
        let export = LeaderboardExport::from_collection(&make_collection(), now);

        export.save_json(&path).unwrap();
        let loaded = LeaderboardExport::load_json(&path).unwrap();
        assert_eq!(loaded, export);
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "nope").unwrap();
        assert!(LeaderboardExport::load_json(&path).is_err());
    }
}
