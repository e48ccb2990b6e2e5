//! The `ragerank export` command.

use std::path::PathBuf;

use anyhow::Result;

use ragerank_report::{write_html_report, LeaderboardExport};

use crate::session::{self, Paths};

pub fn execute(paths: &Paths, output: PathBuf, format: &str) -> Result<()> {
    let board = session::open(paths)?;

    match format {
        "html" => write_html_report(board.collection(), &output)?,
        "json" => {
            LeaderboardExport::from_collection(board.collection(), chrono::Utc::now())
                .save_json(&output)?
        }
        other => anyhow::bail!("unknown export format: {other} (expected html or json)"),
    }

    println!("Wrote {}", output.display());
    Ok(())
}
