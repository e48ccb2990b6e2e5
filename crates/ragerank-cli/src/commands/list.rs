//! The `ragerank list` command.

use anyhow::Result;
use comfy_table::Table;

use crate::session::{self, Paths};

pub fn execute(paths: &Paths, format: &str) -> Result<()> {
    let board = session::open(paths)?;
    let standings = board.standings();

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&standings)?);
        }
        _ => {
            if standings.is_empty() {
                println!("No teachers yet. Add one with `ragerank add`.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                "#", "", "Name", "Subject", "Color", "Score", "Saved", "Status", "Id",
            ]);
            for s in &standings {
                table.add_row(vec![
                    (s.rank + 1).to_string(),
                    s.medal.emoji().to_string(),
                    s.name.clone(),
                    s.subject.clone(),
                    s.color.to_string(),
                    s.pending_score.to_string(),
                    s.committed_score.to_string(),
                    if s.dirty { "unsaved" } else { "saved" }.to_string(),
                    session::short_id(s.id),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
