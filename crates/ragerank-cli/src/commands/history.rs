//! The `ragerank history` command.

use anyhow::Result;
use comfy_table::Table;

use crate::session::{self, Paths};

pub fn execute(paths: &Paths, teacher: &str) -> Result<()> {
    let board = session::open(paths)?;
    let id = session::resolve(board.collection(), teacher)?;
    let record = board.get(id)?;

    println!(
        "{} ({}): {} saved snapshot(s)",
        record.name,
        record.subject,
        record.history.len()
    );

    let mut table = Table::new();
    table.set_header(vec!["When (UTC)", "Score"]);
    for entry in &record.history {
        table.add_row(vec![
            entry.timestamp.format("%d/%m/%Y %H:%M:%S").to_string(),
            entry.score.to_string(),
        ]);
    }
    println!("{table}");

    if record.is_dirty() {
        println!("Unsaved score: {}", record.pending_score);
    }
    Ok(())
}
