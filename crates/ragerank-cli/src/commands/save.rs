//! The `ragerank save` command.

use anyhow::Result;

use ragerank_core::CommitOutcome;

use crate::session::{self, Paths};

pub fn execute(paths: &Paths, teacher: &str) -> Result<()> {
    let mut board = session::open(paths)?;
    let id = session::resolve(board.collection(), teacher)?;

    let (outcome, warning) = board.commit(id)?.into_parts();
    session::warn(warning);

    let name = &board.get(id)?.name;
    match outcome {
        CommitOutcome::Committed { entry, evicted } => {
            println!("Saved {name} at {}", entry.score);
            if evicted > 0 {
                println!("Dropped {evicted} old history snapshot(s).");
            }
        }
        CommitOutcome::Unchanged => println!("{name}: nothing to save"),
    }
    Ok(())
}
