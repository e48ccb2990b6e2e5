//! The `ragerank bump` command.

use anyhow::Result;

use crate::session::{self, Paths};

pub fn execute(paths: &Paths, teacher: &str, delta: i64) -> Result<()> {
    let mut board = session::open(paths)?;
    let id = session::resolve(board.collection(), teacher)?;

    let (adjustment, warning) = board.adjust_pending(id, delta)?.into_parts();
    session::warn(warning);

    let record = board.get(id)?;
    println!(
        "{}: {} -> {}",
        record.name, adjustment.previous, adjustment.current
    );
    if record.is_dirty() {
        println!(
            "Unsaved. Run `ragerank save` to rank it (saved score: {}).",
            record.committed_score
        );
    }
    Ok(())
}
