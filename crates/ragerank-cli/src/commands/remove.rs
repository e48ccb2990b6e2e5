//! The `ragerank remove` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::session::{self, Paths};

pub fn execute(paths: &Paths, teacher: &str, yes: bool) -> Result<()> {
    let mut board = session::open(paths)?;
    let id = session::resolve(board.collection(), teacher)?;
    let record = board.get(id)?;

    if !yes && !confirm(&format!("Remove {} ({})?", record.name, record.subject))? {
        println!("Cancelled.");
        return Ok(());
    }

    let (removed, warning) = board.remove(id).into_parts();
    session::warn(warning);
    if let Some(record) = removed {
        println!("Removed {} ({})", record.name, record.subject);
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
