//! The `ragerank add` command.

use anyhow::{anyhow, Result};

use ragerank_core::ColorTag;

use crate::session::{self, Paths};

pub fn execute(paths: &Paths, name: String, subject: String, color: &str) -> Result<()> {
    let color: ColorTag = color.parse().map_err(|e: String| anyhow!(e))?;
    if name.trim().is_empty() {
        anyhow::bail!("teacher name must not be empty");
    }

    let mut board = session::open(paths)?;
    let (record, warning) = board.add(name, subject, color).into_parts();
    session::warn(warning);

    println!(
        "Added {} ({}) [{}]",
        record.name,
        record.subject,
        session::short_id(record.id)
    );
    Ok(())
}
