//! The `ragerank init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("ragerank.toml").exists() {
        println!("ragerank.toml already exists, skipping.");
    } else {
        std::fs::write("ragerank.toml", SAMPLE_CONFIG)?;
        println!("Created ragerank.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add a teacher: ragerank add --name \"Mme Martin\" --subject Anglais");
    println!("  2. Adjust the score: ragerank bump \"Mme Martin\" 5");
    println!("  3. Save it to the ranking: ragerank save \"Mme Martin\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# ragerank configuration

storage_key = "teacher_rage_rank_data"
celebration_threshold = 40
max_history = 50
persist_pending = true

[storage]
type = "file"
dir = "${HOME}/.local/share/ragerank"
"#;
