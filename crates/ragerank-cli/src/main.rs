//! ragerank CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "ragerank", version, about = "Rank teachers by their saved rage score")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store data in this directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter ragerank.toml
    Init,

    /// Show the leaderboard
    List {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Add a teacher with a zero score
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        subject: String,

        /// red, blue, green, purple, orange, yellow
        #[arg(long, default_value = "red")]
        color: String,
    },

    /// Remove a teacher and their history
    Remove {
        /// Teacher id, id prefix, or name
        teacher: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Change a teacher's unsaved score
    Bump {
        /// Teacher id, id prefix, or name
        teacher: String,

        /// Amount to add (negative to subtract)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Save a teacher's score into the ranking and history
    Save {
        /// Teacher id, id prefix, or name
        teacher: String,
    },

    /// Show a teacher's saved score history
    History {
        /// Teacher id, id prefix, or name
        teacher: String,
    },

    /// Export the leaderboard to a file
    Export {
        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Output format: html, json
        #[arg(long, default_value = "html")]
        format: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ragerank=info")),
        )
        .init();

    let cli = Cli::parse();
    let paths = session::Paths {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::List { format } => commands::list::execute(&paths, &format),
        Commands::Add {
            name,
            subject,
            color,
        } => commands::add::execute(&paths, name, subject, &color),
        Commands::Remove { teacher, yes } => commands::remove::execute(&paths, &teacher, yes),
        Commands::Bump { teacher, delta } => commands::bump::execute(&paths, &teacher, delta),
        Commands::Save { teacher } => commands::save::execute(&paths, &teacher),
        Commands::History { teacher } => commands::history::execute(&paths, &teacher),
        Commands::Export { output, format } => commands::export::execute(&paths, output, &format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
