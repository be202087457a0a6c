use clap::{Parser, Subcommand};
use std::path::PathBuf;
use answer_cli::commands::{get, history, inspect, submit, versions};

#[derive(Parser)]
#[command(name = "answers")]
#[command(about = "Inspect and edit an answer store database", long_about = None)]
struct Cli {
    /// Path to the SQLite database shared with the node.
    #[arg(long, global = true, default_value = "events.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current answer for a key
    Get {
        key: String,
    },
    /// List every accepted event for a key
    History {
        key: String,
    },
    /// List every stored row for a key, including inactive ones
    Versions {
        key: String,
    },
    /// Apply a create, update or delete command
    Submit {
        /// create | update | delete
        kind: String,
        key: String,
        /// Required for every command type.
        value: Option<String>,
    },
    /// Row counts and consistency report
    Inspect,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Get { key } => get::run(&cli.db, &key),
        Commands::History { key } => history::run(&cli.db, &key),
        Commands::Versions { key } => versions::run(&cli.db, &key).map(|_| ()),
        Commands::Submit { kind, key, value } => submit::run(&cli.db, &kind, &key, value).map(|_| ()),
        Commands::Inspect => inspect::run(&cli.db).map(|_| ()),
    }
}
