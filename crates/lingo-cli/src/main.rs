//! Lingo CLI - Command-line interface for the Lingo content tools

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{gen, validate};

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Content tooling for the Lingo language-learning app", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pre-generate phrase assets (audio, images)
    #[command(subcommand)]
    Gen(gen::GenCommands),

    /// Validate a learner answer via the hosted model
    Validate {
        /// Path to a JSON request file (reads stdin when omitted)
        request: Option<String>,

        /// Chat model override
        #[arg(long)]
        model: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Gen(cmd) => gen::run(cmd),
        Commands::Validate { request, model } => validate::run(request.as_deref(), model),
    }
}
