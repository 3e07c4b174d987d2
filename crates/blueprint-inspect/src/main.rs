//! blueprint-inspect - print what the language analysis sees

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "blueprint-inspect")]
#[command(version)]
#[command(
    about = "Inspect blueprint documents as the language server sees them",
    long_about = None
)]
struct Cli {
    /// Analysis settings (JSON, camelCase keys)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document outline as JSON
    Outline {
        /// Blueprint file (.yaml, .yml, .json or .jsonc)
        file: PathBuf,
    },

    /// Print the cursor context at a position as JSON
    Context {
        /// Blueprint file (.yaml, .yml, .json or .jsonc)
        file: PathBuf,

        /// 1-based line
        #[arg(long)]
        line: u32,

        /// 1-based column
        #[arg(long)]
        column: u32,

        /// Semantic tree produced by the validator, for hover information
        #[arg(long, value_name = "TREE.json")]
        semantic_tree: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blueprint_inspect=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Outline { file } => commands::outline::execute(&file, &config),
        Commands::Context {
            file,
            line,
            column,
            semantic_tree,
        } => commands::context::execute(
            &file,
            line,
            column,
            semantic_tree.as_deref(),
            &config,
        ),
    }
}
