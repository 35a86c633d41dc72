//! Asset Forge CLI - generate cards, map tiles and maps from the terminal

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{generate, options, session, status, AssetKindArg};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "AI-assisted game asset generator with undo/redo history", long_about = None)]
#[command(version)]
struct Cli {
    /// Log workflow events (same as FORGE_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one asset and optionally export it
    Generate {
        /// Asset kind
        kind: AssetKindArg,

        /// Set a field before generating (e.g. --set card_type=Trap)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,

        /// Client to use (defaults to [generation].provider)
        #[arg(long)]
        provider: Option<String>,

        /// Candidate to select, 1-based
        #[arg(long)]
        select: Option<usize>,

        /// Export the selected candidate as PNG
        #[arg(long)]
        export: bool,

        /// Export directory (defaults to [export].output_dir)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Interactive generate/select/undo/redo session
    Session {
        /// Asset kind
        kind: AssetKindArg,

        /// Client to use (defaults to [generation].provider)
        #[arg(long)]
        provider: Option<String>,

        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
    },

    /// List the editable fields and their options
    Options {
        /// Asset kind
        kind: AssetKindArg,
    },

    /// Show configuration and client health
    Status,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("FORGE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            kind,
            sets,
            provider,
            select,
            export,
            output,
        } => generate::run(generate::GenerateArgs {
            kind,
            sets,
            provider,
            select,
            export,
            output,
        }),
        Commands::Session {
            kind,
            provider,
            script,
        } => session::run(kind, provider.as_deref(), script.as_deref()),
        Commands::Options { kind } => {
            options::run(kind);
            Ok(())
        }
        Commands::Status => status::run(),
    }
}
