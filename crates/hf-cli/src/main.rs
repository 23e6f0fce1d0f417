//! CLI frontend for Hookforge content.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "hf",
    about = "Hookforge: check, encode and inspect modifier and material content",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log decoding and loading details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load modifier definitions and report problems
    Check {
        /// Modifier .json files or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the wire form of a modifier as hex
    Encode {
        /// Modifier .json file
        file: PathBuf,
    },

    /// Decode hex back into JSON
    Decode {
        /// Hex-encoded bytes
        hex: String,

        /// Input is a channel frame rather than a bare modifier
        #[arg(short, long)]
        frame: bool,
    },

    /// Show which modules answer each hook, in dispatch order
    Hooks {
        /// Modifier .json file
        file: PathBuf,
    },

    /// Frame a material sync packet from a JSON array of materials
    Sync {
        /// Materials .json file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { paths } => commands::check::run(&paths),
        Commands::Encode { file } => commands::encode::run(&file),
        Commands::Decode { hex, frame } => commands::decode::run(&hex, frame),
        Commands::Hooks { file } => commands::hooks::run(&file),
        Commands::Sync { file } => commands::sync::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
