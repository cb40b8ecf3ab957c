//! CLI frontend for the Delver dungeon compiler and interpreter.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "delver",
    about = "Delver: compile annotated dungeon maps and play them as text adventures",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a dungeon document and report diagnostics
    Build {
        /// Dungeon document (JSON)
        file: PathBuf,

        /// Treat compiler warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Show the compiled rooms, or one room in detail
    Show {
        /// Dungeon document (JSON)
        file: PathBuf,

        /// Room id to describe
        #[arg(short, long)]
        room: Option<usize>,
    },

    /// Play the dungeon as a text adventure on stdin/stdout
    Play {
        /// Dungeon document (JSON)
        file: PathBuf,

        /// RNG seed for encounter placement
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Emit one JSON record per turn instead of prose
        #[arg(long)]
        json: bool,

        /// Encounter difficulty (0 disables agents)
        #[arg(short, long, default_value = "1.0")]
        difficulty: f64,
    },

    /// Show where agents would be placed
    Encounters {
        /// Dungeon document (JSON)
        file: PathBuf,

        /// Encounter difficulty, 0 to 3
        #[arg(short, long, default_value = "1.0")]
        difficulty: f64,

        /// RNG seed for placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Export the compiled dungeon graph as JSON
    Export {
        /// Dungeon document (JSON)
        file: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { file, strict } => commands::build::run(&file, strict),
        Commands::Show { file, room } => commands::show::run(&file, room),
        Commands::Play {
            file,
            seed,
            json,
            difficulty,
        } => commands::play::run(&file, seed, json, difficulty),
        Commands::Encounters {
            file,
            difficulty,
            seed,
        } => commands::encounters::run(&file, difficulty, seed),
        Commands::Export { file, output } => commands::export::run(&file, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
