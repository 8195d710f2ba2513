//! CLI frontend for the Delve interactive fiction engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "delve",
    about = "Delve: a text adventure beneath a white house",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine diagnostics to stderr
    #[arg(short = 'v', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively, reading commands from stdin
    Play {
        /// RNG seed for deterministic play
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Describe rooms in full on every visit
        #[arg(long)]
        verbose: bool,

        /// Resume a game saved with `save FILE`
        #[arg(short, long)]
        load: Option<PathBuf>,
    },

    /// Replay a file of commands and print the transcript
    Run {
        /// Command file, one command per line
        script: PathBuf,

        /// RNG seed for deterministic play
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Play {
            seed,
            verbose,
            load,
        } => commands::play::run(seed, verbose, load.as_deref()),
        Commands::Run { script, seed } => commands::run::run(&script, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
