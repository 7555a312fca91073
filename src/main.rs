//! afdsim - Deterministic finite automaton simulator
//!
//! Provides both an interactive shell and one-shot command execution.

mod commands;
mod config;
mod prompt;
mod render;
mod repl;
mod session;
mod wizard;

use afdsim_loader::Format;
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "afdsim")]
#[command(about = "Load, build and test deterministic finite automata")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "AFDSIM_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start the interactive shell
    Shell,

    /// Evaluate one word against an automaton file
    Run {
        /// Automaton file (.json, .yaml, .yml or .xml)
        file: PathBuf,

        /// Word to evaluate
        word: String,

        /// File format, when the extension does not tell
        #[arg(short, long)]
        format: Option<Format>,

        /// Start state (defaults to the initial state)
        #[arg(short, long)]
        start: Option<String>,

        /// Accepting states to use instead of the automaton's own
        #[arg(short, long, value_delimiter = ',')]
        accepting: Option<Vec<String>>,

        /// Symbol separator (defaults to one symbol per character)
        #[arg(long)]
        separator: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the components of an automaton file
    Show {
        /// Automaton file
        file: PathBuf,

        /// File format, when the extension does not tell
        #[arg(short, long)]
        format: Option<Format>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report definition problems in an automaton file
    Lint {
        /// Automaton file
        file: PathBuf,

        /// File format, when the extension does not tell
        #[arg(short, long)]
        format: Option<Format>,
    },

    /// Run the built-in examples
    Examples {
        /// ends-with-01, even-a or all
        #[arg(default_value = "all")]
        which: String,
    },

    /// Write sample automaton files in every format
    Samples {
        /// Target directory (defaults to the configured samples directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(1);
        }
    };
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Some(Commands::Shell) | None => {
            repl::run(&config)?;
        }
        Some(cmd) => match commands::execute(cmd, &config) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("{}: {}", "Error".red(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
