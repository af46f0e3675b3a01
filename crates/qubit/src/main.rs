use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

mod commands;
mod config;
mod error;
mod knowledge;
mod reply;
mod reserved;
mod search;
mod session;
mod similarity;

#[derive(Parser)]
#[command(name = "qubit")]
#[command(
  about = "Qubit - Quantum Support Assistant\nQuantum-themed troubleshooting for everyday technical problems"
)]
#[command(version)]
struct Cli {
  /// Knowledge base file (defaults to knowledge_base.json in the qubit home)
  #[arg(long, global = true, value_name = "FILE")]
  kb: Option<PathBuf>,

  /// Seed for reproducible quantum randomness
  #[arg(long, global = true)]
  seed: Option<u64>,

  /// Verbose diagnostic logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Start an interactive support session
  Chat,
  /// Ask one question and exit
  Ask {
    /// Problem description (words are joined with spaces)
    #[arg(required = true)]
    words: Vec<String>,
  },
  /// List the topics the assistant knows about
  Topics,
  /// Show the solutions recorded for one topic
  Show {
    /// Topic label, matched case-insensitively
    topic: String,
  },
  /// Write the built-in catalog to the knowledge base file
  Init {
    /// Overwrite an existing knowledge base
    #[arg(short, long)]
    force: bool,
  },
}

fn init_logging(verbose: bool) {
  let filter =
    if verbose { EnvFilter::new("qubit=debug") } else { EnvFilter::new("qubit=warn") };

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let kb_path = cli.kb.clone().unwrap_or_else(knowledge::kb_path);

  match cli.command {
    Commands::Chat => {
      commands::chat(&kb_path, cli.seed)?;
    }
    Commands::Ask { words } => {
      commands::ask(&kb_path, cli.seed, &words)?;
    }
    Commands::Topics => {
      commands::topics(&kb_path)?;
    }
    Commands::Show { topic } => {
      commands::show(&kb_path, &topic)?;
    }
    Commands::Init { force } => {
      commands::init(&kb_path, force)?;
    }
  }

  Ok(())
}
