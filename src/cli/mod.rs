//! CLI module for the study document tool.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::models::OutputFormat;

/// Chunk study documents and retrieve the passages relevant to a question.
#[derive(Debug, Parser)]
#[command(name = "studydoc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(
        long,
        short = 'f',
        global = true,
        help = "Output format: text, json, or markdown"
    )]
    pub format: Option<OutputFormat>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split a text document into overlapping chunks
    Chunk(commands::ChunkArgs),

    /// Rank a processed document's chunks against a query
    Search(commands::SearchArgs),

    /// Merge rankings for several query variants into prompt context
    Context(commands::ContextArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}

// FromStr is implemented in models::search
