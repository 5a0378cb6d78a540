//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - invoke: dispatch a single request
//! - tools: list registered tools

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ContentCraft - lets a chat model pick a content writer and runs it
#[derive(Parser, Debug)]
#[command(name = "contentcraft")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch one request and print the outcome
    Invoke {
        /// Free-text request, e.g. "Write a tweet about cats"
        input: String,

        /// Print the envelope as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List registered tools
    Tools {
        /// Print tool definitions with their argument schemas as JSON
        #[arg(short, long)]
        json: bool,
    },
}
