//! CLI module for contentcraft - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for one-shot dispatch and
//! tool listing; with no subcommand an interactive prompt is started.

pub mod commands;

pub use commands::Cli;
