//! Command-line interface for contactbook.
//!
//! This module provides the CLI structure and command handlers for the
//! `contacts` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CheckCommand, ConfigCommand, EditCommand, ListCommand, OutputFormat,
    SearchCommand,
};

/// contacts - Keep a small address book in a plain CSV file
///
/// Every change rewrites the whole contacts file.
#[derive(Debug, Parser)]
#[command(name = "contacts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Contacts file to use instead of the configured one
    #[arg(short, long, global = true, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all contacts
    List(ListCommand),

    /// Show one contact in full
    Show {
        /// Row number from `list`
        row: usize,
    },

    /// Add a contact
    Add(AddCommand),

    /// Edit a contact
    Edit(EditCommand),

    /// Delete a contact
    Delete {
        /// Row number from `list`
        row: usize,
    },

    /// Search contacts by name, postal code, phone or email
    Search(SearchCommand),

    /// Validate values without changing the contacts file
    Check(CheckCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
