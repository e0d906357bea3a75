//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::contact::ContactDraft;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Contact name
    pub name: String,

    /// Area or postal code
    #[arg(short, long, default_value = "")]
    pub locality: String,

    /// Phone line number
    #[arg(short, long, default_value = "")]
    pub phone: String,

    /// Email address (repeat for more than one)
    #[arg(short, long)]
    pub email: Vec<String>,

    /// Mark the number as a mobile number
    #[arg(short, long)]
    pub mobile: bool,
}

impl AddCommand {
    /// The draft described by these arguments.
    #[must_use]
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            locality_code: self.locality.clone(),
            line_number: self.phone.clone(),
            emails: self.email.clone(),
            is_mobile: self.mobile,
        }
    }
}

/// Edit command arguments. Fields that are not given keep their value.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Row number from `list`
    pub row: usize,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New area or postal code
    #[arg(short, long)]
    pub locality: Option<String>,

    /// New phone line number
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Replace the email list (repeat for more than one)
    #[arg(short, long, conflicts_with = "clear_emails")]
    pub email: Vec<String>,

    /// Remove every email address
    #[arg(long)]
    pub clear_emails: bool,

    /// Set the mobile flag
    #[arg(short, long)]
    pub mobile: Option<bool>,
}

impl EditCommand {
    /// Overwrite the fields of `draft` that were given on the command line.
    pub fn apply_to(&self, draft: &mut ContactDraft) {
        if let Some(name) = &self.name {
            draft.name.clone_from(name);
        }
        if let Some(locality) = &self.locality {
            draft.locality_code.clone_from(locality);
        }
        if let Some(phone) = &self.phone {
            draft.line_number.clone_from(phone);
        }
        if self.clear_emails {
            draft.emails.clear();
        } else if !self.email.is_empty() {
            draft.emails.clone_from(&self.email);
        }
        if let Some(mobile) = self.mobile {
            draft.is_mobile = mobile;
        }
    }
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Text to look for (case-insensitive)
    pub query: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Email address to check (repeat for more than one)
    #[arg(short, long)]
    pub email: Vec<String>,

    /// Phone line number to check
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Area or postal code to check
    #[arg(short, long)]
    pub locality: Option<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per contact
    Plain,
    /// Aligned columns, one per email
    #[default]
    Table,
    /// JSON output
    Json,
}
