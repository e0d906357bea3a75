//! Error types for contactbook.
//!
//! This module defines all error types used throughout the contactbook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;

use thiserror::Error;

use crate::contact::ContactId;
use crate::validation::ValidationError;

/// The main error type for contactbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to read the contacts file.
    #[error("failed to read contacts file {path}: {source}")]
    FileRead {
        /// Path to the contacts file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the contacts file.
    #[error("failed to write contacts file {path}: {source}")]
    FileWrite {
        /// Path to the contacts file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Contact Errors ===
    /// A field value was rejected by the active validation policy.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No contact with the given id exists in the book.
    #[error("contact not found: {0}")]
    ContactNotFound(ContactId),

    /// A row position does not address any contact.
    #[error("row {index} is out of range (book has {len} contacts)")]
    RowOutOfRange {
        /// The requested 1-based row.
        index: usize,
        /// Number of contacts currently in the book.
        len: usize,
    },

    // === Serialization Errors ===
    /// Rendering contacts as JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for contactbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Check if this error means the contacts file does not exist yet.
    #[must_use]
    pub fn is_not_found_file(&self) -> bool {
        matches!(
            self,
            Self::FileRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Check if this error is a rejected field value.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
