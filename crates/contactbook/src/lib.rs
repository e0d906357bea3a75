//! `contactbook` - A small contact book kept in a flat CSV file
//!
//! This library provides the contact record with its validation rules, the
//! whole-file store, and the [`ContactBook`] service that ties them together
//! for a front end to drive.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod book;
pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod storage;
pub mod validation;

pub use book::ContactBook;
pub use config::Config;
pub use contact::{Contact, ContactDraft, ContactId};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::{FlatFileStore, LoadReport, SkippedRow};
pub use validation::{
    validate_email, validate_emails, validate_line_number, LineNumberPolicy, LocalityPolicy,
    ValidationError, Validator,
};
