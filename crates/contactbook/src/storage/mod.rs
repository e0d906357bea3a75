//! Flat-file storage for the contact list.
//!
//! The whole list is read in one pass and rewritten in one pass; there are
//! no incremental updates. See [`format`] for the row layout.

pub mod format;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::contact::Contact;
use crate::error::{Error, Result};

use self::format::{decode_row, delimiter_conflicts, encode_row, SkipReason, HEADER};

/// A data row that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file (the header is line 1).
    pub line: usize,
    /// Why the row was skipped.
    pub reason: SkipReason,
}

/// Outcome of loading the contacts file.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Contacts in file order.
    pub contacts: Vec<Contact>,
    /// Rows that could not be decoded.
    pub skipped: Vec<SkippedRow>,
}

/// Load the contacts file at `path`.
///
/// # Errors
///
/// See [`FlatFileStore::load`].
pub fn load(path: impl AsRef<Path>) -> Result<LoadReport> {
    FlatFileStore::new(path).load()
}

/// Rewrite the contacts file at `path` with `contacts`.
///
/// # Errors
///
/// See [`FlatFileStore::save`].
pub fn save(path: impl AsRef<Path>, contacts: &[Contact]) -> Result<()> {
    FlatFileStore::new(path).save(contacts)
}

/// Whole-file store for the contact list.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
    atomic_writes: bool,
}

impl FlatFileStore {
    /// Create a store for the file at `path`. Nothing is touched yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            atomic_writes: false,
        }
    }

    /// Write through a temporary file and rename it over the target.
    #[must_use]
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    /// Get the path to the contacts file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether saves go through a temporary file.
    #[must_use]
    pub fn atomic_writes(&self) -> bool {
        self.atomic_writes
    }

    /// Load every contact from the file.
    ///
    /// The first line is taken to be the header and ignored. Rows that are
    /// too short are skipped and listed in the report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`] if the file cannot be opened or read,
    /// including when it does not exist.
    pub fn load(&self) -> Result<LoadReport> {
        let file = File::open(&self.path).map_err(|source| self.read_error(source))?;
        let reader = BufReader::new(file);

        let mut report = LoadReport::default();
        for (index, line) in reader.lines().enumerate().skip(1) {
            let line = line.map_err(|source| self.read_error(source))?;
            let line_number = index + 1;
            match decode_row(&line) {
                Ok(contact) => report.contacts.push(contact),
                Err(reason) => {
                    warn!(line = line_number, %reason, "Skipping contacts row");
                    report.skipped.push(SkippedRow {
                        line: line_number,
                        reason,
                    });
                }
            }
        }

        debug!(
            path = %self.path.display(),
            loaded = report.contacts.len(),
            skipped = report.skipped.len(),
            "Loaded contacts file"
        );
        Ok(report)
    }

    /// Replace the file contents with `contacts`.
    ///
    /// Creates parent directories if needed. Values containing a delimiter
    /// are written unchanged and logged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryCreate`] or [`Error::FileWrite`].
    pub fn save(&self, contacts: &[Contact]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        for contact in contacts {
            let conflicts = delimiter_conflicts(contact);
            if !conflicts.is_empty() {
                warn!(
                    name = %contact.name(),
                    fields = ?conflicts,
                    "Contact contains a delimiter and will not load back unchanged"
                );
            }
        }

        if self.atomic_writes {
            let temp_path = self.temp_path();
            let written = self.write_to(&temp_path, contacts).and_then(|()| {
                fs::rename(&temp_path, &self.path).map_err(|source| self.write_error(source))
            });
            if let Err(err) = written {
                if let Err(cleanup) = fs::remove_file(&temp_path) {
                    debug!(path = %temp_path.display(), %cleanup, "Temporary file not removed");
                }
                return Err(err);
            }
        } else {
            self.write_to(&self.path, contacts)?;
        }

        debug!(
            path = %self.path.display(),
            count = contacts.len(),
            "Saved contacts file"
        );
        Ok(())
    }

    fn write_to(&self, path: &Path, contacts: &[Contact]) -> Result<()> {
        let file = File::create(path).map_err(|source| self.write_error(source))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{HEADER}").map_err(|source| self.write_error(source))?;
        for contact in contacts {
            writeln!(writer, "{}", encode_row(contact))
                .map_err(|source| self.write_error(source))?;
        }
        writer.flush().map_err(|source| self.write_error(source))?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_error(&self, source: std::io::Error) -> Error {
        Error::FileRead {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> Error {
        Error::FileWrite {
            path: self.path.clone(),
            source,
        }
    }
}
