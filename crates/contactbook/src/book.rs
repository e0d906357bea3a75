//! The contact book: the in-memory list plus its backing file.
//!
//! Every successful mutation rewrites the file. If the rewrite fails the
//! mutation is undone in memory, so the list never claims a change the file
//! does not hold.

use tracing::{info, warn};

use crate::contact::{Contact, ContactDraft, ContactId};
use crate::error::{Error, Result};
use crate::storage::{FlatFileStore, LoadReport, SkippedRow};
use crate::validation::Validator;

/// Owns the canonical contact list for one running session.
#[derive(Debug)]
pub struct ContactBook {
    store: FlatFileStore,
    validator: Validator,
    contacts: Vec<Contact>,
}

impl ContactBook {
    /// Load the book from `store`.
    ///
    /// A missing file starts an empty book. Rows that could not be decoded
    /// are returned so the caller can report them.
    ///
    /// # Errors
    ///
    /// Returns any read error other than the file not existing.
    pub fn open(store: FlatFileStore, validator: Validator) -> Result<(Self, Vec<SkippedRow>)> {
        let report = match store.load() {
            Ok(report) => report,
            Err(err) if err.is_not_found_file() => {
                info!(path = %store.path().display(), "No contacts file yet, starting empty");
                LoadReport::default()
            }
            Err(err) => return Err(err),
        };

        for (row, contact) in report.contacts.iter().enumerate() {
            if let Err(reason) = contact.validate(&validator) {
                warn!(row = row + 1, %reason, "Loaded contact does not satisfy current policy");
            }
        }

        let book = Self {
            store,
            validator,
            contacts: report.contacts,
        };
        Ok((book, report.skipped))
    }

    /// Create an empty book that has not been saved yet.
    #[must_use]
    pub fn empty(store: FlatFileStore, validator: Validator) -> Self {
        Self {
            store,
            validator,
            contacts: Vec::new(),
        }
    }

    /// All contacts, in file order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the book has no contacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// The validator applied to edits.
    #[must_use]
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &FlatFileStore {
        &self.store
    }

    /// Look up a contact by id.
    #[must_use]
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id() == id)
    }

    /// Resolve a 1-based row, as shown in a listing, to a contact id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfRange`] for row 0 or a row past the end.
    pub fn id_at(&self, row: usize) -> Result<ContactId> {
        row.checked_sub(1)
            .and_then(|index| self.contacts.get(index))
            .map(Contact::id)
            .ok_or(Error::RowOutOfRange {
                index: row,
                len: self.contacts.len(),
            })
    }

    /// Contacts with `query` in their name, locality code, line number or
    /// any email, ignoring case. An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| {
                c.name().to_lowercase().contains(&needle)
                    || c.locality_code().to_lowercase().contains(&needle)
                    || c.line_number().contains(&needle)
                    || c.emails().iter().any(|e| e.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Validate `draft` as a new contact, append it and save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without touching the list, or a write
    /// error after undoing the append.
    pub fn add(&mut self, draft: ContactDraft) -> Result<ContactId> {
        let contact = Contact::from_draft(draft, &self.validator)?;
        let id = contact.id();
        self.contacts.push(contact);

        if let Err(err) = self.store.save(&self.contacts) {
            self.contacts.pop();
            return Err(err);
        }

        info!(%id, total = self.contacts.len(), "Added contact");
        Ok(id)
    }

    /// Replace the fields of contact `id` with `draft` and save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContactNotFound`], [`Error::Validation`], or a write
    /// error after restoring the previous fields.
    pub fn update(&mut self, id: ContactId, draft: ContactDraft) -> Result<()> {
        let index = self.position(id)?;
        let previous = self.contacts[index].clone();
        self.contacts[index].apply(draft, &self.validator)?;

        if let Err(err) = self.store.save(&self.contacts) {
            self.contacts[index] = previous;
            return Err(err);
        }

        info!(%id, "Updated contact");
        Ok(())
    }

    /// Remove contact `id` and save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContactNotFound`], or a write error after putting the
    /// contact back in its place.
    pub fn remove(&mut self, id: ContactId) -> Result<Contact> {
        let index = self.position(id)?;
        let removed = self.contacts.remove(index);

        if let Err(err) = self.store.save(&self.contacts) {
            self.contacts.insert(index, removed);
            return Err(err);
        }

        info!(%id, total = self.contacts.len(), "Removed contact");
        Ok(removed)
    }

    /// Rewrite the file from the in-memory list.
    ///
    /// # Errors
    ///
    /// Returns any write error from the store.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.contacts)
    }

    fn position(&self, id: ContactId) -> Result<usize> {
        self.contacts
            .iter()
            .position(|c| c.id() == id)
            .ok_or(Error::ContactNotFound(id))
    }
}
