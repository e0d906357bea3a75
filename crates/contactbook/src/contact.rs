//! Contact record model.
//!
//! A [`Contact`] owns its invariants: every constrained field is changed
//! through a mutator that validates first and leaves the record untouched
//! when the value is rejected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{ValidationError, Validator, STRICT_LINE_NUMBER_DIGITS};

/// Identifier for a contact within one session.
///
/// Generated when the contact is created in memory. It is not written to the
/// contacts file, so it changes every time the file is loaded.
pub type ContactId = Uuid;

/// One person in the contact book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    id: ContactId,
    name: String,
    locality_code: String,
    line_number: String,
    emails: Vec<String>,
    is_mobile: bool,
}

/// Editable fields of a contact, as entered in an edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    /// Display name.
    pub name: String,
    /// Area or postal code.
    pub locality_code: String,
    /// Phone line number.
    pub line_number: String,
    /// Email addresses, in display order.
    pub emails: Vec<String>,
    /// Whether the phone number is a mobile number.
    pub is_mobile: bool,
}

impl Contact {
    /// Create an empty contact with a fresh id.
    ///
    /// This is the state of a contact between "add" and the user confirming
    /// the edit dialog. It is not validated.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::from_fields(
            Uuid::new_v4(),
            String::new(),
            String::new(),
            String::new(),
            Vec::new(),
            false,
        )
    }

    /// Build a contact without validation.
    ///
    /// Used by the storage layer, which must load whatever the file holds.
    pub(crate) fn from_fields(
        id: ContactId,
        name: String,
        locality_code: String,
        line_number: String,
        emails: Vec<String>,
        is_mobile: bool,
    ) -> Self {
        Self {
            id,
            name,
            locality_code,
            line_number,
            emails,
            is_mobile,
        }
    }

    /// Create a validated contact from a draft.
    ///
    /// # Errors
    ///
    /// Returns the first field the validator rejects.
    pub fn from_draft(draft: ContactDraft, validator: &Validator) -> Result<Self, ValidationError> {
        let mut contact = Self::placeholder();
        contact.apply(draft, validator)?;
        Ok(contact)
    }

    /// The session identifier.
    #[must_use]
    pub fn id(&self) -> ContactId {
        self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The area or postal code.
    #[must_use]
    pub fn locality_code(&self) -> &str {
        &self.locality_code
    }

    /// The phone line number.
    #[must_use]
    pub fn line_number(&self) -> &str {
        &self.line_number
    }

    /// The email addresses.
    #[must_use]
    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// The email at `index`, if there is one.
    #[must_use]
    pub fn email_at(&self, index: usize) -> Option<&str> {
        self.emails.get(index).map(String::as_str)
    }

    /// Whether the phone number is a mobile number.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.is_mobile
    }

    /// Replace the name. Names are free text on a single line.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LineBreak`] and keeps the old name if the
    /// new one contains a line break.
    pub fn set_name(
        &mut self,
        name: impl Into<String>,
        validator: &Validator,
    ) -> Result<(), ValidationError> {
        let name = name.into();
        validator.check_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Replace the locality code.
    ///
    /// # Errors
    ///
    /// Returns an error and keeps the old value if the policy rejects it.
    pub fn set_locality_code(
        &mut self,
        locality_code: impl Into<String>,
        validator: &Validator,
    ) -> Result<(), ValidationError> {
        let locality_code = locality_code.into();
        validator.check_locality_code(&locality_code)?;
        self.locality_code = locality_code;
        Ok(())
    }

    /// Replace the line number.
    ///
    /// # Errors
    ///
    /// Returns an error and keeps the old value if the policy rejects it.
    pub fn set_line_number(
        &mut self,
        line_number: impl Into<String>,
        validator: &Validator,
    ) -> Result<(), ValidationError> {
        let line_number = line_number.into();
        validator.check_line_number(&line_number)?;
        self.line_number = line_number;
        Ok(())
    }

    /// Replace the whole email list.
    ///
    /// # Errors
    ///
    /// Returns an error and keeps the old list if any address is rejected.
    pub fn set_emails(
        &mut self,
        emails: Vec<String>,
        validator: &Validator,
    ) -> Result<(), ValidationError> {
        validator.check_emails(&emails)?;
        self.emails = emails;
        Ok(())
    }

    /// Set the mobile flag.
    pub fn set_is_mobile(&mut self, is_mobile: bool) {
        self.is_mobile = is_mobile;
    }

    /// Apply every field of `draft`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns the first rejected field; the contact is left unchanged.
    pub fn apply(&mut self, draft: ContactDraft, validator: &Validator) -> Result<(), ValidationError> {
        validator.check_name(&draft.name)?;
        validator.check_locality_code(&draft.locality_code)?;
        validator.check_line_number(&draft.line_number)?;
        validator.check_emails(&draft.emails)?;

        self.name = draft.name;
        self.locality_code = draft.locality_code;
        self.line_number = draft.line_number;
        self.emails = draft.emails;
        self.is_mobile = draft.is_mobile;
        Ok(())
    }

    /// Check the stored values against `validator`.
    ///
    /// Loaded contacts are not validated on the way in; this reports the
    /// first field that the active policies would reject.
    ///
    /// # Errors
    ///
    /// Returns the first rejected field.
    pub fn validate(&self, validator: &Validator) -> Result<(), ValidationError> {
        validator.check_name(&self.name)?;
        validator.check_locality_code(&self.locality_code)?;
        validator.check_line_number(&self.line_number)?;
        validator.check_emails(&self.emails)
    }

    /// A draft holding the current field values, for editing.
    #[must_use]
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            locality_code: self.locality_code.clone(),
            line_number: self.line_number.clone(),
            emails: self.emails.clone(),
            is_mobile: self.is_mobile,
        }
    }

    /// The phone number formatted as `(AAA) PPP-LLLL`.
    ///
    /// Values that are not ten ASCII digits are returned as stored.
    #[must_use]
    pub fn formatted_phone(&self) -> String {
        let digits = &self.line_number;
        if digits.len() == STRICT_LINE_NUMBER_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
        {
            format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
        } else {
            digits.clone()
        }
    }

    /// Whether two contacts hold the same field values, ignoring identity.
    #[must_use]
    pub fn same_fields(&self, other: &Self) -> bool {
        self.name == other.name
            && self.locality_code == other.locality_code
            && self.line_number == other.line_number
            && self.emails == other.emails
            && self.is_mobile == other.is_mobile
    }
}
