//! Row format of the contacts file.
//!
//! ```text
//! Name,Postal Code,Phone Number,Email,Is Mobile
//! <name>,<locality code>,<line number>,<email1>;<email2>;...,<true|false>
//! ```
//!
//! Fields are neither quoted nor escaped. A value containing `,` (or an
//! email containing `;`) is written as-is and will not read back the same.
//! Line breaks are rejected by validation before a contact gets here.

use std::fmt;

use uuid::Uuid;

use crate::contact::Contact;

/// Header line written at the top of every contacts file.
pub const HEADER: &str = "Name,Postal Code,Phone Number,Email,Is Mobile";

/// Separator between fields of a row.
pub const FIELD_DELIMITER: &str = ",";

/// Separator between emails inside the email field.
pub const EMAIL_DELIMITER: &str = ";";

/// Rows with fewer fields than this are skipped on load.
pub const MIN_FIELDS: usize = 5;

/// Why a row was not turned into a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The row split into fewer than [`MIN_FIELDS`] fields.
    TooFewFields {
        /// Number of fields actually found.
        found: usize,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { found } => {
                write!(f, "expected at least {MIN_FIELDS} fields, found {found}")
            }
        }
    }
}

/// Encode a contact as one row, without the trailing newline.
#[must_use]
pub fn encode_row(contact: &Contact) -> String {
    let emails = contact.emails().join(EMAIL_DELIMITER);
    [
        contact.name(),
        contact.locality_code(),
        contact.line_number(),
        emails.as_str(),
        if contact.is_mobile() { "true" } else { "false" },
    ]
    .join(FIELD_DELIMITER)
}

/// Decode one row into a contact with a fresh id.
///
/// Fields past the fifth are ignored.
///
/// # Errors
///
/// Returns [`SkipReason::TooFewFields`] when the row is too short.
pub fn decode_row(line: &str) -> Result<Contact, SkipReason> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < MIN_FIELDS {
        return Err(SkipReason::TooFewFields {
            found: fields.len(),
        });
    }

    let emails = fields[3]
        .split(EMAIL_DELIMITER)
        .filter(|email| !email.is_empty())
        .map(String::from)
        .collect();

    Ok(Contact::from_fields(
        Uuid::new_v4(),
        fields[0].to_string(),
        fields[1].to_string(),
        fields[2].to_string(),
        emails,
        fields[4].eq_ignore_ascii_case("true"),
    ))
}

/// Names of the fields whose values contain a delimiter or a line break.
///
/// Such a contact is saved unchanged but will not round-trip. Validated
/// contacts never carry line breaks; commas are allowed in free text.
#[must_use]
pub fn delimiter_conflicts(contact: &Contact) -> Vec<&'static str> {
    let mut conflicts = Vec::new();
    if breaks_row(contact.name()) {
        conflicts.push("name");
    }
    if breaks_row(contact.locality_code()) {
        conflicts.push("locality_code");
    }
    if breaks_row(contact.line_number()) {
        conflicts.push("line_number");
    }
    if contact
        .emails()
        .iter()
        .any(|e| breaks_row(e) || e.contains(EMAIL_DELIMITER) || e.is_empty())
    {
        conflicts.push("emails");
    }
    conflicts
}

fn breaks_row(value: &str) -> bool {
    value.contains(FIELD_DELIMITER) || value.contains(['\n', '\r'])
}
