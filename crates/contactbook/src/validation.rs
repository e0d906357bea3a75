//! Field validation for contact records.
//!
//! Emails must look like `local@domain` and may not carry pictographs or
//! emoji. Line numbers and locality codes are checked against a configurable
//! policy so older, looser data can still be edited.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pattern every email address must match.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$";

/// Number of digits required by [`LineNumberPolicy::Strict`].
pub const STRICT_LINE_NUMBER_DIGITS: usize = 10;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

/// Unicode blocks whose code points are rejected in email addresses.
///
/// Each entry is `(name, first, last)` with inclusive bounds.
pub const BLOCKED_SYMBOL_BLOCKS: &[(&str, char, char)] = &[
    ("Miscellaneous Symbols", '\u{2600}', '\u{26FF}'),
    ("Dingbats", '\u{2700}', '\u{27BF}'),
    (
        "Miscellaneous Symbols and Pictographs",
        '\u{1F300}',
        '\u{1F5FF}',
    ),
    ("Emoticons", '\u{1F600}', '\u{1F64F}'),
    ("Transport and Map Symbols", '\u{1F680}', '\u{1F6FF}'),
    (
        "Supplemental Symbols and Pictographs",
        '\u{1F900}',
        '\u{1F9FF}',
    ),
    (
        "Symbols and Pictographs Extended-A",
        '\u{1FA70}',
        '\u{1FAFF}',
    ),
];

/// Why a field value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The email does not match [`EMAIL_PATTERN`].
    #[error("'{email}' is not a valid email address")]
    MalformedEmail {
        /// The rejected address.
        email: String,
    },

    /// The email contains a character from a blocked symbol block.
    #[error("'{email}' contains the disallowed symbol '{symbol}' ({block})")]
    BlockedSymbol {
        /// The rejected address.
        email: String,
        /// The first offending character.
        symbol: char,
        /// Name of the Unicode block the symbol belongs to.
        block: &'static str,
    },

    /// The line number does not satisfy the active policy.
    #[error("'{value}' is not a valid phone number ({policy})")]
    InvalidLineNumber {
        /// The rejected value.
        value: String,
        /// The policy that was applied.
        policy: LineNumberPolicy,
    },

    /// The locality code does not satisfy the active policy.
    #[error("'{value}' is not a valid postal code ({policy})")]
    InvalidLocalityCode {
        /// The rejected value.
        value: String,
        /// The policy that was applied.
        policy: LocalityPolicy,
    },

    /// A single-line field contains a line break.
    #[error("{field} must not contain a line break")]
    LineBreak {
        /// Name of the rejected field.
        field: &'static str,
    },
}

/// How strictly phone line numbers are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineNumberPolicy {
    /// Exactly ten ASCII digits.
    #[default]
    Strict,
    /// One or more ASCII digits, any length.
    Digits,
    /// No constraint.
    Any,
}

impl fmt::Display for LineNumberPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "expected exactly {STRICT_LINE_NUMBER_DIGITS} digits"),
            Self::Digits => write!(f, "expected digits only"),
            Self::Any => write!(f, "any value"),
        }
    }
}

/// How strictly locality (area/postal) codes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalityPolicy {
    /// Free text.
    #[default]
    Any,
    /// One or more ASCII digits.
    Digits,
}

impl fmt::Display for LocalityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any value"),
            Self::Digits => write!(f, "expected digits only"),
        }
    }
}

/// Returns true iff `candidate` is an acceptable email address.
#[must_use]
pub fn validate_email(candidate: &str) -> bool {
    check_email(candidate).is_ok()
}

/// Returns true iff every address in `candidates` is acceptable.
///
/// An empty list is valid.
#[must_use]
pub fn validate_emails<S: AsRef<str>>(candidates: &[S]) -> bool {
    candidates.iter().all(|c| validate_email(c.as_ref()))
}

/// Returns true iff `candidate` is exactly ten decimal digits.
#[must_use]
pub fn validate_line_number(candidate: &str) -> bool {
    LineNumberPolicy::Strict.accepts(candidate)
}

/// Check one email address, reporting why it was rejected.
///
/// # Errors
///
/// Returns [`ValidationError::BlockedSymbol`] or
/// [`ValidationError::MalformedEmail`].
pub fn check_email(candidate: &str) -> Result<(), ValidationError> {
    if let Some((symbol, block)) = find_blocked_symbol(candidate) {
        return Err(ValidationError::BlockedSymbol {
            email: candidate.to_string(),
            symbol,
            block,
        });
    }
    if !EMAIL_REGEX.is_match(candidate) {
        return Err(ValidationError::MalformedEmail {
            email: candidate.to_string(),
        });
    }
    Ok(())
}

/// Find the first character of `value` that lies in a blocked block.
#[must_use]
pub fn find_blocked_symbol(value: &str) -> Option<(char, &'static str)> {
    value.chars().find_map(|c| {
        BLOCKED_SYMBOL_BLOCKS
            .iter()
            .find(|(_, first, last)| (*first..=*last).contains(&c))
            .map(|(name, _, _)| (c, *name))
    })
}

/// Reject `value` if it contains `\n` or `\r`.
///
/// Every record occupies exactly one line of the contacts file.
///
/// # Errors
///
/// Returns [`ValidationError::LineBreak`] naming `field`.
pub fn check_single_line(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains(['\n', '\r']) {
        return Err(ValidationError::LineBreak { field });
    }
    Ok(())
}

fn is_ascii_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

impl LineNumberPolicy {
    /// Whether `value` satisfies this policy.
    #[must_use]
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Strict => value.len() == STRICT_LINE_NUMBER_DIGITS && is_ascii_digits(value),
            Self::Digits => is_ascii_digits(value),
            Self::Any => true,
        }
    }
}

impl LocalityPolicy {
    /// Whether `value` satisfies this policy.
    #[must_use]
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Digits => is_ascii_digits(value),
        }
    }
}

/// Validates contact fields against the configured policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    line_number: LineNumberPolicy,
    locality_code: LocalityPolicy,
}

impl Validator {
    /// Create a validator with explicit policies.
    #[must_use]
    pub fn new(line_number: LineNumberPolicy, locality_code: LocalityPolicy) -> Self {
        Self {
            line_number,
            locality_code,
        }
    }

    /// The active line number policy.
    #[must_use]
    pub fn line_number_policy(&self) -> LineNumberPolicy {
        self.line_number
    }

    /// The active locality code policy.
    #[must_use]
    pub fn locality_policy(&self) -> LocalityPolicy {
        self.locality_code
    }

    /// Check a display name. Names are free text on a single line.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LineBreak`] if the name spans lines.
    pub fn check_name(&self, candidate: &str) -> Result<(), ValidationError> {
        check_single_line("name", candidate)
    }

    /// Check a single email address.
    ///
    /// # Errors
    ///
    /// Returns the reason the address was rejected.
    pub fn check_email(&self, candidate: &str) -> Result<(), ValidationError> {
        check_email(candidate)
    }

    /// Check a whole email list; the first bad entry rejects the list.
    ///
    /// # Errors
    ///
    /// Returns the reason the first offending address was rejected.
    pub fn check_emails<S: AsRef<str>>(&self, candidates: &[S]) -> Result<(), ValidationError> {
        candidates
            .iter()
            .try_for_each(|c| self.check_email(c.as_ref()))
    }

    /// Check a phone line number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLineNumber`] when the policy rejects it.
    pub fn check_line_number(&self, candidate: &str) -> Result<(), ValidationError> {
        check_single_line("line_number", candidate)?;
        if self.line_number.accepts(candidate) {
            Ok(())
        } else {
            Err(ValidationError::InvalidLineNumber {
                value: candidate.to_string(),
                policy: self.line_number,
            })
        }
    }

    /// Check an area or postal code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLocalityCode`] when the policy rejects it.
    pub fn check_locality_code(&self, candidate: &str) -> Result<(), ValidationError> {
        check_single_line("locality_code", candidate)?;
        if self.locality_code.accepts(candidate) {
            Ok(())
        } else {
            Err(ValidationError::InvalidLocalityCode {
                value: candidate.to_string(),
                policy: self.locality_code,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_simple_address() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("jane.doe+work@example.com"));
        assert!(validate_email("first_last-1@sub.domain.org"));
    }

    #[test]
    fn test_validate_email_rejects_missing_at() {
        assert!(!validate_email("a.b.co"));
        assert!(!validate_email(""));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("jane@"));
    }

    #[test]
    fn test_validate_email_rejects_emoji() {
        assert!(!validate_email("a@b😀.co"));
        assert_eq!(
            check_email("a@b😀.co"),
            Err(ValidationError::BlockedSymbol {
                email: "a@b😀.co".to_string(),
                symbol: '😀',
                block: "Emoticons",
            })
        );
    }

    #[test]
    fn test_validate_email_rejects_whitespace_and_delimiters() {
        assert!(!validate_email("jane doe@example.com"));
        assert!(!validate_email("jane@example.com;bob@example.com"));
        assert!(!validate_email("jane,doe@example.com"));
    }

    #[test]
    fn test_find_blocked_symbol_block_edges() {
        for (name, first, last) in BLOCKED_SYMBOL_BLOCKS {
            assert_eq!(find_blocked_symbol(&first.to_string()), Some((*first, *name)));
            assert_eq!(find_blocked_symbol(&last.to_string()), Some((*last, *name)));
        }

        // Neighbours just outside the first and last ranges.
        assert_eq!(find_blocked_symbol("\u{25FF}"), None);
        assert_eq!(find_blocked_symbol("\u{27C0}"), None);
        assert_eq!(find_blocked_symbol("\u{2800}"), None);
        assert_eq!(find_blocked_symbol("\u{1F2FF}"), None);
        assert_eq!(find_blocked_symbol("\u{1F650}"), None);
        assert_eq!(find_blocked_symbol("\u{1F700}"), None);
        assert_eq!(find_blocked_symbol("\u{1FA6F}"), None);
        assert_eq!(find_blocked_symbol("\u{1FB00}"), None);
    }

    #[test]
    fn test_find_blocked_symbol_exact_edges() {
        assert_eq!(
            find_blocked_symbol("\u{2600}"),
            Some(('\u{2600}', "Miscellaneous Symbols"))
        );
        assert_eq!(find_blocked_symbol("\u{27BF}"), Some(('\u{27BF}', "Dingbats")));
        assert_eq!(
            find_blocked_symbol("\u{1F64F}"),
            Some(('\u{1F64F}', "Emoticons"))
        );
    }

    #[test]
    fn test_check_email_rejects_extended_pictographs() {
        // U+1FAE0, melting face
        let err = check_email("jane@\u{1FAE0}.example").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::BlockedSymbol {
                symbol: '\u{1FAE0}',
                block: "Symbols and Pictographs Extended-A",
                ..
            }
        ));
    }

    #[test]
    fn test_check_single_line() {
        assert!(check_single_line("name", "Jane Doe").is_ok());
        assert_eq!(
            check_single_line("name", "Jane\nMallory"),
            Err(ValidationError::LineBreak { field: "name" })
        );
        assert!(check_single_line("name", "Jane\r").is_err());
    }

    #[test]
    fn test_validator_rejects_line_breaks_under_any_policy() {
        let validator = Validator::new(LineNumberPolicy::Any, LocalityPolicy::Any);
        assert!(validator.check_name("Jane Doe").is_ok());
        assert_eq!(
            validator.check_name("x\nEvil,1,4165551234,,true"),
            Err(ValidationError::LineBreak { field: "name" })
        );
        assert_eq!(
            validator.check_line_number("555\r\n1234"),
            Err(ValidationError::LineBreak {
                field: "line_number"
            })
        );
        assert_eq!(
            validator.check_locality_code("M5V\n2T6"),
            Err(ValidationError::LineBreak {
                field: "locality_code"
            })
        );
        assert!(validator.check_email("jane@example.com\n").is_err());
    }

    #[test]
    fn test_find_blocked_symbol_per_block() {
        assert_eq!(find_blocked_symbol("☀"), Some(('☀', "Miscellaneous Symbols")));
        assert_eq!(find_blocked_symbol("✂"), Some(('✂', "Dingbats")));
        assert_eq!(
            find_blocked_symbol("🌍"),
            Some(('🌍', "Miscellaneous Symbols and Pictographs"))
        );
        assert_eq!(
            find_blocked_symbol("🚀"),
            Some(('🚀', "Transport and Map Symbols"))
        );
        assert_eq!(
            find_blocked_symbol("🤖"),
            Some(('🤖', "Supplemental Symbols and Pictographs"))
        );
        assert_eq!(find_blocked_symbol("🙂"), Some(('🙂', "Emoticons")));
        assert_eq!(
            find_blocked_symbol("🪐"),
            Some(('🪐', "Symbols and Pictographs Extended-A"))
        );
        assert_eq!(find_blocked_symbol("plain text é"), None);
    }

    #[test]
    fn test_validate_emails_empty_list_is_valid() {
        let empty: [&str; 0] = [];
        assert!(validate_emails(&empty));
    }

    #[test]
    fn test_validate_emails_rejects_if_any_invalid() {
        assert!(validate_emails(&["a@b.co", "c@d.org"]));
        assert!(!validate_emails(&["a@b.co", "a.b.co"]));
    }

    #[test]
    fn test_validate_line_number_strict() {
        assert!(validate_line_number("4165551234"));
        assert!(!validate_line_number("416555123"));
        assert!(!validate_line_number("41655512345"));
        assert!(!validate_line_number("416-555-1234"));
        assert!(!validate_line_number(""));
    }

    #[test]
    fn test_validate_line_number_rejects_non_ascii_digits() {
        // Arabic-Indic digits are decimal digits but not ASCII.
        assert!(!validate_line_number("٤١٦٥٥٥١٢٣٤"));
    }

    #[test]
    fn test_line_number_policy_digits() {
        assert!(LineNumberPolicy::Digits.accepts("5161"));
        assert!(LineNumberPolicy::Digits.accepts("4165551234"));
        assert!(!LineNumberPolicy::Digits.accepts(""));
        assert!(!LineNumberPolicy::Digits.accepts("555-1234"));
    }

    #[test]
    fn test_line_number_policy_any() {
        assert!(LineNumberPolicy::Any.accepts(""));
        assert!(LineNumberPolicy::Any.accepts("ext. 12"));
    }

    #[test]
    fn test_locality_policy() {
        assert!(LocalityPolicy::Any.accepts("M5V 2T6"));
        assert!(LocalityPolicy::Digits.accepts("12345"));
        assert!(!LocalityPolicy::Digits.accepts("M5V 2T6"));
        assert!(!LocalityPolicy::Digits.accepts(""));
    }

    #[test]
    fn test_validator_default_policies() {
        let validator = Validator::default();
        assert_eq!(validator.line_number_policy(), LineNumberPolicy::Strict);
        assert_eq!(validator.locality_policy(), LocalityPolicy::Any);
    }

    #[test]
    fn test_validator_check_emails_reports_first_failure() {
        let validator = Validator::default();
        let err = validator
            .check_emails(&["ok@example.com", "bad", "also bad"])
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedEmail {
                email: "bad".to_string()
            }
        );
    }

    #[test]
    fn test_validator_check_line_number_reports_policy() {
        let validator = Validator::new(LineNumberPolicy::Digits, LocalityPolicy::Any);
        assert!(validator.check_line_number("5161").is_ok());

        let err = validator.check_line_number("55x").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidLineNumber {
                policy: LineNumberPolicy::Digits,
                ..
            }
        ));
        assert!(err.to_string().contains("digits only"));
    }

    #[test]
    fn test_validator_check_locality_code() {
        let validator = Validator::new(LineNumberPolicy::Strict, LocalityPolicy::Digits);
        assert!(validator.check_locality_code("12345").is_ok());
        assert!(validator.check_locality_code("M5V").is_err());
    }

    #[test]
    fn test_strict_policy_display() {
        assert_eq!(
            LineNumberPolicy::Strict.to_string(),
            "expected exactly 10 digits"
        );
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&LineNumberPolicy::Strict).unwrap();
        assert_eq!(json, "\"strict\"");
        let policy: LocalityPolicy = serde_json::from_str("\"digits\"").unwrap();
        assert_eq!(policy, LocalityPolicy::Digits);
    }

    #[test]
    fn test_email_pattern_is_valid() {
        assert!(Regex::new(EMAIL_PATTERN).is_ok());
    }
}
