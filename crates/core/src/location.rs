//! Normalized lookup keys.
//!
//! Every static table and every alias table is keyed by a [`LocationKey`], so
//! user input such as `"  New   York "` and the table key `"new york"` meet
//! on the same string.

use std::fmt;

use crate::error::CoreError;

/// A lowercased, trimmed, whitespace-collapsed lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey(String);

impl LocationKey {
    /// Normalize raw input into a key.
    ///
    /// Returns `None` when nothing but whitespace remains.
    pub fn normalize(raw: &str) -> Option<Self> {
        let collapsed = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        if collapsed.is_empty() {
            None
        } else {
            Some(Self(collapsed))
        }
    }

    /// Normalize raw request input, failing with a validation error that
    /// carries `required_message` when the input is blank.
    pub fn parse(raw: &str, required_message: &str) -> Result<Self, CoreError> {
        Self::normalize(raw).ok_or_else(|| CoreError::Validation(required_message.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort provider code: the key upper-cased, unvalidated.
    pub fn to_code_guess(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        let key = LocationKey::normalize("  LONDON  ").unwrap();
        assert_eq!(key.as_str(), "london");
    }

    #[test]
    fn collapses_internal_whitespace() {
        let key = LocationKey::normalize("New \t  York").unwrap();
        assert_eq!(key.as_str(), "new york");
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(LocationKey::normalize("   ").is_none());
        assert!(LocationKey::normalize("").is_none());
    }

    #[test]
    fn parse_carries_the_required_message() {
        let err = LocationKey::parse(" ", "City is required").unwrap_err();
        match err {
            CoreError::Validation(msg) => assert_eq!(msg, "City is required"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = LocationKey::normalize(" Rio  de Janeiro ").unwrap();
        let twice = LocationKey::normalize(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn code_guess_is_uppercase() {
        let key = LocationKey::normalize("xx").unwrap();
        assert_eq!(key.to_code_guess(), "XX");
    }
}
