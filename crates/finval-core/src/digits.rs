//! # Checked Digit Strings
//!
//! Every checksum primitive operates on decimal digits only. [`Digits`] is
//! the proof that a string was checked: it can only be constructed from a
//! non-empty `[0-9]+` string, so a checksum function taking `&Digits` cannot
//! be handed a letter or separator and silently mis-compute.

use crate::error::ValidationError;

/// A borrowed, non-empty string of ASCII decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digits<'a>(&'a str);

impl<'a> Digits<'a> {
    /// Check `s` and wrap it.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidInput`] if `s` is empty.
    /// - [`ValidationError::InvalidCharacter`] at the first non-digit.
    pub fn new(s: &'a str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::InvalidInput);
        }
        if let Some(position) = s.bytes().position(|b| !b.is_ascii_digit()) {
            // Position is a byte offset; recover the full char for the message.
            let character = s[position..].chars().next().unwrap_or('\u{FFFD}');
            return Err(ValidationError::InvalidCharacter {
                character,
                position,
            });
        }
        Ok(Self(s))
    }

    /// The underlying digit string.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Number of digits. Never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Digit values, left to right.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = u8> + ExactSizeIterator + 'a {
        self.0.bytes().map(|b| b - b'0')
    }

    /// Split off the trailing check digit: `(payload, check)`.
    ///
    /// Returns `None` for a single-digit string, which has no payload.
    pub fn split_check(&self) -> Option<(Digits<'a>, u8)> {
        if self.0.len() < 2 {
            return None;
        }
        let (payload, check) = self.0.split_at(self.0.len() - 1);
        Some((Digits(payload), check.as_bytes()[0] - b'0'))
    }
}

impl<'a> TryFrom<&'a str> for Digits<'a> {
    type Error = ValidationError;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl std::fmt::Display for Digits<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
