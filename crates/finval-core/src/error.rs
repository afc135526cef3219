//! # Error Types
//!
//! Defines the error types used throughout finval. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Expected validation failures are values, never panics. Every
//!   [`ValidationError`] maps onto exactly one [`ErrorKind`] so callers can
//!   render a single actionable message per rejected identifier.
//! - Structural failures carry the failing segment, byte position and the
//!   character class that was expected there.
//! - Rule and configuration problems ([`RuleError`]) are kept apart from
//!   validation failures: they describe a broken rule table, not bad input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checksum::Algorithm;
use crate::iban::IbanError;
use crate::structure::{CharClass, LengthSpec};

/// Top-level error type for finval.
#[derive(Error, Debug)]
pub enum FinvalError {
    /// An identifier failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An IBAN failed one of the pipeline stages.
    #[error(transparent)]
    Iban(#[from] IbanError),

    /// A structural rule or rule configuration is malformed.
    #[error("rule error: {0}")]
    Rule(#[from] RuleError),
}

/// Coarse classification of a validation failure.
///
/// This is the taxonomy presentation layers key their messages on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Empty, or nothing left after normalization.
    InvalidInput,
    /// Normalized length is not one of the accepted lengths.
    InvalidLength,
    /// A segment failed its character-class check, or a required prefix is absent.
    InvalidFormat,
    /// IBAN country code present but not the expected one.
    InvalidCountryCode,
    /// The check digit(s) do not match.
    InvalidChecksum,
    /// A character outside the supported alphabet reached a checksum primitive.
    InvalidCharacter,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InvalidInput => "invalid_input",
            Self::InvalidLength => "invalid_length",
            Self::InvalidFormat => "invalid_format",
            Self::InvalidCountryCode => "invalid_country_code",
            Self::InvalidChecksum => "invalid_checksum",
            Self::InvalidCharacter => "invalid_character",
        };
        f.write_str(s)
    }
}

/// A single validation failure. The first failing check wins; failures are
/// never aggregated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was empty or contained no letters or digits.
    #[error("input is empty")]
    InvalidInput,

    /// Length check failed.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Accepted length(s).
        expected: LengthSpec,
        /// Length of the normalized input.
        actual: usize,
    },

    /// A required fixed prefix is absent.
    #[error("missing required prefix '{expected}'")]
    MissingPrefix {
        /// The prefix the rule requires.
        expected: String,
    },

    /// A structural segment contained a character outside its class.
    #[error("invalid format in segment {segment}: expected {expected} at position {position}")]
    InvalidFormat {
        /// Zero-based index of the failing segment within its rule.
        segment: usize,
        /// Byte position of the offending character.
        position: usize,
        /// Class the segment declares.
        expected: CharClass,
    },

    /// IBAN country code does not match the expected country.
    #[error("invalid country code: expected '{expected}', got '{actual}'")]
    InvalidCountryCode {
        /// Country the caller validates for.
        expected: String,
        /// Country code found in the input.
        actual: String,
    },

    /// The embedded check digit(s) do not satisfy the algorithm.
    #[error("{algorithm} checksum mismatch")]
    InvalidChecksum {
        /// Algorithm that rejected the input.
        algorithm: Algorithm,
    },

    /// A character outside the primitive's alphabet was supplied.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte position within the primitive's input.
        position: usize,
    },
}

impl ValidationError {
    /// The taxonomy bucket this failure belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput => ErrorKind::InvalidInput,
            Self::InvalidLength { .. } => ErrorKind::InvalidLength,
            Self::MissingPrefix { .. } | Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::InvalidCountryCode { .. } => ErrorKind::InvalidCountryCode,
            Self::InvalidChecksum { .. } => ErrorKind::InvalidChecksum,
            Self::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
        }
    }
}

/// A name did not match any known variant of a selector enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {what}: {name:?}")]
pub struct UnknownName {
    /// What kind of name was being parsed.
    pub what: &'static str,
    /// The name that was supplied.
    pub name: String,
}

/// A structural rule, rule table entry, or rule configuration is malformed.
#[derive(Error, Debug)]
pub enum RuleError {
    /// SWIFT BBAN notation could not be parsed.
    #[error("invalid BBAN format '{format}': {reason}")]
    InvalidFormatNotation {
        /// The offending notation string.
        format: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Country code is not two ASCII letters.
    #[error("invalid country code '{0}': must be two ASCII letters")]
    InvalidCountry(String),

    /// Declared IBAN length disagrees with the BBAN format.
    #[error("country {country}: declared length {declared} but BBAN format implies {implied}")]
    LengthMismatch {
        /// Country of the inconsistent entry.
        country: String,
        /// Length declared in the entry.
        declared: usize,
        /// Length implied by `4 + bban length`.
        implied: usize,
    },

    /// YAML configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    Config(#[from] serde_yaml::Error),
}
