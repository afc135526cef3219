//! # Identifier Newtypes
//!
//! Validated value types for the identifiers finval parses. Each is a
//! distinct type, so an [`Iban`] cannot be passed where a [`Bic`] is
//! expected, and each can only be obtained through validation.
//!
//! ## Validation
//!
//! Constructors normalize and fully validate (structure and checksum).
//! `Deserialize` routes through the same constructors, so an invalid value
//! is rejected at deserialization time rather than silently accepted.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::iban::IbanError;
use crate::national::IdentifierKind;
use crate::reference::validate_creditor_reference;
use crate::registry::IbanRegistry;

/// Implement `Deserialize` for a string newtype by deserializing a plain
/// `String` and passing it through the type's `new()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// IBAN
// ---------------------------------------------------------------------------

/// International Bank Account Number (ISO 13616), stored in electronic
/// format: upper case, no spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Iban(String);

impl_validating_deserialize!(Iban);

impl Iban {
    /// Validate `raw` against the built-in country registry.
    ///
    /// # Errors
    ///
    /// Returns an [`IbanError`] naming the failing stage.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IbanError> {
        IbanRegistry::builtin().validate(raw.as_ref())
    }

    /// Wrap a string the pipeline has already validated.
    pub(crate) fn from_validated(normalized: String) -> Self {
        Self(normalized)
    }

    /// Electronic format.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ISO 3166-1 alpha-2 country code.
    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    /// The two check digits.
    pub fn check_digits(&self) -> &str {
        &self.0[2..4]
    }

    /// The country-specific Basic Bank Account Number.
    pub fn bban(&self) -> &str {
        &self.0[4..]
    }

    /// Print format: groups of four separated by single spaces.
    pub fn to_print_format(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + self.0.len() / 4);
        for (i, c) in self.0.chars().enumerate() {
            if i > 0 && i % 4 == 0 {
                out.push(' ');
            }
            out.push(c);
        }
        out
    }
}

impl std::fmt::Display for Iban {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_print_format())
    }
}

impl std::str::FromStr for Iban {
    type Err = IbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// BIC
// ---------------------------------------------------------------------------

/// Business Identifier Code (ISO 9362): 8 or 11 characters.
///
/// - bank (institution) code: 4 letters
/// - country code: 2 letters
/// - location code: 2 letters or digits
/// - branch code: 3 letters or digits, optional
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bic(String);

impl_validating_deserialize!(Bic);

impl Bic {
    /// Normalize and validate a BIC.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for the first structural defect.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        IdentifierKind::Bic.validate(raw.as_ref()).map(Self)
    }

    /// The normalized BIC.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Institution code (characters 1-4).
    pub fn bank_code(&self) -> &str {
        &self.0[..4]
    }

    /// Country code (characters 5-6).
    pub fn country_code(&self) -> &str {
        &self.0[4..6]
    }

    /// Location code (characters 7-8).
    pub fn location_code(&self) -> &str {
        &self.0[6..8]
    }

    /// Branch code (characters 9-11). `None` for an 8-character BIC, which
    /// designates the primary office.
    pub fn branch_code(&self) -> Option<&str> {
        self.0.get(8..11)
    }

    /// Test and training BICs carry `0` as the second location character.
    pub fn is_test(&self) -> bool {
        self.0.as_bytes()[7] == b'0'
    }
}

impl std::fmt::Display for Bic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Creditor reference
// ---------------------------------------------------------------------------

/// ISO 11649 structured creditor reference (`RF` + 2 check digits + up to
/// 21 letters or digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CreditorReference(String);

impl_validating_deserialize!(CreditorReference);

impl CreditorReference {
    /// Normalize and validate a creditor reference.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a structural defect or a check
    /// digit mismatch.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_creditor_reference(raw.as_ref())
    }

    pub(crate) fn from_validated(normalized: String) -> Self {
        Self(normalized)
    }

    /// Electronic format.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two check digits.
    pub fn check_digits(&self) -> &str {
        &self.0[2..4]
    }

    /// The reference body after `RF` and the check digits.
    pub fn body(&self) -> &str {
        &self.0[4..]
    }

    /// Print format: groups of four separated by single spaces.
    pub fn to_print_format(&self) -> String {
        self.0
            .as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for CreditorReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
