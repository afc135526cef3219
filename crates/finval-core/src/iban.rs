//! # Generic IBAN Pipeline
//!
//! One pipeline serves every country. The country layer supplies only data:
//! the country code, the total IBAN length, and a BBAN check.
//!
//! ```text
//! normalize → length → country code → check digits numeric → BBAN
//!           → rearrange (BBAN ‖ CC ‖ check) → expand letters → MOD 97-10 == 1
//! ```
//!
//! Every structural stage runs before the checksum. The first failing stage
//! is reported together with the error, and nothing after it runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checksum::{compute_mod97_check_digits, mod97, Algorithm};
use crate::digits::Digits;
use crate::error::{ErrorKind, ValidationError};
use crate::identity::Iban;
use crate::letters::expand;
use crate::normalize::normalize;
use crate::structure::{CharClass, LengthSpec};

/// Pipeline stage at which an IBAN was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IbanStage {
    /// Nothing left after normalization.
    Normalize,
    /// Total length check.
    Length,
    /// Country code comparison (or lookup, in the registry).
    CountryCode,
    /// Positions 3-4 must be digits.
    CheckDigits,
    /// Country-specific BBAN structure.
    Bban,
    /// MOD 97-10 verification.
    Checksum,
}

impl std::fmt::Display for IbanStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Normalize => "normalize",
            Self::Length => "length",
            Self::CountryCode => "country_code",
            Self::CheckDigits => "check_digits",
            Self::Bban => "bban",
            Self::Checksum => "checksum",
        };
        f.write_str(s)
    }
}

/// An IBAN rejection: the failing stage and what went wrong there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("IBAN rejected at {stage} stage: {error}")]
pub struct IbanError {
    /// Stage that failed.
    pub stage: IbanStage,
    /// The failure itself.
    #[source]
    pub error: ValidationError,
}

impl IbanError {
    pub(crate) fn new(stage: IbanStage, error: ValidationError) -> Self {
        tracing::trace!(%stage, kind = %error.kind(), "IBAN rejected");
        Self { stage, error }
    }

    /// Taxonomy bucket of the underlying failure.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Check digits ISO 13616 never issues. `00` and `97` share a residue, as
/// do `01`/`98` and `99`/`02`, so the higher pair member is the real one.
const RESERVED_CHECK_DIGITS: [&str; 3] = ["00", "01", "99"];

/// Validate `raw` as an IBAN of `country` with total length `length`.
///
/// `bban_validate` receives the normalized BBAN (everything after the first
/// four characters) and its error is propagated unchanged, tagged with
/// [`IbanStage::Bban`].
///
/// This is stricter than a bare `mod 97 == 1` check: non-digit check digits
/// fail at the check-digit stage, and the reserved pairs `00`, `01` and `99`
/// fail the checksum even when the residue is 1.
///
/// # Errors
///
/// Returns an [`IbanError`] naming the first failing stage:
/// `InvalidInput` (normalize), `InvalidLength` (length),
/// `InvalidCountryCode` (country code), `InvalidFormat` (check digits),
/// whatever `bban_validate` returns (BBAN), or `InvalidChecksum` (checksum).
pub fn validate_iban<F>(
    raw: &str,
    country: &str,
    length: usize,
    bban_validate: F,
) -> Result<Iban, IbanError>
where
    F: Fn(&str) -> Result<(), ValidationError>,
{
    let normalized = normalize(raw);
    validate_normalized_iban(normalized, country, length, bban_validate)
}

/// The pipeline minus normalization, for callers that already normalized
/// (the registry normalizes once to find the country).
pub(crate) fn validate_normalized_iban<F>(
    normalized: String,
    country: &str,
    length: usize,
    bban_validate: F,
) -> Result<Iban, IbanError>
where
    F: Fn(&str) -> Result<(), ValidationError>,
{
    if normalized.is_empty() {
        return Err(IbanError::new(IbanStage::Normalize, ValidationError::InvalidInput));
    }

    if normalized.len() != length {
        return Err(IbanError::new(
            IbanStage::Length,
            ValidationError::InvalidLength {
                expected: LengthSpec::Exact(length),
                actual: normalized.len(),
            },
        ));
    }

    let actual_country = normalized.get(..2).unwrap_or(&normalized);
    if !actual_country.eq_ignore_ascii_case(country) {
        return Err(IbanError::new(
            IbanStage::CountryCode,
            ValidationError::InvalidCountryCode {
                expected: country.to_ascii_uppercase(),
                actual: actual_country.to_string(),
            },
        ));
    }

    let check = normalized.get(2..4).unwrap_or_default();
    if let Some(offset) = check.bytes().position(|b| !b.is_ascii_digit()) {
        return Err(IbanError::new(
            IbanStage::CheckDigits,
            ValidationError::InvalidFormat {
                segment: 0,
                position: 2 + offset,
                expected: CharClass::Digit,
            },
        ));
    }

    let bban = normalized.get(4..).unwrap_or_default();
    bban_validate(bban).map_err(|e| IbanError::new(IbanStage::Bban, e))?;

    let checksum_error = || {
        IbanError::new(
            IbanStage::Checksum,
            ValidationError::InvalidChecksum {
                algorithm: Algorithm::Mod97,
            },
        )
    };

    if RESERVED_CHECK_DIGITS.contains(&check) {
        return Err(checksum_error());
    }

    let head = normalized.get(..4).unwrap_or_default();
    let rearranged = format!("{bban}{head}");
    let numeric = expand(&rearranged).map_err(|e| IbanError::new(IbanStage::Checksum, e))?;
    let digits = Digits::new(&numeric).map_err(|e| IbanError::new(IbanStage::Checksum, e))?;
    if mod97(&digits) != 1 {
        return Err(checksum_error());
    }

    Ok(Iban::from_validated(normalized))
}

/// Compute the two IBAN check digits for `country` and `bban`.
///
/// Both inputs are normalized first.
///
/// # Errors
///
/// - [`ValidationError::InvalidCountryCode`] if `country` is not two letters.
/// - [`ValidationError::InvalidInput`] if the BBAN is empty.
pub fn compute_check_digits(country: &str, bban: &str) -> Result<String, ValidationError> {
    let country_code = normalize(country);
    if country_code.len() != 2 || !country_code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidCountryCode {
            expected: "two letters".to_string(),
            actual: country.to_string(),
        });
    }
    let bban = normalize(bban);
    if bban.is_empty() {
        return Err(ValidationError::InvalidInput);
    }
    let numeric = expand(&format!("{bban}{country_code}"))?;
    let payload = Digits::new(&numeric)?;
    Ok(format!("{:02}", compute_mod97_check_digits(&payload)))
}
