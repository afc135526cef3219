//! # Structured Creditor Reference (ISO 11649)
//!
//! An RF reference is `RF` + two check digits + a 1-21 character body of
//! letters and digits. It reuses the MOD 97-10 primitive in both
//! directions: generation solves for the check digits that bring the
//! residue to 1, validation expects residue 1.
//!
//! The checksum input is the body followed by `RF` and the check digits,
//! with letters expanded: `RF18539007547034` checks `539007547034 ‖ 2715 ‖ 18`.

use crate::checksum::{compute_mod97_check_digits, mod97, Algorithm};
use crate::digits::Digits;
use crate::error::ValidationError;
use crate::identity::CreditorReference;
use crate::letters::expand;
use crate::national::IdentifierKind;
use crate::normalize::normalize;
use crate::structure::{CharClass, LengthSpec, Segment, StructuralRule};

/// Longest permitted reference body.
pub const MAX_BODY_LEN: usize = 21;

const PREFIX: &str = "RF";

/// Structural rule for a complete RF reference.
pub fn creditor_reference_rule() -> StructuralRule {
    StructuralRule::new(LengthSpec::Range {
        min: PREFIX.len() + 2 + 1,
        max: PREFIX.len() + 2 + MAX_BODY_LEN,
    })
    .with_prefix(PREFIX)
    .segment(Segment::new(2, 2, CharClass::Digit))
    .segment(Segment::tail(4, CharClass::Alnum))
}

/// Generate the RF reference for `body`.
///
/// # Errors
///
/// - [`ValidationError::InvalidInput`] if the body normalizes to nothing.
/// - [`ValidationError::InvalidLength`] if it exceeds 21 characters.
pub fn generate_creditor_reference(body: &str) -> Result<CreditorReference, ValidationError> {
    let body = normalize(body);
    if body.is_empty() {
        return Err(ValidationError::InvalidInput);
    }
    if body.len() > MAX_BODY_LEN {
        return Err(ValidationError::InvalidLength {
            expected: LengthSpec::Range {
                min: 1,
                max: MAX_BODY_LEN,
            },
            actual: body.len(),
        });
    }
    let numeric = expand(&format!("{body}{PREFIX}"))?;
    let check = compute_mod97_check_digits(&Digits::new(&numeric)?);
    Ok(CreditorReference::from_validated(format!("{PREFIX}{check:02}{body}")))
}

/// Normalize and validate an RF reference.
///
/// # Errors
///
/// Returns the first structural failure, or
/// [`ValidationError::InvalidChecksum`] on a check digit mismatch.
pub fn validate_creditor_reference(raw: &str) -> Result<CreditorReference, ValidationError> {
    IdentifierKind::CreditorReference
        .validate(raw)
        .map(CreditorReference::from_validated)
}

/// Checksum stage for a normalized, structurally valid RF reference.
pub(crate) fn verify_check_digits(normalized: &str) -> Result<(), ValidationError> {
    let mismatch = ValidationError::InvalidChecksum {
        algorithm: Algorithm::Mod97,
    };
    let (head, body) = normalized.split_at(4);
    // 00, 01 and 99 alias 97, 98 and 02 and are never issued.
    if matches!(&head[2..], "00" | "01" | "99") {
        return Err(mismatch);
    }
    let numeric = expand(&format!("{body}{head}"))?;
    if mod97(&Digits::new(&numeric)?) != 1 {
        return Err(mismatch);
    }
    Ok(())
}
