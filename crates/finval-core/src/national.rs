//! # Table-Driven Identifiers
//!
//! Non-IBAN identifiers are described as data: a [`StructuralRule`] plus a
//! [`CheckScheme`]. One generic function validates all of them, so adding an
//! identifier means adding a table row, not a type.
//!
//! Identifiers whose national checksum has no public specification (for
//! example the Moroccan ICE) are deliberately absent; their rows would have
//! to guess.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::checksum::Algorithm;
use crate::digits::Digits;
use crate::error::{UnknownName, ValidationError};
use crate::normalize::normalize;
use crate::reference::{creditor_reference_rule, verify_check_digits};
use crate::structure::{validate_structure, CharClass, LengthSpec, Segment, StructuralRule};

/// How the check digits of an identifier are verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckScheme {
    /// Structure only.
    None,
    /// The whole normalized identifier is a digit string checked by `Algorithm`.
    Digits(Algorithm),
    /// ISO 11649 rearrangement followed by MOD 97-10.
    CreditorReference,
}

/// One row of the identifier table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierDefinition {
    /// Shape of the normalized identifier.
    pub rule: StructuralRule,
    /// Checksum applied after the structure passes.
    pub check: CheckScheme,
    /// Human-readable name.
    pub description: &'static str,
}

/// The table-driven identifier types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierKind {
    /// ISO 9362 Business Identifier Code.
    Bic,
    /// ISO 11649 RF creditor reference.
    CreditorReference,
    /// South African identity number.
    ZaId,
    /// South African VAT number.
    ZaVat,
    /// Indian Aadhaar number.
    InAadhaar,
    /// Swiss QR-bill reference (QRR).
    ChQrReference,
    /// Finnish national payment reference (viitenumero).
    FiReference,
    /// New Zealand IRD / GST number.
    NzIrd,
}

impl IdentifierKind {
    /// Every kind, in declaration order.
    pub fn all() -> &'static [IdentifierKind] {
        &[
            Self::Bic,
            Self::CreditorReference,
            Self::ZaId,
            Self::ZaVat,
            Self::InAadhaar,
            Self::ChQrReference,
            Self::FiReference,
            Self::NzIrd,
        ]
    }

    /// Stable name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bic => "bic",
            Self::CreditorReference => "creditor-reference",
            Self::ZaId => "za-id",
            Self::ZaVat => "za-vat",
            Self::InAadhaar => "in-aadhaar",
            Self::ChQrReference => "ch-qr-reference",
            Self::FiReference => "fi-reference",
            Self::NzIrd => "nz-ird",
        }
    }

    /// The table row for this kind.
    pub fn definition(&self) -> IdentifierDefinition {
        use CharClass::{Alnum, Digit, Letter};

        let digits_only = |length: LengthSpec| {
            StructuralRule::new(length).segment(Segment::tail(0, Digit))
        };

        let (rule, check, description) = match self {
            Self::Bic => (
                StructuralRule::new(LengthSpec::OneOf(vec![8, 11]))
                    .segment(Segment::new(0, 4, Letter))
                    .segment(Segment::new(4, 2, Letter))
                    .segment(Segment::new(6, 2, Alnum))
                    .segment(Segment::tail(8, Alnum)),
                CheckScheme::None,
                "Business Identifier Code (ISO 9362)",
            ),
            Self::CreditorReference => (
                creditor_reference_rule(),
                CheckScheme::CreditorReference,
                "Structured creditor reference (ISO 11649)",
            ),
            Self::ZaId => (
                digits_only(LengthSpec::Exact(13)),
                CheckScheme::Digits(Algorithm::Luhn),
                "South African identity number",
            ),
            Self::ZaVat => (
                digits_only(LengthSpec::Exact(10)).with_prefix("4"),
                CheckScheme::Digits(Algorithm::Luhn),
                "South African VAT number",
            ),
            Self::InAadhaar => (
                digits_only(LengthSpec::Exact(12)),
                CheckScheme::Digits(Algorithm::Verhoeff),
                "Indian Aadhaar number",
            ),
            Self::ChQrReference => (
                digits_only(LengthSpec::Exact(27)),
                CheckScheme::Digits(Algorithm::Mod10Recursive),
                "Swiss QR-bill reference",
            ),
            Self::FiReference => (
                digits_only(LengthSpec::Range { min: 4, max: 20 }),
                CheckScheme::Digits(Algorithm::Weighted731),
                "Finnish payment reference",
            ),
            Self::NzIrd => (
                digits_only(LengthSpec::OneOf(vec![8, 9])),
                CheckScheme::Digits(Algorithm::IrdMod11),
                "New Zealand IRD number",
            ),
        };

        IdentifierDefinition {
            rule,
            check,
            description,
        }
    }

    /// Normalize `raw`, check its structure, then its check digits.
    ///
    /// Returns the normalized identifier.
    ///
    /// # Errors
    ///
    /// The first failing check: `InvalidInput`, `InvalidLength`,
    /// `MissingPrefix`/`InvalidFormat`, then `InvalidChecksum`.
    pub fn validate(&self, raw: &str) -> Result<String, ValidationError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(ValidationError::InvalidInput);
        }

        let definition = self.definition();
        validate_structure(&normalized, &definition.rule)?;

        match definition.check {
            CheckScheme::None => {}
            CheckScheme::Digits(algorithm) => {
                let digits = Digits::new(&normalized)?;
                if !algorithm.validate(&digits) {
                    return Err(ValidationError::InvalidChecksum { algorithm });
                }
            }
            CheckScheme::CreditorReference => verify_check_digits(&normalized)?,
        }

        Ok(normalized)
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownName {
                what: "identifier kind",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn valid_examples_for_every_kind() {
        let cases = [
            (IdentifierKind::Bic, "DEUTDEFF500"),
            (IdentifierKind::CreditorReference, "RF18 5390 0754 7034"),
            (IdentifierKind::ZaId, "800101 5009 087"),
            (IdentifierKind::ZaVat, "4230123459"),
            (IdentifierKind::InAadhaar, "2341 2341 2346"),
            (IdentifierKind::ChQrReference, "21 00000 00003 13947 14300 09017"),
            (IdentifierKind::FiReference, "1234561"),
            (IdentifierKind::NzIrd, "49-091-850"),
        ];
        for (kind, raw) in cases {
            let result = kind.validate(raw);
            assert!(result.is_ok(), "{kind} rejected {raw}: {result:?}");
        }
    }

    #[test]
    fn returns_normalized_form() {
        assert_eq!(
            IdentifierKind::NzIrd.validate("49-091-850").unwrap(),
            "49091850"
        );
        assert_eq!(
            IdentifierKind::Bic.validate("deut de ff").unwrap(),
            "DEUTDEFF"
        );
    }

    #[test]
    fn checksum_failures_name_the_algorithm() {
        let cases = [
            (IdentifierKind::ZaId, "8001015009088", Algorithm::Luhn),
            (IdentifierKind::ZaVat, "4230123458", Algorithm::Luhn),
            (IdentifierKind::InAadhaar, "234123412347", Algorithm::Verhoeff),
            (
                IdentifierKind::ChQrReference,
                "210000000003139471430009018",
                Algorithm::Mod10Recursive,
            ),
            (IdentifierKind::FiReference, "1234562", Algorithm::Weighted731),
            (IdentifierKind::NzIrd, "136410133", Algorithm::IrdMod11),
            (IdentifierKind::CreditorReference, "RF19539007547034", Algorithm::Mod97),
        ];
        for (kind, raw, algorithm) in cases {
            assert_eq!(
                kind.validate(raw),
                Err(ValidationError::InvalidChecksum { algorithm }),
                "{kind} {raw}"
            );
        }
    }

    #[test]
    fn structure_checked_before_checksum() {
        let short = IdentifierKind::ZaId.validate("80010150090").unwrap_err();
        assert_eq!(short.kind(), ErrorKind::InvalidLength);
        let lettered = IdentifierKind::ZaId.validate("80010150090A7").unwrap_err();
        assert_eq!(lettered.kind(), ErrorKind::InvalidFormat);
        // Right length, wrong leading digit.
        assert_eq!(
            IdentifierKind::ZaVat.validate("5230123459").unwrap_err(),
            ValidationError::MissingPrefix {
                expected: "4".to_string()
            }
        );
    }

    #[test]
    fn empty_input_for_every_kind() {
        for kind in IdentifierKind::all() {
            assert_eq!(kind.validate(" .-"), Err(ValidationError::InvalidInput));
        }
    }

    #[test]
    fn as_str_roundtrip_and_serde() {
        for kind in IdentifierKind::all() {
            let parsed: IdentifierKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
        assert!("ma-ice".parse::<IdentifierKind>().is_err());
    }

    #[test]
    fn every_definition_has_a_description() {
        for kind in IdentifierKind::all() {
            assert!(!kind.definition().description.is_empty());
        }
    }
}
