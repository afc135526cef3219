//! # Checksum Library
//!
//! Stateless check-digit algorithms, each in its own module, plus the
//! [`Algorithm`] selector that rule tables use to name one as data.
//!
//! Every function takes [`Digits`], so letters and separators are rejected
//! before any arithmetic happens. Where a check digit is embedded, it is the
//! trailing digit (two trailing digits for MOD 97-10).
//!
//! | Algorithm | Used for |
//! |-----------|----------|
//! | Luhn | South African ID and VAT numbers, payment cards, FIK/IUV check digits |
//! | MOD 97-10 | IBAN, ISO 11649 creditor references |
//! | Verhoeff | Indian Aadhaar |
//! | 7-3-1 | Finnish/Estonian payment references, ICAO MRZ |
//! | MOD 10 recursive | Swiss QR-bill references |
//! | IRD mod 11 | New Zealand IRD / GST numbers |

pub mod ird;
pub mod luhn;
pub mod mod97;
pub mod recursive;
pub mod verhoeff;
pub mod weighted;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use ird::{compute_ird_check_digit, validate_ird};
pub use luhn::{compute_luhn_check_digit, validate_luhn};
pub use mod97::{compute_mod97_check_digits, mod97, validate_mod97};
pub use recursive::{compute_mod10_recursive_check_digit, validate_mod10_recursive};
pub use verhoeff::{compute_verhoeff_check_digit, validate_verhoeff};
pub use weighted::{compute_731_check_digit, mrz_check_digit, validate_731};

use crate::digits::Digits;
use crate::error::UnknownName;

/// Names one of the digit-string checksum algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Luhn mod 10.
    #[serde(rename = "luhn")]
    Luhn,
    /// ISO 7064 MOD 97-10 (two check digits, residue 1).
    #[serde(rename = "mod97")]
    Mod97,
    /// Verhoeff dihedral check digit.
    #[serde(rename = "verhoeff")]
    Verhoeff,
    /// Right-to-left 7-3-1 weighting.
    #[serde(rename = "weighted-731")]
    Weighted731,
    /// MOD 10 recursive table algorithm.
    #[serde(rename = "mod10-recursive")]
    Mod10Recursive,
    /// New Zealand IRD mod 11.
    #[serde(rename = "ird-mod11")]
    IrdMod11,
}

impl Algorithm {
    /// Every algorithm, in declaration order.
    pub fn all() -> &'static [Algorithm] {
        &[
            Self::Luhn,
            Self::Mod97,
            Self::Verhoeff,
            Self::Weighted731,
            Self::Mod10Recursive,
            Self::IrdMod11,
        ]
    }

    /// Stable name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Luhn => "luhn",
            Self::Mod97 => "mod97",
            Self::Verhoeff => "verhoeff",
            Self::Weighted731 => "weighted-731",
            Self::Mod10Recursive => "mod10-recursive",
            Self::IrdMod11 => "ird-mod11",
        }
    }

    /// Number of trailing check digits the algorithm embeds.
    pub fn check_digit_count(&self) -> usize {
        match self {
            Self::Mod97 => 2,
            _ => 1,
        }
    }

    /// Validate a complete digit string, check digit(s) included.
    pub fn validate(&self, digits: &Digits<'_>) -> bool {
        match self {
            Self::Luhn => validate_luhn(digits),
            Self::Mod97 => validate_mod97(digits),
            Self::Verhoeff => validate_verhoeff(digits),
            Self::Weighted731 => validate_731(digits),
            Self::Mod10Recursive => validate_mod10_recursive(digits),
            Self::IrdMod11 => validate_ird(digits),
        }
    }

    /// Compute the check digit(s) to append to `payload`.
    ///
    /// `None` only for IRD, whose payload length is fixed and for which some
    /// bases have no valid check digit.
    pub fn compute(&self, payload: &Digits<'_>) -> Option<String> {
        match self {
            Self::Luhn => Some(compute_luhn_check_digit(payload).to_string()),
            Self::Mod97 => Some(format!("{:02}", compute_mod97_check_digits(payload))),
            Self::Verhoeff => Some(compute_verhoeff_check_digit(payload).to_string()),
            Self::Weighted731 => Some(compute_731_check_digit(payload).to_string()),
            Self::Mod10Recursive => Some(compute_mod10_recursive_check_digit(payload).to_string()),
            Self::IrdMod11 => compute_ird_check_digit(payload).map(|d| d.to_string()),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownName {
                what: "checksum algorithm",
                name: s.to_string(),
            })
    }
}
