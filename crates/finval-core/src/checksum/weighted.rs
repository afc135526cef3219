//! Weighted 7-3-1 check digits.
//!
//! Two conventions share the cyclic weight sequence 7, 3, 1:
//!
//! - **Right to left** (Finnish and Estonian payment reference numbers): the
//!   payload is weighted from its rightmost digit, and the check digit brings
//!   the total to `0 mod 10`.
//! - **Left to right** (ICAO 9303 machine-readable zones): the field is
//!   weighted from its leftmost character and the check digit is the sum
//!   `mod 10`. MRZ fields are alphanumeric, with `<` as filler.

use crate::digits::Digits;
use crate::error::ValidationError;

const WEIGHTS: [u32; 3] = [7, 3, 1];

fn weighted_sum_from_right(payload: &Digits<'_>) -> u32 {
    payload
        .values()
        .rev()
        .zip(WEIGHTS.iter().cycle())
        .map(|(d, w)| u32::from(d) * w)
        .sum()
}

/// Check a right-to-left 7-3-1 string whose last digit is the check digit.
///
/// A single digit has no payload and is valid only if it is `0`.
pub fn validate_731(digits: &Digits<'_>) -> bool {
    match digits.split_check() {
        Some((payload, check)) => (weighted_sum_from_right(&payload) + u32::from(check)) % 10 == 0,
        None => digits.as_str() == "0",
    }
}

/// Compute the right-to-left 7-3-1 check digit for `payload`.
pub fn compute_731_check_digit(payload: &Digits<'_>) -> u8 {
    ((10 - weighted_sum_from_right(payload) % 10) % 10) as u8
}

/// ICAO 9303 MRZ check digit over `field` (`[0-9A-Z<]`), weighted left to
/// right. Letters count `A` = 10 … `Z` = 35 and `<` counts 0.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCharacter`] for anything outside the
/// MRZ alphabet.
pub fn mrz_check_digit(field: &str) -> Result<u8, ValidationError> {
    let mut sum = 0u32;
    for (position, (b, w)) in field.bytes().zip(WEIGHTS.iter().cycle()).enumerate() {
        let value = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'A'..=b'Z' => u32::from(b - b'A' + 10),
            b'<' => 0,
            _ => {
                let character = field[position..].chars().next().unwrap_or('\u{FFFD}');
                return Err(ValidationError::InvalidCharacter {
                    character,
                    position,
                });
            }
        };
        sum += value * w;
    }
    Ok((sum % 10) as u8)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn computed_check_digit_validates(payload in "[0-9]{1,25}") {
            let check = compute_731_check_digit(&Digits::new(&payload).unwrap());
            let full = format!("{payload}{check}");
            prop_assert!(validate_731(&Digits::new(&full).unwrap()));
        }

        /// Trailing filler never changes an MRZ check digit.
        #[test]
        fn mrz_filler_is_neutral(field in "[A-Z0-9]{1,20}", pad in 0usize..10) {
            let padded = format!("{field}{}", "<".repeat(pad));
            prop_assert_eq!(mrz_check_digit(&field).unwrap(), mrz_check_digit(&padded).unwrap());
        }
    }
}
