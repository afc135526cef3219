//! New Zealand IRD number, mod 11.
//!
//! IRD numbers are 8 or 9 digits; 8-digit numbers are read with a leading
//! zero. The first eight digits are the base and the ninth the check digit.
//! Valid numbers lie strictly between 10,000,000 and 150,000,000.
//!
//! The base is weighted with the primary weights; remainder 0 gives check
//! digit 0, otherwise `11 - remainder`. A result of 10 is retried with the
//! secondary weights, and a second 10 means no valid check digit exists.

use crate::digits::Digits;

const PRIMARY: [u32; 8] = [3, 2, 7, 6, 5, 4, 3, 2];
const SECONDARY: [u32; 8] = [7, 4, 3, 2, 5, 2, 7, 6];

const MIN_EXCLUSIVE: u64 = 10_000_000;
const MAX_EXCLUSIVE: u64 = 150_000_000;

fn check_for_base(base: &[u8; 8]) -> Option<u8> {
    for weights in [PRIMARY, SECONDARY] {
        let sum: u32 = base
            .iter()
            .zip(weights.iter())
            .map(|(d, w)| u32::from(*d) * w)
            .sum();
        let check = match sum % 11 {
            0 => 0,
            r => 11 - r,
        };
        if check != 10 {
            return Some(check as u8);
        }
    }
    None
}

/// Left-pad a 7- or 8-digit payload to the 8-digit base.
fn base_from(payload: &Digits<'_>) -> Option<[u8; 8]> {
    let len = payload.len();
    if !(7..=8).contains(&len) {
        return None;
    }
    let mut base = [0u8; 8];
    for (slot, d) in base[8 - len..].iter_mut().zip(payload.values()) {
        *slot = d;
    }
    Some(base)
}

/// Validate an 8- or 9-digit IRD number.
pub fn validate_ird(digits: &Digits<'_>) -> bool {
    let Some((payload, check)) = digits.split_check() else {
        return false;
    };
    let Some(base) = base_from(&payload) else {
        return false;
    };
    // At most 9 digits, so this cannot overflow.
    let value: u64 = digits.values().fold(0u64, |acc, d| acc * 10 + u64::from(d));
    if value <= MIN_EXCLUSIVE || value >= MAX_EXCLUSIVE {
        return false;
    }
    check_for_base(&base) == Some(check)
}

/// Compute the IRD check digit for a 7- or 8-digit base.
///
/// Returns `None` if the payload has the wrong length or if neither weight
/// set yields a usable digit.
pub fn compute_ird_check_digit(payload: &Digits<'_>) -> Option<u8> {
    check_for_base(&base_from(payload)?)
}
