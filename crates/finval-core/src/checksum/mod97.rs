//! ISO 7064 MOD 97-10.
//!
//! The digit string is read as one large decimal number and reduced mod 97
//! one digit at a time, so no big-integer arithmetic is needed however long
//! the input grows. A string carrying valid MOD 97-10 check digits has
//! residue 1.

use crate::digits::Digits;

/// Residue of the decimal number `digits` modulo 97 (0..=96).
pub fn mod97(digits: &Digits<'_>) -> u32 {
    digits
        .values()
        .fold(0u32, |r, d| (r * 10 + u32::from(d)) % 97)
}

/// Check digits (2..=98) that make `payload ‖ check` have residue 1.
///
/// Equivalent to `98 - mod97(payload ‖ "00")`.
pub fn compute_mod97_check_digits(payload: &Digits<'_>) -> u32 {
    // Appending "00" multiplies by 100.
    let shifted = (mod97(payload) * 100) % 97;
    98 - shifted
}

/// `true` when `digits` has residue 1.
pub fn validate_mod97(digits: &Digits<'_>) -> bool {
    mod97(digits) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Digits<'_> {
        Digits::new(s).unwrap()
    }

    #[test]
    fn rearranged_belgian_iban() {
        assert_eq!(mod97(&d("539007547034111468")), 1);
        assert_ne!(mod97(&d("539007547034111469")), 1);
    }

    #[test]
    fn small_values() {
        assert_eq!(mod97(&d("0")), 0);
        assert_eq!(mod97(&d("96")), 96);
        assert_eq!(mod97(&d("97")), 0);
        assert_eq!(mod97(&d("98")), 1);
    }

    #[test]
    fn long_input_does_not_overflow() {
        let long = "9".repeat(200);
        let r = mod97(&d(&long));
        assert!(r < 97);
    }

    #[test]
    fn compute_check_digits_for_belgian_bban() {
        // 539007547034 ‖ "BE" ‖ "00" → check digits 68.
        assert_eq!(compute_mod97_check_digits(&d("5390075470341114")), 68);
    }

    #[test]
    fn validate_wrapper() {
        assert!(validate_mod97(&d("539007547034111468")));
        assert!(!validate_mod97(&d("539007547034111400")));
    }
}
