//! Luhn mod 10.
//!
//! Weights alternate 1, 2, 1, 2, … starting from the rightmost digit of the
//! full string (check digit included). A doubled value above 9 has 9
//! subtracted. The string is valid when the weighted sum is `0 mod 10`.

use crate::digits::Digits;

/// Weighted Luhn sum. `double_first` selects whether the rightmost digit is
/// doubled: `false` when it is the check digit, `true` when computing one.
fn luhn_sum(digits: &Digits<'_>, double_first: bool) -> u32 {
    digits
        .values()
        .rev()
        .enumerate()
        .map(|(i, d)| {
            let d = u32::from(d);
            if (i % 2 == 0) == double_first {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum()
}

/// Check the trailing Luhn check digit.
pub fn validate_luhn(digits: &Digits<'_>) -> bool {
    luhn_sum(digits, false) % 10 == 0
}

/// Compute the digit that, appended to `payload`, makes it Luhn-valid.
pub fn compute_luhn_check_digit(payload: &Digits<'_>) -> u8 {
    ((10 - luhn_sum(payload, true) % 10) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Digits<'_> {
        Digits::new(s).unwrap()
    }

    #[test]
    fn reference_vector() {
        assert!(validate_luhn(&d("79927398713")));
        assert!(!validate_luhn(&d("79927398710")));
        assert_eq!(compute_luhn_check_digit(&d("7992739871")), 3);
    }

    #[test]
    fn payment_card_test_numbers() {
        assert!(validate_luhn(&d("4111111111111111")));
        assert!(validate_luhn(&d("5500000000000004")));
        assert!(!validate_luhn(&d("4111111111111112")));
    }

    #[test]
    fn south_african_id_number() {
        assert!(validate_luhn(&d("8001015009087")));
        assert!(!validate_luhn(&d("8001015009088")));
    }

    #[test]
    fn single_digits() {
        assert!(validate_luhn(&d("0")));
        assert!(!validate_luhn(&d("5")));
        assert_eq!(compute_luhn_check_digit(&d("0")), 0);
        // 9 doubled is 18, minus 9 is 9; check is 1.
        assert_eq!(compute_luhn_check_digit(&d("9")), 1);
    }

    #[test]
    fn detects_single_digit_error() {
        assert!(!validate_luhn(&d("79927398813")));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Appending the computed check digit always yields a valid string.
        #[test]
        fn computed_check_digit_validates(payload in "[0-9]{1,30}") {
            let check = compute_luhn_check_digit(&Digits::new(&payload).unwrap());
            let full = format!("{payload}{check}");
            prop_assert!(validate_luhn(&Digits::new(&full).unwrap()));
        }

        /// Any other trailing digit is rejected.
        #[test]
        fn wrong_check_digit_rejected(payload in "[0-9]{1,30}", delta in 1u8..10) {
            let check = compute_luhn_check_digit(&Digits::new(&payload).unwrap());
            let full = format!("{payload}{}", (check + delta) % 10);
            prop_assert!(!validate_luhn(&Digits::new(&full).unwrap()));
        }
    }
}
