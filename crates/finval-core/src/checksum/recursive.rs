//! MOD 10 recursive (Swiss ESR / QR-bill reference numbers).
//!
//! A carry walks a fixed 10×10 transition table one digit at a time, left to
//! right. The check digit is `(10 - carry) % 10`; running the table over a
//! complete reference, check digit included, ends in carry 0.

use crate::digits::Digits;

const TABLE: [[u8; 10]; 10] = [
    [0, 9, 4, 6, 8, 2, 7, 1, 3, 5],
    [9, 4, 6, 8, 2, 7, 1, 3, 5, 0],
    [4, 6, 8, 2, 7, 1, 3, 5, 0, 9],
    [6, 8, 2, 7, 1, 3, 5, 0, 9, 4],
    [8, 2, 7, 1, 3, 5, 0, 9, 4, 6],
    [2, 7, 1, 3, 5, 0, 9, 4, 6, 8],
    [7, 1, 3, 5, 0, 9, 4, 6, 8, 2],
    [1, 3, 5, 0, 9, 4, 6, 8, 2, 7],
    [3, 5, 0, 9, 4, 6, 8, 2, 7, 1],
    [5, 0, 9, 4, 6, 8, 2, 7, 1, 3],
];

fn carry(digits: &Digits<'_>) -> u8 {
    digits
        .values()
        .fold(0u8, |c, d| TABLE[usize::from(c)][usize::from(d)])
}

/// Check a MOD 10 recursive string whose last digit is the check digit.
pub fn validate_mod10_recursive(digits: &Digits<'_>) -> bool {
    carry(digits) == 0
}

/// Compute the MOD 10 recursive check digit for `payload`.
pub fn compute_mod10_recursive_check_digit(payload: &Digits<'_>) -> u8 {
    (10 - carry(payload)) % 10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Digits<'_> {
        Digits::new(s).unwrap()
    }

    #[test]
    fn swiss_qr_reference() {
        let check = compute_mod10_recursive_check_digit(&d("21000000000313947143000901"));
        assert_eq!(check, 7);
        assert!(validate_mod10_recursive(&d("210000000003139471430009017")));
        assert!(!validate_mod10_recursive(&d("210000000003139471430009018")));
    }

    #[test]
    fn rows_are_shifted_first_row() {
        for (r, row) in TABLE.iter().enumerate() {
            for (i, v) in row.iter().enumerate() {
                assert_eq!(*v, TABLE[0][(r + i) % 10]);
            }
        }
    }

    #[test]
    fn all_zero_reference() {
        assert!(validate_mod10_recursive(&d("000000")));
        assert_eq!(compute_mod10_recursive_check_digit(&d("0")), 0);
    }

    #[test]
    fn detects_adjacent_transposition() {
        assert!(!validate_mod10_recursive(&d("210000000003139471430009107")));
    }
}
