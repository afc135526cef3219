//! Verhoeff check digit.
//!
//! Uses the dihedral group D5: multiplication table `D`, position
//! permutation `P` (cycling with period 8) and inverse table `INV`. Detects
//! every single-digit error and every adjacent transposition.

use crate::digits::Digits;

const D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

const INV: [u8; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

/// Run the Verhoeff automaton right to left. `offset` is 0 when the check
/// digit is already present and 1 when it is being computed.
fn verhoeff_state(digits: &Digits<'_>, offset: usize) -> u8 {
    digits
        .values()
        .rev()
        .enumerate()
        .fold(0u8, |c, (i, d)| {
            D[usize::from(c)][usize::from(P[(i + offset) % 8][usize::from(d)])]
        })
}

/// Check the trailing Verhoeff check digit.
pub fn validate_verhoeff(digits: &Digits<'_>) -> bool {
    verhoeff_state(digits, 0) == 0
}

/// Compute the Verhoeff check digit for `payload`.
pub fn compute_verhoeff_check_digit(payload: &Digits<'_>) -> u8 {
    INV[usize::from(verhoeff_state(payload, 1))]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn computed_check_digit_validates(payload in "[0-9]{1,30}") {
            let check = compute_verhoeff_check_digit(&Digits::new(&payload).unwrap());
            let full = format!("{payload}{check}");
            prop_assert!(validate_verhoeff(&Digits::new(&full).unwrap()));
        }

        /// Swapping two distinct adjacent digits is always caught.
        #[test]
        fn adjacent_transpositions_detected(payload in "[0-9]{2,20}", at in 0usize..19) {
            let check = compute_verhoeff_check_digit(&Digits::new(&payload).unwrap());
            let mut bytes = format!("{payload}{check}").into_bytes();
            let i = at % (bytes.len() - 1);
            prop_assume!(bytes[i] != bytes[i + 1]);
            bytes.swap(i, i + 1);
            let swapped = String::from_utf8(bytes).unwrap();
            prop_assert!(!validate_verhoeff(&Digits::new(&swapped).unwrap()));
        }
    }
}
