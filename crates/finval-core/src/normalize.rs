//! # Normalizer
//!
//! Turns raw user input (`"be68 5390-0754 7034"`) into the canonical form
//! every other stage operates on: ASCII letters and digits only, upper case.

/// Strip every character that is not an ASCII letter or digit and upper-case
/// the remainder.
///
/// Never fails. Empty or all-punctuation input yields an empty string.
/// Non-ASCII letters are dropped, not transliterated.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        if b.is_ascii_alphanumeric() {
            out.push(b.to_ascii_uppercase() as char);
        }
    }
    out
}

/// Returns `true` if `s` is already in normalized form (`[A-Z0-9]*`).
pub fn is_normalized(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_spaces_and_punctuation() {
        assert_eq!(normalize("BE68 5390 0754 7034"), "BE68539007547034");
        assert_eq!(
            normalize("DE4450-0105-1754-0732-4931"),
            "DE44500105175407324931"
        );
        assert_eq!(normalize("  RF18 5390.0754/7034 "), "RF18539007547034");
    }

    #[test]
    fn upper_cases_letters() {
        assert_eq!(
            normalize("gb29nwbk60161331926819"),
            "GB29NWBK60161331926819"
        );
    }

    #[test]
    fn empty_and_punctuation_only_yield_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" -./ \t\n"), "");
    }

    #[test]
    fn drops_non_ascii_letters() {
        assert_eq!(normalize("café-42"), "CAF42");
        assert_eq!(normalize("Ω12"), "12");
    }

    #[test]
    fn is_normalized_detects_canonical_form() {
        assert!(is_normalized("BE68539007547034"));
        assert!(is_normalized(""));
        assert!(!is_normalized("be68"));
        assert!(!is_normalized("BE68 5390"));
    }
}
