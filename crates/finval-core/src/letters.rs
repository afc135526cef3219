//! # Letter-to-Digit Mapper
//!
//! ISO 7064 MOD 97-10 runs over a decimal string, but IBAN and RF payloads
//! are alphanumeric. Each letter is replaced by its two-digit value
//! (`A` = 10 … `Z` = 35); digits pass through unchanged.

use crate::error::ValidationError;

/// Expand `[A-Z0-9]` into its decimal equivalent.
///
/// Callers normalize and structurally validate first, so any other
/// character here (lower case included) means a stage was skipped.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCharacter`] at the first character
/// outside `[A-Z0-9]`.
pub fn expand(s: &str) -> Result<String, ValidationError> {
    // Worst case: every character is a letter and doubles in width.
    let mut out = String::with_capacity(s.len() * 2);
    for (position, b) in s.bytes().enumerate() {
        match b {
            b'0'..=b'9' => out.push(b as char),
            b'A'..=b'Z' => {
                let value = b - b'A' + 10;
                out.push((b'0' + value / 10) as char);
                out.push((b'0' + value % 10) as char);
            }
            _ => {
                let character = s[position..].chars().next().unwrap_or('\u{FFFD}');
                return Err(ValidationError::InvalidCharacter {
                    character,
                    position,
                });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_letters_and_digits() {
        assert_eq!(expand("AZ09").unwrap(), "103509");
    }

    #[test]
    fn iban_country_and_check_digits() {
        assert_eq!(expand("BE68").unwrap(), "111468");
        assert_eq!(expand("GB82").unwrap(), "161182");
    }

    #[test]
    fn empty_expands_to_empty() {
        assert_eq!(expand("").unwrap(), "");
    }

    #[test]
    fn rejects_lower_case() {
        assert_eq!(
            expand("BEa8"),
            Err(ValidationError::InvalidCharacter {
                character: 'a',
                position: 2
            })
        );
    }

    #[test]
    fn rejects_separators() {
        let err = expand("BE68 5390").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCharacter {
                character: ' ',
                position: 4
            }
        );
    }
}
