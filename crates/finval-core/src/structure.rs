//! # Structural Validator
//!
//! Checks a normalized identifier against a [`StructuralRule`]: accepted
//! length(s), an optional fixed prefix, and an ordered list of segments,
//! each constraining a byte range to one [`CharClass`].
//!
//! ## Invariants
//!
//! - The length check runs before any segment is inspected.
//! - No byte outside `[start, start + length)` of a segment is read for it.
//! - The first failing segment is reported; failures are not aggregated.
//! - No checksum is ever computed here.

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, ValidationError};

/// Character class a segment accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    /// `0-9`
    Digit,
    /// `A-Z`
    Letter,
    /// `0-9` or `A-Z`
    Alnum,
}

impl CharClass {
    /// `true` if the byte belongs to this class.
    pub fn matches(&self, b: u8) -> bool {
        match self {
            Self::Digit => b.is_ascii_digit(),
            Self::Letter => b.is_ascii_uppercase(),
            Self::Alnum => b.is_ascii_digit() || b.is_ascii_uppercase(),
        }
    }

}

impl std::fmt::Display for CharClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Digit => "digit",
            Self::Letter => "letter",
            Self::Alnum => "letter or digit",
        };
        f.write_str(s)
    }
}

/// Accepted length(s) of an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthSpec {
    /// Exactly this many characters.
    Exact(usize),
    /// Any of these lengths (e.g. BIC: 8 or 11).
    OneOf(Vec<usize>),
    /// Inclusive range.
    Range {
        /// Shortest accepted length.
        min: usize,
        /// Longest accepted length.
        max: usize,
    },
}

impl LengthSpec {
    /// `true` if `len` is accepted.
    pub fn accepts(&self, len: usize) -> bool {
        match self {
            Self::Exact(n) => len == *n,
            Self::OneOf(lengths) => lengths.contains(&len),
            Self::Range { min, max } => (*min..=*max).contains(&len),
        }
    }

    /// Smallest accepted length.
    pub fn min(&self) -> usize {
        match self {
            Self::Exact(n) => *n,
            Self::OneOf(lengths) => lengths.iter().copied().min().unwrap_or(0),
            Self::Range { min, .. } => *min,
        }
    }
}

impl std::fmt::Display for LengthSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(lengths) => {
                let parts: Vec<String> = lengths.iter().map(|n| n.to_string()).collect();
                write!(f, "one of {}", parts.join(", "))
            }
            Self::Range { min, max } => write!(f, "{min} to {max}"),
        }
    }
}

/// One constrained byte range of an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Zero-based start offset.
    pub start: usize,
    /// Number of bytes; `None` runs to the end of the input.
    #[serde(default)]
    pub length: Option<usize>,
    /// Class every byte in the range must belong to.
    pub class: CharClass,
}

impl Segment {
    /// A fixed-width segment.
    pub fn new(start: usize, length: usize, class: CharClass) -> Self {
        Self {
            start,
            length: Some(length),
            class,
        }
    }

    /// A segment running from `start` to the end of the input.
    pub fn tail(start: usize, class: CharClass) -> Self {
        Self {
            start,
            length: None,
            class,
        }
    }
}

/// The shape of one identifier type. Owned by whoever defines the
/// identifier; the validator only borrows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralRule {
    /// Accepted total length(s).
    pub length: LengthSpec,
    /// Fixed leading text, if any (compared ASCII case-insensitively).
    #[serde(default)]
    pub prefix: Option<String>,
    /// Segments, checked in order.
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl StructuralRule {
    /// A rule with the given length and no prefix or segments.
    pub fn new(length: LengthSpec) -> Self {
        Self {
            length,
            prefix: None,
            segments: Vec::new(),
        }
    }

    /// Require a fixed prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Append a segment.
    pub fn segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Parse SWIFT IBAN-registry BBAN notation, e.g. `4!a6!n8!n`.
    ///
    /// Each element is `<count>!<class>` with class `n` (digits), `a`
    /// (upper-case letters) or `c` (letters and digits). Segments are laid
    /// out contiguously from offset 0 and the rule length is their sum.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidFormatNotation`] for an empty string, a
    /// zero or missing count, a missing `!`, an unknown class letter, or
    /// counts whose sum does not fit in `usize`.
    pub fn from_swift_format(format: &str) -> Result<Self, RuleError> {
        let invalid = |reason: &str| RuleError::InvalidFormatNotation {
            format: format.to_string(),
            reason: reason.to_string(),
        };

        if format.is_empty() {
            return Err(invalid("empty format"));
        }

        let bytes = format.as_bytes();
        let mut segments = Vec::new();
        let mut offset = 0usize;
        let mut i = 0usize;
        while i < bytes.len() {
            let count_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == count_start {
                return Err(invalid("expected a length"));
            }
            let count: usize = format[count_start..i]
                .parse()
                .map_err(|_| invalid("length out of range"))?;
            if count == 0 {
                return Err(invalid("zero-length element"));
            }
            if bytes.get(i) != Some(&b'!') {
                return Err(invalid("only fixed-length ('!') elements are supported"));
            }
            i += 1;
            let class = match bytes.get(i) {
                Some(b'n') => CharClass::Digit,
                Some(b'a') => CharClass::Letter,
                Some(b'c') => CharClass::Alnum,
                Some(_) => return Err(invalid("unknown character class")),
                None => return Err(invalid("missing character class")),
            };
            i += 1;
            segments.push(Segment::new(offset, count, class));
            offset = offset
                .checked_add(count)
                .ok_or_else(|| invalid("length out of range"))?;
        }

        Ok(Self {
            length: LengthSpec::Exact(offset),
            prefix: None,
            segments,
        })
    }
}

/// Check `input` against `rule`.
///
/// `input` is expected to be normalized already; this function does not
/// normalize.
///
/// # Errors
///
/// - [`ValidationError::InvalidLength`] if the length is not accepted.
/// - [`ValidationError::MissingPrefix`] if a required prefix is absent.
/// - [`ValidationError::InvalidFormat`] for the first segment containing a
///   byte outside its class, or extending past the input.
pub fn validate_structure(input: &str, rule: &StructuralRule) -> Result<(), ValidationError> {
    let bytes = input.as_bytes();

    if !rule.length.accepts(bytes.len()) {
        return Err(ValidationError::InvalidLength {
            expected: rule.length.clone(),
            actual: bytes.len(),
        });
    }

    if let Some(prefix) = &rule.prefix {
        let present = bytes.len() >= prefix.len()
            && bytes[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes());
        if !present {
            return Err(ValidationError::MissingPrefix {
                expected: prefix.clone(),
            });
        }
    }

    for (index, segment) in rule.segments.iter().enumerate() {
        let end = match segment.length {
            Some(length) => segment.start.saturating_add(length),
            None => bytes.len(),
        };
        if end > bytes.len() || segment.start > end {
            return Err(ValidationError::InvalidFormat {
                segment: index,
                position: segment.start.min(bytes.len()),
                expected: segment.class,
            });
        }
        if let Some(offset) = bytes[segment.start..end]
            .iter()
            .position(|b| !segment.class.matches(*b))
        {
            return Err(ValidationError::InvalidFormat {
                segment: index,
                position: segment.start + offset,
                expected: segment.class,
            });
        }
    }

    Ok(())
}
