//! # IBAN Country Registry
//!
//! Per-country IBAN rules as data. Each [`CountryRule`] carries the total
//! IBAN length and the BBAN layout in SWIFT registry notation; the layout is
//! parsed once into a [`StructuralRule`] and handed to the generic pipeline
//! in [`crate::iban`].
//!
//! The pipeline itself never looks a country up. Only this module maps the
//! first two characters of an IBAN to a rule.
//!
//! ## Overrides
//!
//! A [`RegistryConfig`] (YAML) adds countries or replaces built-in entries.
//! Replacing an entry is logged at `debug` and is not an error.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, ValidationError};
use crate::iban::{validate_normalized_iban, IbanError, IbanStage};
use crate::identity::Iban;
use crate::normalize::normalize;
use crate::structure::{validate_structure, LengthSpec, StructuralRule};

/// Shortest and longest IBAN in circulation.
const IBAN_LENGTH_RANGE: LengthSpec = LengthSpec::Range { min: 15, max: 34 };

/// `(country, name, IBAN length, BBAN format)` from the SWIFT IBAN registry.
const BUILTIN: &[(&str, &str, usize, &str)] = &[
    ("AD", "Andorra", 24, "4!n4!n12!c"),
    ("AE", "United Arab Emirates", 23, "3!n16!n"),
    ("AL", "Albania", 28, "8!n16!c"),
    ("AT", "Austria", 20, "5!n11!n"),
    ("AZ", "Azerbaijan", 28, "4!a20!c"),
    ("BA", "Bosnia and Herzegovina", 20, "3!n3!n8!n2!n"),
    ("BE", "Belgium", 16, "3!n7!n2!n"),
    ("BG", "Bulgaria", 22, "4!a4!n2!n8!c"),
    ("BH", "Bahrain", 22, "4!a14!c"),
    ("BR", "Brazil", 29, "8!n5!n10!n1!a1!c"),
    ("CH", "Switzerland", 21, "5!n12!c"),
    ("CR", "Costa Rica", 22, "4!n14!n"),
    ("CY", "Cyprus", 28, "3!n5!n16!c"),
    ("CZ", "Czechia", 24, "4!n6!n10!n"),
    ("DE", "Germany", 22, "8!n10!n"),
    ("DK", "Denmark", 18, "4!n9!n1!n"),
    ("DO", "Dominican Republic", 28, "4!c20!n"),
    ("EE", "Estonia", 20, "2!n2!n11!n1!n"),
    ("EG", "Egypt", 29, "4!n4!n17!n"),
    ("ES", "Spain", 24, "4!n4!n1!n1!n10!n"),
    ("FI", "Finland", 18, "3!n11!n"),
    ("FO", "Faroe Islands", 18, "4!n9!n1!n"),
    ("FR", "France", 27, "5!n5!n11!c2!n"),
    ("GB", "United Kingdom", 22, "4!a6!n8!n"),
    ("GE", "Georgia", 22, "2!a16!n"),
    ("GI", "Gibraltar", 23, "4!a15!c"),
    ("GL", "Greenland", 18, "4!n9!n1!n"),
    ("GR", "Greece", 27, "3!n4!n16!c"),
    ("HR", "Croatia", 21, "7!n10!n"),
    ("HU", "Hungary", 28, "3!n4!n1!n15!n1!n"),
    ("IE", "Ireland", 22, "4!a6!n8!n"),
    ("IL", "Israel", 23, "3!n3!n13!n"),
    ("IS", "Iceland", 26, "4!n2!n6!n10!n"),
    ("IT", "Italy", 27, "1!a5!n5!n12!c"),
    ("JO", "Jordan", 30, "4!a4!n18!c"),
    ("KW", "Kuwait", 30, "4!a22!c"),
    ("KZ", "Kazakhstan", 20, "3!n13!c"),
    ("LB", "Lebanon", 28, "4!n20!c"),
    ("LI", "Liechtenstein", 21, "5!n12!c"),
    ("LT", "Lithuania", 20, "5!n11!n"),
    ("LU", "Luxembourg", 20, "3!n13!c"),
    ("LV", "Latvia", 21, "4!a13!c"),
    ("MC", "Monaco", 27, "5!n5!n11!c2!n"),
    ("MD", "Moldova", 24, "2!c18!c"),
    ("ME", "Montenegro", 22, "3!n13!n2!n"),
    ("MK", "North Macedonia", 19, "3!n10!c2!n"),
    ("MR", "Mauritania", 27, "5!n5!n11!n2!n"),
    ("MT", "Malta", 31, "4!a5!n18!c"),
    ("MU", "Mauritius", 30, "4!a2!n2!n12!n3!n3!a"),
    ("NL", "Netherlands", 18, "4!a10!n"),
    ("NO", "Norway", 15, "4!n6!n1!n"),
    ("PK", "Pakistan", 24, "4!a16!c"),
    ("PL", "Poland", 28, "8!n16!n"),
    ("PS", "Palestine", 29, "4!a21!c"),
    ("PT", "Portugal", 25, "4!n4!n11!n2!n"),
    ("QA", "Qatar", 29, "4!a21!c"),
    ("RO", "Romania", 24, "4!a16!c"),
    ("RS", "Serbia", 22, "3!n13!n2!n"),
    ("SA", "Saudi Arabia", 24, "2!n18!c"),
    ("SE", "Sweden", 24, "3!n16!n1!n"),
    ("SI", "Slovenia", 19, "5!n8!n2!n"),
    ("SK", "Slovakia", 24, "4!n6!n10!n"),
    ("SM", "San Marino", 27, "1!a5!n5!n12!c"),
    ("TN", "Tunisia", 24, "2!n3!n13!n2!n"),
    ("TR", "Turkey", 26, "5!n1!n16!c"),
    ("UA", "Ukraine", 29, "6!n19!c"),
    ("VG", "British Virgin Islands", 24, "4!a16!n"),
    ("XK", "Kosovo", 20, "4!n10!n2!n"),
];

/// IBAN rule for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRule {
    /// ISO 3166-1 alpha-2 code, upper case.
    pub country: String,
    /// Country name, for display.
    pub name: String,
    /// Total IBAN length.
    pub length: usize,
    /// BBAN layout in SWIFT notation, as configured.
    pub bban_format: String,
    /// BBAN layout parsed from `bban_format`.
    #[serde(skip)]
    pub bban: StructuralRule,
}

impl CountryRule {
    /// Build a rule, parsing `bban_format` and checking it against `length`.
    ///
    /// # Errors
    ///
    /// - [`RuleError::InvalidCountry`] if `country` is not two ASCII letters.
    /// - [`RuleError::InvalidFormatNotation`] if `bban_format` does not parse
    ///   or describes a BBAN too long to hold.
    /// - [`RuleError::LengthMismatch`] if `4 + bban length != length`.
    pub fn new(
        country: &str,
        name: impl Into<String>,
        length: usize,
        bban_format: &str,
    ) -> Result<Self, RuleError> {
        if country.len() != 2 || !country.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(RuleError::InvalidCountry(country.to_string()));
        }
        let country = country.to_ascii_uppercase();

        let bban = StructuralRule::from_swift_format(bban_format)?;
        let Some(implied) = bban.length.min().checked_add(4) else {
            return Err(RuleError::InvalidFormatNotation {
                format: bban_format.to_string(),
                reason: "length out of range".to_string(),
            });
        };
        if implied != length {
            return Err(RuleError::LengthMismatch {
                country,
                declared: length,
                implied,
            });
        }

        Ok(Self {
            country,
            name: name.into(),
            length,
            bban_format: bban_format.to_string(),
            bban,
        })
    }

    /// Check a normalized BBAN against this country's layout.
    pub fn validate_bban(&self, bban: &str) -> Result<(), ValidationError> {
        validate_structure(bban, &self.bban)
    }
}

/// One `countries` entry of a [`RegistryConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountryEntry {
    /// ISO 3166-1 alpha-2 code.
    pub country: String,
    /// Display name. Defaults to the country code.
    #[serde(default)]
    pub name: Option<String>,
    /// Total IBAN length.
    pub length: usize,
    /// BBAN layout in SWIFT notation.
    pub bban: String,
}

/// Registry additions and overrides, usually loaded from YAML.
///
/// ```yaml
/// countries:
///   - country: XK
///     name: Kosovo
///     length: 20
///     bban: "4!n10!n2!n"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Country rules to add or replace.
    #[serde(default)]
    pub countries: Vec<CountryEntry>,
}

impl RegistryConfig {
    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Config`] if the YAML is malformed or has the
    /// wrong shape. Entries are not checked until they are merged.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RuleError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Country code to [`CountryRule`].
#[derive(Debug, Clone, Default)]
pub struct IbanRegistry {
    rules: BTreeMap<String, CountryRule>,
}

impl IbanRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shipped with the crate, built on first use.
    pub fn builtin() -> &'static IbanRegistry {
        static BUILTIN_REGISTRY: OnceLock<IbanRegistry> = OnceLock::new();
        BUILTIN_REGISTRY.get_or_init(|| {
            let mut registry = IbanRegistry::new();
            for &(country, name, length, format) in BUILTIN {
                match CountryRule::new(country, name, length, format) {
                    Ok(rule) => {
                        registry.insert(rule);
                    }
                    Err(e) => tracing::error!(country, error = %e, "skipping built-in IBAN rule"),
                }
            }
            registry
        })
    }

    /// Add or replace a rule, returning the rule it replaced.
    pub fn insert(&mut self, rule: CountryRule) -> Option<CountryRule> {
        self.rules.insert(rule.country.clone(), rule)
    }

    /// Look a country up (case-insensitive).
    pub fn get(&self, country: &str) -> Option<&CountryRule> {
        self.rules.get(&country.to_ascii_uppercase())
    }

    /// Registered country codes, sorted.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// All rules, sorted by country code.
    pub fn rules(&self) -> impl Iterator<Item = &CountryRule> {
        self.rules.values()
    }

    /// Number of registered countries.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no country is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// A copy of this registry with `config` merged in.
    ///
    /// # Errors
    ///
    /// Returns the [`RuleError`] of the first invalid entry; nothing is
    /// merged in that case.
    pub fn with_overrides(&self, config: &RegistryConfig) -> Result<Self, RuleError> {
        let mut merged = self.clone();
        for entry in &config.countries {
            let name = entry.name.clone().unwrap_or_else(|| entry.country.clone());
            let rule = CountryRule::new(&entry.country, name, entry.length, &entry.bban)?;
            let country = rule.country.clone();
            match merged.insert(rule) {
                Some(previous) => tracing::debug!(
                    country = %country,
                    previous_format = %previous.bban_format,
                    format = %entry.bban,
                    "overriding IBAN rule"
                ),
                None => tracing::debug!(
                    country = %country,
                    format = %entry.bban,
                    "adding IBAN rule"
                ),
            }
        }
        Ok(merged)
    }

    /// Validate an IBAN against the rule for its country.
    ///
    /// # Errors
    ///
    /// Returns an [`IbanError`] naming the first failing stage. An input
    /// shorter than two characters fails at [`IbanStage::Length`]; an
    /// unregistered country fails at [`IbanStage::CountryCode`].
    pub fn validate(&self, raw: &str) -> Result<Iban, IbanError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(IbanError::new(IbanStage::Normalize, ValidationError::InvalidInput));
        }

        let Some(country) = normalized.get(..2) else {
            return Err(IbanError::new(
                IbanStage::Length,
                ValidationError::InvalidLength {
                    expected: IBAN_LENGTH_RANGE,
                    actual: normalized.len(),
                },
            ));
        };

        let Some(rule) = self.get(country) else {
            return Err(IbanError::new(
                IbanStage::CountryCode,
                ValidationError::InvalidCountryCode {
                    expected: "a registered country".to_string(),
                    actual: country.to_string(),
                },
            ));
        };

        validate_normalized_iban(normalized, &rule.country, rule.length, |bban| {
            rule.validate_bban(bban)
        })
    }
}
