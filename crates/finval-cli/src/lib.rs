//! # finval-cli: Command-Line Interface for finval
//!
//! Provides the `finval` binary. Every subcommand validates or computes one
//! identifier and reports the outcome as text or, with `--json`, as a JSON
//! document.
//!
//! ## Subcommands
//!
//! - `finval iban`: IBAN validation against the country registry.
//! - `finval iban-check-digits`: IBAN check digit generation.
//! - `finval id`: table-driven identifiers (BIC, national numbers).
//! - `finval rf`: ISO 11649 creditor reference generation and validation.
//! - `finval checksum`: run a single checksum algorithm.
//! - `finval normalize`: show the normalized form of an input.
//! - `finval countries`: list the IBAN registry.
//!
//! ## Exit Codes
//!
//! `0` valid, `2` invalid identifier, `1` operational error (unreadable or
//! malformed configuration).
//!
//! ```bash
//! finval iban "BE68 5390 0754 7034"
//! finval --config registry.yaml iban XK051212012345678906
//! finval checksum luhn 7992739871 --compute
//! ```

pub mod checksum;
pub mod countries;
pub mod iban;
pub mod identifier;
pub mod normalize;
pub mod reference;

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use finval_core::{ErrorKind, IbanError, IbanRegistry, IbanStage, RegistryConfig, ValidationError};

/// Exit code for a valid identifier or a successful computation.
pub const EXIT_VALID: u8 = 0;

/// Exit code for an identifier that failed validation.
pub const EXIT_INVALID: u8 = 2;

/// State shared by every subcommand handler.
#[derive(Debug)]
pub struct Session {
    /// Built-in IBAN registry, merged with `--config` overrides if given.
    pub registry: Cow<'static, IbanRegistry>,
    /// Print JSON instead of text.
    pub json: bool,
}

impl Session {
    /// Build a session, loading registry overrides from `config` if given.
    pub fn load(config: Option<&Path>, json: bool) -> Result<Self> {
        let registry = match config {
            None => Cow::Borrowed(IbanRegistry::builtin()),
            Some(path) => Cow::Owned(load_registry(path)?),
        };
        Ok(Self { registry, json })
    }
}

/// Read a YAML registry config and merge it into the built-in registry.
pub fn load_registry(path: &Path) -> Result<IbanRegistry> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = RegistryConfig::from_yaml_str(&yaml)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    let registry = IbanRegistry::builtin()
        .with_overrides(&config)
        .with_context(|| format!("invalid registry entry in {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        entries = config.countries.len(),
        "loaded IBAN registry overrides"
    );
    Ok(registry)
}

/// Why an identifier was rejected, in reportable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Error taxonomy entry.
    pub kind: ErrorKind,
    /// IBAN pipeline stage, for IBAN rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<IbanStage>,
    /// Human-readable message.
    pub message: String,
}

impl Rejection {
    /// A rejection that does not come from a [`ValidationError`].
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            stage: None,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for Rejection {
    fn from(e: ValidationError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

impl From<IbanError> for Rejection {
    fn from(e: IbanError) -> Self {
        Self {
            kind: e.kind(),
            stage: Some(e.stage),
            message: e.error.to_string(),
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            Some(stage) => write!(f, "{} ({stage} stage): {}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// JSON envelope for every subcommand outcome.
#[derive(Debug, Serialize)]
pub struct Report<T: Serialize> {
    /// Whether the identifier was accepted.
    pub valid: bool,
    /// Subcommand-specific fields.
    #[serde(flatten)]
    pub detail: Option<T>,
    /// Present when `valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Rejection>,
}

impl<T: Serialize> Report<T> {
    /// Wrap an outcome.
    pub fn from_outcome(outcome: std::result::Result<T, Rejection>) -> Self {
        match outcome {
            Ok(detail) => Self {
                valid: true,
                detail: Some(detail),
                error: None,
            },
            Err(rejection) => Self {
                valid: false,
                detail: None,
                error: Some(rejection),
            },
        }
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> u8 {
        if self.valid {
            EXIT_VALID
        } else {
            EXIT_INVALID
        }
    }
}

/// Print an outcome and return its exit code.
///
/// In text mode `render` prints the accepted detail; rejections are printed
/// as `invalid <what>: <reason>`.
pub fn emit<T, F>(
    session: &Session,
    what: &str,
    outcome: std::result::Result<T, Rejection>,
    render: F,
) -> Result<u8>
where
    T: Serialize,
    F: FnOnce(&T),
{
    let report = Report::from_outcome(outcome);
    if session.json {
        let rendered = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{rendered}");
    } else {
        match (&report.detail, &report.error) {
            (Some(detail), _) => render(detail),
            (None, Some(rejection)) => println!("invalid {what}: {rejection}"),
            (None, None) => {}
        }
    }
    if let Some(rejection) = &report.error {
        tracing::debug!(what, kind = %rejection.kind, "rejected");
    }
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn session_without_config_borrows_builtin() {
        let session = Session::load(None, false).unwrap();
        assert!(matches!(session.registry, Cow::Borrowed(_)));
        assert_eq!(session.registry.len(), IbanRegistry::builtin().len());
    }

    #[test]
    fn session_loads_overrides() {
        let yaml = r#"
countries:
  - country: ZZ
    name: Testland
    length: 16
    bban: "12!n"
"#;
        let file = write_config(yaml);
        let session = Session::load(Some(file.path()), true).unwrap();
        assert!(session.json);
        let rule = session.registry.get("ZZ").unwrap();
        assert_eq!(rule.name, "Testland");
    }

    #[test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Session::load(Some(&dir.path().join("absent.yaml")), false).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let file = write_config("countries: {not: a list}");
        let err = load_registry(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn inconsistent_config_entry_is_an_error() {
        let yaml = r#"
countries:
  - country: XK
    length: 21
    bban: "4!n10!n2!n"
"#;
        let file = write_config(yaml);
        let err = load_registry(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("invalid registry entry"));
        assert!(message.contains("declared length 21"));
    }

    #[test]
    fn report_serializes_flattened_detail() {
        #[derive(Serialize)]
        struct Detail {
            normalized: &'static str,
        }
        let report = Report::from_outcome(Ok(Detail {
            normalized: "BE68539007547034",
        }));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["normalized"], "BE68539007547034");
        assert!(value.get("error").is_none());
        assert_eq!(report.exit_code(), EXIT_VALID);
    }

    #[test]
    fn report_serializes_rejection() {
        let rejection = Rejection::from(ValidationError::InvalidInput);
        let report: Report<()> = Report::from_outcome(Err(rejection));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["error"]["kind"], "invalid_input");
        assert!(value["error"].get("stage").is_none());
        assert_eq!(report.exit_code(), EXIT_INVALID);
    }

    #[test]
    fn iban_rejection_carries_stage() {
        let registry = IbanRegistry::builtin();
        let rejection = Rejection::from(registry.validate("BE00539007547034").unwrap_err());
        assert_eq!(rejection.stage, Some(IbanStage::Checksum));
        assert_eq!(rejection.kind, ErrorKind::InvalidChecksum);
        assert!(rejection.to_string().contains("checksum stage"));
    }
}
