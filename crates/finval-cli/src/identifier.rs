//! # Identifier Subcommand
//!
//! `finval id <KIND> <INPUT>` validates one of the table-driven identifier
//! kinds. BICs additionally report their parts.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use finval_core::{Bic, IdentifierKind, ValidationError};

use crate::{emit, Rejection, Session};

/// Arguments for `finval id`.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Identifier kind: bic, creditor-reference, za-id, za-vat, in-aadhaar,
    /// ch-qr-reference, fi-reference, nz-ird.
    pub kind: IdentifierKind,
    /// The identifier to validate.
    pub input: String,
}

/// Accepted identifier.
#[derive(Debug, Serialize)]
pub struct IdDetail {
    /// Kind that was checked.
    pub kind: IdentifierKind,
    /// Normalized identifier.
    pub normalized: String,
    /// BIC breakdown, for `bic`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<BicParts>,
}

/// The fields of a BIC.
#[derive(Debug, Serialize)]
pub struct BicParts {
    /// Institution code.
    pub bank_code: String,
    /// Country code.
    pub country_code: String,
    /// Location code.
    pub location_code: String,
    /// Branch code, absent for a primary office.
    pub branch_code: Option<String>,
    /// Test and training BIC.
    pub test: bool,
}

impl From<&Bic> for BicParts {
    fn from(bic: &Bic) -> Self {
        Self {
            bank_code: bic.bank_code().to_string(),
            country_code: bic.country_code().to_string(),
            location_code: bic.location_code().to_string(),
            branch_code: bic.branch_code().map(str::to_string),
            test: bic.is_test(),
        }
    }
}

/// Execute `finval id`.
pub fn run_id(args: &IdArgs, session: &Session) -> Result<u8> {
    let outcome = validate(args.kind, &args.input).map_err(Rejection::from);
    let what = args.kind.definition().description;

    emit(session, what, outcome, |detail| {
        println!("valid {what}");
        println!("  normalized: {}", detail.normalized);
        if let Some(parts) = &detail.bic {
            println!("  bank:       {}", parts.bank_code);
            println!("  country:    {}", parts.country_code);
            println!("  location:   {}", parts.location_code);
            println!(
                "  branch:     {}",
                parts.branch_code.as_deref().unwrap_or("(primary office)")
            );
            if parts.test {
                println!("  test BIC");
            }
        }
    })
}

fn validate(kind: IdentifierKind, input: &str) -> Result<IdDetail, ValidationError> {
    let (normalized, bic) = match kind {
        IdentifierKind::Bic => {
            let bic = Bic::new(input)?;
            (bic.as_str().to_string(), Some(BicParts::from(&bic)))
        }
        _ => (kind.validate(input)?, None),
    };
    Ok(IdDetail {
        kind,
        normalized,
        bic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EXIT_INVALID, EXIT_VALID};
    use finval_core::ErrorKind;

    #[test]
    fn bic_detail_has_parts() {
        let detail = validate(IdentifierKind::Bic, "nedszajjxxx").unwrap();
        assert_eq!(detail.normalized, "NEDSZAJJXXX");
        let parts = detail.bic.unwrap();
        assert_eq!(parts.bank_code, "NEDS");
        assert_eq!(parts.branch_code.as_deref(), Some("XXX"));
        assert!(!parts.test);
    }

    #[test]
    fn national_detail_has_no_bic_parts() {
        let detail = validate(IdentifierKind::NzIrd, "49-091-850").unwrap();
        assert_eq!(detail.normalized, "49091850");
        assert!(detail.bic.is_none());
    }

    #[test]
    fn rejection_keeps_kind() {
        let err = validate(IdentifierKind::ZaId, "8001015009088").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidChecksum);
    }

    #[test]
    fn exit_codes() {
        let session = Session::load(None, false).unwrap();
        let ok = IdArgs {
            kind: IdentifierKind::InAadhaar,
            input: "2341 2341 2346".to_string(),
        };
        assert_eq!(run_id(&ok, &session).unwrap(), EXIT_VALID);
        let bad = IdArgs {
            kind: IdentifierKind::InAadhaar,
            input: "2341 2341 2347".to_string(),
        };
        assert_eq!(run_id(&bad, &session).unwrap(), EXIT_INVALID);
    }

    #[test]
    fn detail_serializes_kind_in_kebab_case() {
        let reference = "210000000003139471430009017";
        let detail = validate(IdentifierKind::ChQrReference, reference).unwrap();
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["kind"], "ch-qr-reference");
        assert!(value.get("bic").is_none());
    }
}
