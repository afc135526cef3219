//! # Checksum Subcommand
//!
//! Runs one algorithm over a digit string. Without `--compute` the input
//! includes its check digit(s) and is validated; with `--compute` it is a
//! payload and the check digit(s) are appended.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use finval_core::{normalize, Algorithm, Digits, ErrorKind, ValidationError};

use crate::{emit, Rejection, Session};

/// Arguments for `finval checksum`.
#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Algorithm: luhn, mod97, verhoeff, weighted-731, mod10-recursive,
    /// ird-mod11.
    pub algorithm: Algorithm,
    /// Digit string. Spaces and separators are ignored.
    pub digits: String,
    /// Treat the input as a payload and compute its check digit(s).
    #[arg(long)]
    pub compute: bool,
}

/// Checksum outcome.
#[derive(Debug, Serialize)]
pub struct ChecksumDetail {
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// Computed check digit(s), for `--compute`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_digits: Option<String>,
    /// The complete digit string.
    pub digits: String,
}

/// Execute `finval checksum`.
pub fn run_checksum(args: &ChecksumArgs, session: &Session) -> Result<u8> {
    let normalized = normalize(&args.digits);
    let outcome = if args.compute {
        compute(args.algorithm, &normalized)
    } else {
        check(args.algorithm, &normalized)
    };

    emit(session, "input", outcome, render)
}

fn render(detail: &ChecksumDetail) {
    match &detail.check_digits {
        Some(check) => {
            println!("{} check digit(s): {check}", detail.algorithm);
            println!("complete: {}", detail.digits);
        }
        None => println!("valid {} digits: {}", detail.algorithm, detail.digits),
    }
}

fn check(algorithm: Algorithm, normalized: &str) -> Result<ChecksumDetail, Rejection> {
    let digits = Digits::new(normalized)?;
    if !algorithm.validate(&digits) {
        return Err(ValidationError::InvalidChecksum { algorithm }.into());
    }
    Ok(ChecksumDetail {
        algorithm,
        check_digits: None,
        digits: normalized.to_string(),
    })
}

fn compute(algorithm: Algorithm, normalized: &str) -> Result<ChecksumDetail, Rejection> {
    let payload = Digits::new(normalized)?;
    let check = algorithm.compute(&payload).ok_or_else(|| {
        Rejection::new(
            ErrorKind::InvalidChecksum,
            format!("no {algorithm} check digit exists for {normalized}"),
        )
    })?;
    Ok(ChecksumDetail {
        algorithm,
        digits: format!("{normalized}{check}"),
        check_digits: Some(check),
    })
}
