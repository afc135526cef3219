//! # Normalize Subcommand

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use finval_core::normalize;

use crate::{emit, Session};

/// Arguments for `finval normalize`.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Raw input.
    pub input: String,
}

/// Normalized form.
#[derive(Debug, Serialize)]
pub struct NormalizeDetail {
    /// `[A-Z0-9]*`, possibly empty.
    pub normalized: String,
}

/// Execute `finval normalize`. Normalization never fails.
pub fn run_normalize(args: &NormalizeArgs, session: &Session) -> Result<u8> {
    let detail = NormalizeDetail {
        normalized: normalize(&args.input),
    };
    emit(session, "input", Ok(detail), |detail| {
        println!("{}", detail.normalized);
    })
}
