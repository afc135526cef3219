//! # Creditor Reference Subcommands
//!
//! ```bash
//! finval rf generate "5390 0754 7034"    # RF18539007547034
//! finval rf validate "RF18 5390 0754 7034"
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use finval_core::{generate_creditor_reference, validate_creditor_reference, CreditorReference};

use crate::{emit, Rejection, Session};

/// Arguments for `finval rf`.
#[derive(Args, Debug)]
pub struct RfArgs {
    #[command(subcommand)]
    pub command: RfCommand,
}

/// Available `rf` subcommands.
#[derive(Subcommand, Debug)]
pub enum RfCommand {
    /// Generate the RF reference for a body of up to 21 letters and digits.
    Generate {
        /// Reference body.
        body: String,
    },
    /// Validate an RF reference.
    Validate {
        /// The reference, in electronic or print format.
        input: String,
    },
}

/// Accepted or generated reference.
#[derive(Debug, Serialize)]
pub struct RfDetail {
    /// Electronic format.
    pub reference: String,
    /// Groups of four.
    pub print_format: String,
    /// Check digits.
    pub check_digits: String,
    /// Body after `RF` and the check digits.
    pub body: String,
}

impl From<CreditorReference> for RfDetail {
    fn from(rf: CreditorReference) -> Self {
        Self {
            print_format: rf.to_print_format(),
            check_digits: rf.check_digits().to_string(),
            body: rf.body().to_string(),
            reference: rf.as_str().to_string(),
        }
    }
}

/// Execute `finval rf`.
pub fn run_rf(args: &RfArgs, session: &Session) -> Result<u8> {
    let (outcome, heading) = match &args.command {
        RfCommand::Generate { body } => (generate_creditor_reference(body), "generated"),
        RfCommand::Validate { input } => (validate_creditor_reference(input), "valid"),
    };
    let outcome = outcome.map(RfDetail::from).map_err(Rejection::from);

    emit(session, "creditor reference", outcome, |detail| {
        println!("{heading} creditor reference");
        println!("  electronic: {}", detail.reference);
        println!("  print:      {}", detail.print_format);
    })
}
