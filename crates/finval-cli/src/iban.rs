//! # IBAN Subcommands
//!
//! `finval iban <INPUT>` validates against the session registry.
//! `finval iban-check-digits <COUNTRY> <BBAN>` computes the two check digits
//! and assembles the IBAN.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use finval_core::{compute_check_digits, normalize, Iban};

use crate::{emit, Rejection, Session};

/// Arguments for `finval iban`.
#[derive(Args, Debug)]
pub struct IbanArgs {
    /// IBAN in electronic or print format.
    pub input: String,
}

/// Arguments for `finval iban-check-digits`.
#[derive(Args, Debug)]
pub struct IbanCheckDigitsArgs {
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// Basic Bank Account Number.
    pub bban: String,
}

/// Accepted IBAN.
#[derive(Debug, Serialize)]
pub struct IbanDetail {
    /// Electronic format.
    pub iban: String,
    /// Groups of four.
    pub print_format: String,
    /// Country code.
    pub country: String,
    /// Registry name of the country.
    pub country_name: String,
    /// Check digits.
    pub check_digits: String,
    /// BBAN.
    pub bban: String,
}

/// Generated check digits.
#[derive(Debug, Serialize)]
pub struct CheckDigitsDetail {
    /// The two check digits.
    pub check_digits: String,
    /// Country code, check digits and BBAN in electronic format.
    pub iban: String,
}

/// Execute `finval iban`.
pub fn run_iban(args: &IbanArgs, session: &Session) -> Result<u8> {
    let outcome = session
        .registry
        .validate(&args.input)
        .map(|iban| describe(&iban, session))
        .map_err(Rejection::from);

    emit(session, "IBAN", outcome, |detail| {
        println!("valid IBAN");
        println!("  electronic: {}", detail.iban);
        println!("  print:      {}", detail.print_format);
        println!("  country:    {} ({})", detail.country, detail.country_name);
        println!("  check:      {}", detail.check_digits);
        println!("  bban:       {}", detail.bban);
    })
}

/// Execute `finval iban-check-digits`.
pub fn run_check_digits(args: &IbanCheckDigitsArgs, session: &Session) -> Result<u8> {
    let country = normalize(&args.country);
    let bban = normalize(&args.bban);
    let outcome = compute_check_digits(&country, &bban)
        .map(|check_digits| CheckDigitsDetail {
            iban: format!("{country}{check_digits}{bban}"),
            check_digits,
        })
        .map_err(Rejection::from);

    emit(session, "input", outcome, |detail| {
        println!("check digits: {}", detail.check_digits);
        println!("iban:         {}", detail.iban);
    })
}

fn describe(iban: &Iban, session: &Session) -> IbanDetail {
    let country_name = session
        .registry
        .get(iban.country_code())
        .map(|rule| rule.name.clone())
        .unwrap_or_default();
    IbanDetail {
        iban: iban.as_str().to_string(),
        print_format: iban.to_print_format(),
        country: iban.country_code().to_string(),
        country_name,
        check_digits: iban.check_digits().to_string(),
        bban: iban.bban().to_string(),
    }
}
