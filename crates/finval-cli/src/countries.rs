//! # Countries Subcommand
//!
//! Lists the IBAN registry in effect, including `--config` overrides.

use anyhow::{Context, Result};
use serde::Serialize;

use finval_core::registry::CountryRule;

use crate::{Session, EXIT_VALID};

/// One registry row.
#[derive(Debug, Serialize)]
pub struct CountryRow<'a> {
    /// Country code.
    pub country: &'a str,
    /// Country name.
    pub name: &'a str,
    /// IBAN length.
    pub length: usize,
    /// BBAN layout in SWIFT notation.
    pub bban: &'a str,
}

impl<'a> From<&'a CountryRule> for CountryRow<'a> {
    fn from(rule: &'a CountryRule) -> Self {
        Self {
            country: &rule.country,
            name: &rule.name,
            length: rule.length,
            bban: &rule.bban_format,
        }
    }
}

/// Execute `finval countries`.
pub fn run_countries(session: &Session) -> Result<u8> {
    let rows: Vec<CountryRow<'_>> = session.registry.rules().map(CountryRow::from).collect();

    if session.json {
        let rendered = serde_json::to_string_pretty(&rows).context("serializing registry")?;
        println!("{rendered}");
        return Ok(EXIT_VALID);
    }

    println!("IBAN registry:");
    println!();
    for row in &rows {
        println!(
            "  {:<4} {:>3}  {:<22} {}",
            row.country, row.length, row.bban, row.name
        );
    }
    println!();
    println!("Total: {} countries", rows.len());
    Ok(EXIT_VALID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_mirror_registry() {
        let session = Session::load(None, false).unwrap();
        let rows: Vec<CountryRow<'_>> = session.registry.rules().map(CountryRow::from).collect();
        assert_eq!(rows.len(), session.registry.len());
        let be = rows.iter().find(|r| r.country == "BE").unwrap();
        assert_eq!(be.length, 16);
        assert_eq!(be.bban, "3!n7!n2!n");
        assert_eq!(be.name, "Belgium");
    }

    #[test]
    fn listing_exits_zero() {
        let session = Session::load(None, true).unwrap();
        assert_eq!(run_countries(&session).unwrap(), EXIT_VALID);
    }
}
