//! # finval CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, builds
//! the [`Session`] and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finval_cli::checksum::{run_checksum, ChecksumArgs};
use finval_cli::countries::run_countries;
use finval_cli::iban::{run_check_digits, run_iban, IbanArgs, IbanCheckDigitsArgs};
use finval_cli::identifier::{run_id, IdArgs};
use finval_cli::normalize::{run_normalize, NormalizeArgs};
use finval_cli::reference::{run_rf, RfArgs};
use finval_cli::Session;

/// finval: financial identifier validation.
///
/// Validates IBANs, BICs, ISO 11649 creditor references and national
/// identifiers, and computes their check digits. Exits 0 when the input is
/// valid, 2 when it is not, and 1 on an operational error.
#[derive(Parser, Debug)]
#[command(name = "finval", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML file adding or overriding IBAN country rules.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an IBAN against the country registry.
    Iban(IbanArgs),

    /// Compute IBAN check digits for a country and BBAN.
    IbanCheckDigits(IbanCheckDigitsArgs),

    /// Validate a BIC or national identifier.
    Id(IdArgs),

    /// Generate or validate an ISO 11649 creditor reference.
    Rf(RfArgs),

    /// Validate a digit string, or compute its check digit(s).
    Checksum(ChecksumArgs),

    /// Print the normalized form of an input.
    Normalize(NormalizeArgs),

    /// List the IBAN country registry.
    Countries,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let session = Session::load(cli.config.as_deref(), cli.json)?;
    tracing::debug!(countries = session.registry.len(), "registry ready");

    match cli.command {
        Commands::Iban(args) => run_iban(&args, &session),
        Commands::IbanCheckDigits(args) => run_check_digits(&args, &session),
        Commands::Id(args) => run_id(&args, &session),
        Commands::Rf(args) => run_rf(&args, &session),
        Commands::Checksum(args) => run_checksum(&args, &session),
        Commands::Normalize(args) => run_normalize(&args, &session),
        Commands::Countries => run_countries(&session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finval_cli::reference::RfCommand;
    use finval_core::{Algorithm, IdentifierKind};

    #[test]
    fn cli_parse_iban() {
        let cli = Cli::try_parse_from(["finval", "iban", "BE68 5390 0754 7034"]).unwrap();
        if let Commands::Iban(args) = cli.command {
            assert_eq!(args.input, "BE68 5390 0754 7034");
        } else {
            panic!("expected iban subcommand");
        }
        assert!(!cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parse_iban_check_digits() {
        let argv = ["finval", "iban-check-digits", "DE", "370400440532013000"];
        let cli = Cli::try_parse_from(argv).unwrap();
        if let Commands::IbanCheckDigits(args) = cli.command {
            assert_eq!(args.country, "DE");
            assert_eq!(args.bban, "370400440532013000");
        } else {
            panic!("expected iban-check-digits subcommand");
        }
    }

    #[test]
    fn cli_parse_id_kind() {
        let cli = Cli::try_parse_from(["finval", "id", "nz-ird", "49-091-850"]).unwrap();
        if let Commands::Id(args) = cli.command {
            assert_eq!(args.kind, IdentifierKind::NzIrd);
            assert_eq!(args.input, "49-091-850");
        } else {
            panic!("expected id subcommand");
        }
    }

    #[test]
    fn cli_parse_id_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["finval", "id", "ma-ice", "001234567000089"]).is_err());
    }

    #[test]
    fn cli_parse_rf_generate_and_validate() {
        let cli = Cli::try_parse_from(["finval", "rf", "generate", "539007547034"]).unwrap();
        if let Commands::Rf(args) = cli.command {
            match args.command {
                RfCommand::Generate { body } => assert_eq!(body, "539007547034"),
                other => panic!("expected rf generate, got {other:?}"),
            }
        } else {
            panic!("expected rf subcommand");
        }

        let cli = Cli::try_parse_from(["finval", "rf", "validate", "RF18539007547034"]).unwrap();
        if let Commands::Rf(args) = cli.command {
            assert!(matches!(args.command, RfCommand::Validate { .. }));
        } else {
            panic!("expected rf subcommand");
        }
    }

    #[test]
    fn cli_parse_checksum() {
        let argv = ["finval", "checksum", "luhn", "7992739871", "--compute"];
        let cli = Cli::try_parse_from(argv).unwrap();
        if let Commands::Checksum(args) = cli.command {
            assert_eq!(args.algorithm, Algorithm::Luhn);
            assert_eq!(args.digits, "7992739871");
            assert!(args.compute);
        } else {
            panic!("expected checksum subcommand");
        }

        let cli = Cli::try_parse_from(["finval", "checksum", "weighted-731", "1234561"]).unwrap();
        if let Commands::Checksum(args) = cli.command {
            assert_eq!(args.algorithm, Algorithm::Weighted731);
            assert!(!args.compute);
        } else {
            panic!("expected checksum subcommand");
        }
    }

    #[test]
    fn cli_parse_checksum_rejects_unknown_algorithm() {
        assert!(Cli::try_parse_from(["finval", "checksum", "crc32", "1234"]).is_err());
    }

    #[test]
    fn cli_parse_normalize_and_countries() {
        let cli = Cli::try_parse_from(["finval", "normalize", "be68 5390"]).unwrap();
        assert!(matches!(cli.command, Commands::Normalize(_)));
        let cli = Cli::try_parse_from(["finval", "countries"]).unwrap();
        assert!(matches!(cli.command, Commands::Countries));
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["finval", "countries"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli1 = Cli::try_parse_from(["finval", "-v", "countries"]).unwrap();
        assert_eq!(cli1.verbose, 1);

        let cli2 = Cli::try_parse_from(["finval", "-vv", "countries"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["finval", "countries", "-vvv"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_global_options() {
        let cli = Cli::try_parse_from([
            "finval",
            "--config",
            "registry.yaml",
            "iban",
            "XK051212012345678906",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("registry.yaml")));
        assert!(cli.json);
    }

    #[test]
    fn cli_missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["finval"]).is_err());
    }

    #[test]
    fn run_reports_missing_config_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            verbose: 0,
            config: Some(dir.path().join("absent.yaml")),
            json: false,
            command: Commands::Countries,
        };
        assert!(run(cli).is_err());
    }

    #[test]
    fn run_applies_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yaml");
        std::fs::write(
            &path,
            "countries:\n  - country: BE\n    length: 16\n    bban: \"12!a\"\n",
        )
        .unwrap();
        let cli = Cli {
            verbose: 0,
            config: Some(path),
            json: false,
            command: Commands::Iban(IbanArgs {
                input: "BE68539007547034".to_string(),
            }),
        };
        assert_eq!(run(cli).unwrap(), finval_cli::EXIT_INVALID);
    }
}
