//! # finval-core: Financial Identifier Validation
//!
//! Validates financial and national identifiers: IBANs, BICs, ISO 11649
//! creditor references and a table of national numbers (South African ID
//! and VAT, Aadhaar, Swiss QR references, Finnish references, NZ IRD).
//!
//! ## Key Design Principles
//!
//! 1. **One normalization step.** Every entry point runs [`normalize()`]
//!    first; nothing downstream sees spaces, separators or lower case.
//!
//! 2. **Checksums take [`Digits`], not `&str`.** The digits-only contract is
//!    carried by the type, so a checksum can never run on unchecked input.
//!
//! 3. **Rules as data.** Country IBAN layouts and national identifier shapes
//!    are [`StructuralRule`] values, not code. Adding a country is a table
//!    row in [`registry`]; the IBAN pipeline in [`iban`] never looks one up.
//!
//! 4. **First failure wins.** Validation stops at the first failing stage and
//!    reports exactly one [`ValidationError`], which maps onto one
//!    [`ErrorKind`].
//!
//! 5. **Validated newtypes.** [`Iban`], [`Bic`] and [`CreditorReference`]
//!    can only be obtained through validation, including via serde.
//!
//! ## Crate Policy
//!
//! - No I/O. Diagnostics go through `tracing` at `debug`/`trace` only.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod checksum;
pub mod digits;
pub mod error;
pub mod iban;
pub mod identity;
pub mod letters;
pub mod national;
pub mod normalize;
pub mod reference;
pub mod registry;
pub mod structure;

// Re-export primary types for ergonomic imports.
pub use checksum::Algorithm;
pub use digits::Digits;
pub use error::{ErrorKind, FinvalError, RuleError, UnknownName, ValidationError};
pub use iban::{compute_check_digits, validate_iban, IbanError, IbanStage};
pub use identity::{Bic, CreditorReference, Iban};
pub use letters::expand;
pub use national::{CheckScheme, IdentifierKind};
pub use normalize::{is_normalized, normalize};
pub use reference::{generate_creditor_reference, validate_creditor_reference};
pub use registry::{CountryRule, IbanRegistry, RegistryConfig};
pub use structure::{validate_structure, CharClass, LengthSpec, Segment, StructuralRule};
