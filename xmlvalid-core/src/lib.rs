//! Validate XML documents and XML strings against XSD schema files with libxml.
//!
//! # Examples
//! ```rust,no_run
//! use xmlvalid_core::{StringValidator, Validator, ValidatorOptions};
//!
//! let mut validator = StringValidator::new("schemas/order.xsd", ValidatorOptions::default())?;
//! if !validator.is_valid("<order><item/></order>") {
//!     for (_, message) in validator.messages().iter() {
//!         eprintln!("{message}");
//!     }
//! }
//! # Ok::<(), xmlvalid_core::Error>(())
//! ```
mod capture;
pub mod config;
pub mod issue;
pub mod messages;
pub mod normalize;
pub mod schema;
pub mod validator;

use thiserror::Error;

pub use config::{ConfigError, ValidatorOptions};
pub use issue::SchemaIssue;
pub use messages::{ErrorKind, Messages};
pub use schema::{Schema, SchemaError};
pub use validator::{DocumentValidator, StringValidator, Validator, XmlValidator};

/// Top-level error wrapper for fallible setup operations.
///
/// Validation itself never returns an error; see [`Validator::is_valid`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::{ConfigError, SchemaError};

    #[test]
    fn error_conversions_cover_variants() {
        let err: Error = SchemaError::NotFound {
            path: "missing.xsd".into(),
        }
        .into();
        assert!(matches!(err, Error::Schema(_)));
        assert_eq!(err.to_string(), "Schema file 'missing.xsd' does not exist.");

        let toml_err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let err: Error = ConfigError::from(toml_err).into();
        assert!(matches!(err, Error::Config(_)));
    }
}
