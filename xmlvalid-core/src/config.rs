//! Validator options: message templates and rendering switches.
use serde::Deserialize;
use std::{collections::BTreeMap, path::{Path, PathBuf}, str::FromStr};
use thiserror::Error;

use crate::messages::ErrorKind;

/// Error returned when options cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read options file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid validator options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Options shared by every validator.
///
/// `messages` overrides the default template per error kind. When
/// `message_length` is set, rendered messages longer than it are cut to
/// `length - 3` characters followed by `...`. With `value_obscured`,
/// `%value%` renders as one `*` per character.
///
/// # Examples
/// ```rust
/// use xmlvalid_core::config::ValidatorOptions;
/// use xmlvalid_core::messages::ErrorKind;
///
/// let options: ValidatorOptions = r#"
///     message_length = 200
///
///     [messages]
///     xmlInvalid = "Rejected: %error%"
/// "#.parse()?;
/// assert_eq!(options.message_template(ErrorKind::Invalid), "Rejected: %error%");
/// assert_eq!(options.message_length(), Some(200));
/// # Ok::<(), xmlvalid_core::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorOptions {
    messages: BTreeMap<ErrorKind, String>,
    message_length: Option<usize>,
    value_obscured: bool,
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    pub fn with_message(mut self, kind: ErrorKind, template: impl Into<String>) -> Self {
        self.messages.insert(kind, template.into());
        self
    }

    pub fn with_message_length(mut self, length: Option<usize>) -> Self {
        self.message_length = length;
        self
    }

    pub fn with_value_obscured(mut self, obscured: bool) -> Self {
        self.value_obscured = obscured;
        self
    }

    /// Template for `kind`, falling back to the built-in default.
    pub fn message_template(&self, kind: ErrorKind) -> &str {
        self.messages
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_template())
    }

    pub fn message_length(&self) -> Option<usize> {
        self.message_length
    }

    pub fn value_obscured(&self) -> bool {
        self.value_obscured
    }
}

impl FromStr for ValidatorOptions {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(input)
    }
}
