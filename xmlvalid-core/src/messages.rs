//! Error kinds and message templates.
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::config::ValidatorOptions;

/// Failure classes a validator reports.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Well-formed XML that the schema rejects.
    #[serde(rename = "xmlInvalid")]
    Invalid,
    /// Input that could not be parsed as XML.
    #[serde(rename = "xmlNotWellFormed")]
    NotWellFormed,
}

impl ErrorKind {
    pub const fn key(&self) -> &'static str {
        match self {
            ErrorKind::Invalid => "xmlInvalid",
            ErrorKind::NotWellFormed => "xmlNotWellFormed",
        }
    }

    pub const fn default_template(&self) -> &'static str {
        match self {
            ErrorKind::Invalid => "Xml is not valid because of the following error(s): %error%",
            ErrorKind::NotWellFormed => "Xml is not well-formed: %error%",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Rendered messages from the most recent validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages(BTreeMap<ErrorKind, String>);

impl Messages {
    pub fn get(&self, kind: ErrorKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str)
    }

    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.0.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKind, &str)> {
        self.0.iter().map(|(kind, message)| (*kind, message.as_str()))
    }

    pub(crate) fn insert(&mut self, kind: ErrorKind, message: String) {
        self.0.insert(kind, message);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

/// Renders the template for `kind`, substituting `%value%` and `%error%`.
pub(crate) fn render(
    options: &ValidatorOptions,
    kind: ErrorKind,
    error: &str,
    value: Option<&str>,
) -> String {
    let template = options.message_template(kind);

    let value = value.unwrap_or_default();
    let value = if options.value_obscured() {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let message = template
        .replace("%value%", &value)
        .replace("%error%", error);

    match options.message_length() {
        Some(limit) => truncate(message, limit),
        None => message,
    }
}

/// Never returns more than `limit` characters. Limits below 4 leave no room
/// for text before the ellipsis, so the message is cut without one.
fn truncate(message: String, limit: usize) -> String {
    if message.chars().count() <= limit {
        return message;
    }
    if limit <= 3 {
        return message.chars().take(limit).collect();
    }
    let mut cut: String = message.chars().take(limit.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
