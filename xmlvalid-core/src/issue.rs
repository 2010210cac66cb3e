//! Structured error records reported by libxml.
use std::fmt::{self, Display, Formatter};

use libxml::error::StructuredError;

/// One parse or schema-validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub code: i32,
    pub file: Option<String>,
    pub line: Option<i32>,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(
        code: i32,
        file: Option<String>,
        line: Option<i32>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            file,
            line,
            message: message.into(),
        }
    }

    /// Issue raised by this crate rather than libxml.
    pub(crate) fn synthetic(message: impl Into<String>) -> Self {
        Self::new(0, None, None, message)
    }

    pub(crate) fn from_structured(errors: Vec<StructuredError>) -> Vec<Self> {
        errors.into_iter().map(Self::from).collect()
    }
}

impl From<StructuredError> for SchemaIssue {
    fn from(error: StructuredError) -> Self {
        Self {
            code: error.code,
            file: error.filename,
            line: error.line,
            message: error.message.unwrap_or_default(),
        }
    }
}

/// `Error {code} in {file} (Line:{line}): {message}` with the message trimmed.
impl Display for SchemaIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error {} in {} (Line:{}): {}",
            self.code,
            self.file.as_deref().unwrap_or_default(),
            self.line.unwrap_or_default(),
            self.message.trim()
        )
    }
}

/// Joins issues into the newline-separated error text.
pub fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
