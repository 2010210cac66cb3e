//! Schema file handle.
use std::path::{Path, PathBuf};

use libxml::{
    schemas::{SchemaParserContext, SchemaValidationContext},
    tree::Document,
};
use thiserror::Error;

use crate::issue::SchemaIssue;

/// Errors raised when a schema path is set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Schema file '{}' does not exist.", .path.display())]
    NotFound { path: PathBuf },
    #[error("Schema path '{}' is not valid UTF-8", .path.display())]
    NonUtf8Path { path: PathBuf },
}

/// Path to an XSD file that existed when it was set.
///
/// # Examples
/// ```rust,no_run
/// use xmlvalid_core::schema::Schema;
///
/// let mut schema = Schema::new("schemas/order.xsd")?;
/// schema.set_path("schemas/order-v2.xsd")?;
/// assert!(schema.path().ends_with("order-v2.xsd"));
/// # Ok::<(), xmlvalid_core::schema::SchemaError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    path: PathBuf,
}

impl Schema {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SchemaError> {
        let path = path.into();
        check_path(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the stored path. On error the previous path is kept.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, SchemaError> {
        let path = path.into();
        check_path(&path)?;
        self.path = path;
        Ok(self)
    }

    /// Compiles the schema and validates `document` against it.
    ///
    /// Compilation happens on every call; nothing is cached between calls.
    pub(crate) fn validate(&self, document: &Document) -> Result<(), Vec<SchemaIssue>> {
        let mut validation_ctx = self.build_validation_context()?;
        validation_ctx
            .validate_document(document)
            .map_err(SchemaIssue::from_structured)
    }

    fn build_validation_context(&self) -> Result<SchemaValidationContext, Vec<SchemaIssue>> {
        let xsd_path = self.path.to_str().ok_or_else(|| {
            vec![SchemaIssue::synthetic(format!(
                "Schema path '{}' is not valid UTF-8",
                self.path.display()
            ))]
        })?;

        let mut parser_ctx = SchemaParserContext::from_file(xsd_path);
        SchemaValidationContext::from_parser(&mut parser_ctx).map_err(|errors| {
            let issues = SchemaIssue::from_structured(errors);
            if issues.is_empty() {
                vec![SchemaIssue::synthetic(format!(
                    "Failed to compile schema '{xsd_path}'"
                ))]
            } else {
                issues
            }
        })
    }
}

fn check_path(path: &Path) -> Result<(), SchemaError> {
    if !path.is_file() {
        return Err(SchemaError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if path.to_str().is_none() {
        return Err(SchemaError::NonUtf8Path {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
