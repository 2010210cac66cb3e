//! Schema validators for parsed documents and raw XML text.
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use libxml::tree::Document;
use tracing::{debug, warn};

use crate::config::ValidatorOptions;
use crate::issue::{SchemaIssue, join_issues};
use crate::messages::{ErrorKind, Messages, render};
use crate::normalize::{parse_xml, serialize};
use crate::schema::{Schema, SchemaError};

/// A validator over some input type.
pub trait Validator {
    type Input: ?Sized;

    /// Returns true if and only if `value` is valid against the schema.
    /// On failure the reasons are available from [`Validator::messages`].
    fn is_valid(&mut self, value: &Self::Input) -> bool;

    fn messages(&self) -> &Messages;
}

/// Validation state shared by [`DocumentValidator`] and [`StringValidator`].
#[derive(Debug, Clone)]
pub struct XmlValidator {
    schema: Schema,
    options: ValidatorOptions,
    error: String,
    value: Option<String>,
    messages: Messages,
}

impl XmlValidator {
    /// Fails if `schema` is not an existing file.
    pub fn new(schema: impl Into<PathBuf>, options: ValidatorOptions) -> Result<Self, SchemaError> {
        Ok(Self {
            schema: Schema::new(schema)?,
            options,
            error: String::new(),
            value: None,
            messages: Messages::default(),
        })
    }

    pub fn schema(&self) -> &Path {
        self.schema.path()
    }

    pub fn set_schema(&mut self, schema: impl Into<PathBuf>) -> Result<&mut Self, SchemaError> {
        self.schema.set_path(schema)?;
        Ok(self)
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Joined error text of the last failed call. Successful calls leave it
    /// untouched.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Serialized XML of the last call. Set before reparsing, so a document
    /// that fails to normalize still reports its own text.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Normalizes `document` and validates the result against the schema.
    pub fn validate_document(&mut self, document: &Document) -> bool {
        self.messages.clear();
        debug!(schema = %self.schema.path().display(), "validating document");

        let xml = serialize(document);
        let reparsed = parse_xml(&xml);
        self.value = Some(xml);

        let document = match reparsed {
            Ok(document) => document,
            Err(issues) => {
                self.fail(ErrorKind::NotWellFormed, &issues);
                return false;
            }
        };

        match self.schema.validate(&document) {
            Ok(()) => true,
            Err(issues) => {
                self.fail(ErrorKind::Invalid, &issues);
                false
            }
        }
    }

    /// Parses `xml` and validates the resulting document.
    pub fn validate_str(&mut self, xml: &str) -> bool {
        match parse_xml(xml) {
            Ok(document) => self.validate_document(&document),
            Err(issues) => {
                self.messages.clear();
                self.value = Some(xml.to_string());
                self.fail(ErrorKind::NotWellFormed, &issues);
                false
            }
        }
    }

    fn fail(&mut self, kind: ErrorKind, issues: &[SchemaIssue]) {
        warn!(
            schema = %self.schema.path().display(),
            kind = %kind,
            issues = issues.len(),
            "xml validation failed"
        );
        self.error = join_issues(issues);
        let message = render(&self.options, kind, &self.error, self.value.as_deref());
        self.messages.insert(kind, message);
    }
}

/// Validates already-parsed documents. The caller's document is never
/// modified; a normalized copy is validated.
///
/// # Examples
/// ```rust,no_run
/// use libxml::parser::Parser;
/// use xmlvalid_core::{DocumentValidator, Validator, ValidatorOptions};
///
/// let mut validator = DocumentValidator::new("order.xsd", ValidatorOptions::default())?;
/// let doc = Parser::default()
///     .parse_file("order.xml")
///     .map_err(|e| format!("{e:?}"))?;
/// if !validator.is_valid(&doc) {
///     for (kind, message) in validator.messages().iter() {
///         eprintln!("{kind}: {message}");
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentValidator(XmlValidator);

impl DocumentValidator {
    pub fn new(schema: impl Into<PathBuf>, options: ValidatorOptions) -> Result<Self, SchemaError> {
        XmlValidator::new(schema, options).map(Self)
    }
}

impl Validator for DocumentValidator {
    type Input = Document;

    fn is_valid(&mut self, value: &Document) -> bool {
        self.0.validate_document(value)
    }

    fn messages(&self) -> &Messages {
        self.0.messages()
    }
}

/// Validates raw XML text. Text that is not well-formed fails with
/// [`ErrorKind::NotWellFormed`].
///
/// # Examples
/// ```rust,no_run
/// use xmlvalid_core::{StringValidator, Validator, ValidatorOptions};
///
/// let mut validator = StringValidator::new("order.xsd", ValidatorOptions::default())?;
/// let ok = validator.is_valid("<order/>");
/// # let _ = ok;
/// # Ok::<(), xmlvalid_core::SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StringValidator(XmlValidator);

impl StringValidator {
    pub fn new(schema: impl Into<PathBuf>, options: ValidatorOptions) -> Result<Self, SchemaError> {
        XmlValidator::new(schema, options).map(Self)
    }
}

impl Validator for StringValidator {
    type Input = str;

    fn is_valid(&mut self, value: &str) -> bool {
        self.0.validate_str(value)
    }

    fn messages(&self) -> &Messages {
        self.0.messages()
    }
}

macro_rules! deref_to_core {
    ($($ty:ty),*) => {$(
        impl Deref for $ty {
            type Target = XmlValidator;

            fn deref(&self) -> &XmlValidator {
                &self.0
            }
        }

        impl DerefMut for $ty {
            fn deref_mut(&mut self) -> &mut XmlValidator {
                &mut self.0
            }
        }
    )*};
}

deref_to_core!(DocumentValidator, StringValidator);
