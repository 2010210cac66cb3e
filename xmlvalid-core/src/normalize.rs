//! Serialize-and-reparse normalization.
//!
//! Validation never runs on the caller's document. The document is serialized
//! with formatted output and parsed back into a fresh [`Document`]; that fresh
//! document is the one checked against the schema, and its text is the value
//! reported in messages.
use libxml::{
    parser::{Parser, ParserOptions, XmlParseError},
    tree::{Document, SaveOptions},
};
use tracing::debug;

use crate::capture::ErrorCapture;
use crate::issue::SchemaIssue;

/// A document after one formatted serialize/parse cycle.
pub struct NormalizedDocument {
    xml: String,
    document: Document,
}

impl NormalizedDocument {
    /// Serialized text the document was reparsed from.
    pub fn xml(&self) -> &str {
        &self.xml
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_parts(self) -> (String, Document) {
        (self.xml, self.document)
    }
}

/// Serializes `document` with formatting enabled and reparses the result.
///
/// # Examples
/// ```rust
/// use libxml::parser::Parser;
/// use xmlvalid_core::normalize::normalize;
///
/// let doc = Parser::default().parse_string("<note><to>Ann</to></note>").unwrap();
/// let normalized = normalize(&doc).unwrap();
/// assert!(normalized.xml().contains("<to>Ann</to>"));
/// ```
pub fn normalize(document: &Document) -> Result<NormalizedDocument, Vec<SchemaIssue>> {
    let xml = serialize(document);
    let document = parse_xml(&xml)?;
    Ok(NormalizedDocument { xml, document })
}

/// Formatted XML text of `document`.
pub fn serialize(document: &Document) -> String {
    let xml = document.to_string_with_options(SaveOptions {
        format: true,
        ..SaveOptions::default()
    });
    debug!(bytes = xml.len(), "serialized document");
    xml
}

/// Parses `xml` without error recovery. On failure every error libxml raised
/// during the parse is returned, in order.
pub fn parse_xml(xml: &str) -> Result<Document, Vec<SchemaIssue>> {
    let capture = ErrorCapture::acquire();
    parse_strict(xml).map_err(|err| {
        let issues = capture.drain();
        if xml.trim().is_empty() {
            vec![SchemaIssue::synthetic("Document is empty")]
        } else if !issues.is_empty() {
            issues
        } else {
            vec![SchemaIssue::synthetic(format!("Failed to parse XML: {err:?}"))]
        }
    })
}

pub(crate) fn parse_strict(xml: &str) -> Result<Document, XmlParseError> {
    Parser::default().parse_string_with_options(
        xml,
        ParserOptions {
            recover: false,
            no_error: false,
            ..ParserOptions::default()
        },
    )
}
