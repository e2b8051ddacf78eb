//! Error types for doctyp operations.

use thiserror::Error;

/// Errors that can occur while building a doctree from serialized input.
///
/// Translation itself never fails: unsupported constructs degrade into
/// [`Diagnostic`](crate::translate::Diagnostic) values, and cursor imbalance
/// is a debug-asserted contract violation rather than a runtime error.
#[derive(Error, Debug)]
pub enum Error {
    #[cfg(feature = "xml")]
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[cfg(feature = "xml")]
    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("Malformed doctree: {0}")]
    MalformedDoctree(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
