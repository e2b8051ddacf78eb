//! # doctyp
//!
//! A library for translating docutils document trees into Typst source.
//!
//! ## Features
//!
//! - Arena-backed doctree model with enter/leave traversal
//! - Closed element-kind set with generalization-chain dispatch
//! - Typst content tree serialized bottom-up, one pure function per kind
//! - Cursor-driven translator with pending labels and drop diagnostics
//! - Docutils-XML ingest behind the default `xml` feature
//!
//! ## Quick Start
//!
//! ```
//! use doctyp::doctree::{Doctree, Kind};
//!
//! let mut doc = Doctree::new();
//! let section = doc.add_element(doc.root(), Kind::Section);
//! let title = doc.add_element(section, Kind::Title);
//! doc.add_text(title, "Overview");
//! let para = doc.add_element(section, Kind::Paragraph);
//! doc.add_text(para, "Hello.");
//!
//! let translation = doctyp::translate(&doc);
//! assert_eq!(
//!     translation.to_text(),
//!     "#heading(\n  level: 1,\n  [Overview]\n)\n\nHello."
//! );
//! ```
//!
//! Doctrees normally come from an upstream parser, either handed over
//! programmatically as above or as serialized docutils XML via
//! [`doctree::parse_xml`].
//!
//! ## Composing Output Directly
//!
//! The [`typst::Content`] tree can also be built without a doctree, for
//! callers that assemble Typst fragments themselves:
//!
//! ```
//! use doctyp::typst::{Content, NodeKind};
//!
//! let mut content = Content::new();
//! let quote = content.push(
//!     content.root(),
//!     NodeKind::Quote {
//!         attribution: Some("Knuth".into()),
//!     },
//! );
//! content.push(
//!     quote,
//!     NodeKind::Text {
//!         content: "Premature optimization is the root of all evil.".into(),
//!     },
//! );
//! assert!(content.to_text().starts_with("#quote("));
//! ```

pub mod doctree;
pub mod error;
pub mod translate;
pub mod typst;

pub use doctree::Doctree;
pub use error::{Error, Result};
pub use translate::{translate, Diagnostic, Translation, Translator};
pub use typst::Content;
