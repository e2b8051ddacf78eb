//! Kind-to-builder mapping for the generic translation path.
//!
//! Most input kinds need no side information: entering one constructs a
//! fixed output kind under the cursor and descends. This table captures
//! those. Kinds needing extra state (pending labels, attribute reads,
//! flattened text) go through the translator's special handlers instead,
//! and kinds absent from both are transparent.

use crate::doctree::{Doctree, Kind, NodeId};
use crate::typst::NodeKind;

/// Output construction for one input kind.
#[derive(Clone, Copy)]
pub(super) struct Builder {
    /// Construct the output kind from the input node.
    pub(super) build: fn(&Doctree, NodeId) -> NodeKind,
    /// Whether the construct owns a scope. A scoped builder moves the
    /// cursor into the new node on enter; the matching leave moves it back.
    /// An unscoped builder appends the node and leaves the cursor alone.
    pub(super) scoped: bool,
}

/// Look up the builder for an exact input kind.
///
/// Generalization-chain fallback is the dispatcher's job: it walks
/// [`Kind::base`] itself so special handlers and builders compete at each
/// level of the chain.
pub(super) fn lookup(kind: Kind) -> Option<Builder> {
    let build: fn(&Doctree, NodeId) -> NodeKind = match kind {
        Kind::Text => text,
        Kind::Paragraph => |_, _| NodeKind::Paragraph,
        Kind::BulletList => |_, _| NodeKind::BulletList,
        Kind::EnumeratedList => |_, _| NodeKind::NumberedList,
        Kind::BlockQuote => |_, _| NodeKind::Quote { attribution: None },
        Kind::Figure => |_, _| NodeKind::Figure,
        // Column count starts at the default and is fixed up when the
        // column-group metadata is entered.
        Kind::Table | Kind::FieldList | Kind::Docinfo => |_, _| NodeKind::Table { columns: 2 },
        Kind::Emphasis => |_, _| NodeKind::Emphasis,
        Kind::Strong => |_, _| NodeKind::Strong,
        Kind::Subscript => |_, _| NodeKind::Subscript,
        Kind::Superscript => |_, _| NodeKind::Superscript,
        _ => return None,
    };
    Some(Builder { build, scoped: true })
}

fn text(doc: &Doctree, id: NodeId) -> NodeKind {
    let content = doc
        .node(id)
        .map(|node| doc.text(node.text))
        .unwrap_or_default()
        .to_string();
    NodeKind::Text { content }
}
