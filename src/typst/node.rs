//! Typst output node types.

/// Unique identifier for a node within a [`Content`](super::Content) tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Kind of a Typst output node, with its kind-specific payload.
///
/// Each kind knows how to serialize itself from its payload plus the
/// already-rendered text of its children (see [`super::render`]). Children
/// are held by the arena, not by the kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Root of an output tree. Children join with a blank line.
    #[default]
    Document,
    /// Structural grouping mirroring an input section. Children join with
    /// a blank line.
    Section,
    /// `#heading(level: N, [...])`. `depth` is the structural section
    /// nesting at translation time, never the input's declared level.
    Heading {
        depth: u32,
        /// Anchor embedded as ` <label>` inside the heading content.
        label: Option<String>,
    },
    /// Inline container; children concatenate with no separator.
    Paragraph,
    /// `#list(...)`, with `+list(...)` as the nested continuation form.
    BulletList,
    /// `#enum(...)`, with `+enum(...)` as the nested continuation form.
    NumberedList,
    /// `#table(columns: N, ...)`; every child is one cell in row-major
    /// order.
    Table { columns: u32 },
    /// `#quote(block: true, ...)[...]`.
    Quote { attribution: Option<String> },
    /// `#emph[...]`.
    Emphasis,
    /// `#strong[...]`.
    Strong,
    /// `#sub[...]`.
    Subscript,
    /// `#super[...]`.
    Superscript,
    /// `#raw("...")` with the content as an escaped string literal.
    Raw { content: String },
    /// Fenced raw block with an optional language tag; content verbatim.
    RawBlock {
        language: Option<String>,
        content: String,
    },
    /// Verbatim pass-through; the per-target escape hatch.
    Source { content: String },
    /// `#image("uri", ...)` with optional width/alt named arguments.
    Image {
        uri: String,
        width: Option<String>,
        alt: Option<String>,
    },
    /// Image payload (first child) plus `caption: [...]` from the rest.
    Figure,
    /// `#link("uri", [...])`; display falls back to the URI text.
    Link { uri: String },
    /// Leaf text run, serialized unmodified.
    Text { content: String },
}

impl NodeKind {
    /// Whether this kind is a list (bullet or numbered).
    ///
    /// Lists nested directly under another list render with the `+`
    /// continuation marker and without item brackets around themselves.
    pub fn is_list(&self) -> bool {
        matches!(self, NodeKind::BulletList | NodeKind::NumberedList)
    }

    /// The Typst function name for a list kind.
    pub(crate) fn list_funcname(&self) -> &'static str {
        match self {
            NodeKind::BulletList => "list",
            NodeKind::NumberedList => "enum",
            _ => "",
        }
    }
}

/// A node in the output tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node kind with payload.
    pub kind: NodeKind,
    /// Parent node (None for root). Non-owning; used for upward queries
    /// such as "is my parent also a list".
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Next sibling node.
    pub next_sibling: Option<NodeId>,
}

impl Node {
    /// Create a new node with default values.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            next_sibling: None,
        }
    }
}
