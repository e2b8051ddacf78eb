//! Input document tree (doctree) in normalized form.
//!
//! The doctree is an arena-backed tree over the docutils element model:
//! - Nodes with closed element kinds (sections, paragraphs, lists, etc.)
//! - Sparse attributes (uri, refuri, alt, format) in an AttrMap
//! - Global text buffer with range references
//! - Enter/leave traversal via [`walk`]
//!
//! # Example
//!
//! ```
//! use doctyp::doctree::{Doctree, Kind, NodeId};
//!
//! let mut doc = Doctree::new();
//! let para = doc.add_element(doc.root(), Kind::Paragraph);
//! doc.add_text(para, "Hello world.");
//! assert_eq!(doc.node(doc.root()).unwrap().kind, Kind::Document);
//! assert_eq!(doc.collect_text(NodeId::ROOT), "Hello world.");
//! ```

mod attrs;
mod kind;
mod node;
mod walk;
#[cfg(feature = "xml")]
mod xml;

pub use attrs::AttrMap;
pub use kind::Kind;
pub use node::{Node, NodeId, TextRange};
pub use walk::{walk, Flow, Visit};
#[cfg(feature = "xml")]
pub use xml::parse_xml;

/// A document's content in normalized doctree form.
///
/// The tree uses a parent-pointer / first-child / next-sibling representation
/// for efficient traversal and minimal memory overhead.
#[derive(Debug, Clone)]
pub struct Doctree {
    /// All nodes in the tree (index 0 is always the root).
    nodes: Vec<Node>,
    /// Sparse node attributes (uri, refuri, alt, format, ...).
    pub attrs: AttrMap,
    /// Global text buffer (nodes reference ranges into this).
    text: String,
}

impl Default for Doctree {
    fn default() -> Self {
        Self::new()
    }
}

impl Doctree {
    /// Create a new empty doctree with a document root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Kind::Document)],
            attrs: AttrMap::new(),
            text: String::new(),
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a new node and return its ID.
    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append text to the global buffer and return the range.
    pub fn append_text(&mut self, text: &str) -> TextRange {
        let start = self.text.len() as u32;
        self.text.push_str(text);
        TextRange::new(start, text.len() as u32)
    }

    /// Get text from a range.
    pub fn text(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = (range.start + range.len) as usize;
        &self.text[start..end]
    }

    /// Get the entire text buffer.
    pub fn text_buffer(&self) -> &str {
        &self.text
    }

    /// Append a child node to a parent, after any existing children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(child_node) = self.nodes.get_mut(child.0 as usize) {
            child_node.parent = Some(parent);
        }

        // The child is not linked yet, so the iterator ends at the current
        // last sibling.
        match self.children(parent).last() {
            Some(last) => {
                if let Some(node) = self.nodes.get_mut(last.0 as usize) {
                    node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(node) = self.nodes.get_mut(parent.0 as usize) {
                    node.first_child = Some(child);
                }
            }
        }
    }

    /// Allocate an element node and append it to a parent.
    pub fn add_element(&mut self, parent: NodeId, kind: Kind) -> NodeId {
        let id = self.alloc_node(Node::new(kind));
        self.append_child(parent, id);
        id
    }

    /// Allocate a text node for the given content and append it to a parent.
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let range = self.append_text(text);
        let id = self.alloc_node(Node::text(range));
        self.append_child(parent, id);
        id
    }

    /// Concatenate the text of a node's Text descendants in document order.
    pub fn collect_text(&self, root: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if node.kind == Kind::Text {
                out.push_str(self.text(node.text));
            }
            // Push children in reverse order so they're visited left-to-right
            let mut children: Vec<NodeId> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        let first_child = self
            .nodes
            .get(parent.0 as usize)
            .and_then(|n| n.first_child);
        ChildIter {
            doc: self,
            current: first_child,
        }
    }

    /// Iterate over all nodes in depth-first order.
    pub fn iter_dfs(&self) -> DfsIter<'_> {
        DfsIter {
            doc: self,
            stack: vec![NodeId::ROOT],
        }
    }
}

/// Iterator over children of a node.
pub struct ChildIter<'a> {
    doc: &'a Doctree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self
            .doc
            .nodes
            .get(current.0 as usize)
            .and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Depth-first iterator over all nodes.
pub struct DfsIter<'a> {
    doc: &'a Doctree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DfsIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Push children in reverse order so they're visited left-to-right
        let mut children: Vec<NodeId> = self.doc.children(current).collect();
        children.reverse();
        self.stack.extend(children);

        Some(current)
    }
}
