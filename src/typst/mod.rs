//! Typst output document model.
//!
//! The output tree mirrors the structure of the translated document:
//! - Nodes with payload-carrying kinds ([`NodeKind`])
//! - Arena storage with parent back-links for upward queries
//! - Bottom-up serialization: children render before parents consume
//!   their rendered text
//!
//! The tree is usually built by [`crate::translate::Translator`], but any
//! node variant can be composed programmatically:
//!
//! ```
//! use doctyp::typst::{Content, NodeKind};
//!
//! let mut content = Content::new();
//! let para = content.push(content.root(), NodeKind::Paragraph);
//! content.push(para, NodeKind::Text { content: "Hello.".into() });
//! assert_eq!(content.to_text(), "Hello.");
//! ```

mod escape;
mod node;
mod render;

pub use escape::{calculate_fence_length, escape_str, indent_tail};
pub use node::{Node, NodeId, NodeKind};

/// A Typst document under construction.
///
/// The tree uses a parent-pointer / first-child / next-sibling representation
/// for efficient traversal and minimal memory overhead. Children preserve
/// insertion order, which is serialization order.
#[derive(Debug, Clone)]
pub struct Content {
    /// All nodes in the tree (index 0 is always the root).
    nodes: Vec<Node>,
}

impl Default for Content {
    fn default() -> Self {
        Self::new()
    }
}

impl Content {
    /// Create a new empty tree with a Document root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
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

    /// Append a child node to a parent, after any existing children.
    ///
    /// Insertion order is serialization order.
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

    /// Allocate a node of the given kind and append it to a parent.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc_node(Node::new(kind));
        self.append_child(parent, id);
        id
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        let first_child = self
            .nodes
            .get(parent.0 as usize)
            .and_then(|n| n.first_child);
        ChildIter {
            content: self,
            current: first_child,
        }
    }

    /// Serialize the subtree rooted at `id` to Typst source.
    ///
    /// Rendering is bottom-up: each node receives the already-rendered
    /// text of its children, so any node can be serialized in isolation.
    pub fn render(&self, id: NodeId) -> String {
        let children: Vec<String> = self.children(id).map(|c| self.render(c)).collect();
        render::render_node(self, id, &children)
    }

    /// Serialize the whole tree to Typst source.
    pub fn to_text(&self) -> String {
        self.render(self.root())
    }
}

/// Iterator over children of a node.
pub struct ChildIter<'a> {
    content: &'a Content,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self
            .content
            .nodes
            .get(current.0 as usize)
            .and_then(|n| n.next_sibling);
        Some(current)
    }
}
