//! Enter/leave traversal over a doctree.

use super::{Doctree, NodeId};

/// Flow control returned by [`Visit::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Visit the node's children, then call [`Visit::leave`].
    Descend,
    /// Skip the node's children. `leave` is not called for this node.
    SkipNode,
}

/// Visitor over a doctree walk.
///
/// [`walk`] calls `enter` on each node before its children and `leave`
/// after them. The two calls bracket the subtree exactly when `enter`
/// returns [`Flow::Descend`]; a [`Flow::SkipNode`] return suppresses both
/// the children and the matching `leave`.
pub trait Visit {
    /// Called when the walk reaches a node, before its children.
    fn enter(&mut self, doc: &Doctree, id: NodeId) -> Flow;

    /// Called after all of a node's children have been visited.
    fn leave(&mut self, doc: &Doctree, id: NodeId);
}

enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

/// Walk the subtree rooted at `root` in depth-first document order.
///
/// The traversal is iterative, so input nesting depth is bounded by heap
/// rather than call-stack size.
pub fn walk<V: Visit>(doc: &Doctree, root: NodeId, visitor: &mut V) {
    let mut stack = vec![Step::Enter(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => match visitor.enter(doc, id) {
                Flow::Descend => {
                    stack.push(Step::Leave(id));
                    // Push children in reverse order so they're visited
                    // left-to-right
                    let mut children: Vec<NodeId> = doc.children(id).collect();
                    children.reverse();
                    stack.extend(children.into_iter().map(Step::Enter));
                }
                Flow::SkipNode => {}
            },
            Step::Leave(id) => visitor.leave(doc, id),
        }
    }
}
