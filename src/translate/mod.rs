//! Doctree to Typst translation.
//!
//! The [`Translator`] consumes enter/leave events from a doctree walk and
//! incrementally builds a [`Content`] tree behind a movable cursor. Input
//! kinds dispatch along their generalization chain: at each level a special
//! handler wins over the generic builder table, and a kind matched by
//! neither is transparent (its children translate as if hoisted into the
//! parent).
//!
//! Unsupported constructs never fail a translation. Each one is dropped
//! with a [`Diagnostic`] and the rest of the document still renders.
//!
//! # Example
//!
//! ```
//! use doctyp::doctree::{Doctree, Kind};
//!
//! let mut doc = Doctree::new();
//! let section = doc.add_element(doc.root(), Kind::Section);
//! let title = doc.add_element(section, Kind::Title);
//! doc.add_text(title, "Overview");
//!
//! let translation = doctyp::translate(&doc);
//! assert_eq!(
//!     translation.to_text(),
//!     "#heading(\n  level: 1,\n  [Overview]\n)"
//! );
//! assert!(translation.diagnostics.is_empty());
//! ```

mod builders;

use std::fmt;

use crate::doctree::{self, Doctree, Flow, Kind, Visit};
use crate::typst::{self, Content, NodeKind};

/// Report about one input subtree the translator dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Kind of the dropped node.
    pub kind: Kind,
    /// Docutils element name; for [`Kind::Unknown`] this is the raw name
    /// from the source, when one was recorded.
    pub element: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported element: {}", self.element)
    }
}

/// Result of translating one doctree.
#[derive(Debug)]
pub struct Translation {
    /// The assembled Typst content tree.
    pub content: Content,
    /// Subtrees dropped during translation, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Translation {
    /// Serialize the whole content tree to Typst source.
    pub fn to_text(&self) -> String {
        self.content.to_text()
    }
}

/// What one enter call did to the cursor, so the matching leave can undo
/// exactly that without re-deciding (handlers like *reference* are
/// conditional about pushing).
enum Frame {
    /// Enter moved the cursor into a new scoped node.
    Scope,
    /// Enter opened a section: a scoped node plus a depth increment.
    Section,
    /// Enter produced no node; leave has nothing to undo.
    Transparent,
}

/// Builds a [`Content`] tree from a doctree walk.
///
/// One translator handles one walk. Drive it with [`doctree::walk`] and
/// collect the result with [`Translator::finish`], or use the
/// [`translate`] convenience for whole documents.
pub struct Translator {
    content: Content,
    cursor: typst::NodeId,
    /// Number of open sections. Starts at 0 so the outermost section
    /// produces level-1 headings.
    section_depth: u32,
    /// Anchor ids waiting for the next heading, consumed most recent
    /// first. Leftovers are discarded when the translation ends.
    pending_labels: Vec<String>,
    frames: Vec<Frame>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Create a translator with an empty output document.
    pub fn new() -> Self {
        let content = Content::new();
        let cursor = content.root();
        Self {
            content,
            cursor,
            section_depth: 0,
            pending_labels: Vec::new(),
            frames: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Finish the translation and hand back the output tree.
    ///
    /// The cursor must be back at the output root: an enter without its
    /// matching leave is a bug in the walk driver, not an input error.
    pub fn finish(self) -> Translation {
        debug_assert!(
            self.cursor == self.content.root(),
            "translation finished with the cursor off the root"
        );
        debug_assert!(self.frames.is_empty(), "unbalanced enter/leave pairing");
        if !self.pending_labels.is_empty() {
            log::debug!(
                "discarding {} unconsumed pending labels",
                self.pending_labels.len()
            );
        }
        Translation {
            content: self.content,
            diagnostics: self.diagnostics,
        }
    }

    /// Append a scoped output node and move the cursor into it.
    fn push_scope(&mut self, kind: NodeKind, frame: Frame) {
        self.cursor = self.content.push(self.cursor, kind);
        self.frames.push(frame);
    }

    /// Move the cursor back to its parent.
    fn pop_cursor(&mut self) {
        let parent = self
            .content
            .node(self.cursor)
            .and_then(|node| node.parent)
            .unwrap_or_else(|| self.content.root());
        self.cursor = parent;
    }

    /// Handle kinds whose construction needs side information.
    ///
    /// Returns `None` when `kind` has no special handler at this chain
    /// level, letting the dispatcher try the builder table and then the
    /// kind's generalization.
    fn try_special(&mut self, doc: &Doctree, id: doctree::NodeId, kind: Kind) -> Option<Flow> {
        match kind {
            Kind::Section => {
                self.section_depth += 1;
                self.push_scope(NodeKind::Section, Frame::Section);
                Some(Flow::Descend)
            }
            Kind::Title => {
                let depth = self.section_depth.max(1);
                let label = self.pending_labels.pop();
                self.push_scope(NodeKind::Heading { depth, label }, Frame::Scope);
                Some(Flow::Descend)
            }
            Kind::Target => {
                self.enter_target(doc, id);
                Some(Flow::SkipNode)
            }
            Kind::Literal => {
                let content = doc.collect_text(id);
                self.content.push(self.cursor, NodeKind::Raw { content });
                Some(Flow::SkipNode)
            }
            Kind::Raw => {
                // The escape hatch for embedded Typst. Raw blocks tagged
                // for other output formats produce nothing at all.
                let format = doc.attrs.format(id).unwrap_or_default();
                if format
                    .split_whitespace()
                    .any(|tag| tag.eq_ignore_ascii_case("typst"))
                {
                    let content = doc.collect_text(id);
                    self.content.push(self.cursor, NodeKind::Source { content });
                }
                Some(Flow::SkipNode)
            }
            Kind::LiteralBlock => {
                let language = doc.attrs.language(id).map(str::to_string);
                let content = doc.collect_text(id);
                self.content
                    .push(self.cursor, NodeKind::RawBlock { language, content });
                Some(Flow::SkipNode)
            }
            Kind::Image => {
                let uri = doc.attrs.uri(id).unwrap_or_default().to_string();
                let width = doc.attrs.width(id).map(str::to_string);
                let alt = doc.attrs.alt(id).map(str::to_string);
                self.content
                    .push(self.cursor, NodeKind::Image { uri, width, alt });
                Some(Flow::SkipNode)
            }
            Kind::Reference => {
                // External references become links; internal ones are
                // transparent and only contribute their display text.
                match doc.attrs.refuri(id) {
                    Some(refuri) => {
                        let uri = refuri.to_string();
                        self.push_scope(NodeKind::Link { uri }, Frame::Scope);
                    }
                    None => self.frames.push(Frame::Transparent),
                }
                Some(Flow::Descend)
            }
            Kind::Attribution => {
                let text = doc.collect_text(id);
                if let Some(node) = self.content.node_mut(self.cursor) {
                    if let NodeKind::Quote { attribution } = &mut node.kind {
                        *attribution = Some(text);
                    }
                }
                Some(Flow::SkipNode)
            }
            Kind::TableGroup => {
                self.enter_table_group(doc, id);
                self.frames.push(Frame::Transparent);
                Some(Flow::Descend)
            }
            Kind::ColSpec => Some(Flow::SkipNode),
            Kind::Admonition
            | Kind::Transition
            | Kind::DefinitionList
            | Kind::LineBlock
            | Kind::Footnote
            | Kind::FootnoteReference
            | Kind::Citation
            | Kind::CitationReference
            | Kind::Math
            | Kind::MathBlock
            | Kind::Unknown => {
                self.report_unsupported(doc, id);
                Some(Flow::SkipNode)
            }
            _ => None,
        }
    }

    /// Queue or attach the anchor id of a target element.
    ///
    /// A target directly before a section or title queues its id for the
    /// heading about to be built. Anywhere else the id goes to the most
    /// recently built heading under the cursor, provided that heading is
    /// still unlabeled; a target with no usable anchor does nothing.
    fn enter_target(&mut self, doc: &Doctree, id: doctree::NodeId) {
        let Some(anchor) = doc.attrs.refid(id).or_else(|| doc.attrs.id(id)) else {
            return;
        };
        let before_heading = doc
            .node(id)
            .and_then(|node| node.next_sibling)
            .and_then(|sibling| doc.node(sibling))
            .is_some_and(|sibling| matches!(sibling.kind, Kind::Section | Kind::Title));
        if before_heading {
            self.pending_labels.push(anchor.to_string());
        } else {
            self.label_last_heading(anchor);
        }
    }

    /// Attach an anchor to the last heading built under the cursor.
    fn label_last_heading(&mut self, anchor: &str) {
        let mut last = None;
        for child in self.content.children(self.cursor) {
            if let Some(node) = self.content.node(child) {
                if matches!(node.kind, NodeKind::Heading { .. }) {
                    last = Some(child);
                }
            }
        }
        let Some(heading) = last else { return };
        if let Some(node) = self.content.node_mut(heading) {
            if let NodeKind::Heading { label, .. } = &mut node.kind {
                if label.is_none() {
                    *label = Some(anchor.to_string());
                }
            }
        }
    }

    /// Copy declared column metadata onto the enclosing table.
    ///
    /// Falls back to counting colspec children when the input carries no
    /// usable count.
    fn enter_table_group(&mut self, doc: &Doctree, id: doctree::NodeId) {
        let cols = doc.attrs.cols(id).unwrap_or_else(|| {
            doc.children(id)
                .filter(|child| doc.node(*child).map(|n| n.kind) == Some(Kind::ColSpec))
                .count() as u32
        });
        if cols == 0 {
            return;
        }
        if let Some(node) = self.content.node_mut(self.cursor) {
            if let NodeKind::Table { columns } = &mut node.kind {
                *columns = cols;
            }
        }
    }

    fn report_unsupported(&mut self, doc: &Doctree, id: doctree::NodeId) {
        let kind = doc.node(id).map(|node| node.kind).unwrap_or(Kind::Unknown);
        let element = match kind {
            Kind::Unknown => doc.attrs.element(id).unwrap_or("unknown").to_string(),
            _ => kind.name().to_string(),
        };
        log::warn!("dropping unsupported element: {element}");
        self.diagnostics.push(Diagnostic { kind, element });
    }
}

impl Visit for Translator {
    fn enter(&mut self, doc: &Doctree, id: doctree::NodeId) -> Flow {
        let Some(node) = doc.node(id) else {
            return Flow::SkipNode;
        };
        if node.kind.is_invisible() {
            return Flow::SkipNode;
        }

        // Dispatch along the generalization chain, most specific first.
        let mut kind = Some(node.kind);
        while let Some(k) = kind {
            if let Some(flow) = self.try_special(doc, id, k) {
                return flow;
            }
            if let Some(builder) = builders::lookup(k) {
                let out = (builder.build)(doc, id);
                if builder.scoped {
                    self.push_scope(out, Frame::Scope);
                } else {
                    self.content.push(self.cursor, out);
                    self.frames.push(Frame::Transparent);
                }
                return Flow::Descend;
            }
            kind = k.base();
        }

        // Nothing on the chain claimed the node: translate its children
        // in place.
        self.frames.push(Frame::Transparent);
        Flow::Descend
    }

    fn leave(&mut self, _doc: &Doctree, _id: doctree::NodeId) {
        match self.frames.pop() {
            Some(Frame::Section) => {
                self.pop_cursor();
                self.section_depth -= 1;
            }
            Some(Frame::Scope) => self.pop_cursor(),
            Some(Frame::Transparent) => {}
            None => debug_assert!(false, "leave without a matching enter"),
        }
    }
}

/// Translate a whole doctree into Typst content.
pub fn translate(doc: &Doctree) -> Translation {
    let mut translator = Translator::new();
    doctree::walk(doc, doc.root(), &mut translator);
    translator.finish()
}
