//! Sparse attributes for doctree nodes.
//!
//! Most nodes carry no attributes the translator cares about.
//! Using HashMaps is more memory-efficient than `Option<String>` on every
//! node.
//!
//! String values are stored in a single contiguous buffer, with TextRange
//! references into that buffer. This avoids per-attribute String allocations.

use std::collections::HashMap;

use super::node::{NodeId, TextRange};

/// Sparse map for node attributes.
///
/// Stores attributes only for nodes that have them, saving memory
/// compared to storing `Option<String>` on every node.
///
/// All string values are stored in a single buffer, with TextRange
/// references. This eliminates per-attribute heap allocations.
#[derive(Debug, Default, Clone)]
pub struct AttrMap {
    /// Contiguous buffer for all string attribute values.
    buffer: String,
    /// uri attribute (for images).
    uri: HashMap<NodeId, TextRange>,
    /// refuri attribute (for references and external targets).
    refuri: HashMap<NodeId, TextRange>,
    /// refid attribute (for internal targets pointing at an anchor).
    refid: HashMap<NodeId, TextRange>,
    /// alt attribute (for images).
    alt: HashMap<NodeId, TextRange>,
    /// width attribute (for images); kept verbatim, units included.
    width: HashMap<NodeId, TextRange>,
    /// format attribute (for raw elements).
    format: HashMap<NodeId, TextRange>,
    /// language attribute (for literal blocks).
    language: HashMap<NodeId, TextRange>,
    /// First entry of the ids attribute (anchor name).
    id: HashMap<NodeId, TextRange>,
    /// Raw element name, kept for nodes outside the closed kind set.
    element: HashMap<NodeId, TextRange>,
    /// cols attribute (for tgroup elements).
    cols: HashMap<NodeId, u32>,
}

impl AttrMap {
    /// Create a new empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string to the buffer and return its TextRange.
    fn append(&mut self, s: &str) -> TextRange {
        let start = self.buffer.len() as u32;
        self.buffer.push_str(s);
        TextRange::new(start, s.len() as u32)
    }

    /// Get a string slice from a TextRange.
    fn get_str(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = (range.start + range.len) as usize;
        &self.buffer[start..end]
    }

    // --- uri ---

    /// Set the uri for a node.
    pub fn set_uri(&mut self, node: NodeId, uri: &str) {
        if !uri.is_empty() {
            let range = self.append(uri);
            self.uri.insert(node, range);
        }
    }

    /// Get the uri for a node.
    pub fn uri(&self, node: NodeId) -> Option<&str> {
        self.uri.get(&node).map(|r| self.get_str(*r))
    }

    // --- refuri ---

    /// Set the refuri for a node.
    pub fn set_refuri(&mut self, node: NodeId, refuri: &str) {
        if !refuri.is_empty() {
            let range = self.append(refuri);
            self.refuri.insert(node, range);
        }
    }

    /// Get the refuri for a node.
    pub fn refuri(&self, node: NodeId) -> Option<&str> {
        self.refuri.get(&node).map(|r| self.get_str(*r))
    }

    // --- refid ---

    /// Set the refid for a node.
    pub fn set_refid(&mut self, node: NodeId, refid: &str) {
        if !refid.is_empty() {
            let range = self.append(refid);
            self.refid.insert(node, range);
        }
    }

    /// Get the refid for a node.
    pub fn refid(&self, node: NodeId) -> Option<&str> {
        self.refid.get(&node).map(|r| self.get_str(*r))
    }

    // --- alt ---

    /// Set the alt text for a node.
    pub fn set_alt(&mut self, node: NodeId, alt: &str) {
        if !alt.is_empty() {
            let range = self.append(alt);
            self.alt.insert(node, range);
        }
    }

    /// Get the alt text for a node.
    pub fn alt(&self, node: NodeId) -> Option<&str> {
        self.alt.get(&node).map(|r| self.get_str(*r))
    }

    // --- width ---

    /// Set the width for a node. The value is kept verbatim ("320px", "40%").
    pub fn set_width(&mut self, node: NodeId, width: &str) {
        if !width.is_empty() {
            let range = self.append(width);
            self.width.insert(node, range);
        }
    }

    /// Get the width for a node.
    pub fn width(&self, node: NodeId) -> Option<&str> {
        self.width.get(&node).map(|r| self.get_str(*r))
    }

    // --- format ---

    /// Set the output format tag for a raw node.
    pub fn set_format(&mut self, node: NodeId, format: &str) {
        if !format.is_empty() {
            let range = self.append(format);
            self.format.insert(node, range);
        }
    }

    /// Get the output format tag for a raw node.
    pub fn format(&self, node: NodeId) -> Option<&str> {
        self.format.get(&node).map(|r| self.get_str(*r))
    }

    // --- language ---

    /// Set the highlight language for a literal block.
    pub fn set_language(&mut self, node: NodeId, language: &str) {
        if !language.is_empty() {
            let range = self.append(language);
            self.language.insert(node, range);
        }
    }

    /// Get the highlight language for a literal block.
    pub fn language(&self, node: NodeId) -> Option<&str> {
        self.language.get(&node).map(|r| self.get_str(*r))
    }

    // --- id ---

    /// Set the anchor id for a node.
    ///
    /// Docutils nodes may carry several ids; only the first one is kept,
    /// matching how anchors are emitted.
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if !id.is_empty() {
            let range = self.append(id);
            self.id.insert(node, range);
        }
    }

    /// Get the anchor id for a node.
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.id.get(&node).map(|r| self.get_str(*r))
    }

    // --- element ---

    /// Record the raw element name of a node outside the closed kind set.
    pub fn set_element(&mut self, node: NodeId, element: &str) {
        if !element.is_empty() {
            let range = self.append(element);
            self.element.insert(node, range);
        }
    }

    /// Get the raw element name recorded for a node.
    pub fn element(&self, node: NodeId) -> Option<&str> {
        self.element.get(&node).map(|r| self.get_str(*r))
    }

    // --- cols ---

    /// Set the declared column count for a tgroup node.
    pub fn set_cols(&mut self, node: NodeId, cols: u32) {
        if cols > 0 {
            self.cols.insert(node, cols);
        }
    }

    /// Get the declared column count for a tgroup node.
    pub fn cols(&self, node: NodeId) -> Option<u32> {
        self.cols.get(&node).copied()
    }

    // --- Generic access ---

    /// Set an attribute by its docutils name.
    ///
    /// Returns `true` if the attribute name was recognized, `false`
    /// otherwise. Space-separated `ids` lists collapse to their first
    /// entry; a non-numeric `cols` value is recognized but not stored.
    ///
    /// # Example
    ///
    /// ```
    /// use doctyp::doctree::{AttrMap, NodeId};
    ///
    /// let mut attrs = AttrMap::new();
    /// let node = NodeId(1);
    ///
    /// assert!(attrs.set_attr(node, "refuri", "https://example.com/"));
    /// assert!(!attrs.set_attr(node, "classes", "note")); // Unrecognized
    /// assert_eq!(attrs.refuri(node), Some("https://example.com/"));
    /// ```
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        match name {
            "uri" => {
                self.set_uri(node, value);
                true
            }
            "refuri" => {
                self.set_refuri(node, value);
                true
            }
            "refid" => {
                self.set_refid(node, value);
                true
            }
            "alt" => {
                self.set_alt(node, value);
                true
            }
            "width" => {
                self.set_width(node, value);
                true
            }
            "format" => {
                self.set_format(node, value);
                true
            }
            "language" => {
                self.set_language(node, value);
                true
            }
            "ids" => {
                if let Some(first) = value.split_whitespace().next() {
                    self.set_id(node, first);
                }
                true
            }
            "cols" => {
                if let Ok(cols) = value.trim().parse() {
                    self.set_cols(node, cols);
                }
                true
            }
            _ => false,
        }
    }

    /// Get the total number of stored attributes.
    pub fn len(&self) -> usize {
        self.uri.len()
            + self.refuri.len()
            + self.refid.len()
            + self.alt.len()
            + self.width.len()
            + self.format.len()
            + self.language.len()
            + self.id.len()
            + self.element.len()
            + self.cols.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
