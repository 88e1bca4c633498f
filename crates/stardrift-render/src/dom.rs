//! Minimal document tree
//!
//! Just enough of a DOM to hold a page skeleton, resolve the simple
//! selectors particle fields use, and serialize to HTML. Nodes live in an
//! arena and are addressed by [`NodeId`]; detached nodes stay allocated.

use std::fmt::Write as _;

use crate::element::{StyleHook, style_attribute};

/// Index of a node in its [`Document`]
pub type NodeId = usize;

/// An element node
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub style: Vec<StyleHook>,
    pub text: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// One compound selector, e.g. `div.star-rail.left` or `#skills`
#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(s: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = s;

        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_end > 0 {
            compound.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            match marker {
                '.' => compound.classes.push(name.to_string()),
                '#' => compound.id = Some(name.to_string()),
                _ => return None,
            }
            rest = &body[end..];
        }

        Some(compound)
    }

    fn matches(&self, node: &Node) -> bool {
        self.tag.as_ref().is_none_or(|t| *t == node.tag)
            && self.id.as_ref().is_none_or(|id| node.id.as_ref() == Some(id))
            && self.classes.iter().all(|c| node.has_class(c))
    }
}

/// Descendant selector: compounds separated by whitespace
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    /// Parse a selector; returns `None` for anything beyond tags, ids,
    /// classes and the descendant combinator
    pub fn parse(s: &str) -> Option<Self> {
        let parts = s
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }
}

/// Arena of nodes with a `<body>` root
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding an empty body
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".to_string(),
                ..Default::default()
            }],
        }
    }

    /// The body element
    pub fn body(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str, classes: &[&str]) -> NodeId {
        self.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        });
        self.nodes.len() - 1
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child].parent.take() {
            self.nodes[parent].children.retain(|&c| c != child);
        }
    }

    /// Append a node, moving it from its current parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Insert a node before `reference`, a child of `parent`
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        let index = self.nodes[parent]
            .children
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(self.nodes[parent].children.len());
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.insert(index, child);
    }

    /// Detach every child of a node
    pub fn remove_children(&mut self, parent: NodeId) {
        for child in std::mem::take(&mut self.nodes[parent].children) {
            self.nodes[child].parent = None;
        }
    }

    /// Whether a node matches a selector
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let Some((last, ancestors)) = selector.parts.split_last() else {
            return false;
        };
        if !last.matches(&self.nodes[id]) {
            return false;
        }

        // Match remaining compounds right to left against ancestors
        let mut remaining = ancestors.iter().rev().peekable();
        let mut current = self.nodes[id].parent;
        while let Some(compound) = remaining.peek() {
            let Some(ancestor) = current else {
                return false;
            };
            if compound.matches(&self.nodes[ancestor]) {
                remaining.next();
            }
            current = self.nodes[ancestor].parent;
        }
        true
    }

    /// Attached descendants of `root` in document order
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        out
    }

    /// First element in the document matching a selector
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        std::iter::once(self.body())
            .chain(self.descendants(self.body()))
            .find(|&id| self.matches(id, &selector))
    }

    /// All descendants of `root` matching a selector
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.matches(id, &selector))
            .collect()
    }

    /// Serialize a node and its subtree
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, id, 0);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let node = &self.nodes[id];
        let indent = "  ".repeat(depth);

        let _ = write!(out, "{indent}<{}", node.tag);
        if let Some(node_id) = &node.id {
            let _ = write!(out, " id=\"{}\"", escape(node_id));
        }
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&node.classes.join(" ")));
        }
        for (name, value) in &node.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !node.style.is_empty() {
            let _ = write!(out, " style=\"{}\"", escape(&style_attribute(&node.style)));
        }
        out.push('>');

        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }

        if node.children.is_empty() {
            let _ = writeln!(out, "</{}>", node.tag);
            return;
        }

        out.push('\n');
        for &child in &node.children {
            self.write_node(out, child, depth + 1);
        }
        let _ = writeln!(out, "{indent}</{}>", node.tag);
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills_doc() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let section = doc.create_element("section", &["skills"]);
        doc.node_mut(section).id = Some("skills".to_string());
        let grid = doc.create_element("div", &["skills-grid"]);
        let card = doc.create_element("div", &["skill-category"]);
        doc.append_child(doc.body(), section);
        doc.append_child(section, grid);
        doc.append_child(grid, card);
        (doc, grid, card)
    }

    #[test]
    fn test_selector_parse() {
        assert!(Selector::parse(".star-rail.left").is_some());
        assert!(Selector::parse(".skills .skills-grid").is_some());
        assert!(Selector::parse("div#skills.a").is_some());
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse(".").is_none());
    }

    #[test]
    fn test_query_selector() {
        let (doc, grid, card) = skills_doc();
        assert_eq!(doc.query_selector(".skills .skills-grid"), Some(grid));
        assert_eq!(doc.query_selector("#skills .skill-category"), Some(card));
        assert_eq!(doc.query_selector("body"), Some(doc.body()));
        assert!(doc.query_selector(".skills-grid .skills").is_none());
        assert!(doc.query_selector(".floating-stars").is_none());
    }

    #[test]
    fn test_insert_before_moves_node() {
        let (mut doc, grid, card) = skills_doc();
        let wrap = doc.create_element("div", &["skill-card-wrap"]);
        doc.insert_before(grid, wrap, card);
        doc.append_child(wrap, card);

        assert_eq!(doc.node(grid).children, vec![wrap]);
        assert_eq!(doc.node(card).parent, Some(wrap));
        assert_eq!(doc.query_selector_all(grid, ".skill-category"), vec![card]);
    }

    #[test]
    fn test_remove_children() {
        let (mut doc, grid, card) = skills_doc();
        doc.remove_children(grid);
        assert!(doc.node(grid).children.is_empty());
        assert_eq!(doc.node(card).parent, None);
        assert!(doc.query_selector(".skill-category").is_none());
    }

    #[test]
    fn test_to_html_escapes() {
        let mut doc = Document::new();
        let p = doc.create_element("p", &[]);
        doc.node_mut(p).text = Some("a < b & \"c\"".to_string());
        doc.append_child(doc.body(), p);
        let html = doc.to_html(doc.body());
        assert!(html.contains("<p>a &lt; b &amp; &quot;c&quot;</p>"));
        assert!(html.starts_with("<body>\n"));
        assert!(html.ends_with("</body>\n"));
    }
}
