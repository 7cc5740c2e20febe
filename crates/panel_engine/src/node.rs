//! Owned content tree the extractor rewrites.
//!
//! Parsed pages are converted into this structure once; the extractor then
//! clones it and replaces matched elements with synthesized text nodes.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn element(tag: &str) -> Self {
        Node::Element(Element::new(tag))
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Builds an owned copy of a parsed element and its subtree.
    ///
    /// Comments, doctypes and processing instructions are dropped; they never
    /// contribute text.
    pub fn from_element_ref(element: ElementRef<'_>) -> Self {
        Node::Element(Element {
            tag: element.value().name().to_ascii_lowercase(),
            attrs: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            children: convert_children(*element),
        })
    }

    /// Parses an HTML fragment and wraps its top-level nodes in a `div`.
    pub fn parse_fragment(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        Node::Element(Element {
            tag: "div".to_string(),
            attrs: Vec::new(),
            children: convert_children(*fragment.root_element()),
        })
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Attribute lookup, case-insensitive on the name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn has_element_children(&self) -> bool {
        self.element_children().next().is_some()
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

fn convert_children(parent: NodeRef<'_, scraper::Node>) -> Vec<Node> {
    parent
        .children()
        .filter_map(|child| match child.value() {
            scraper::Node::Text(text) => Some(Node::Text(text.to_string())),
            scraper::Node::Element(_) => ElementRef::wrap(child).map(Node::from_element_ref),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_concatenates_descendants() {
        let node: Node = Element::new("div")
            .with_child(Node::text("Hello "))
            .with_child(Element::new("span").with_child(Node::text("World")).into())
            .into();
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn attributes_are_case_insensitive() {
        let link = Element::new("A").with_attr("HREF", "https://example.com");
        assert_eq!(link.tag, "a");
        assert_eq!(link.attr("href"), Some("https://example.com"));
        assert_eq!(link.attr("title"), None);
    }

    #[test]
    fn element_children_skip_text() {
        let div = Element::new("div")
            .with_child(Node::text("a"))
            .with_child(Node::element("span"))
            .with_child(Node::text("b"));
        assert_eq!(div.element_children().count(), 1);
        assert!(div.has_element_children());
    }

    #[test]
    fn fragment_parsing_keeps_text_and_drops_comments() {
        let node = Node::parse_fragment("<p>One <!-- hidden --><b>two</b></p>");
        let root = node.as_element().unwrap();
        assert_eq!(root.tag, "div");
        assert_eq!(root.children.len(), 1);
        assert_eq!(node.text_content(), "One two");
    }
}
