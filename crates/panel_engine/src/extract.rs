use scraper::{Html, Selector};

use crate::node::Node;
use crate::types::ExtractError;

/// Scrollable region holding the conversation.
pub const CONTAINER_SELECTOR: &str =
    r#"div[cdkscrollable][data-test-id="scroll-container"].container"#;

/// Rendered answer inside the container.
pub const CONTENT_SELECTOR: &str =
    "div.markdown.markdown-main-panel.stronger.enable-updated-hr-color";

/// A parsed page. Read-only: extraction always works on owned copies.
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// `<title>` text with ASCII whitespace runs collapsed, like `document.title`.
    pub fn title(&self) -> String {
        let Ok(sel) = Selector::parse("title") else {
            return String::new();
        };
        self.html
            .select(&sel)
            .next()
            .map(|t| {
                t.text()
                    .collect::<String>()
                    .split_ascii_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }

    pub fn contains(&self, selector: &str) -> Result<bool, ExtractError> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().is_some())
    }

    /// Owned copy of the first element matching `selector`.
    pub fn select_first(&self, selector: &str) -> Result<Option<Node>, ExtractError> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(Node::from_element_ref))
    }
}

/// Finds the content pane: the first container, then the first pane inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLocator {
    pub container_selector: String,
    pub content_selector: String,
}

impl Default for ContentLocator {
    fn default() -> Self {
        Self {
            container_selector: CONTAINER_SELECTOR.to_string(),
            content_selector: CONTENT_SELECTOR.to_string(),
        }
    }
}

impl ContentLocator {
    pub fn locate(&self, document: &Document) -> Result<Node, ExtractError> {
        let container_sel = parse_selector(&self.container_selector)?;
        let content_sel = parse_selector(&self.content_selector)?;

        let container = document
            .html
            .select(&container_sel)
            .next()
            .ok_or(ExtractError::ContainerNotFound)?;
        let pane = container
            .select(&content_sel)
            .next()
            .ok_or(ExtractError::ContentElementNotFound)?;

        Ok(Node::from_element_ref(pane))
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
