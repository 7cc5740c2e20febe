use std::sync::LazyLock;

use panel_logging::Logger;
use regex::Regex;
use serde_json::json;

use crate::node::Node;
use crate::passes::{Pass, MARKDOWN_PASSES, PLAIN_TEXT_PASSES};

#[allow(clippy::expect_used)]
static BLANK_LINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("BLANK_LINE_RUNS regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Markdown,
    PlainText,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::PlainText => "txt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::PlainText => "text/plain",
        }
    }

    fn passes(self) -> &'static [Pass] {
        match self {
            OutputFormat::Markdown => MARKDOWN_PASSES,
            OutputFormat::PlainText => PLAIN_TEXT_PASSES,
        }
    }
}

/// Rewrites a content tree into Markdown or plain text.
///
/// The input is never modified; every call works on its own clone.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    logger: Logger,
}

impl ContentExtractor {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn extract(&self, root: &Node, format: OutputFormat) -> String {
        let mut clone = root.clone();
        if let Node::Element(element) = &mut clone {
            for pass in format.passes() {
                let replaced = pass.apply(element);
                if replaced > 0 {
                    self.logger.debug_with(
                        "pass applied",
                        &json!({
                            "format": format.extension(),
                            "tags": pass.label(),
                            "replaced": replaced,
                        }),
                    );
                }
            }
        }
        collapse_blank_lines(&clone.text_content())
    }

    /// Parses `html` as a fragment and extracts it.
    pub fn extract_html(&self, html: &str, format: OutputFormat) -> String {
        self.extract(&Node::parse_fragment(html), format)
    }
}

/// Collapses every run of three or more newlines into one blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE_RUNS.replace_all(text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_keeps_single_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb\n\n\n"), "a\n\nb\n\n");
    }

    #[test]
    fn collapse_is_idempotent() {
        let once = collapse_blank_lines("x\n\n\n\ny\n\n\n\n\n\nz\n");
        assert_eq!(collapse_blank_lines(&once), once);
    }

    #[test]
    fn format_metadata() {
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::PlainText.extension(), "txt");
        assert_eq!(OutputFormat::Markdown.mime_type(), "text/markdown");
        assert_eq!(OutputFormat::PlainText.mime_type(), "text/plain");
    }
}
