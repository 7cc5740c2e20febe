//! Tag-keyed rewrite passes.
//!
//! Each pass visits the descendants of the root in document order, outermost
//! first. A matched element is replaced by a text node built from its current
//! content, so its descendants are never seen by the same pass. The order of
//! the tables below is observable in the output.

use crate::node::{Element, Node};

pub(crate) struct Pass {
    pub(crate) tags: &'static [&'static str],
    /// `None` leaves the element in place and descends into it.
    pub(crate) render: fn(&Element, &str) -> Option<String>,
}

const fn pass(
    tags: &'static [&'static str],
    render: fn(&Element, &str) -> Option<String>,
) -> Pass {
    Pass { tags, render }
}

pub(crate) static MARKDOWN_PASSES: &[Pass] = &[
    pass(&["pre"], md_code_block),
    pass(&["code"], md_inline_code),
    pass(&["h1"], md_heading),
    pass(&["h2"], md_heading),
    pass(&["h3"], md_heading),
    pass(&["h4"], md_heading),
    pass(&["h5"], md_heading),
    pass(&["h6"], md_heading),
    pass(&["a"], md_link),
    pass(&["img"], md_image),
    pass(&["li"], md_list_item),
    pass(&["strong", "b"], md_strong),
    pass(&["em", "i"], md_emphasis),
    pass(&["blockquote"], md_blockquote),
    pass(&["hr"], md_rule),
    pass(&["p"], block_text),
];

pub(crate) static PLAIN_TEXT_PASSES: &[Pass] = &[
    pass(&["pre"], block_text),
    pass(&["h1"], block_text),
    pass(&["h2"], block_text),
    pass(&["h3"], block_text),
    pass(&["h4"], block_text),
    pass(&["h5"], block_text),
    pass(&["h6"], block_text),
    pass(&["a"], inline_text),
    pass(&["img"], text_image),
    pass(&["li"], text_list_item),
    pass(&["strong", "b", "em", "i"], inline_text),
    pass(&["blockquote"], block_text),
    pass(&["hr"], text_rule),
    pass(&["p"], block_text),
    pass(&["div"], text_leaf_container),
];

impl Pass {
    pub(crate) fn label(&self) -> String {
        self.tags.join(",")
    }

    fn selects(&self, element: &Element) -> bool {
        self.tags.iter().any(|tag| element.is(tag))
    }

    /// Applies the pass below `root`; returns how many elements were replaced.
    pub(crate) fn apply(&self, root: &mut Element) -> usize {
        let parent_tag = root.tag.clone();
        let mut replaced = 0;
        for child in root.children.iter_mut() {
            let replacement = match child {
                Node::Element(element) if self.selects(element) => {
                    (self.render)(element, &parent_tag)
                }
                _ => None,
            };
            if let Some(text) = replacement {
                *child = Node::Text(text);
                replaced += 1;
            } else if let Node::Element(element) = child {
                replaced += self.apply(element);
            }
        }
        replaced
    }
}

fn md_code_block(el: &Element, _parent: &str) -> Option<String> {
    Some(format!("```\n{}\n```\n", el.text_content()))
}

fn md_inline_code(el: &Element, _parent: &str) -> Option<String> {
    Some(format!("`{}`", el.text_content()))
}

fn md_heading(el: &Element, _parent: &str) -> Option<String> {
    let level = heading_level(&el.tag);
    Some(format!("{} {}\n\n", "#".repeat(level), el.text_content()))
}

fn heading_level(tag: &str) -> usize {
    tag.strip_prefix('h')
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(1)
}

fn md_link(el: &Element, _parent: &str) -> Option<String> {
    Some(format!(
        "[{}]({})",
        el.text_content(),
        el.attr("href").unwrap_or_default()
    ))
}

fn md_image(el: &Element, _parent: &str) -> Option<String> {
    Some(format!(
        "![{}]({})",
        el.attr("alt").unwrap_or_default(),
        el.attr("src").unwrap_or_default()
    ))
}

// Ordered items all use "1."; renderers renumber.
fn md_list_item(el: &Element, parent: &str) -> Option<String> {
    let marker = if parent == "ol" { "1." } else { "*" };
    Some(format!("{marker} {}\n", el.text_content()))
}

fn md_strong(el: &Element, _parent: &str) -> Option<String> {
    Some(format!("**{}**", el.text_content()))
}

fn md_emphasis(el: &Element, _parent: &str) -> Option<String> {
    Some(format!("*{}*", el.text_content()))
}

fn md_blockquote(el: &Element, _parent: &str) -> Option<String> {
    let quoted = el
        .text_content()
        .split('\n')
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("{quoted}\n\n"))
}

fn md_rule(_el: &Element, _parent: &str) -> Option<String> {
    Some("\n---\n\n".to_string())
}

fn block_text(el: &Element, _parent: &str) -> Option<String> {
    Some(format!("{}\n\n", el.text_content()))
}

fn inline_text(el: &Element, _parent: &str) -> Option<String> {
    Some(el.text_content())
}

fn text_image(el: &Element, _parent: &str) -> Option<String> {
    Some(el.attr("alt").unwrap_or_default().to_string())
}

fn text_list_item(el: &Element, _parent: &str) -> Option<String> {
    Some(format!("- {}\n", el.text_content()))
}

fn text_rule(_el: &Element, _parent: &str) -> Option<String> {
    Some("\n----------\n\n".to_string())
}

// Containers that still hold elements are resolved through their children.
fn text_leaf_container(el: &Element, _parent: &str) -> Option<String> {
    if el.has_element_children() {
        return None;
    }
    let content = el.text_content();
    if content.trim().is_empty() {
        return None;
    }
    Some(format!("{content}\n\n"))
}
