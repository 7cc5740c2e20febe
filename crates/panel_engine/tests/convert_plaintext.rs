use panel_engine::{ContentExtractor, OutputFormat};
use panel_logging::{Logger, LoggerConfig};
use pretty_assertions::assert_eq;

fn plain(html: &str) -> String {
    panel_logging::initialize_for_tests();
    let extractor = ContentExtractor::new(Logger::new(LoggerConfig::default(), "test"));
    extractor.extract_html(html, OutputFormat::PlainText)
}

#[test]
fn plain_text_node_passes_through() {
    assert_eq!(plain("just some words"), "just some words");
}

#[test]
fn heading_keeps_text_only() {
    assert_eq!(plain("<h2>Title</h2>"), "Title\n\n");
}

#[test]
fn link_keeps_visible_text() {
    assert_eq!(plain(r#"<a href="http://x">Click</a>"#), "Click");
}

#[test]
fn image_becomes_alt_text() {
    assert_eq!(plain(r#"<p>a<img alt="chart" src="c.png">b</p>"#), "achartb\n\n");
    assert_eq!(plain(r#"<p>a<img src="c.png">b</p>"#), "ab\n\n");
}

#[test]
fn every_list_item_uses_a_dash() {
    assert_eq!(plain("<ul><li>A</li><li>B</li></ul>"), "- A\n- B\n");
    assert_eq!(plain("<ol><li>A</li><li>B</li></ol>"), "- A\n- B\n");
}

#[test]
fn code_block_is_kept_verbatim() {
    assert_eq!(
        plain("<pre>fn main() {\n    run();\n}</pre>"),
        "fn main() {\n    run();\n}\n\n"
    );
}

#[test]
fn inline_code_is_not_decorated() {
    assert_eq!(plain("<p>Run <code>cargo</code></p>"), "Run cargo\n\n");
}

#[test]
fn emphasis_is_unwrapped() {
    assert_eq!(
        plain("<p><strong>bold</strong> <b>b</b> <em>it</em> <i>i</i></p>"),
        "bold b it i\n\n"
    );
}

#[test]
fn blockquote_has_no_prefix() {
    assert_eq!(plain("<blockquote>quoted</blockquote>"), "quoted\n\n");
}

#[test]
fn horizontal_rule_is_ten_dashes() {
    assert_eq!(plain("<p>a</p><hr><p>b</p>"), "a\n\n----------\n\nb\n\n");
}

#[test]
fn leaf_containers_become_blocks() {
    assert_eq!(
        plain("<div><div>one</div><div>two</div></div>"),
        "one\n\ntwo\n\n"
    );
}

#[test]
fn containers_with_elements_are_left_to_children() {
    assert_eq!(plain("<div><span>a</span><span>b</span></div>"), "ab");
}

#[test]
fn blank_containers_are_left_alone() {
    assert_eq!(plain("<p>x</p><div>   </div><p>y</p>"), "x\n\n   y\n\n");
}

#[test]
fn runs_of_newlines_collapse() {
    assert_eq!(plain("<h1>A</h1><p></p><p></p><p>B</p>"), "A\n\nB\n\n");
}
