//! End-to-end activation over presentation HTML

use anyhow::Result;

use deckhand::core::{ActivationError, Activator, DiagramRenderer};
use deckhand::prelude::*;

/// Minimal stand-in for a real diagram engine: draws an `<svg>` shell and
/// rejects empty source.
struct FakeEngine;

impl DiagramRenderer for FakeEngine {
    fn render(&self, graph_id: &str, source: &str) -> Result<String> {
        if source.is_empty() {
            return Err(ActivationError::render_failure(graph_id, "no diagram source").into());
        }
        Ok(format!("<svg id=\"{}\"><desc>{}</desc></svg>", graph_id, source))
    }

    fn name(&self) -> &'static str {
        "fake-engine"
    }
}

const DECK: &str = concat!(
    r#"<section><div class="mermaid">graph TD; A--&gt;B</div></section>"#,
    r#"<section><div class="mermaid">   </div></section>"#,
    r#"<section><div class="mermaid">sequenceDiagram A-&gt;&gt;B: hi</div></section>"#,
);

#[test]
fn test_activation_over_presentation_html() {
    let activated = deckhand::activate_html(DECK, &FakeEngine).unwrap();

    assert_eq!(activated.report.attempts, 3);
    assert_eq!(activated.report.rendered, 2);
    assert_eq!(activated.report.failures.len(), 1);
    assert_eq!(activated.report.failures[0].index, 1);

    assert!(activated.html.contains("<svg id=\"theGraph0\">"));
    assert!(activated.html.contains("<svg id=\"theGraph2\">"));
    assert_eq!(activated.html.matches("data-processed=\"true\"").count(), 2);
    // The failed placeholder is still a bare, unprocessed element
    assert!(activated
        .html
        .contains(r#"<section><div class="mermaid">   </div></section>"#));
}

#[test]
fn test_rendered_wrappers_replace_the_originals() {
    let activated = deckhand::activate_html(
        r#"<div class="mermaid">graph TD; A--&gt;B</div>"#,
        &FakeEngine,
    )
    .unwrap();

    // Source text no longer appears outside the rendered markup
    assert!(!activated.html.contains("class=\"mermaid\">graph TD"));
    assert!(activated
        .html
        .contains("<div><div class=\"mermaid\" data-processed=\"true\"><svg id=\"theGraph0\">"));
}

#[test]
fn test_second_pass_over_activated_html_is_a_noop() {
    let deck = concat!(
        r#"<div class="mermaid">graph TD; A-->B</div>"#,
        r#"<div class="mermaid">graph LR; C-->D</div>"#,
    );
    let first = deckhand::activate_html(deck, &FakeEngine).unwrap();
    assert_eq!(first.report.rendered, 2);

    let second = deckhand::activate_html(&first.html, &FakeEngine).unwrap();
    assert_eq!(second.report.attempts, 0);
    assert_eq!(second.html, first.html);
}

#[test]
fn test_highlighter_markup_and_entities_are_flattened() {
    let html = concat!(
        r#"<pre><code class="mermaid">graph <span class="hljs-keyword">TD</span>;"#,
        "\n",
        r#"  A--&gt;B</code></pre>"#,
    );
    let activated = deckhand::activate_html(html, &FakeEngine).unwrap();

    assert_eq!(activated.report.rendered, 1);
    // Tags stripped, entities decoded, outer whitespace trimmed
    assert!(activated.html.contains("<desc>graph TD;\n  A-->B</desc>"));
}

#[test]
fn test_custom_class_and_prefix() {
    let activator = Activator::new()
        .with_placeholder_class("viz")
        .with_id_prefix("slide");
    let activated = deckhand::activate_html_with(
        r#"<div class="viz">graph TD; A-->B</div>"#,
        &FakeEngine,
        &activator,
    )
    .unwrap();

    assert_eq!(activated.report.rendered, 1);
    assert!(activated.html.contains("<svg id=\"slide0\">"));
    assert!(activated.html.contains("class=\"viz\" data-processed=\"true\""));
}

#[test]
fn test_failure_report_carries_source_and_message() {
    let mut document = HtmlDocument::parse(r#"<div class="mermaid">   </div>"#);
    let report = Activator::new().run(&mut document, &FakeEngine).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, "");
    assert!(report.failures[0].message.contains("no diagram source"));
    // Document unchanged at that position
    assert_eq!(document.html(), r#"<div class="mermaid">   </div>"#);
}
