//! Trait-level activation tests
//!
//! These exercise the activator against mock implementations of both seams,
//! so the pass semantics are verified without any HTML involved.

use std::future::Future;
use std::sync::Mutex;
use std::task::{Context, Poll, Waker};

use anyhow::Result;
use proptest::prelude::*;

use deckhand::core::{
    ActivationError, Activator, DiagramRenderer, DocumentSurface, Placeholder,
};

/// Renderer that records every call and rejects empty source
struct RecordingRenderer {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingRenderer {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl DiagramRenderer for RecordingRenderer {
    fn render(&self, graph_id: &str, source: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((graph_id.to_string(), source.to_string()));
        if source.is_empty() {
            return Err(ActivationError::render_failure(graph_id, "empty diagram source").into());
        }
        Ok(format!("<svg id=\"{}\"><desc>{}</desc></svg>", graph_id, source))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Pending(String),
    Replaced(String),
}

/// Document double: a flat list of placeholder slots
struct MockDocument {
    slots: Vec<Slot>,
    fail_replace_at: Option<usize>,
}

impl MockDocument {
    fn new(sources: &[&str]) -> Self {
        Self {
            slots: sources.iter().map(|s| Slot::Pending(s.to_string())).collect(),
            fail_replace_at: None,
        }
    }

    fn replaced(&self, index: usize) -> Option<&str> {
        match &self.slots[index] {
            Slot::Replaced(markup) => Some(markup),
            Slot::Pending(_) => None,
        }
    }
}

impl DocumentSurface for MockDocument {
    fn placeholders(&self) -> Result<Vec<Placeholder>> {
        Ok(self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Pending(source) => Some(Placeholder::new(index, source.clone())),
                Slot::Replaced(_) => None,
            })
            .collect())
    }

    fn replace_placeholder(&mut self, index: usize, container_markup: &str) -> Result<()> {
        if self.fail_replace_at == Some(index) {
            return Err(ActivationError::document_rewrite("splice rejected by host").into());
        }
        match self.slots.get_mut(index) {
            Some(slot @ Slot::Pending(_)) => {
                *slot = Slot::Replaced(container_markup.to_string());
                Ok(())
            }
            Some(Slot::Replaced(_)) => Err(ActivationError::already_processed(index).into()),
            None => Err(ActivationError::unknown_placeholder(index).into()),
        }
    }
}

#[test]
fn test_one_render_attempt_per_placeholder() {
    let renderer = RecordingRenderer::new();
    let mut document = MockDocument::new(&[
        "graph TD; A-->B",
        "graph LR; C-->D",
        "pie \"a\": 1",
        "gantt\ntitle T",
    ]);

    let report = Activator::new().run(&mut document, &renderer).unwrap();

    assert_eq!(report.attempts, 4);
    assert_eq!(report.rendered, 4);
    assert!(report.is_clean());
    assert_eq!(renderer.calls().len(), 4);
}

#[test]
fn test_rendered_placeholder_is_replaced_and_marked() {
    let renderer = RecordingRenderer::new();
    let mut document = MockDocument::new(&["graph TD; A-->B"]);

    Activator::new().run(&mut document, &renderer).unwrap();

    let markup = document.replaced(0).expect("placeholder should be replaced");
    assert!(markup.contains("data-processed=\"true\""));
    assert!(markup.contains("<svg id=\"theGraph0\">"));
}

#[test]
fn test_failed_placeholder_is_left_untouched() {
    let renderer = RecordingRenderer::new();
    let mut document = MockDocument::new(&[""]);

    let report = Activator::new().run(&mut document, &renderer).unwrap();

    assert_eq!(document.slots[0], Slot::Pending(String::new()));
    assert_eq!(report.rendered, 0);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].index, 0);
    assert!(report.failures[0].message.contains("empty diagram source"));
}

#[test]
fn test_processing_order_and_generated_ids() {
    let renderer = RecordingRenderer::new();
    let mut document = MockDocument::new(&["a-->b", "b-->c", "c-->d"]);

    Activator::new().run(&mut document, &renderer).unwrap();

    let ids: Vec<String> = renderer.calls().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["theGraph0", "theGraph1", "theGraph2"]);
}

#[test]
fn test_second_activation_is_a_noop() {
    let renderer = RecordingRenderer::new();
    let mut document = MockDocument::new(&["graph TD; A-->B", "graph LR; C-->D"]);
    let activator = Activator::new();

    let first = activator.run(&mut document, &renderer).unwrap();
    assert_eq!(first.attempts, 2);

    let second = activator.run(&mut document, &renderer).unwrap();
    assert_eq!(second.attempts, 0);
    assert_eq!(renderer.calls().len(), 2);
}

#[test]
fn test_mixed_deck_scenario() {
    let renderer = RecordingRenderer::new();
    let mut document = MockDocument::new(&[
        "graph TD; A-->B",
        "",
        "sequenceDiagram A->>B: hi",
    ]);

    let report = Activator::new().run(&mut document, &renderer).unwrap();

    assert_eq!(report.attempts, 3);
    assert_eq!(report.rendered, 2);
    assert!(document.replaced(0).is_some());
    assert!(document.replaced(1).is_none());
    assert!(document.replaced(2).is_some());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
}

#[test]
fn test_document_splice_error_aborts_the_pass() {
    let renderer = RecordingRenderer::new();
    let mut document = MockDocument::new(&["a-->b", "b-->c"]);
    document.fail_replace_at = Some(0);

    let result = Activator::new().run(&mut document, &renderer);

    assert!(result.is_err());
    // The pass stopped at the broken splice
    assert_eq!(renderer.calls().len(), 1);
}

#[test]
fn test_custom_id_prefix() {
    let renderer = RecordingRenderer::new();
    let mut document = MockDocument::new(&["a-->b"]);

    Activator::new()
        .with_id_prefix("slideViz")
        .run(&mut document, &renderer)
        .unwrap();

    assert_eq!(renderer.calls()[0].0, "slideViz0");
}

#[test]
fn test_async_activation_completes_without_an_executor() {
    let renderer = RecordingRenderer::new();
    let mut document = MockDocument::new(&["graph TD; A-->B"]);
    let activator = Activator::new();

    let mut future = std::pin::pin!(activator.activate(&mut document, &renderer));
    let mut cx = Context::from_waker(Waker::noop());
    match future.as_mut().poll(&mut cx) {
        Poll::Ready(result) => assert_eq!(result.unwrap().rendered, 1),
        Poll::Pending => panic!("activation future should resolve on the first poll"),
    }
}

proptest! {
    /// Every snapshotted placeholder gets exactly one attempt, in order,
    /// with strictly increasing id suffixes, whatever the sources look like.
    #[test]
    fn prop_attempts_match_placeholders(sources in prop::collection::vec(any::<String>(), 0..12)) {
        let renderer = RecordingRenderer::new();
        let refs: Vec<&str> = sources.iter().map(String::as_str).collect();
        let mut document = MockDocument::new(&refs);

        let report = Activator::new().run(&mut document, &renderer).unwrap();
        let calls = renderer.calls();

        prop_assert_eq!(report.attempts, sources.len());
        prop_assert_eq!(calls.len(), sources.len());
        prop_assert_eq!(report.rendered + report.failed(), report.attempts);
        for (index, (graph_id, source)) in calls.iter().enumerate() {
            prop_assert_eq!(graph_id.clone(), format!("theGraph{}", index));
            prop_assert_eq!(source.as_str(), sources[index].trim());
        }
    }
}
