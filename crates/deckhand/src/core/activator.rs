//! Activation pass over a document's diagram placeholders
//!
//! The activator wires the document seam and the renderer seam together:
//! snapshot the placeholders, render each one's trimmed source under a
//! generated graph id, splice the rendered container back in, and keep going
//! when a diagram fails to render. Hosts call [`Activator::run`] (or the
//! async [`Activator::activate`]) from their "presentation ready" hook.

use anyhow::Result;
use tracing::{debug, info, span, trace, warn, Level};

use super::{DiagramRenderer, DocumentSurface, PLACEHOLDER_CLASS, PROCESSED_ATTR};

/// Default prefix for generated graph ids
pub const DEFAULT_ID_PREFIX: &str = "theGraph";

/// One placeholder that failed to render during a pass
///
/// The placeholder is left untouched in the document; this record is the
/// structured counterpart of the diagnostic log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationFailure {
    /// Snapshot index of the offending placeholder
    pub index: usize,
    /// The trimmed source text that failed to render
    pub source: String,
    /// The renderer's error message, verbatim
    pub message: String,
}

/// Outcome of one activation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationReport {
    /// Number of render attempts (one per snapshotted placeholder)
    pub attempts: usize,
    /// Number of placeholders replaced with rendered markup
    pub rendered: usize,
    /// Placeholders that failed to render and were left in place
    pub failures: Vec<ActivationFailure>,
}

impl ActivationReport {
    /// Number of placeholders that failed to render
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if every attempted placeholder rendered
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs activation passes over diagram placeholders
///
/// # Example
/// ```
/// use deckhand::core::{Activator, DiagramRenderer, DocumentSurface, Placeholder};
///
/// struct EchoRenderer;
///
/// impl DiagramRenderer for EchoRenderer {
///     fn render(&self, graph_id: &str, source: &str) -> anyhow::Result<String> {
///         Ok(format!("<svg id=\"{}\"><desc>{}</desc></svg>", graph_id, source))
///     }
///
///     fn name(&self) -> &'static str {
///         "echo"
///     }
/// }
///
/// struct OneShotDocument(Option<String>);
///
/// impl DocumentSurface for OneShotDocument {
///     fn placeholders(&self) -> anyhow::Result<Vec<Placeholder>> {
///         Ok(self.0.iter().map(|s| Placeholder::new(0, s.clone())).collect())
///     }
///
///     fn replace_placeholder(&mut self, _index: usize, _markup: &str) -> anyhow::Result<()> {
///         self.0 = None;
///         Ok(())
///     }
/// }
///
/// let mut document = OneShotDocument(Some("graph TD; A-->B".into()));
/// let report = Activator::new().run(&mut document, &EchoRenderer).unwrap();
/// assert_eq!(report.rendered, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Activator {
    id_prefix: String,
    placeholder_class: String,
}

impl Default for Activator {
    fn default() -> Self {
        Self::new()
    }
}

impl Activator {
    /// Create an activator with the default id prefix and placeholder class
    pub fn new() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            placeholder_class: PLACEHOLDER_CLASS.to_string(),
        }
    }

    /// Set the prefix used for generated graph ids
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the class carried by replacement wrappers
    pub fn with_placeholder_class(mut self, class: impl Into<String>) -> Self {
        self.placeholder_class = class.into();
        self
    }

    /// Prefix used for generated graph ids
    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    /// Class that marks placeholders and their replacement wrappers
    pub fn placeholder_class(&self) -> &str {
        &self.placeholder_class
    }

    /// Graph id for the placeholder at `index`
    ///
    /// Unique within one pass; a later pass over the same document may reuse
    /// ids.
    pub fn graph_id(&self, index: usize) -> String {
        format!("{}{}", self.id_prefix, index)
    }

    /// Wrap rendered markup in a processed-marked container
    ///
    /// The inner wrapper keeps the placeholder class and carries the
    /// processed marker, so other listeners and later passes skip it; the
    /// outer `<div>` gives hosts a styling hook around the rendered diagram.
    pub fn container_markup(&self, rendered: &str) -> String {
        format!(
            "<div><div class=\"{}\" {}=\"true\">{}</div></div>",
            self.placeholder_class, PROCESSED_ATTR, rendered
        )
    }

    /// Run one activation pass
    ///
    /// Renders every snapshotted placeholder in document order. A renderer
    /// failure is contained: the placeholder stays in the document as plain
    /// text, a diagnostic is emitted, and the pass moves on. Only document
    /// splice errors abort the pass.
    pub fn run<D, R>(&self, document: &mut D, renderer: &R) -> Result<ActivationReport>
    where
        D: DocumentSurface + ?Sized,
        R: DiagramRenderer + ?Sized,
    {
        let snapshot = document.placeholders()?;
        let pass_span = span!(
            Level::INFO,
            "activation_pass",
            placeholders = snapshot.len(),
            renderer = renderer.name()
        );
        let _enter = pass_span.enter();

        trace!("Starting activation pass");

        let mut report = ActivationReport::default();

        for placeholder in &snapshot {
            report.attempts += 1;

            let item_span = span!(Level::DEBUG, "render_placeholder", index = placeholder.index);
            let _item_enter = item_span.enter();

            // trim() because gantt, class and git grammars reject leading whitespace
            let source = placeholder.source.trim();
            let graph_id = self.graph_id(placeholder.index);

            match renderer.render(&graph_id, source) {
                Ok(rendered) => {
                    let container = self.container_markup(&rendered);
                    document.replace_placeholder(placeholder.index, &container)?;
                    report.rendered += 1;
                    debug!(
                        index = placeholder.index,
                        graph_id = %graph_id,
                        "Placeholder replaced with rendered diagram"
                    );
                }
                Err(err) => {
                    warn!(
                        index = placeholder.index,
                        source = %source,
                        error = %err,
                        "Cannot render diagram placeholder"
                    );
                    report.failures.push(ActivationFailure {
                        index: placeholder.index,
                        source: source.to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            attempts = report.attempts,
            rendered = report.rendered,
            failed = report.failed(),
            "Activation pass complete"
        );

        Ok(report)
    }

    /// Async counterpart of [`Activator::run`]
    ///
    /// Executor-free: rendering is awaited to completion before this future
    /// resolves, so completion ordering is deterministic. No specific async
    /// runtime is required.
    pub async fn activate<D, R>(&self, document: &mut D, renderer: &R) -> Result<ActivationReport>
    where
        D: DocumentSurface + ?Sized,
        R: DiagramRenderer + ?Sized,
    {
        self.run(document, renderer)
    }
}
