//! Deckhand - Activate Mermaid diagram placeholders in presentation HTML
//!
//! A library that replaces the diagram placeholders of a slide deck with
//! rendered markup. Give it a document and a renderer; it snapshots every
//! unprocessed placeholder, renders each one's trimmed source under a
//! generated graph id, and splices the result back in. A diagram that fails
//! to render is left in place as plain text and reported, so one bad diagram
//! never aborts the pass.
//!
//! # Quick Start
//!
//! ```rust
//! use deckhand::prelude::*;
//!
//! struct EchoRenderer;
//!
//! impl DiagramRenderer for EchoRenderer {
//!     fn render(&self, graph_id: &str, source: &str) -> anyhow::Result<String> {
//!         Ok(format!("<svg id=\"{}\"><desc>{}</desc></svg>", graph_id, source))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "echo"
//!     }
//! }
//!
//! let html = r#"<section><div class="mermaid">graph TD; A-->B</div></section>"#;
//! let activated = deckhand::activate_html(html, &EchoRenderer).unwrap();
//!
//! assert_eq!(activated.report.rendered, 1);
//! assert!(activated.html.contains("data-processed"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, drive the components directly:
//!
//! ```rust
//! use deckhand::prelude::*;
//! # struct EchoRenderer;
//! # impl DiagramRenderer for EchoRenderer {
//! #     fn render(&self, graph_id: &str, source: &str) -> anyhow::Result<String> {
//! #         Ok(format!("<svg id=\"{}\"></svg>", graph_id))
//! #     }
//! #     fn name(&self) -> &'static str { "echo" }
//! # }
//!
//! let mut document = HtmlDocument::parse(
//!     r#"<div class="mermaid">sequenceDiagram A->>B: hi</div>"#,
//! );
//! let activator = Activator::new().with_id_prefix("slide");
//!
//! let report = activator.run(&mut document, &EchoRenderer).unwrap();
//! assert_eq!(report.attempts, 1);
//! assert!(document.html().contains(r#"id="slide0""#));
//! ```
//!
//! The document side is a narrow trait ([`core::DocumentSurface`]), so the
//! activation logic is testable without any HTML; [`html::HtmlDocument`] is
//! the backend for static decks, and the `wasm32` build exposes
//! snapshot/splice bindings for running inside a browser page.

pub mod core;
pub mod html;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ActivationFailure, ActivationReport, Activator, DiagramRenderer, DocumentSurface,
        Placeholder, RendererConfig, RendererLogLevel, Theme,
    };
    pub use crate::html::HtmlDocument;
}

use crate::html::HtmlDocument;

/// An activated document plus the report of its activation pass
#[derive(Debug, Clone)]
pub struct ActivatedHtml {
    /// The rewritten HTML
    pub html: String,
    /// What happened to each placeholder
    pub report: ActivationReport,
}

/// Activate every diagram placeholder in an HTML document
///
/// This is the simplest way to run a full activation pass: default graph-id
/// prefix, default placeholder class. Placeholders that fail to render stay
/// in the output as plain text and are listed in the report.
///
/// # Arguments
/// * `html` - Presentation HTML text
/// * `renderer` - The diagram renderer to draw with
///
/// # Errors
/// Only document rewrite failures error out; renderer failures are contained
/// in the report.
pub fn activate_html<R>(html: &str, renderer: &R) -> anyhow::Result<ActivatedHtml>
where
    R: DiagramRenderer + ?Sized,
{
    activate_html_with(html, renderer, &Activator::new())
}

/// Activate diagram placeholders with a custom-configured [`Activator`]
///
/// Use this when the deck marks placeholders with a different class or the
/// generated ids need a different prefix.
pub fn activate_html_with<R>(
    html: &str,
    renderer: &R,
    activator: &Activator,
) -> anyhow::Result<ActivatedHtml>
where
    R: DiagramRenderer + ?Sized,
{
    let mut document = HtmlDocument::with_placeholder_class(html, activator.placeholder_class());
    let report = activator.run(&mut document, renderer)?;
    Ok(ActivatedHtml {
        html: document.into_html(),
        report,
    })
}
