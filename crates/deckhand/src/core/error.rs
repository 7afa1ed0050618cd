//! Error types for diagram activation
//!
//! Renderer failures are contained per placeholder by the activator and never
//! abort a pass; document-surface failures do propagate, since they mean the
//! host document is broken rather than one diagram.

use thiserror::Error;

/// Error types surfaced while activating diagram placeholders
#[derive(Error, Debug)]
pub enum ActivationError {
    #[error("Cannot render diagram {graph_id}: {message}")]
    RenderFailure { graph_id: String, message: String },

    #[error("Document rewrite error: {message}")]
    DocumentRewrite { message: String },

    #[error("No diagram placeholder at index {index}")]
    UnknownPlaceholder { index: usize },

    #[error("Diagram placeholder {index} is already processed")]
    AlreadyProcessed { index: usize },
}

impl ActivationError {
    /// Create a new render failure
    pub fn render_failure(graph_id: impl Into<String>, message: impl ToString) -> Self {
        Self::RenderFailure {
            graph_id: graph_id.into(),
            message: message.to_string(),
        }
    }

    /// Create a new document rewrite error
    pub fn document_rewrite(message: impl ToString) -> Self {
        Self::DocumentRewrite {
            message: message.to_string(),
        }
    }

    /// Create a new unknown-placeholder error
    pub fn unknown_placeholder(index: usize) -> Self {
        Self::UnknownPlaceholder { index }
    }

    /// Create a new already-processed error
    pub fn already_processed(index: usize) -> Self {
        Self::AlreadyProcessed { index }
    }
}
