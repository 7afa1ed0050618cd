//! Document seam for diagram activation
//!
//! The host document (a live DOM, an HTML file, a test double) is reduced to
//! the two operations the activator actually needs: snapshot the current
//! placeholders, and splice a rendered container in place of one of them.
//! Everything else about the document is out of scope.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Class that marks an element as a diagram placeholder
pub const PLACEHOLDER_CLASS: &str = "mermaid";

/// Attribute marking an element as already processed
///
/// Replacement wrappers carry this marker so downstream listeners (and later
/// activation passes) skip them.
pub const PROCESSED_ATTR: &str = "data-processed";

/// Snapshot record of one diagram placeholder
///
/// `index` is the placeholder's position among the document's diagram
/// containers in document order, and doubles as the replacement target for
/// [`DocumentSurface::replace_placeholder`]. `source` is the raw text content
/// of the element, entities decoded, markup ignored; trimming is the
/// activator's job because some diagram grammars are whitespace-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub index: usize,
    pub source: String,
}

impl Placeholder {
    pub fn new(index: usize, source: impl Into<String>) -> Self {
        Self {
            index,
            source: source.into(),
        }
    }
}

/// Narrow interface over the host document
///
/// Implementations are not required to be thread-safe: activation runs on a
/// single logical thread and each placeholder subtree is touched exactly once
/// per pass.
pub trait DocumentSurface {
    /// Snapshot all unprocessed diagram placeholders, in document order
    ///
    /// The snapshot is fixed: mutations performed while a pass is running do
    /// not add to or remove from an already-taken snapshot.
    fn placeholders(&self) -> Result<Vec<Placeholder>>;

    /// Replace the placeholder at `index` with the given container markup
    ///
    /// The container is expected to carry the processed marker (the activator
    /// builds it that way); after a successful call the original placeholder
    /// subtree is no longer part of the document. Replacing an index that does
    /// not exist, or one that was already replaced, is an error.
    fn replace_placeholder(&mut self, index: usize, container_markup: &str) -> Result<()>;
}
