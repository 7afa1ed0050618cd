//! Core abstractions for diagram activation
//!
//! This module defines the seams the activator works across: the renderer
//! (an opaque external diagram engine) and the document surface (the host
//! document reduced to snapshot-and-splice), plus the activator itself.

mod activator;
mod document;
mod error;
pub mod logging;
mod renderer;

pub use activator::*;
pub use document::*;
pub use error::*;
pub use renderer::*;
