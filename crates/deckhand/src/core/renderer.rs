//! Renderer seam for diagram activation
//!
//! The diagram engine itself is an external collaborator: grammar parsing,
//! layout, and SVG generation all live behind [`DiagramRenderer`]. This module
//! also defines [`RendererConfig`], the explicit configuration object a host
//! passes into its renderer client at construction time; nothing in this
//! crate touches process-global renderer state.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Core trait for diagram renderers
///
/// Implementations turn diagram source text into visual markup (usually SVG).
/// The generated `graph_id` is unique within one activation pass and should be
/// used as the root id of the produced markup, so several diagrams can share a
/// document without id collisions.
///
/// # Example
/// ```
/// use deckhand::core::DiagramRenderer;
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
/// let svg = EchoRenderer.render("theGraph0", "graph TD; A-->B").unwrap();
/// assert!(svg.contains("theGraph0"));
/// ```
pub trait DiagramRenderer: Send + Sync {
    /// Render diagram source into visual markup under the given graph id
    ///
    /// Returns an error for malformed or unsupported diagram source. The
    /// activator contains such errors per placeholder; they never abort a
    /// pass.
    fn render(&self, graph_id: &str, source: &str) -> Result<String>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;
}

/// Diagram theme applied by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// The renderer's stock appearance
    Plain,
    /// Green-tinted theme (the default)
    #[default]
    Forest,
    /// Dark-background theme
    Dark,
    /// Grayscale theme for print
    Neutral,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Plain => write!(f, "plain"),
            Theme::Forest => write!(f, "forest"),
            Theme::Dark => write!(f, "dark"),
            Theme::Neutral => write!(f, "neutral"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Theme::Plain),
            "forest" => Ok(Theme::Forest),
            "dark" => Ok(Theme::Dark),
            "neutral" => Ok(Theme::Neutral),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Log verbosity of the renderer itself
///
/// Numeric values follow the external renderer's convention (1 = debug ..
/// 5 = fatal), so configs translate one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererLogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Fatal,
}

impl RendererLogLevel {
    /// Numeric level understood by the external renderer
    pub fn as_number(&self) -> u8 {
        match self {
            RendererLogLevel::Debug => 1,
            RendererLogLevel::Info => 2,
            RendererLogLevel::Warn => 3,
            RendererLogLevel::Error => 4,
            RendererLogLevel::Fatal => 5,
        }
    }
}

impl fmt::Display for RendererLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererLogLevel::Debug => write!(f, "debug"),
            RendererLogLevel::Info => write!(f, "info"),
            RendererLogLevel::Warn => write!(f, "warn"),
            RendererLogLevel::Error => write!(f, "error"),
            RendererLogLevel::Fatal => write!(f, "fatal"),
        }
    }
}

/// Configuration handed to a renderer client at construction
///
/// Build one and pass it to whatever [`DiagramRenderer`] implementation the
/// host constructs. There is no process-global renderer state in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Visual theme for rendered diagrams
    pub theme: Theme,
    /// Verbosity of the renderer's own diagnostics
    pub log_level: RendererLogLevel,
}

impl RendererConfig {
    /// Create a config with the default theme and log level
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the renderer log level
    pub fn with_log_level(mut self, log_level: RendererLogLevel) -> Self {
        self.log_level = log_level;
        self
    }
}
