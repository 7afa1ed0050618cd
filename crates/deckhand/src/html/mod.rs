//! HTML-text backend for the document seam
//!
//! [`HtmlDocument`] implements [`DocumentSurface`] over presentation HTML held
//! as a string, using the `lol_html` streaming rewriter. Placeholders are
//! elements bearing the placeholder class without a processed marker; a
//! placeholder's source is the element's text content with markup ignored
//! (what `innerText` would give in a browser, so spans injected by syntax
//! highlighters don't leak into the diagram source) and entities decoded.
//!
//! A placeholder's `index` is its position among *all* elements bearing the
//! placeholder class, processed or not. Replacement containers keep the class,
//! so indices stay stable while a pass splices earlier placeholders.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, text, RewriteStrSettings};

use crate::core::{ActivationError, DocumentSurface, Placeholder, PLACEHOLDER_CLASS, PROCESSED_ATTR};

/// Reduce a class name to the characters lol_html's selector parser accepts.
///
/// Falls back to the default placeholder class when nothing survives.
fn sanitize_class(raw: &str) -> String {
    let class: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if class.is_empty() || class.starts_with(|c: char| c.is_ascii_digit()) {
        PLACEHOLDER_CLASS.to_string()
    } else {
        class
    }
}

/// A presentation document held as HTML text
///
/// # Example
/// ```
/// use deckhand::core::DocumentSurface;
/// use deckhand::html::HtmlDocument;
///
/// let document = HtmlDocument::parse(
///     r#"<section><div class="mermaid">graph TD; A-->B</div></section>"#,
/// );
/// let placeholders = document.placeholders().unwrap();
/// assert_eq!(placeholders.len(), 1);
/// assert_eq!(placeholders[0].source, "graph TD; A-->B");
/// ```
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    html: String,
    placeholder_class: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplaceOutcome {
    NotFound,
    AlreadyProcessed,
    Replaced,
}

impl HtmlDocument {
    /// Wrap HTML text, looking for the default placeholder class
    pub fn parse(html: impl Into<String>) -> Self {
        Self::with_placeholder_class(html, PLACEHOLDER_CLASS)
    }

    /// Wrap HTML text, looking for a custom placeholder class
    pub fn with_placeholder_class(html: impl Into<String>, class: &str) -> Self {
        Self {
            html: html.into(),
            placeholder_class: sanitize_class(class),
        }
    }

    /// The document's current HTML
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Consume the document, yielding its HTML
    pub fn into_html(self) -> String {
        self.html
    }

    /// Class that marks placeholder elements in this document
    pub fn placeholder_class(&self) -> &str {
        &self.placeholder_class
    }

    fn selector(&self) -> String {
        format!(".{}", self.placeholder_class)
    }
}

impl DocumentSurface for HtmlDocument {
    fn placeholders(&self) -> Result<Vec<Placeholder>> {
        let selector = self.selector();
        // One entry per class-bearing element: eligibility plus its text
        // content. The element handler fires before any text inside it, so
        // text chunks always append to the entry opened last.
        let entries: Rc<RefCell<Vec<(bool, String)>>> = Rc::new(RefCell::new(Vec::new()));
        let element_entries = Rc::clone(&entries);
        let text_entries = Rc::clone(&entries);

        rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(selector.as_str(), move |el| {
                        let eligible = el.get_attribute(PROCESSED_ATTR).is_none();
                        element_entries.borrow_mut().push((eligible, String::new()));
                        Ok(())
                    }),
                    text!(selector.as_str(), move |t| {
                        if let Some((_, buffer)) = text_entries.borrow_mut().last_mut() {
                            buffer.push_str(t.as_str());
                        }
                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::new()
            },
        )
        .map_err(ActivationError::document_rewrite)?;

        let placeholders = entries
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, (eligible, _))| *eligible)
            .map(|(index, (_, buffer))| {
                Placeholder::new(index, htmlize::unescape(buffer.as_str()).into_owned())
            })
            .collect();

        Ok(placeholders)
    }

    fn replace_placeholder(&mut self, index: usize, container_markup: &str) -> Result<()> {
        let selector = self.selector();
        let seen = Rc::new(Cell::new(0usize));
        let outcome = Rc::new(Cell::new(ReplaceOutcome::NotFound));
        let handler_outcome = Rc::clone(&outcome);

        let rewritten = rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![element!(selector.as_str(), move |el| {
                    let ordinal = seen.get();
                    seen.set(ordinal + 1);
                    if ordinal == index {
                        if el.get_attribute(PROCESSED_ATTR).is_some() {
                            handler_outcome.set(ReplaceOutcome::AlreadyProcessed);
                        } else {
                            el.replace(container_markup, ContentType::Html);
                            handler_outcome.set(ReplaceOutcome::Replaced);
                        }
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        )
        .map_err(ActivationError::document_rewrite)?;

        match outcome.get() {
            ReplaceOutcome::Replaced => {
                self.html = rewritten;
                Ok(())
            }
            ReplaceOutcome::AlreadyProcessed => {
                Err(ActivationError::already_processed(index).into())
            }
            ReplaceOutcome::NotFound => Err(ActivationError::unknown_placeholder(index).into()),
        }
    }
}
