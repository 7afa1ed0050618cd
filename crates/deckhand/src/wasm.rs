//! WebAssembly bindings for Deckhand
//!
//! Snapshot/splice string APIs for in-browser use: the page collects the
//! placeholders, renders them with whatever diagram library it already ships,
//! and hands the results back to be spliced into the HTML. Rendering itself
//! never crosses the boundary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::core::{Activator, DocumentSurface};
#[cfg(target_arch = "wasm32")]
use crate::html::HtmlDocument;

/// One rendered diagram coming back from the page
#[cfg(target_arch = "wasm32")]
#[derive(serde::Deserialize)]
struct RenderedItem {
    index: usize,
    markup: String,
}

/// Initialize WASM module
///
/// Sets up panic hooks and console logging for better error messages in the
/// browser.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Snapshot the unprocessed diagram placeholders of an HTML document
///
/// # Arguments
/// * `html` - Presentation HTML text
///
/// # Returns
/// * A JSON array of `{ "index": number, "source": string }` records
/// * Throws a JavaScript error if the document cannot be scanned
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn collect_placeholders(html: &str) -> String {
    let document = HtmlDocument::parse(html);
    let placeholders = document
        .placeholders()
        .map_err(|e| format!("Scan error: {}", e))
        .expect("Failed to scan presentation HTML");

    serde_json::to_string(&placeholders).expect("Failed to serialize placeholders")
}

/// Splice rendered diagram markup back into an HTML document
///
/// Each rendered item is wrapped in a processed-marked container before
/// splicing, so re-running the pass skips it.
///
/// # Arguments
/// * `html` - Presentation HTML text
/// * `rendered_json` - JSON array of `{ "index": number, "markup": string }`
///
/// # Returns
/// * The rewritten HTML
/// * Throws a JavaScript error on malformed input or an unknown index
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn splice_rendered(html: &str, rendered_json: &str) -> String {
    let items: Vec<RenderedItem> = serde_json::from_str(rendered_json)
        .map_err(|e| format!("Invalid rendered items: {}", e))
        .expect("Failed to parse rendered items");

    let activator = Activator::new();
    let mut document = HtmlDocument::parse(html);
    for item in items {
        let container = activator.container_markup(&item.markup);
        document
            .replace_placeholder(item.index, &container)
            .map_err(|e| format!("Splice error: {}", e))
            .expect("Failed to splice rendered diagram");
    }

    document.into_html()
}
