use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::dom::dom_model::{DomDocument, ElementTree, NodeId};

/// How raw markup is turned into an element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Full document; the parser supplies `html`, `head` and `body`.
    #[default]
    Document,
    /// Body fragment; the parser's synthetic wrapper is dropped.
    Fragment,
}

pub fn parse_html(html: &str, mode: ParseMode) -> DomDocument {
    match mode {
        ParseMode::Document => parse_document(html),
        ParseMode::Fragment => parse_fragment(html),
    }
}

/// Parse a complete HTML document into an arena.
///
/// Blank input yields an empty arena rather than the parser's implied
/// `html`/`head`/`body` skeleton.
pub fn parse_document(html: &str) -> DomDocument {
    let mut doc = DomDocument::new();
    if html.trim().is_empty() {
        return doc;
    }

    let parsed = Html::parse_document(html);
    let root = doc.root();

    append_element(&mut doc, root, parsed.root_element());

    doc
}

/// Parse markup as a fragment. Top-level elements hang directly off the
/// virtual root, so the first authored element has index 0.
pub fn parse_fragment(html: &str) -> DomDocument {
    let parsed = Html::parse_fragment(html);
    let mut doc = DomDocument::new();
    let root = doc.root();

    append_children(&mut doc, root, parsed.root_element());

    doc
}

fn append_element(doc: &mut DomDocument, parent: NodeId, el: ElementRef<'_>) {
    let attributes = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let text: String = el.text().collect();

    let id = doc.append(parent, el.value().name(), attributes, text);
    append_children(doc, id, el);
}

fn append_children(doc: &mut DomDocument, parent: NodeId, el: ElementRef<'_>) {
    for child in el.children().filter_map(ElementRef::wrap) {
        append_element(doc, parent, child);
    }
}
