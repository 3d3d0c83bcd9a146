use std::collections::HashMap;

use crate::locator::locator_model::{LocatorCandidate, LocatorKind, Reliability};
use crate::snapshot::snapshot_model::{ElementMap, ElementSnapshot};

/// Tags whose visible text makes a usable locator.
pub const TEXT_LOCATOR_TAGS: [&str; 6] = ["button", "a", "input", "select", "textarea", "option"];

/// Text locators are only offered below this many characters.
pub const MAX_TEXT_LOCATOR_LEN: usize = 50;

// ============================================================================
// Selector syntax
// ============================================================================

pub fn id_selector(id: &str) -> String {
    format!("#{}", id)
}

pub fn attribute_selector(name: &str, value: &str) -> String {
    format!("[{}=\"{}\"]", name, value.replace('"', "\\\""))
}

pub fn class_selector(class: &str) -> String {
    format!(".{}", class)
}

pub fn text_selector(text: &str) -> String {
    format!("text={}", text)
}

fn short_text(snapshot: &ElementSnapshot) -> Option<&str> {
    let text = snapshot.text.trim();
    if text.is_empty() || text.chars().count() >= MAX_TEXT_LOCATOR_LEN {
        None
    } else {
        Some(text)
    }
}

fn data_attributes(snapshot: &ElementSnapshot) -> impl Iterator<Item = (&str, &str)> {
    snapshot
        .attributes
        .iter()
        .filter(|(k, _)| k.starts_with("data-"))
        .map(|(k, v)| (k.as_str(), v.as_str()))
}

// ============================================================================
// Capture-time locator list
// ============================================================================

/// Flat locator list stored on each snapshot at capture time.
///
/// Unlike `candidates`, text is offered for any tag and nothing is ranked;
/// the comparator only checks this list for set changes.
pub fn capture_locators(snapshot: &ElementSnapshot) -> Vec<String> {
    let mut locators = Vec::new();

    if let Some(id) = snapshot.id() {
        locators.push(id_selector(id));
    }
    for (name, value) in data_attributes(snapshot) {
        locators.push(attribute_selector(name, value));
    }
    if let Some(name) = snapshot.attribute("name") {
        locators.push(attribute_selector("name", name));
    }
    for class in snapshot.classes() {
        locators.push(class_selector(class));
    }
    if let Some(text) = short_text(snapshot) {
        locators.push(text_selector(text));
    }
    locators.push(snapshot.xpath.clone());
    if !snapshot.css_selector.is_empty() && !locators.contains(&snapshot.css_selector) {
        locators.push(snapshot.css_selector.clone());
    }

    locators
}

// ============================================================================
// Ranked candidates
// ============================================================================

/// Class-token occurrence counts across one document.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    counts: HashMap<String, usize>,
}

impl ClassIndex {
    pub fn from_elements(elements: &ElementMap) -> Self {
        let mut counts = HashMap::new();
        for snapshot in elements.values() {
            for class in snapshot.classes() {
                *counts.entry(class.to_string()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// True iff exactly one element in the document carries `class`.
    pub fn is_unique(&self, class: &str) -> bool {
        self.counts.get(class) == Some(&1)
    }
}

/// Enumerate locator candidates for one element, best first.
///
/// Sorted by table priority; equal priorities keep emission order. The
/// CSS path (priority 8, `Medium`) therefore ranks after the `Low` XPath.
pub fn candidates(
    snapshot: &ElementSnapshot,
    is_unique_class: impl Fn(&str) -> bool,
) -> Vec<LocatorCandidate> {
    let mut out = Vec::new();

    if let Some(id) = snapshot.id() {
        out.push(LocatorCandidate::new(id_selector(id), LocatorKind::Id, 1, Reliability::High));
    }

    for (name, value) in data_attributes(snapshot) {
        out.push(LocatorCandidate::new(
            attribute_selector(name, value),
            LocatorKind::DataAttribute,
            2,
            Reliability::High,
        ));
    }

    if let Some(name) = snapshot.attribute("name") {
        out.push(LocatorCandidate::new(
            attribute_selector("name", name),
            LocatorKind::Name,
            3,
            Reliability::Medium,
        ));
    }

    for class in snapshot.classes() {
        let (priority, reliability) = if is_unique_class(class) {
            (4, Reliability::Medium)
        } else {
            (6, Reliability::Low)
        };
        out.push(LocatorCandidate::new(class_selector(class), LocatorKind::Class, priority, reliability));
    }

    if TEXT_LOCATOR_TAGS.iter().any(|t| *t == snapshot.tag_name) {
        if let Some(text) = short_text(snapshot) {
            out.push(LocatorCandidate::new(text_selector(text), LocatorKind::Text, 5, Reliability::Medium));
        }
    }

    out.push(LocatorCandidate::new(snapshot.xpath.clone(), LocatorKind::XPath, 7, Reliability::Low));

    let css = &snapshot.css_selector;
    if !css.is_empty() && out.iter().all(|c| &c.selector != css) {
        out.push(LocatorCandidate::new(css.clone(), LocatorKind::CssHierarchy, 8, Reliability::Medium));
    }

    // stable: one data/class candidate per attribute or token, in order
    out.sort_by_key(|c| c.priority);
    out
}

/// Lowest-priority-number candidate; `None` only for a snapshot without an
/// XPath or CSS path.
pub fn best_locator(
    snapshot: &ElementSnapshot,
    is_unique_class: impl Fn(&str) -> bool,
) -> Option<LocatorCandidate> {
    candidates(snapshot, is_unique_class)
        .into_iter()
        .find(|c| !c.selector.is_empty())
}
