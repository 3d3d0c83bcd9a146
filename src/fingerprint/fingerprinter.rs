use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::dom::dom_model::{ElementTree, NodeId};
use crate::fingerprint::identity::{AttributeIdentity, IdentityStrategy, positional_key};
use crate::fingerprint::xpath::{css_selector, xpath};
use crate::locator::candidates::capture_locators;
use crate::snapshot::snapshot_model::{ElementMap, ElementSnapshot};

/// Fingerprint every element with the default id-or-position identity.
pub fn fingerprint(tree: &dyn ElementTree) -> ElementMap {
    fingerprint_with(tree, &AttributeIdentity)
}

/// Fingerprint every element in document order.
///
/// Keys are unique within the result: when the strategy repeats a key
/// (duplicate `id` in malformed markup, identical content under hashing)
/// the later element falls back to its positional key.
pub fn fingerprint_with(tree: &dyn ElementTree, strategy: &dyn IdentityStrategy) -> ElementMap {
    let mut map = ElementMap::new();

    for (index, node) in tree.elements().into_iter().enumerate() {
        let mut key = strategy.key_for(tree, node, index);

        if map.contains_key(&key) {
            let fallback = unique_fallback(&map, positional_key(tree, node, index));
            warn!(key = %key, fallback = %fallback, "duplicate element key, using positional key");
            key = fallback;
        }

        map.insert(key, snapshot_element(tree, node));
    }

    debug!(elements = map.len(), "fingerprinted document");
    map
}

/// Build the immutable snapshot of a single element.
pub fn snapshot_element(tree: &dyn ElementTree, node: NodeId) -> ElementSnapshot {
    let attributes: BTreeMap<String, String> = tree
        .attributes(node)
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let mut snapshot = ElementSnapshot {
        tag_name: tree.tag_name(node).to_string(),
        attributes,
        text: tree.text(node),
        xpath: xpath(tree, node),
        css_selector: css_selector(tree, node),
        locators: vec![],
    };
    snapshot.locators = capture_locators(&snapshot);

    snapshot
}

fn unique_fallback(map: &ElementMap, base: String) -> String {
    if !map.contains_key(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !map.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
