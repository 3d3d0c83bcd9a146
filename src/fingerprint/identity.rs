use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::dom::dom_model::{ElementTree, NodeId};

/// Decides which key an element is matched by across two documents.
pub trait IdentityStrategy: Send + Sync {
    fn key_for(&self, tree: &dyn ElementTree, node: NodeId, index: usize) -> String;
}

/// `id` attribute when present, else the positional key.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeIdentity;

impl IdentityStrategy for AttributeIdentity {
    fn key_for(&self, tree: &dyn ElementTree, node: NodeId, index: usize) -> String {
        match tree.attribute(node, "id").filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => positional_key(tree, node, index),
        }
    }
}

/// Document-order index plus tag, ignoring attributes entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalIdentity;

impl IdentityStrategy for PositionalIdentity {
    fn key_for(&self, tree: &dyn ElementTree, node: NodeId, index: usize) -> String {
        positional_key(tree, node, index)
    }
}

/// Hash of tag, sorted attributes and text. Survives reordering, breaks on
/// any content edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHashIdentity;

impl IdentityStrategy for ContentHashIdentity {
    fn key_for(&self, tree: &dyn ElementTree, node: NodeId, _index: usize) -> String {
        let tag = tree.tag_name(node);
        let mut attrs: Vec<_> = tree.attributes(node).iter().collect();
        attrs.sort();

        let mut hasher = Sha1::new();
        hasher.update(tag.as_bytes());
        for (k, v) in attrs {
            hasher.update([0u8]);
            hasher.update(k.as_bytes());
            hasher.update([b'=']);
            hasher.update(v.as_bytes());
        }
        hasher.update([0u8]);
        hasher.update(tree.text(node).as_bytes());

        let digest = format!("{:x}", hasher.finalize());
        format!("{}_{}", tag, &digest[..12])
    }
}

pub fn positional_key(tree: &dyn ElementTree, node: NodeId, index: usize) -> String {
    format!("element_{}_{}", index, tree.tag_name(node))
}

/// Named strategy selector used by config and CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    #[default]
    Attribute,
    Positional,
    Content,
}

impl IdentityKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "attribute" | "id" => Some(IdentityKind::Attribute),
            "positional" | "position" => Some(IdentityKind::Positional),
            "content" | "hash" => Some(IdentityKind::Content),
            _ => None,
        }
    }

    pub fn strategy(&self) -> Box<dyn IdentityStrategy> {
        match self {
            IdentityKind::Attribute => Box::new(AttributeIdentity),
            IdentityKind::Positional => Box::new(PositionalIdentity),
            IdentityKind::Content => Box::new(ContentHashIdentity),
        }
    }
}
