use serde::{Deserialize, Serialize};

/// Index of a node inside a `DomDocument` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Read-only view of an element tree.
///
/// Everything the fingerprinter needs from a parsed document: tag, ordered
/// attributes, parent and previous-sibling back references, and text. Any
/// parser that can produce this view can feed the capture pipeline.
pub trait ElementTree {
    /// The virtual document root. Never fingerprinted.
    fn root(&self) -> NodeId;

    /// All element nodes in pre-order (document order), root excluded.
    fn elements(&self) -> Vec<NodeId>;

    fn tag_name(&self, node: NodeId) -> &str;

    /// Attributes in source order.
    fn attributes(&self, node: NodeId) -> &[(String, String)];

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Trimmed text content of the node and its descendants.
    fn text(&self, node: NodeId) -> String;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whitespace-separated class tokens, in source order.
    fn classes(&self, node: NodeId) -> Vec<&str> {
        self.attribute(node, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub parent: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Concatenated descendant text, untrimmed
    pub text: String,
}

/// Element arena. Index 0 is the virtual document root; every other node is
/// an element, stored in pre-order so arena order equals document order.
#[derive(Debug, Clone, PartialEq)]
pub struct DomDocument {
    nodes: Vec<DomNode>,
}

pub const ROOT_TAG: &str = "#document";

impl DomDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![DomNode {
                tag: ROOT_TAG.to_string(),
                attributes: vec![],
                parent: None,
                prev_sibling: None,
                children: vec![],
                text: String::new(),
            }],
        }
    }

    /// Append an element under `parent`. Callers must append in pre-order.
    pub fn append(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: Vec<(String, String)>,
        text: String,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let prev_sibling = self.nodes[parent.0].children.last().copied();

        self.nodes.push(DomNode {
            tag: tag.to_ascii_lowercase(),
            attributes,
            parent: Some(parent),
            prev_sibling,
            children: vec![],
            text,
        });
        self.nodes[parent.0].children.push(id);

        id
    }

    /// Number of elements, root excluded.
    pub fn element_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }
}

impl Default for DomDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree for DomDocument {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn elements(&self) -> Vec<NodeId> {
        (1..self.nodes.len()).map(NodeId).collect()
    }

    fn tag_name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    fn attributes(&self, node: NodeId) -> &[(String, String)] {
        &self.nodes[node.0].attributes
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].prev_sibling
    }

    fn text(&self, node: NodeId) -> String {
        self.nodes[node.0].text.trim().to_string()
    }
}
