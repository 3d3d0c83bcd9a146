use serde::{Deserialize, Serialize};

/// How a candidate selector addresses its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocatorKind {
    Id,
    DataAttribute,
    Name,
    Class,
    Text,
    XPath,
    CssHierarchy,
}

/// Expected resistance of a locator to future markup changes.
///
/// Ordering is best-first: `High < Medium < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Reliability {
    High,
    Medium,
    Low,
}

/// A ranked selector for one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorCandidate {
    pub selector: String,
    pub kind: LocatorKind,
    pub reliability: Reliability,

    /// Fixed table rank, lower is preferred
    pub priority: u8,

    pub rationale: String,
}

impl LocatorCandidate {
    pub fn new(selector: impl Into<String>, kind: LocatorKind, priority: u8, reliability: Reliability) -> Self {
        Self {
            selector: selector.into(),
            kind,
            reliability,
            priority,
            rationale: rationale_for(kind, reliability).to_string(),
        }
    }
}

fn rationale_for(kind: LocatorKind, reliability: Reliability) -> &'static str {
    match (kind, reliability) {
        (LocatorKind::Id, _) => "Unique id attribute; survives layout and styling changes",
        (LocatorKind::DataAttribute, _) => "Dedicated data attribute, usually set for testing",
        (LocatorKind::Name, _) => "Form name attribute; stable while the field keeps its role",
        (LocatorKind::Class, Reliability::Low) => "Class shared with other elements; may match more than one",
        (LocatorKind::Class, _) => "Class unique in this document; breaks on restyling",
        (LocatorKind::Text, _) => "Visible text of an interactive element; breaks on copy changes",
        (LocatorKind::XPath, _) => "Positional XPath fallback; breaks when structure changes",
        (LocatorKind::CssHierarchy, _) => "CSS path through ancestors; breaks when nesting changes",
    }
}

impl std::fmt::Display for Reliability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Reliability::High => "high",
            Reliability::Medium => "medium",
            Reliability::Low => "low",
        };
        f.pad(s)
    }
}
