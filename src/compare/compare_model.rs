use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::snapshot::snapshot_model::{ElementKey, ElementSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifferenceKind {
    Added,
    Removed,
    Modified,
    Moved,
}

/// One changed element between a baseline and a current document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDifference {
    pub kind: DifferenceKind,
    pub element_key: ElementKey,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<ElementSnapshot>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<ElementSnapshot>,

    /// `; `-joined field changes, e.g. `Tag changed: div → span`
    pub description: String,
}

impl ElementDifference {
    pub fn old_locators(&self) -> &[String] {
        self.before.as_ref().map(|s| s.locators.as_slice()).unwrap_or(&[])
    }

    pub fn new_locators(&self) -> &[String] {
        self.after.as_ref().map(|s| s.locators.as_slice()).unwrap_or(&[])
    }

    /// Order-independent comparison of the captured locator sets.
    /// Only meaningful for `Modified` and `Moved`.
    pub fn locators_changed(&self) -> bool {
        if !matches!(self.kind, DifferenceKind::Modified | DifferenceKind::Moved) {
            return false;
        }

        let old: BTreeSet<&String> = self.old_locators().iter().collect();
        let new: BTreeSet<&String> = self.new_locators().iter().collect();
        old != new
    }
}

/// Aggregate counts, always derived from a difference list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub moved: usize,
    pub locator_changes: usize,
}

impl ComparisonSummary {
    pub fn from_differences(differences: &[ElementDifference]) -> Self {
        let mut summary = ComparisonSummary {
            total: differences.len(),
            ..Default::default()
        };

        for d in differences {
            match d.kind {
                DifferenceKind::Added => summary.added += 1,
                DifferenceKind::Removed => summary.removed += 1,
                DifferenceKind::Modified => summary.modified += 1,
                DifferenceKind::Moved => summary.moved += 1,
            }
            if d.locators_changed() {
                summary.locator_changes += 1;
            }
        }

        summary
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Result of one baseline-vs-current run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub differences: Vec<ElementDifference>,
    pub summary: ComparisonSummary,
}

impl Comparison {
    pub fn new(differences: Vec<ElementDifference>) -> Self {
        let summary = ComparisonSummary::from_differences(&differences);
        Self { differences, summary }
    }
}
