use serde::{Deserialize, Serialize};

use crate::compare::compare_model::{Comparison, DifferenceKind, ElementDifference};
use crate::locator::candidates::{ClassIndex, best_locator};
use crate::locator::locator_model::{LocatorCandidate, Reliability};
use crate::snapshot::snapshot_model::ElementMap;

/// Suggested test-maintenance step for one change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceAction {
    AddCoverage,
    RetireCoverage,
    UpdateLocators,
    VerifyPlacement,
}

impl MaintenanceAction {
    pub fn for_kind(kind: DifferenceKind) -> Self {
        match kind {
            DifferenceKind::Added => MaintenanceAction::AddCoverage,
            DifferenceKind::Removed => MaintenanceAction::RetireCoverage,
            DifferenceKind::Modified => MaintenanceAction::UpdateLocators,
            DifferenceKind::Moved => MaintenanceAction::VerifyPlacement,
        }
    }

    pub fn rationale(&self) -> &'static str {
        match self {
            MaintenanceAction::AddCoverage => {
                "New element detected. Add new test coverage using the recommended locator."
            }
            MaintenanceAction::RetireCoverage => {
                "Element no longer present. Remove or rewrite tests that reference it."
            }
            MaintenanceAction::UpdateLocators => {
                "Element changed. Update existing locators to the recommended selector."
            }
            MaintenanceAction::VerifyPlacement => {
                "Element moved. Update existing locators that depend on its position."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorRecommendation {
    pub element_key: String,
    pub kind: DifferenceKind,
    pub best_locator: LocatorCandidate,
    pub reliability: Reliability,

    /// Best locator of the baseline snapshot, when there was one
    pub previous_locator: Option<String>,

    pub action: MaintenanceAction,
    pub rationale: String,
}

/// Turns differences into ranked locator recommendations.
///
/// Class uniqueness is judged against the document each snapshot came from.
#[derive(Debug, Clone, Default)]
pub struct LocatorAdvisor {
    baseline_classes: ClassIndex,
    current_classes: ClassIndex,
}

impl LocatorAdvisor {
    pub fn new(baseline: &ElementMap, current: &ElementMap) -> Self {
        Self {
            baseline_classes: ClassIndex::from_elements(baseline),
            current_classes: ClassIndex::from_elements(current),
        }
    }

    /// `None` when a Modified/Moved element keeps the same best locator.
    pub fn advise(&self, difference: &ElementDifference) -> Option<LocatorRecommendation> {
        let previous = difference
            .before
            .as_ref()
            .and_then(|s| best_locator(s, |c| self.baseline_classes.is_unique(c)));

        let best = match &difference.after {
            Some(after) => best_locator(after, |c| self.current_classes.is_unique(c))?,
            None => previous.clone()?,
        };

        if matches!(difference.kind, DifferenceKind::Modified | DifferenceKind::Moved)
            && previous.as_ref().is_some_and(|p| p.selector == best.selector)
        {
            return None;
        }

        let action = MaintenanceAction::for_kind(difference.kind);

        Some(LocatorRecommendation {
            element_key: difference.element_key.clone(),
            kind: difference.kind,
            reliability: best.reliability,
            best_locator: best,
            previous_locator: previous.map(|p| p.selector),
            action,
            rationale: action.rationale().to_string(),
        })
    }

    pub fn advise_all(&self, comparison: &Comparison) -> Vec<LocatorRecommendation> {
        comparison
            .differences
            .iter()
            .filter_map(|d| self.advise(d))
            .collect()
    }
}
