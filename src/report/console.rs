use crate::compare::compare_model::{Comparison, DifferenceKind};
use crate::locator::advisor::LocatorRecommendation;
use crate::locator::locator_model::LocatorCandidate;

// ============================================================================
// Console reporter: plain terminal output
// ============================================================================

/// Format a comparison for terminal output.
///
/// Produces output like:
/// ```text
/// === Comparison: home (3 differences) ===
///
/// + ADDED     buy  Element added: <button>
/// ~ MODIFIED  element_4_input  Added attributes: data-testid
///
/// Recommendations:
///   element_4_input  [name="email"] -> [data-testid="email-input"] (high)
///       Element changed. Update existing locators to the recommended selector.
///
/// === Summary: 1 added, 0 removed, 1 modified, 0 moved, 1 locator changes ===
/// ```
pub fn format_console_report(
    title: &str,
    comparison: &Comparison,
    recommendations: &[LocatorRecommendation],
) -> String {
    let mut out = String::new();
    let summary = &comparison.summary;

    out.push_str(&format!(
        "=== Comparison: {} ({} differences) ===\n\n",
        title, summary.total
    ));

    if comparison.differences.is_empty() {
        out.push_str("No differences: the page matches its baseline.\n");
    }

    for d in &comparison.differences {
        let (marker, label) = kind_label(d.kind);
        out.push_str(&format!(
            "{} {:<9} {}  {}\n",
            marker, label, d.element_key, d.description
        ));
    }

    if !recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for r in recommendations {
            let previous = r.previous_locator.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "  {}  {} -> {} ({})\n      {}\n",
                r.element_key, previous, r.best_locator.selector, r.reliability, r.rationale
            ));
        }
    }

    out.push_str(&format!(
        "\n=== Summary: {} added, {} removed, {} modified, {} moved, {} locator changes ===\n",
        summary.added, summary.removed, summary.modified, summary.moved, summary.locator_changes
    ));

    out
}

/// One line per candidate, best first.
pub fn format_candidates(element_key: &str, candidates: &[LocatorCandidate]) -> String {
    let mut out = format!("{}\n", element_key);
    for (rank, c) in candidates.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {:<8} {:?}  {}\n",
            rank + 1,
            c.reliability,
            c.kind,
            c.selector
        ));
    }
    out
}

fn kind_label(kind: DifferenceKind) -> (&'static str, &'static str) {
    match kind {
        DifferenceKind::Added => ("+", "ADDED"),
        DifferenceKind::Removed => ("-", "REMOVED"),
        DifferenceKind::Modified => ("~", "MODIFIED"),
        DifferenceKind::Moved => (">", "MOVED"),
    }
}
