use std::collections::BTreeSet;

use tracing::debug;

use crate::compare::compare_model::{Comparison, DifferenceKind, ElementDifference};
use crate::snapshot::snapshot_model::{ElementMap, ElementSnapshot};

/// Classify every element that differs between two fingerprint maps.
///
/// Added, Modified and Moved come out in `current` order; Removed follow in
/// `baseline` order. Unchanged elements produce nothing.
pub fn compare(baseline: &ElementMap, current: &ElementMap) -> Comparison {
    let mut differences = Vec::new();

    for (key, after) in current.iter() {
        match baseline.get(key) {
            None => differences.push(ElementDifference {
                kind: DifferenceKind::Added,
                element_key: key.to_string(),
                before: None,
                after: Some(after.clone()),
                description: format!("Element added: <{}>", after.tag_name),
            }),
            Some(before) => {
                if let Some(diff) = compare_element(key, before, after) {
                    differences.push(diff);
                }
            }
        }
    }

    for (key, before) in baseline.iter() {
        if !current.contains_key(key) {
            differences.push(ElementDifference {
                kind: DifferenceKind::Removed,
                element_key: key.to_string(),
                before: Some(before.clone()),
                after: None,
                description: format!("Element removed: <{}>", before.tag_name),
            });
        }
    }

    let comparison = Comparison::new(differences);
    debug!(
        added = comparison.summary.added,
        removed = comparison.summary.removed,
        modified = comparison.summary.modified,
        moved = comparison.summary.moved,
        locator_changes = comparison.summary.locator_changes,
        "compared element maps"
    );

    comparison
}

/// Field-level comparison of two snapshots sharing a key.
///
/// `Moved` iff the XPath changed while tag and attributes are identical;
/// any other change is `Modified`.
pub fn compare_element(key: &str, before: &ElementSnapshot, after: &ElementSnapshot) -> Option<ElementDifference> {
    let changes = field_changes(before, after);
    if changes.is_empty() {
        return None;
    }

    let moved = before.xpath != after.xpath
        && before.tag_name == after.tag_name
        && before.attributes == after.attributes;

    Some(ElementDifference {
        kind: if moved {
            DifferenceKind::Moved
        } else {
            DifferenceKind::Modified
        },
        element_key: key.to_string(),
        before: Some(before.clone()),
        after: Some(after.clone()),
        description: changes.join("; "),
    })
}

fn field_changes(before: &ElementSnapshot, after: &ElementSnapshot) -> Vec<String> {
    let mut changes = Vec::new();

    if before.tag_name != after.tag_name {
        changes.push(format!("Tag changed: {} → {}", before.tag_name, after.tag_name));
    }

    let before_names: BTreeSet<&String> = before.attributes.keys().collect();
    let after_names: BTreeSet<&String> = after.attributes.keys().collect();

    let added: Vec<&str> = after_names.difference(&before_names).map(|s| s.as_str()).collect();
    if !added.is_empty() {
        changes.push(format!("Added attributes: {}", added.join(", ")));
    }

    let removed: Vec<&str> = before_names.difference(&after_names).map(|s| s.as_str()).collect();
    if !removed.is_empty() {
        changes.push(format!("Removed attributes: {}", removed.join(", ")));
    }

    for name in before_names.intersection(&after_names) {
        let (old, new) = (&before.attributes[*name], &after.attributes[*name]);
        if old != new {
            changes.push(format!("Attribute {} changed: \"{}\" → \"{}\"", name, old, new));
        }
    }

    if before.text.trim() != after.text.trim() {
        changes.push(format!(
            "Text changed: \"{}\" → \"{}\"",
            before.text.trim(),
            after.text.trim()
        ));
    }

    if before.xpath != after.xpath {
        changes.push(format!("XPath changed: {} → {}", before.xpath, after.xpath));
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_model::ComparisonSummary;

    fn snap(tag: &str, attrs: &[(&str, &str)], text: &str, xpath: &str) -> ElementSnapshot {
        ElementSnapshot {
            tag_name: tag.into(),
            attributes: attrs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            text: text.into(),
            xpath: xpath.into(),
            css_selector: tag.into(),
            locators: vec![xpath.to_string()],
        }
    }

    fn map(entries: Vec<(&str, ElementSnapshot)>) -> ElementMap {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn identical_maps_have_no_differences() {
        let m = map(vec![("a", snap("div", &[], "x", "/div[1]"))]);
        let result = compare(&m, &m);

        assert!(result.differences.is_empty());
        assert_eq!(result.summary, ComparisonSummary::default());
    }

    #[test]
    fn xpath_only_change_is_moved() {
        let before = snap("li", &[("class", "item")], "One", "/ul[1]/li[1]");
        let after = snap("li", &[("class", "item")], "One", "/ul[1]/li[2]");

        let diff = compare_element("k", &before, &after).unwrap();
        assert_eq!(diff.kind, DifferenceKind::Moved);
        assert_eq!(diff.description, "XPath changed: /ul[1]/li[1] → /ul[1]/li[2]");
    }

    #[test]
    fn attribute_change_with_new_xpath_is_modified() {
        let before = snap("li", &[("class", "item")], "One", "/ul[1]/li[1]");
        let after = snap("li", &[("class", "item active")], "One", "/ul[1]/li[2]");

        assert_eq!(
            compare_element("k", &before, &after).unwrap().kind,
            DifferenceKind::Modified
        );
    }

    #[test]
    fn description_lists_every_field_change() {
        let before = snap("div", &[("title", "a"), ("hidden", "")], "Old", "/div[1]");
        let after = snap("span", &[("title", "b"), ("data-test", "x")], "New", "/div[1]");

        let diff = compare_element("k", &before, &after).unwrap();
        assert_eq!(diff.kind, DifferenceKind::Modified);
        assert_eq!(
            diff.description,
            "Tag changed: div → span; Added attributes: data-test; Removed attributes: hidden; \
             Attribute title changed: \"a\" → \"b\"; Text changed: \"Old\" → \"New\""
        );
    }

    #[test]
    fn emission_order_is_current_then_removed() {
        let baseline = map(vec![
            ("gone", snap("p", &[], "", "/p[1]")),
            ("kept", snap("div", &[], "a", "/div[1]")),
        ]);
        let current = map(vec![
            ("new", snap("span", &[], "", "/span[1]")),
            ("kept", snap("div", &[], "b", "/div[1]")),
        ]);

        let result = compare(&baseline, &current);
        let order: Vec<_> = result
            .differences
            .iter()
            .map(|d| (d.element_key.as_str(), d.kind))
            .collect();

        assert_eq!(
            order,
            vec![
                ("new", DifferenceKind::Added),
                ("kept", DifferenceKind::Modified),
                ("gone", DifferenceKind::Removed),
            ]
        );
        assert_eq!(result.summary.total, 3);
        assert_eq!(result.summary.locator_changes, 0);
    }

    #[test]
    fn empty_baseline_marks_everything_added() {
        let current = map(vec![
            ("a", snap("div", &[], "", "/div[1]")),
            ("b", snap("p", &[], "", "/p[1]")),
        ]);
        let result = compare(&ElementMap::new(), &current);

        assert_eq!(result.summary.added, 2);
        assert!(result.differences.iter().all(|d| d.before.is_none()));
    }

    #[test]
    fn locator_changes_count_set_differences_only() {
        let mut before = snap("a", &[], "x", "/a[1]");
        before.locators = vec!["one".into(), "two".into()];
        let mut after = snap("a", &[], "y", "/a[1]");
        after.locators = vec!["two".into(), "one".into()];

        let result = compare(&map(vec![("k", before)]), &map(vec![("k", after)]));
        assert_eq!(result.summary.modified, 1);
        assert_eq!(result.summary.locator_changes, 0, "reordering is not a change");
    }
}
