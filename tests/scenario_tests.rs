use dom_drift::{
    CompareOptions, capture_baseline, compare_html, compare_with_baseline,
    compare::{
        comparator::compare,
        compare_model::{ComparisonSummary, DifferenceKind},
    },
    fingerprint::identity::IdentityKind,
    locator::{
        advisor::LocatorAdvisor,
        candidates::{ClassIndex, best_locator, candidates},
        locator_model::{LocatorKind, Reliability},
    },
};

use crate::common::{
    document_map, fragment_map,
    pages::{LOGIN_PAGE, LOGIN_PAGE_V2},
};

mod common;

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn unchanged_button_has_no_differences() {
    let html = r#"<button id="submit">Go</button>"#;
    let result = compare(&fragment_map(html), &fragment_map(html));

    assert!(result.differences.is_empty());
    assert_eq!(result.summary.total, 0);
}

#[test]
fn removed_card_reports_its_old_locators() {
    let baseline = fragment_map(r#"<div class="card">X</div>"#);
    let result = compare(&baseline, &fragment_map(""));

    assert_eq!(result.differences.len(), 1);
    let removed = &result.differences[0];
    assert_eq!(removed.kind, DifferenceKind::Removed);
    assert_eq!(removed.element_key, "element_0_div");
    assert_eq!(removed.old_locators()[..2], [".card".to_string(), "text=X".to_string()]);
    assert!(removed.after.is_none());
}

#[test]
fn added_test_id_upgrades_best_locator() {
    let baseline = fragment_map(r#"<input name="email">"#);
    let current = fragment_map(r#"<input name="email" data-testid="email-input">"#);
    let result = compare(&baseline, &current);

    assert_eq!(result.differences.len(), 1);
    let diff = &result.differences[0];
    assert_eq!(diff.kind, DifferenceKind::Modified);
    assert_eq!(diff.description, "Added attributes: data-testid");
    assert_eq!(result.summary.locator_changes, 1);

    let old = best_locator(diff.before.as_ref().unwrap(), |_| true).unwrap();
    let new = best_locator(diff.after.as_ref().unwrap(), |_| true).unwrap();
    assert_eq!((old.selector.as_str(), old.reliability), (r#"[name="email"]"#, Reliability::Medium));
    assert_eq!(
        (new.selector.as_str(), new.reliability),
        (r#"[data-testid="email-input"]"#, Reliability::High)
    );
}

#[test]
fn reordered_siblings_are_moved_not_modified() {
    let options = CompareOptions::fragment().with_identity(IdentityKind::Content);
    let result = compare_html(
        "<ul><li>One</li><li>Two</li></ul>",
        "<ul><li>Two</li><li>One</li></ul>",
        &options,
    );

    let items: Vec<_> = result
        .differences
        .iter()
        .filter(|d| d.after.as_ref().is_some_and(|s| s.tag_name == "li"))
        .collect();

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|d| d.kind == DifferenceKind::Moved), "{:?}", items);
    assert_eq!(result.summary.moved, 2);
}

#[test]
fn sibling_swap_moves_following_element_with_default_keys() {
    let result = compare(
        &fragment_map("<div><p>1</p><p>A</p></div>"),
        &fragment_map("<div><span>1</span><p>A</p></div>"),
    );

    let kinds: Vec<_> = result.differences.iter().map(|d| (d.element_key.as_str(), d.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            ("element_1_span", DifferenceKind::Added),
            ("element_2_p", DifferenceKind::Moved),
            ("element_1_p", DifferenceKind::Removed),
        ]
    );

    let moved = &result.differences[1];
    assert_eq!(moved.description, "XPath changed: /div[1]/p[2] → /div[1]/p[1]");
}

#[test]
fn ancestor_restyle_moves_untouched_child() {
    let result = compare(
        &fragment_map(r#"<div class="old"><span>S</span></div>"#),
        &fragment_map(r#"<div class="new"><span>S</span></div>"#),
    );

    let kinds: Vec<_> = result.differences.iter().map(|d| (d.element_key.as_str(), d.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            ("element_0_div", DifferenceKind::Modified),
            ("element_1_span", DifferenceKind::Moved),
        ]
    );
}

// =========================================================================
// Invariants on a realistic page
// =========================================================================

#[test]
fn byte_identical_documents_compare_clean() {
    let result = compare_html(LOGIN_PAGE, LOGIN_PAGE, &CompareOptions::default());

    assert!(result.differences.is_empty());
    assert_eq!(result.summary, ComparisonSummary::default());
}

#[test]
fn fingerprinting_is_deterministic() {
    let first = document_map(LOGIN_PAGE);
    let second = document_map(LOGIN_PAGE);

    assert_eq!(first.keys().collect::<Vec<_>>(), second.keys().collect::<Vec<_>>());
    for (key, snap) in first.iter() {
        let other = second.get(key).unwrap();
        assert_eq!(snap.xpath, other.xpath);
        assert_eq!(snap.css_selector, other.css_selector);
    }
}

#[test]
fn id_bearing_ancestor_short_circuits_xpath() {
    let map = fragment_map(r#"<div id="app"><section><p>deep</p></section></div>"#);
    let p = map.get("element_2_p").unwrap();

    assert_eq!(p.xpath, "//*[@id='app']/section[1]/p[1]");
    assert_eq!(p.xpath.matches("//*[@id=").count(), 1);
    assert!(p.xpath.starts_with("//*[@id='app']"));
}

#[test]
fn every_id_element_ranks_id_first() {
    let map = document_map(LOGIN_PAGE);
    let classes = ClassIndex::from_elements(&map);

    for snap in map.values().filter(|s| s.id().is_some()) {
        let first = &candidates(snap, |c| classes.is_unique(c))[0];
        assert_eq!(first.kind, LocatorKind::Id);
        assert_eq!(first.reliability, Reliability::High);
    }
}

#[test]
fn login_page_revision_end_to_end() {
    let baseline = document_map(LOGIN_PAGE);
    let current = document_map(LOGIN_PAGE_V2);
    let result = compare(&baseline, &current);
    let s = result.summary;

    assert_eq!(s.added + s.removed + s.modified + s.moved, result.differences.len());
    assert!(s.locator_changes <= s.modified + s.moved);

    let signup = result
        .differences
        .iter()
        .find(|d| d.element_key == "signup")
        .expect("new link is reported");
    assert_eq!(signup.kind, DifferenceKind::Added);

    let recs = LocatorAdvisor::new(&baseline, &current).advise_all(&result);
    let signup_rec = recs.iter().find(|r| r.element_key == "signup").unwrap();
    assert_eq!(signup_rec.best_locator.selector, "#signup");

    let email = result
        .differences
        .iter()
        .find(|d| d.after.as_ref().and_then(|s| s.attribute("data-testid")) == Some("email-input"))
        .expect("email input change is reported");
    assert_eq!(email.kind, DifferenceKind::Modified);
}

#[test]
fn empty_current_document_removes_everything() {
    let baseline = fragment_map("<p>a</p><p>b</p>");
    let result = compare(&baseline, &fragment_map("   "));

    assert_eq!(result.summary.removed, 2);
    assert_eq!(result.summary.total, 2);
}

// =========================================================================
// Stored baselines
// =========================================================================

#[test]
fn stored_baseline_compares_with_its_own_capture_options() {
    let html = r#"<div class="card"><button id="buy">Buy</button></div>"#;

    for options in [
        CompareOptions::fragment(),
        CompareOptions::default(),
        CompareOptions::fragment().with_identity(IdentityKind::Content),
    ] {
        let baseline = capture_baseline("card", "", html, &options);
        assert_eq!(baseline.options(), options);

        let result = compare_with_baseline(&baseline, html);
        assert!(result.summary.is_empty(), "{:?}: {:?}", options, result.summary);
    }
}

#[test]
fn stored_baseline_sees_real_changes() {
    let baseline = capture_baseline("login", "", LOGIN_PAGE, &CompareOptions::default());
    let result = compare_with_baseline(&baseline, LOGIN_PAGE_V2);

    assert!(result.differences.iter().any(|d| d.element_key == "signup"));
    assert_eq!(result, compare_html(LOGIN_PAGE, LOGIN_PAGE_V2, &CompareOptions::default()));
}
