use dom_drift::{
    compare::comparator::compare,
    diff::line_diff::{BlockKind, diff_lines, reconstruct_new, reconstruct_old},
};
use proptest::prelude::*;

use crate::common::fragment_map;

mod common;

// =========================================================================
// Random markup
// =========================================================================

#[derive(Debug, Clone)]
struct Node {
    tag: &'static str,
    id: Option<&'static str>,
    class: Option<&'static str>,
    text: &'static str,
    children: Vec<Node>,
}

impl Node {
    fn render(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if let Some(id) = self.id {
            out.push_str(&format!(" id=\"{}\"", id));
        }
        if let Some(class) = self.class {
            out.push_str(&format!(" class=\"{}\"", class));
        }
        out.push('>');
        out.push_str(self.text);
        for child in &self.children {
            child.render(out);
        }
        out.push_str(&format!("</{}>", self.tag));
    }
}

fn render(nodes: &[Node]) -> String {
    let mut out = String::new();
    for n in nodes {
        n.render(&mut out);
    }
    out
}

fn tag() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["div", "span", "section", "em", "button"])
}

fn id() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::weighted(0.3, prop::sample::select(vec!["main", "nav", "go"]))
}

fn class() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop::sample::select(vec!["card", "btn primary", "item"]))
}

fn text() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "Go", "Hello", "Sign in"])
}

fn node() -> impl Strategy<Value = Node> {
    let leaf = (tag(), id(), class(), text()).prop_map(|(tag, id, class, text)| Node {
        tag,
        id,
        class,
        text,
        children: vec![],
    });

    leaf.prop_recursive(3, 24, 4, |inner| {
        (tag(), id(), class(), text(), prop::collection::vec(inner, 0..4)).prop_map(
            |(tag, id, class, text, children)| Node {
                tag,
                id,
                class,
                text,
                children,
            },
        )
    })
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(node(), 0..4).prop_map(|nodes| render(&nodes))
}

fn lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["<div>", "</div>", "a", "b", "c", ""]), 0..16)
        .prop_map(|v| v.into_iter().map(String::from).collect())
}

// =========================================================================
// Properties
// =========================================================================

proptest! {
    #[test]
    fn summary_counts_match_differences(before in document(), after in document()) {
        let result = compare(&fragment_map(&before), &fragment_map(&after));
        let s = result.summary;

        prop_assert_eq!(s.total, result.differences.len());
        prop_assert_eq!(s.added + s.removed + s.modified + s.moved, result.differences.len());
        prop_assert!(s.locator_changes <= s.modified + s.moved);
    }

    #[test]
    fn same_markup_compares_clean(html in document()) {
        let first = fragment_map(&html);
        let second = fragment_map(&html);

        prop_assert_eq!(&first, &second);
        prop_assert!(compare(&first, &second).differences.is_empty());
    }

    #[test]
    fn keys_are_unique_even_with_duplicate_ids(html in document()) {
        let map = fragment_map(&html);
        let mut keys: Vec<_> = map.keys().collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();

        prop_assert_eq!(keys.len(), total);
    }

    #[test]
    fn line_diff_reads_back_both_sides(a in lines(), b in lines()) {
        let blocks = diff_lines(&a, &b);

        prop_assert_eq!(reconstruct_new(&blocks), b);
        prop_assert_eq!(reconstruct_old(&blocks), a);
    }

    #[test]
    fn equal_blocks_never_touch(a in lines(), b in lines()) {
        let blocks = diff_lines(&a, &b);

        for pair in blocks.windows(2) {
            prop_assert!(!(pair[0].kind == BlockKind::Equal && pair[1].kind == BlockKind::Equal));
        }
        for block in &blocks {
            prop_assert!(block.count() > 0);
        }
    }
}
