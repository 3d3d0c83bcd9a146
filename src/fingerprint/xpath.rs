use crate::dom::dom_model::{ElementTree, NodeId};

/// Absolute XPath for `node`.
///
/// Ascends towards the document root. The nearest ancestor-or-self with an
/// `id` short-circuits the walk as `//*[@id='…']`. Other steps are
/// `tag[contains(@class,'first')][n]` or `tag[n]`, where `n` is the 1-based
/// position among same-tag siblings.
pub fn xpath(tree: &dyn ElementTree, node: NodeId) -> String {
    if tree.parent(node).is_none() {
        return "/".to_string();
    }

    let mut segments = Vec::new();
    let mut current = node;
    let mut anchored = false;

    while let Some(parent) = tree.parent(current) {
        let tag = tree.tag_name(current);

        if let Some(id) = non_empty_id(tree, current) {
            segments.push(format!("//*[@id={}]", xpath_literal(id)));
            anchored = true;
            break;
        }

        let position = sibling_index(tree, current);
        match tree.classes(current).first() {
            Some(class) => segments.push(format!(
                "{}[contains(@class,{})][{}]",
                tag,
                xpath_literal(class),
                position
            )),
            None => segments.push(format!("{}[{}]", tag, position)),
        }

        current = parent;
    }

    segments.reverse();
    let path = segments.join("/");

    if anchored { path } else { format!("/{}", path) }
}

/// CSS selector chain from the nearest id-bearing ancestor (or the top of
/// the document) down to `node`, joined with ` > `.
pub fn css_selector(tree: &dyn ElementTree, node: NodeId) -> String {
    if tree.parent(node).is_none() {
        return tree.tag_name(node).to_string();
    }

    let mut parts = Vec::new();
    let mut current = node;

    while tree.parent(current).is_some() {
        let tag = tree.tag_name(current);

        if let Some(id) = non_empty_id(tree, current) {
            parts.push(format!("{}#{}", tag, id));
            break;
        }

        let mut part = tag.to_string();
        for class in tree.classes(current) {
            part.push('.');
            part.push_str(class);
        }
        parts.push(part);

        match tree.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    parts.reverse();
    parts.join(" > ")
}

/// 1-based index among preceding siblings sharing the same tag.
pub fn sibling_index(tree: &dyn ElementTree, node: NodeId) -> usize {
    let tag = tree.tag_name(node);
    let mut index = 1;
    let mut prev = tree.previous_sibling(node);

    while let Some(sibling) = prev {
        if tree.tag_name(sibling) == tag {
            index += 1;
        }
        prev = tree.previous_sibling(sibling);
    }

    index
}

fn non_empty_id(tree: &dyn ElementTree, node: NodeId) -> Option<&str> {
    tree.attribute(node, "id").filter(|id| !id.is_empty())
}

/// XPath 1.0 has no escapes; a value holding both quote kinds is spliced
/// together with `concat()`.
fn xpath_literal(value: &str) -> String {
    match (value.contains('\''), value.contains('"')) {
        (false, _) => format!("'{}'", value),
        (true, false) => format!("\"{}\"", value),
        (true, true) => {
            let parts: Vec<String> = value.split('\'').map(|p| format!("'{}'", p)).collect();
            format!("concat({})", parts.join(", \"'\", "))
        }
    }
}
