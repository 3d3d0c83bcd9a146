use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// A run of lines with one treatment.
///
/// `old_lines` is empty for `Insert`, `new_lines` is empty for `Delete`;
/// for `Equal` both hold the same text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffBlock {
    pub kind: BlockKind,
    pub old_start: usize,
    pub new_start: usize,
    pub old_lines: Vec<String>,
    pub new_lines: Vec<String>,
}

impl DiffBlock {
    pub fn count(&self) -> usize {
        self.old_lines.len().max(self.new_lines.len())
    }
}

/// Greedy line matcher for presenting two HTML documents side by side.
///
/// Not a minimal diff. At each position it takes the longest equal run;
/// otherwise it counts lines on each side that never reappear on the other
/// side. Those runs become `Delete`, `Insert`, or a `Replace` paired by
/// position (not by similarity). When both sides' current lines do reappear
/// later (crossed lines), a single-line `Replace` is emitted.
pub fn diff_lines<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<DiffBlock> {
    let a: Vec<&str> = a.iter().map(AsRef::as_ref).collect();
    let b: Vec<&str> = b.iter().map(AsRef::as_ref).collect();
    let a_positions = line_positions(&a);
    let b_positions = line_positions(&b);

    let mut blocks = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        let run = a[i..]
            .iter()
            .zip(&b[j..])
            .take_while(|(x, y)| x == y)
            .count();

        if run > 0 {
            blocks.push(block(BlockKind::Equal, i, j, &a[i..i + run], &b[j..j + run]));
            i += run;
            j += run;
            continue;
        }

        let delete_count = a[i..]
            .iter()
            .take_while(|line| !occurs_from(&b_positions, line, j))
            .count();
        let insert_count = b[j..]
            .iter()
            .take_while(|line| !occurs_from(&a_positions, line, i))
            .count();

        match (delete_count, insert_count) {
            (0, 0) => {
                blocks.push(block(BlockKind::Replace, i, j, &a[i..i + 1], &b[j..j + 1]));
                i += 1;
                j += 1;
            }
            (d, 0) => {
                blocks.push(block(BlockKind::Delete, i, j, &a[i..i + d], &[]));
                i += d;
            }
            (0, n) => {
                blocks.push(block(BlockKind::Insert, i, j, &[], &b[j..j + n]));
                j += n;
            }
            (d, n) => {
                let m = d.min(n);
                blocks.push(block(BlockKind::Replace, i, j, &a[i..i + m], &b[j..j + m]));
                i += m;
                j += m;
            }
        }
    }

    blocks
}

/// `diff_lines` over the lines of two texts.
pub fn diff_text(a: &str, b: &str) -> Vec<DiffBlock> {
    let a: Vec<&str> = a.lines().collect();
    let b: Vec<&str> = b.lines().collect();
    diff_lines(&a, &b)
}

/// Lines of the new side, read back from the blocks.
pub fn reconstruct_new(blocks: &[DiffBlock]) -> Vec<String> {
    blocks
        .iter()
        .filter(|b| b.kind != BlockKind::Delete)
        .flat_map(|b| b.new_lines.iter().cloned())
        .collect()
}

/// Lines of the old side, read back from the blocks.
pub fn reconstruct_old(blocks: &[DiffBlock]) -> Vec<String> {
    blocks
        .iter()
        .filter(|b| b.kind != BlockKind::Insert)
        .flat_map(|b| b.old_lines.iter().cloned())
        .collect()
}

/// Render blocks as `  `, `- ` and `+ ` prefixed lines.
pub fn render_unified(blocks: &[DiffBlock]) -> String {
    let mut out = String::new();

    for b in blocks {
        match b.kind {
            BlockKind::Equal => push_prefixed(&mut out, "  ", &b.new_lines),
            BlockKind::Delete => push_prefixed(&mut out, "- ", &b.old_lines),
            BlockKind::Insert => push_prefixed(&mut out, "+ ", &b.new_lines),
            BlockKind::Replace => {
                push_prefixed(&mut out, "- ", &b.old_lines);
                push_prefixed(&mut out, "+ ", &b.new_lines);
            }
        }
    }

    out
}

fn push_prefixed(out: &mut String, prefix: &str, lines: &[String]) {
    for line in lines {
        out.push_str(prefix);
        out.push_str(line);
        out.push('\n');
    }
}

fn block(kind: BlockKind, old_start: usize, new_start: usize, old: &[&str], new: &[&str]) -> DiffBlock {
    DiffBlock {
        kind,
        old_start,
        new_start,
        old_lines: old.iter().map(|s| s.to_string()).collect(),
        new_lines: new.iter().map(|s| s.to_string()).collect(),
    }
}

/// Ascending positions of each distinct line.
fn line_positions<'a>(lines: &[&'a str]) -> HashMap<&'a str, Vec<usize>> {
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, line) in lines.iter().enumerate() {
        positions.entry(*line).or_default().push(idx);
    }
    positions
}

/// Does `line` appear at or after `from` on the other side?
fn occurs_from(positions: &HashMap<&str, Vec<usize>>, line: &str, from: usize) -> bool {
    positions
        .get(line)
        .and_then(|p| p.last())
        .is_some_and(|&last| last >= from)
}
