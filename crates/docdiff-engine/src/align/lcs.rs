//! Exact longest-common-subsequence alignment.
//!
//! After stripping the common prefix, a suffix table
//! `table[i][j] = LCS(old[i..], new[j..])` is filled and walked forwards.
//! Equal heads are always matched immediately and, on ties, the walk skips
//! new items before old ones, so every match lands on the earliest possible
//! old position.

use std::hash::Hash;

use tracing::warn;

use super::{external, ops_from_blocks, push_match, EditOp, MatchBlock};

/// Table size above which the quadratic table is not built.
const MAX_TABLE_CELLS: usize = 16 * 1024 * 1024;

pub(super) fn opcodes<T: Eq + Hash + Ord>(old: &[T], new: &[T]) -> Vec<EditOp> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let rest_old = &old[prefix..];
    let rest_new = &new[prefix..];

    let cells = (rest_old.len() + 1).saturating_mul(rest_new.len() + 1);
    if cells > MAX_TABLE_CELLS {
        warn!(
            old_items = old.len(),
            new_items = new.len(),
            "input too large for exact LCS table, falling back to Myers"
        );
        return external::opcodes(similar::Algorithm::Myers, old, new);
    }

    let mut blocks = Vec::new();
    push_match(&mut blocks, 0, 0, prefix);
    match_middle(rest_old, rest_new, prefix, &mut blocks);
    ops_from_blocks(blocks, old.len(), new.len())
}

fn match_middle<T: Eq>(old: &[T], new: &[T], offset: usize, blocks: &mut Vec<MatchBlock>) {
    let (n, m) = (old.len(), new.len());
    if n == 0 || m == 0 {
        return;
    }

    let width = m + 1;
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if old[i] == new[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            push_match(blocks, offset + i, offset + j, 1);
            i += 1;
            j += 1;
        } else if table[i * width + j + 1] >= table[(i + 1) * width + j] {
            j += 1;
        } else {
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::EditTag;

    #[test]
    fn common_prefix_only() {
        let ops = opcodes(&["a", "b"], &["a", "b", "c"]);
        assert_eq!(
            ops,
            vec![
                EditOp::new(EditTag::Equal, 0..2, 0..2),
                EditOp::new(EditTag::Insert, 2..2, 2..3),
            ]
        );
    }

    #[test]
    fn adjacent_matches_merge_into_one_block() {
        let ops = opcodes(&["z", "a", "b", "c"], &["a", "b", "c"]);
        assert_eq!(
            ops,
            vec![
                EditOp::new(EditTag::Delete, 0..1, 0..0),
                EditOp::new(EditTag::Equal, 1..4, 0..3),
            ]
        );
    }

    #[test]
    fn finds_minimal_script_across_moves() {
        // LCS is a, c, d.
        let old = ["a", "b", "c", "d"];
        let new = ["a", "c", "d", "b"];
        let ops = opcodes(&old, &new);
        let matched: usize = ops
            .iter()
            .filter(|op| op.tag == EditTag::Equal)
            .map(EditOp::old_len)
            .sum();
        assert_eq!(matched, 3);
    }
}
