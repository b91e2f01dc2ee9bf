//! Ratcliff/Obershelp matching: repeatedly take the longest matching block
//! and recurse on the unmatched regions to its left and right.
//!
//! No junk heuristics are applied; every item participates in matching.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

use super::{ops_from_blocks, push_match, EditOp, MatchBlock};

/// Longest-block sequence matcher over two borrowed sequences.
pub struct SequenceMatcher<'a, T> {
    old: &'a [T],
    new: &'a [T],
    /// Every index at which an item occurs in `new`, ascending.
    positions: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(old: &'a [T], new: &'a [T]) -> Self {
        let mut positions: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, item) in new.iter().enumerate() {
            positions.entry(item).or_default().push(j);
        }
        Self { old, new, positions }
    }

    /// Longest block matching inside `old[old_range]` and `new[new_range]`.
    ///
    /// Among blocks of equal length the one starting earliest in `old`
    /// wins, then the one starting earliest in `new`.
    pub fn longest_match(&self, old_range: Range<usize>, new_range: Range<usize>) -> MatchBlock {
        let mut best = MatchBlock {
            old_start: old_range.start,
            new_start: new_range.start,
            len: 0,
        };
        // run_lengths[j] = length of the match ending at (i - 1, j).
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();

        for i in old_range {
            let mut next_runs = HashMap::new();
            if let Some(js) = self.positions.get(&self.old[i]) {
                for &j in js {
                    if j < new_range.start {
                        continue;
                    }
                    if j >= new_range.end {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_lengths.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_runs.insert(j, k);
                    if k > best.len {
                        best = MatchBlock {
                            old_start: i + 1 - k,
                            new_start: j + 1 - k,
                            len: k,
                        };
                    }
                }
            }
            run_lengths = next_runs;
        }
        best
    }

    /// All matching blocks in order, adjacent blocks merged.
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let mut pending = vec![(0..self.old.len(), 0..self.new.len())];
        let mut found = Vec::new();

        while let Some((old_range, new_range)) = pending.pop() {
            let m = self.longest_match(old_range.clone(), new_range.clone());
            if m.len == 0 {
                continue;
            }
            if old_range.start < m.old_start && new_range.start < m.new_start {
                pending.push((old_range.start..m.old_start, new_range.start..m.new_start));
            }
            let (old_after, new_after) = (m.old_start + m.len, m.new_start + m.len);
            if old_after < old_range.end && new_after < new_range.end {
                pending.push((old_after..old_range.end, new_after..new_range.end));
            }
            found.push(m);
        }

        found.sort_by_key(|m| (m.old_start, m.new_start));
        let mut merged = Vec::with_capacity(found.len());
        for m in found {
            push_match(&mut merged, m.old_start, m.new_start, m.len);
        }
        merged
    }

    /// The gap-filled edit script.
    pub fn opcodes(&self) -> Vec<EditOp> {
        ops_from_blocks(self.matching_blocks(), self.old.len(), self.new.len())
    }
}
