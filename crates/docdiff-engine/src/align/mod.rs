//! Sequence alignment: edit scripts and similarity between two sequences.
//!
//! Every algorithm reduces to a list of order-preserving [`MatchBlock`]s.
//! The gaps between consecutive blocks become `Insert`, `Delete`, or
//! `Replace` ops, so the resulting [`EditOp`] ranges always partition both
//! inputs exactly once.

mod external;
mod lcs;
mod ratcliff;

use std::fmt;
use std::hash::Hash;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub use ratcliff::SequenceMatcher;

/// The matching strategy used to align two sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Exact longest common subsequence. Minimal edit script, symmetric
    /// similarity, earliest-in-old tie-break.
    #[default]
    Lcs,
    /// Ratcliff/Obershelp recursive longest-block matching. Not minimal, and
    /// its similarity is not symmetric in general.
    Ratcliff,
    /// Myers' O(ND) difference algorithm.
    Myers,
    /// Patience diff: unique lines anchor the alignment.
    Patience,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lcs => "lcs",
            Self::Ratcliff => "ratcliff",
            Self::Myers => "myers",
            Self::Patience => "patience",
        })
    }
}

impl std::str::FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lcs" => Ok(Self::Lcs),
            "ratcliff" | "ratcliff-obershelp" => Ok(Self::Ratcliff),
            "myers" => Ok(Self::Myers),
            "patience" => Ok(Self::Patience),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown algorithm '{other}' (expected lcs, ratcliff, myers, or patience)"
            ))),
        }
    }
}

/// The kind of an edit operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

impl EditTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Replace => "replace",
        }
    }

    /// The tag for a gap between matches with the given side lengths.
    /// Returns `None` when both sides are empty.
    pub fn for_gap(old_len: usize, new_len: usize) -> Option<Self> {
        match (old_len > 0, new_len > 0) {
            (true, true) => Some(Self::Replace),
            (true, false) => Some(Self::Delete),
            (false, true) => Some(Self::Insert),
            (false, false) => None,
        }
    }
}

impl fmt::Display for EditTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed span of an edit script.
///
/// Ranges are 0-based and half-open, indexing the item sequences that were
/// aligned.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EditOp {
    pub tag: EditTag,
    pub old_range: Range<usize>,
    pub new_range: Range<usize>,
}

impl EditOp {
    pub fn new(tag: EditTag, old_range: Range<usize>, new_range: Range<usize>) -> Self {
        Self {
            tag,
            old_range,
            new_range,
        }
    }

    /// Number of old items covered.
    pub fn old_len(&self) -> usize {
        self.old_range.len()
    }

    /// Number of new items covered.
    pub fn new_len(&self) -> usize {
        self.new_range.len()
    }
}

/// A run of equal items: `old[old_start..old_start + len] == new[new_start..new_start + len]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchBlock {
    pub old_start: usize,
    pub new_start: usize,
    pub len: usize,
}

/// The output of aligning two sequences.
#[derive(Clone, Debug, PartialEq)]
pub struct Alignment {
    pub ops: Vec<EditOp>,
    /// `2M / T`, where `M` is the matched length and `T` the combined length.
    pub similarity: f64,
}

impl Alignment {
    /// Total number of items covered by `Equal` ops (on either side).
    pub fn matched_len(&self) -> usize {
        matched_len(&self.ops)
    }
}

/// Align two sequences with the default algorithm.
pub fn align<T: Eq + Hash + Ord>(old: &[T], new: &[T]) -> Alignment {
    align_with(old, new, Algorithm::default())
}

/// Align two sequences with an explicit algorithm.
pub fn align_with<T: Eq + Hash + Ord>(old: &[T], new: &[T], algorithm: Algorithm) -> Alignment {
    let ops = match algorithm {
        Algorithm::Lcs => lcs::opcodes(old, new),
        Algorithm::Ratcliff => SequenceMatcher::new(old, new).opcodes(),
        Algorithm::Myers => external::opcodes(similar::Algorithm::Myers, old, new),
        Algorithm::Patience => external::opcodes(similar::Algorithm::Patience, old, new),
    };
    let similarity = similarity_ratio(matched_len(&ops), old.len() + new.len());
    Alignment { ops, similarity }
}

/// `2M / T`, defined as `1.0` when both sequences are empty.
pub fn similarity_ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (2 * matched) as f64 / total as f64
}

fn matched_len(ops: &[EditOp]) -> usize {
    ops.iter()
        .filter(|op| op.tag == EditTag::Equal)
        .map(EditOp::old_len)
        .sum()
}

/// Turn ordered, non-overlapping match blocks into a gap-filled edit script.
pub(crate) fn ops_from_blocks(
    blocks: impl IntoIterator<Item = MatchBlock>,
    old_len: usize,
    new_len: usize,
) -> Vec<EditOp> {
    let sentinel = MatchBlock {
        old_start: old_len,
        new_start: new_len,
        len: 0,
    };
    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);

    for block in blocks.into_iter().chain(std::iter::once(sentinel)) {
        if let Some(tag) = EditTag::for_gap(block.old_start - i, block.new_start - j) {
            ops.push(EditOp::new(tag, i..block.old_start, j..block.new_start));
        }
        if block.len > 0 {
            ops.push(EditOp::new(
                EditTag::Equal,
                block.old_start..block.old_start + block.len,
                block.new_start..block.new_start + block.len,
            ));
        }
        i = block.old_start + block.len;
        j = block.new_start + block.len;
    }
    ops
}

/// Append a single matched pair, extending the last block when contiguous.
pub(crate) fn push_match(blocks: &mut Vec<MatchBlock>, old_start: usize, new_start: usize, len: usize) {
    if len == 0 {
        return;
    }
    if let Some(last) = blocks.last_mut() {
        if last.old_start + last.len == old_start && last.new_start + last.len == new_start {
            last.len += len;
            return;
        }
    }
    blocks.push(MatchBlock {
        old_start,
        new_start,
        len,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Algorithm; 4] = [
        Algorithm::Lcs,
        Algorithm::Ratcliff,
        Algorithm::Myers,
        Algorithm::Patience,
    ];

    #[test]
    fn algorithm_names_parse() {
        for algorithm in ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!("Myers".parse::<Algorithm>().unwrap(), Algorithm::Myers);
        assert!("histogram".parse::<Algorithm>().is_err());
    }

    fn assert_partitions(ops: &[EditOp], old_len: usize, new_len: usize) {
        let (mut i, mut j) = (0, 0);
        for op in ops {
            assert_eq!(op.old_range.start, i, "old ranges must be contiguous: {ops:?}");
            assert_eq!(op.new_range.start, j, "new ranges must be contiguous: {ops:?}");
            match op.tag {
                EditTag::Equal => assert_eq!(op.old_len(), op.new_len()),
                EditTag::Insert => assert!(op.old_len() == 0 && op.new_len() > 0),
                EditTag::Delete => assert!(op.old_len() > 0 && op.new_len() == 0),
                EditTag::Replace => assert!(op.old_len() > 0 && op.new_len() > 0),
            }
            i = op.old_range.end;
            j = op.new_range.end;
        }
        assert_eq!(i, old_len);
        assert_eq!(j, new_len);
    }

    #[test]
    fn identical_sequences_single_equal_op() {
        let a = ["x", "y", "z"];
        for algorithm in ALL {
            let alignment = align_with(&a, &a, algorithm);
            assert_eq!(alignment.similarity, 1.0);
            assert_eq!(alignment.ops, vec![EditOp::new(EditTag::Equal, 0..3, 0..3)]);
        }
    }

    #[test]
    fn both_empty_is_fully_similar() {
        let empty: [&str; 0] = [];
        for algorithm in ALL {
            let alignment = align_with(&empty, &empty, algorithm);
            assert_eq!(alignment.similarity, 1.0);
            assert!(alignment.ops.is_empty());
        }
    }

    #[test]
    fn one_side_empty() {
        let empty: [&str; 0] = [];
        let a = ["a", "b"];

        let inserted = align(&empty, &a);
        assert_eq!(inserted.ops, vec![EditOp::new(EditTag::Insert, 0..0, 0..2)]);
        assert_eq!(inserted.similarity, 0.0);

        let deleted = align(&a, &empty);
        assert_eq!(deleted.ops, vec![EditOp::new(EditTag::Delete, 0..2, 0..0)]);
        assert_eq!(deleted.similarity, 0.0);
    }

    #[test]
    fn disjoint_sequences_single_replace() {
        let a = ["a", "b", "c"];
        let b = ["x", "y"];
        for algorithm in ALL {
            let alignment = align_with(&a, &b, algorithm);
            assert_eq!(alignment.similarity, 0.0);
            assert_eq!(alignment.ops, vec![EditOp::new(EditTag::Replace, 0..3, 0..2)]);
        }
    }

    #[test]
    fn end_to_end_opcodes() {
        let old = ["line1", "line2", "line3"];
        let new = ["line1", "line2X", "line3", "line4"];
        let expected = vec![
            EditOp::new(EditTag::Equal, 0..1, 0..1),
            EditOp::new(EditTag::Replace, 1..2, 1..2),
            EditOp::new(EditTag::Equal, 2..3, 2..3),
            EditOp::new(EditTag::Insert, 3..3, 3..4),
        ];
        for algorithm in ALL {
            let alignment = align_with(&old, &new, algorithm);
            assert_eq!(alignment.ops, expected, "algorithm {algorithm}");
            assert!(alignment.similarity > 0.0 && alignment.similarity < 1.0);
            assert!((alignment.similarity - 4.0 / 7.0).abs() < 1e-12);
        }
    }

    #[test]
    fn tie_break_prefers_earliest_old_position() {
        let old = ["x", "x", "x"];
        let new = ["x"];
        let alignment = align(&old, &new);
        assert_eq!(
            alignment.ops,
            vec![
                EditOp::new(EditTag::Equal, 0..1, 0..1),
                EditOp::new(EditTag::Delete, 1..3, 1..1),
            ]
        );

        let old = ["y", "x", "x"];
        let alignment = align(&old, &new);
        assert_eq!(alignment.ops[1], EditOp::new(EditTag::Equal, 1..2, 0..1));
    }

    #[test]
    fn lcs_similarity_is_symmetric_where_ratcliff_is_not() {
        let tide: Vec<char> = "tide".chars().collect();
        let diet: Vec<char> = "diet".chars().collect();

        let forward = align(&tide, &diet).similarity;
        let backward = align(&diet, &tide).similarity;
        assert_eq!(forward, backward);
        assert_eq!(forward, 0.5);

        let rf = align_with(&tide, &diet, Algorithm::Ratcliff).similarity;
        let rb = align_with(&diet, &tide, Algorithm::Ratcliff).similarity;
        assert_eq!(rf, 0.25);
        assert_eq!(rb, 0.5);
    }

    #[test]
    fn comparison_is_exact() {
        let a = ["Hello", "world "];
        let b = ["hello", "world"];
        let alignment = align(&a, &b);
        assert_eq!(alignment.similarity, 0.0);
    }

    #[test]
    fn gap_tags() {
        assert_eq!(EditTag::for_gap(2, 1), Some(EditTag::Replace));
        assert_eq!(EditTag::for_gap(2, 0), Some(EditTag::Delete));
        assert_eq!(EditTag::for_gap(0, 1), Some(EditTag::Insert));
        assert_eq!(EditTag::for_gap(0, 0), None);
    }

    #[test]
    fn algorithm_serde_names() {
        let parsed: Algorithm = serde_json::from_str("\"patience\"").unwrap();
        assert_eq!(parsed, Algorithm::Patience);
        assert_eq!(serde_json::to_string(&Algorithm::Lcs).unwrap(), "\"lcs\"");
    }

    fn small_seq() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(0u8..5, 0..24)
    }

    proptest! {
        #[test]
        fn ranges_partition_both_sides(a in small_seq(), b in small_seq()) {
            for algorithm in ALL {
                let alignment = align_with(&a, &b, algorithm);
                assert_partitions(&alignment.ops, a.len(), b.len());
                let old_total: usize = alignment.ops.iter().map(EditOp::old_len).sum();
                let new_total: usize = alignment.ops.iter().map(EditOp::new_len).sum();
                prop_assert_eq!(old_total, a.len());
                prop_assert_eq!(new_total, b.len());
            }
        }

        #[test]
        fn equal_ops_really_match(a in small_seq(), b in small_seq()) {
            for algorithm in ALL {
                for op in align_with(&a, &b, algorithm).ops {
                    if op.tag == EditTag::Equal {
                        prop_assert_eq!(&a[op.old_range.clone()], &b[op.new_range.clone()]);
                    }
                }
            }
        }

        #[test]
        fn lcs_similarity_symmetric(a in small_seq(), b in small_seq()) {
            prop_assert_eq!(align(&a, &b).similarity, align(&b, &a).similarity);
        }

        #[test]
        fn lcs_is_never_worse_than_other_algorithms(a in small_seq(), b in small_seq()) {
            let best = align(&a, &b).matched_len();
            for algorithm in [Algorithm::Ratcliff, Algorithm::Myers, Algorithm::Patience] {
                prop_assert!(align_with(&a, &b, algorithm).matched_len() <= best);
            }
        }

        #[test]
        fn self_alignment_is_identity(a in small_seq()) {
            let alignment = align(&a, &a);
            prop_assert_eq!(alignment.similarity, 1.0);
            prop_assert!(alignment.ops.iter().all(|op| op.tag == EditTag::Equal));
            prop_assert!(alignment.ops.len() <= 1);
        }

        #[test]
        fn similarity_in_unit_interval(a in small_seq(), b in small_seq()) {
            let s = align(&a, &b).similarity;
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }
}
