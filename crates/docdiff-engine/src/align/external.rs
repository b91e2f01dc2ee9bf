//! Alignment through the `similar` crate's diff algorithms.
//!
//! `similar` may emit adjacent non-equal ops (a delete next to an insert, or
//! several inserts in a row). Only its equal spans are kept; the gaps are
//! refilled with the same rules the built-in matchers use.

use std::hash::Hash;
use std::ops::Range;

use similar::{capture_diff_slices, DiffTag};

use super::{ops_from_blocks, push_match, EditOp};

pub(super) fn opcodes<T: Eq + Hash + Ord>(algorithm: similar::Algorithm, old: &[T], new: &[T]) -> Vec<EditOp> {
    let raw = capture_diff_slices(algorithm, old, new);
    let mut blocks = Vec::new();
    for op in &raw {
        let (tag, old_range, new_range): (DiffTag, Range<usize>, Range<usize>) = op.as_tag_tuple();
        if tag == DiffTag::Equal {
            push_match(&mut blocks, old_range.start, new_range.start, old_range.len());
        }
    }
    ops_from_blocks(blocks, old.len(), new.len())
}
