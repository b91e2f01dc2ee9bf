//! Per-kind change counts over an edit script.

use serde::{Deserialize, Serialize};

use crate::align::{EditOp, EditTag};

/// Counts of inserted, deleted, modified, and unchanged items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffStats {
    pub insertions: usize,
    pub deletions: usize,
    /// `max(old_len, new_len)` summed over replace ops.
    pub modifications: usize,
    pub unchanged: usize,
}

impl DiffStats {
    /// Aggregate counts over an edit script.
    pub fn from_ops<'a>(ops: impl IntoIterator<Item = &'a EditOp>) -> Self {
        let mut stats = Self::default();
        for op in ops {
            match op.tag {
                EditTag::Equal => stats.unchanged += op.old_len(),
                EditTag::Insert => stats.insertions += op.new_len(),
                EditTag::Delete => stats.deletions += op.old_len(),
                EditTag::Replace => stats.modifications += op.old_len().max(op.new_len()),
            }
        }
        stats
    }

    /// Insertions, deletions, and modifications combined.
    pub fn changed(&self) -> usize {
        self.insertions + self.deletions + self.modifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_counts_nothing() {
        assert_eq!(DiffStats::from_ops(std::iter::empty()), DiffStats::default());
    }

    #[test]
    fn replace_counts_max_not_sum() {
        let ops = [EditOp::new(EditTag::Replace, 0..3, 0..1)];
        let stats = DiffStats::from_ops(&ops);
        assert_eq!(stats.modifications, 3);
        assert_eq!(stats.deletions, 0);
        assert_eq!(stats.insertions, 0);
    }

    #[test]
    fn mixed_script() {
        let ops = [
            EditOp::new(EditTag::Equal, 0..1, 0..1),
            EditOp::new(EditTag::Replace, 1..2, 1..2),
            EditOp::new(EditTag::Equal, 2..3, 2..3),
            EditOp::new(EditTag::Insert, 3..3, 3..4),
            EditOp::new(EditTag::Delete, 3..5, 4..4),
        ];
        let stats = DiffStats::from_ops(&ops);
        assert_eq!(
            stats,
            DiffStats {
                insertions: 1,
                deletions: 2,
                modifications: 1,
                unchanged: 2,
            }
        );
        assert_eq!(stats.changed(), 4);
    }

    #[test]
    fn serializes_named_counts() {
        let json = serde_json::to_value(DiffStats::default()).unwrap();
        for key in ["insertions", "deletions", "modifications", "unchanged"] {
            assert_eq!(json[key], 0);
        }
    }
}
