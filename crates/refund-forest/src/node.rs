//! Decision tree nodes, stored in a flat arena.

use refund_model::{Label, LabelCounts};

/// Position of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    pub const ROOT: NodeIndex = NodeIndex(0);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Terminal node holding the (bootstrap-weighted) label tallies that reached it.
    Leaf { counts: LabelCounts },
    /// Rows with `row[feature] <= threshold` go to `left`, the rest to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: NodeIndex,
        right: NodeIndex,
    },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Predicted label of a leaf; `None` for split nodes.
    pub fn leaf_label(&self) -> Option<Label> {
        match self {
            Self::Leaf { counts } => Some(counts.majority()),
            Self::Split { .. } => None,
        }
    }
}
