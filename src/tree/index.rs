//! Exact lookup from evaluated points to their nodes.

use std::collections::HashMap;

use crate::types::NodeId;

/// Exact-match key for an evaluated point.
///
/// Coordinates are compared by bit pattern, with `-0.0` folded into `0.0`.
/// Points must be quantized identically before they are indexed and looked up.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct PointKey(Vec<u64>);

impl PointKey {
    fn new(point: &[f64]) -> Self {
        Self(
            point
                .iter()
                .map(|&x| (if x == 0.0 { 0.0_f64 } else { x }).to_bits())
                .collect(),
        )
    }
}

/// Maps evaluated points to the node that owns them.
#[derive(Clone, Debug, Default)]
pub(crate) struct PointIndex {
    map: HashMap<PointKey, NodeId>,
}

impl PointIndex {
    /// Records `node` as the owner of `point`, replacing any previous owner.
    pub(crate) fn insert(&mut self, point: &[f64], node: NodeId) {
        self.map.insert(PointKey::new(point), node);
    }

    pub(crate) fn get(&self, point: &[f64]) -> Option<NodeId> {
        self.map.get(&PointKey::new(point)).copied()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
