//! A single cell of the partition.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distance::Distance;
use crate::types::{NodeId, NodeValue};

/// An axis-aligned cell of the domain together with its tree linkage.
///
/// Geometry is fixed at creation. Only the value and the child pair change
/// afterwards, and the child pair is set exactly once, when the node is
/// expanded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    id: NodeId,
    midpoint: Vec<f64>,
    cell_min: Vec<f64>,
    cell_max: Vec<f64>,
    delta_h: f64,
    parent: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    value: NodeValue,
    evaluated_point: Option<Vec<f64>>,
}

/// Geometry of a child cell computed before it is inserted in the arena.
#[derive(Debug)]
pub(crate) struct Cell {
    pub(crate) midpoint: Vec<f64>,
    pub(crate) cell_min: Vec<f64>,
    pub(crate) cell_max: Vec<f64>,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        cell: Cell,
        parent: Option<NodeId>,
        distance: &impl Distance,
    ) -> Self {
        let delta_h = 2.0 * distance.distance(&cell.midpoint, &cell.cell_min);
        Self {
            id,
            midpoint: cell.midpoint,
            cell_min: cell.cell_min,
            cell_max: cell.cell_max,
            delta_h,
            parent,
            children: None,
            value: NodeValue::Unevaluated,
            evaluated_point: None,
        }
    }

    /// Creation-order id of this node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Center of the cell; the point to evaluate for this node.
    #[must_use]
    pub fn midpoint(&self) -> &[f64] {
        &self.midpoint
    }

    /// Lower corner of the cell.
    #[must_use]
    pub fn cell_min(&self) -> &[f64] {
        &self.cell_min
    }

    /// Upper corner of the cell.
    #[must_use]
    pub fn cell_max(&self) -> &[f64] {
        &self.cell_max
    }

    /// Size proxy used as the exploration bonus scale: twice the distance
    /// from the midpoint to the lower corner.
    #[must_use]
    pub fn delta_h(&self) -> f64 {
        self.delta_h
    }

    /// The node this one was split from, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// `(left, right)` children, present once the node has been expanded.
    #[must_use]
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    /// Current evaluation state.
    #[must_use]
    pub fn value(&self) -> NodeValue {
        self.value
    }

    /// The point that was reported for this node on expansion.
    ///
    /// Usually the midpoint, or a rounded copy of it when the driver
    /// quantizes points before evaluating them.
    #[must_use]
    pub fn evaluated_point(&self) -> Option<&[f64]> {
        self.evaluated_point.as_deref()
    }

    /// Returns `true` once the node has been split.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    /// Optimistic bound `value + exploration * delta_h`, for evaluated nodes only.
    #[must_use]
    pub fn upper_bound(&self, exploration: f64) -> Option<f64> {
        self.value.value().map(|v| v + exploration * self.delta_h)
    }

    /// Returns `true` if `point` lies inside the closed cell.
    #[must_use]
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.midpoint.len()
            && point
                .iter()
                .zip(self.cell_min.iter().zip(&self.cell_max))
                .all(|(&x, (&low, &high))| low <= x && x <= high)
    }

    /// The dimension a split cuts: the first one with the largest extent.
    ///
    /// Returns `None` when the cell has no positive extent left.
    #[must_use]
    pub fn split_dim(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (dim, (low, high)) in self.cell_min.iter().zip(&self.cell_max).enumerate() {
            let extent = high - low;
            if best.is_none_or(|(_, widest)| extent > widest) {
                best = Some((dim, extent));
            }
        }
        best.filter(|&(_, extent)| extent > 0.0).map(|(dim, _)| dim)
    }

    /// Geometry of the two halves produced by cutting along `dim` at the midpoint.
    pub(crate) fn halves(&self, dim: usize) -> (Cell, Cell) {
        let cut = self.midpoint[dim];

        let mut left_mid = self.midpoint.clone();
        left_mid[dim] = (self.cell_min[dim] + cut) / 2.0;
        let mut left_max = self.cell_max.clone();
        left_max[dim] = cut;

        let mut right_mid = self.midpoint.clone();
        right_mid[dim] = (self.cell_max[dim] + cut) / 2.0;
        let mut right_min = self.cell_min.clone();
        right_min[dim] = cut;

        (
            Cell {
                midpoint: left_mid,
                cell_min: self.cell_min.clone(),
                cell_max: left_max,
            },
            Cell {
                midpoint: right_mid,
                cell_min: right_min,
                cell_max: self.cell_max.clone(),
            },
        )
    }

    pub(crate) fn set_value(&mut self, value: NodeValue) {
        self.value = value;
    }

    pub(crate) fn set_evaluated_point(&mut self, point: Vec<f64>) {
        self.evaluated_point = Some(point);
    }

    pub(crate) fn set_children(&mut self, left: NodeId, right: NodeId) {
        debug_assert!(self.children.is_none(), "children are set exactly once");
        self.children = Some((left, right));
    }
}
