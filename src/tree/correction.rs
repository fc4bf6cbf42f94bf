//! Out-of-band value corrections for already expanded nodes.

use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::types::{NodeId, NodeValue};

use super::DooTree;

impl<D: Distance> DooTree<D> {
    /// Overwrites the values of already expanded nodes with values computed
    /// out of band.
    ///
    /// `points`, `values` and `feasible` are parallel slices. Each feasible
    /// point is resolved to its node through the evaluated-point index (exact
    /// coordinate match) and that node's value becomes `Evaluated(value)`.
    /// Infeasible entries are ignored. Correcting the outstanding pending
    /// node clears the pending marker.
    ///
    /// All lookups are resolved before anything is written, so a failed call
    /// leaves the tree untouched. Returns the number of corrected nodes.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] if the slices differ in length.
    /// - [`Error::DimensionMismatch`] if a feasible point has the wrong length.
    /// - [`Error::UnindexedPoint`] if a feasible point was never evaluated by
    ///   this tree. This is a bookkeeping bug on the caller's side.
    /// - [`Error::NonFiniteValue`] if a feasible value is NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use doo::{DooTree, Domain, Evaluation, NodeValue};
    ///
    /// let mut tree = DooTree::builder(Domain::uniform(1, 0.0, 1.0).unwrap())
    ///     .seed(9)
    ///     .build()
    ///     .unwrap();
    /// let root = tree.select_next().unwrap();
    /// tree.expand(root, Evaluation::Pending).unwrap();
    ///
    /// let x = tree.node(root).unwrap().midpoint().to_vec();
    /// let corrected = tree.apply_corrections(&[x], &[0.75], &[true]).unwrap();
    ///
    /// assert_eq!(corrected, 1);
    /// assert_eq!(tree.node(root).unwrap().value(), NodeValue::Evaluated(0.75));
    /// assert_eq!(tree.pending(), None);
    /// ```
    pub fn apply_corrections(
        &mut self,
        points: &[Vec<f64>],
        values: &[f64],
        feasible: &[bool],
    ) -> Result<usize> {
        if points.len() != values.len() || points.len() != feasible.len() {
            return Err(Error::LengthMismatch {
                points: points.len(),
                values: values.len(),
                mask: feasible.len(),
            });
        }

        let mut updates: Vec<(NodeId, f64)> = Vec::new();
        for ((point, &value), _) in points
            .iter()
            .zip(values)
            .zip(feasible)
            .filter(|(_, ok)| **ok)
        {
            self.domain.check_dims(point)?;
            let node = self
                .point_index
                .get(point)
                .ok_or_else(|| Error::UnindexedPoint {
                    point: point.clone(),
                })?;
            if value.is_nan() {
                return Err(Error::NonFiniteValue { node });
            }
            updates.push((node, value));
        }

        for &(node, value) in &updates {
            self.nodes[node.0].set_value(NodeValue::Evaluated(value));
            if self.pending == Some(node) {
                self.pending = None;
            }
        }

        if cfg!(feature = "tracing") && !self.values_match(values) {
            trace_debug!(
                expanded = self.expanded.len(),
                supplied = values.len(),
                "expanded values differ from supplied values"
            );
        }
        trace_info!(corrected = updates.len(), "applied value corrections");

        Ok(updates.len())
    }

    /// Returns `true` if the values held by the expanded nodes equal
    /// `values` as multisets.
    ///
    /// This is a consistency probe for drivers that keep their own record of
    /// evaluated values; it is not enforced by any tree operation. Pending
    /// nodes never match.
    #[must_use]
    pub fn values_match(&self, values: &[f64]) -> bool {
        if values.len() != self.expanded.len() {
            return false;
        }
        let mut held: Vec<f64> = Vec::with_capacity(self.expanded.len());
        for &id in &self.expanded {
            match self.nodes[id.0].value().value() {
                Some(v) => held.push(v),
                None => return false,
            }
        }
        let mut supplied = values.to_vec();
        held.sort_by(f64::total_cmp);
        supplied.sort_by(f64::total_cmp);
        held == supplied
    }
}
