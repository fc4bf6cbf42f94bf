//! The DOO tree: selection, expansion and leaf bookkeeping.

use crate::distance::{Distance, Euclidean};
use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::types::{Evaluation, NodeId, NodeValue};

mod builder;
mod correction;
mod index;
mod node;
mod snapshot;

pub use builder::{DEFAULT_EXPLORATION_CONSTANT, DooTreeBuilder};
pub use node::Node;
pub use snapshot::TreeSnapshot;

use index::PointIndex;
use node::Cell;

/// A binary space-partitioning tree that decides which point to evaluate next.
///
/// Every node owns an axis-aligned cell of the [`Domain`]. Each round the
/// caller asks for a node with [`select_next`](Self::select_next), evaluates
/// its midpoint, and reports the result with [`expand`](Self::expand), which
/// splits the cell in two along its widest axis. Selection favours the leaf
/// with the largest optimistic bound `value + c * delta_h`.
///
/// Nodes live in an arena owned by the tree; links between them are
/// [`NodeId`]s.
///
/// # Examples
///
/// ```
/// use doo::{DooTree, Domain};
///
/// let domain = Domain::uniform(2, -2.0, 2.0).unwrap();
/// let mut tree = DooTree::builder(domain).seed(1).build().unwrap();
///
/// for _ in 0..20 {
///     let id = tree.select_next().unwrap();
///     let x = tree.node(id).unwrap().midpoint().to_vec();
///     let value = -(x[0] * x[0] + x[1] * x[1]);
///     tree.expand(id, value.into()).unwrap();
/// }
///
/// assert_eq!(tree.expanded().len(), 20);
/// ```
pub struct DooTree<D = Euclidean> {
    domain: Domain,
    exploration: f64,
    distance: D,
    rng: fastrand::Rng,
    nodes: Vec<Node>,
    root: Option<NodeId>,
    leaves: Vec<NodeId>,
    expanded: Vec<NodeId>,
    point_index: PointIndex,
    pending: Option<NodeId>,
}

impl DooTree<Euclidean> {
    /// Creates a tree over `domain` with the Euclidean metric.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExplorationConstant`] if `exploration` is
    /// negative or not finite.
    pub fn new(domain: Domain, exploration: f64) -> Result<Self> {
        Self::builder(domain).exploration_constant(exploration).build()
    }

    /// Returns a [`DooTreeBuilder`] for configuring a tree.
    #[must_use]
    pub fn builder(domain: Domain) -> DooTreeBuilder<Euclidean> {
        DooTreeBuilder::new(domain)
    }
}

impl<D: Distance> DooTree<D> {
    pub(crate) fn from_parts(
        domain: Domain,
        exploration: f64,
        distance: D,
        rng: fastrand::Rng,
    ) -> Self {
        Self {
            domain,
            exploration,
            distance,
            rng,
            nodes: Vec::new(),
            root: None,
            leaves: Vec::new(),
            expanded: Vec::new(),
            point_index: PointIndex::default(),
            pending: None,
        }
    }

    /// Returns the node to evaluate next.
    ///
    /// The first call creates the root at a uniformly random point of the
    /// domain. Later calls scan the leaves in insertion order:
    ///
    /// - an unevaluated leaf is returned immediately;
    /// - pending leaves are skipped;
    /// - otherwise the leaf with the strictly largest optimistic bound wins
    ///   (the first one seen on ties, so a leaf valued `-inf` can still win).
    ///
    /// If the winner has already been split, its first unevaluated child
    /// (left before right) is returned instead.
    ///
    /// # Errors
    ///
    /// - [`Error::NoSelectableLeaf`] if every leaf is pending.
    /// - [`Error::Internal`] if the winning leaf has both children valued,
    ///   which means the leaf set is corrupt.
    pub fn select_next(&mut self) -> Result<NodeId> {
        if self.root.is_none() {
            let midpoint = self.domain.sample(&mut self.rng);
            let cell = Cell {
                midpoint,
                cell_min: self.domain.lower().to_vec(),
                cell_max: self.domain.upper().to_vec(),
            };
            let root = self.push_node(cell, None);
            self.leaves.push(root);
            self.root = Some(root);
            trace_debug!(node = root.index(), "created root");
            return Ok(root);
        }

        let mut best: Option<NodeId> = None;
        let mut max_bound = f64::NEG_INFINITY;
        for &leaf in &self.leaves {
            let node = &self.nodes[leaf.0];
            match node.value() {
                NodeValue::Unevaluated => return Ok(leaf),
                NodeValue::Pending => {}
                NodeValue::Evaluated(_) => {
                    if let Some(bound) = node.upper_bound(self.exploration)
                        && (best.is_none() || bound > max_bound)
                    {
                        best = Some(leaf);
                        max_bound = bound;
                    }
                }
            }
        }
        let best = best.ok_or(Error::NoSelectableLeaf)?;

        let Some((left, right)) = self.nodes[best.0].children() else {
            return Ok(best);
        };
        if !self.nodes[left.0].value().is_assigned() {
            Ok(left)
        } else if !self.nodes[right.0].value().is_assigned() {
            Ok(right)
        } else {
            Err(Error::Internal(
                "leaf has both children evaluated but was not retired",
            ))
        }
    }

    /// Reports the value of `node`'s midpoint and splits the node.
    ///
    /// The midpoint is recorded as the evaluated point for
    /// [`apply_corrections`](Self::apply_corrections). Use
    /// [`expand_at`](Self::expand_at) when the evaluator saw a different
    /// (e.g. rounded) point.
    ///
    /// # Errors
    ///
    /// See [`expand_at`](Self::expand_at).
    pub fn expand(&mut self, node: NodeId, evaluation: Evaluation) -> Result<()> {
        let point = self.node_ref(node)?.midpoint().to_vec();
        self.expand_at(node, point, evaluation)
    }

    /// Reports the value observed at `point` for `node` and splits the node.
    ///
    /// A [`Evaluation::Pending`] report marks the node as the tree's single
    /// outstanding pending node; any other report clears that marker. In both
    /// cases the node is split into two unevaluated children along its widest
    /// axis. Once both children of the node's parent hold a value, the two
    /// siblings replace the parent in the leaf set.
    ///
    /// Every check runs before the tree is modified.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownNode`] if `node` does not belong to this tree.
    /// - [`Error::AlreadyExpanded`] if `node` was expanded before.
    /// - [`Error::DimensionMismatch`] if `point` has the wrong length.
    /// - [`Error::NonFiniteValue`] if the reported value is NaN.
    /// - [`Error::NonFinitePoint`] if `point` has a NaN or infinite coordinate.
    /// - [`Error::DegenerateCell`] if the cell has no extent left to split.
    pub fn expand_at(
        &mut self,
        node: NodeId,
        point: Vec<f64>,
        evaluation: Evaluation,
    ) -> Result<()> {
        let current = self.node_ref(node)?;
        if current.is_expanded() {
            return Err(Error::AlreadyExpanded(node));
        }
        self.domain.check_dims(&point)?;
        if evaluation.value().is_some_and(f64::is_nan) {
            return Err(Error::NonFiniteValue { node });
        }
        if !point.iter().all(|x| x.is_finite()) {
            return Err(Error::NonFinitePoint { node });
        }
        let dim = current.split_dim().ok_or(Error::DegenerateCell { node })?;
        let (left_cell, right_cell) = current.halves(dim);

        match evaluation {
            Evaluation::Pending => self.pending = Some(node),
            Evaluation::Value(_) => self.pending = None,
        }

        self.point_index.insert(&point, node);
        let slot = &mut self.nodes[node.0];
        slot.set_value(evaluation.into());
        slot.set_evaluated_point(point);
        self.expanded.push(node);

        let left = self.push_node(left_cell, Some(node));
        let right = self.push_node(right_cell, Some(node));
        self.nodes[node.0].set_children(left, right);

        trace_debug!(
            node = node.index(),
            dim,
            pending = evaluation == Evaluation::Pending,
            "expanded node"
        );

        if let Some(parent) = self.nodes[node.0].parent() {
            self.retire_if_resolved(parent);
        }
        Ok(())
    }

    /// Replaces `parent` by its children in the leaf set once both hold a value.
    fn retire_if_resolved(&mut self, parent: NodeId) {
        let Some((left, right)) = self.nodes[parent.0].children() else {
            return;
        };
        let assigned = |id: NodeId| self.nodes[id.0].value().is_assigned();
        if !(assigned(left) && assigned(right)) {
            return;
        }
        for child in [left, right] {
            if !self.leaves.contains(&child) {
                self.leaves.push(child);
            }
        }
        self.leaves.retain(|&leaf| leaf != parent);
        trace_debug!(parent = parent.index(), "children promoted to leaves");
    }

    fn push_node(&mut self, cell: Cell, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, cell, parent, &self.distance));
        id
    }

    fn node_ref(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(Error::UnknownNode(id))
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Iterates over every node in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of nodes created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` until the root has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node, once created.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The current leaf set, in insertion order.
    #[must_use]
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Expanded nodes in expansion order.
    #[must_use]
    pub fn expanded(&self) -> &[NodeId] {
        &self.expanded
    }

    /// The outstanding pending node, if any.
    #[must_use]
    pub fn pending(&self) -> Option<NodeId> {
        self.pending
    }

    /// The search domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Weight of the exploration bonus.
    #[must_use]
    pub fn exploration_constant(&self) -> f64 {
        self.exploration
    }

    /// The node that owns an exactly matching evaluated point.
    #[must_use]
    pub fn node_at(&self, point: &[f64]) -> Option<NodeId> {
        self.point_index.get(point)
    }

    /// The leaf whose cell contains `point`.
    ///
    /// Cells share their boundaries; a point on a shared face resolves to the
    /// first matching leaf in leaf order.
    #[must_use]
    pub fn leaf_containing(&self, point: &[f64]) -> Option<NodeId> {
        self.leaves
            .iter()
            .copied()
            .find(|&leaf| self.nodes[leaf.0].contains(point))
    }

    /// The expanded node with the largest evaluated value.
    #[must_use]
    pub fn best(&self) -> Option<&Node> {
        self.expanded
            .iter()
            .map(|&id| &self.nodes[id.0])
            .filter(|node| node.value().value().is_some())
            .fold(None, |best: Option<&Node>, node| match best {
                Some(b) if b.value().value() >= node.value().value() => Some(b),
                _ => Some(node),
            })
    }
}

impl<D> core::fmt::Debug for DooTree<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DooTree")
            .field("domain", &self.domain)
            .field("exploration", &self.exploration)
            .field("nodes", &self.nodes.len())
            .field("leaves", &self.leaves)
            .field("expanded", &self.expanded.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
