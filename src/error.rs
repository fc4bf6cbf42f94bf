use crate::types::NodeId;

/// Errors returned by tree construction, selection, expansion and rollouts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a domain has no dimensions.
    #[error("domain must have at least one dimension")]
    EmptyDomain,

    /// Returned when a dimension's bounds are non-finite or `low >= high`.
    #[error("invalid bounds in dimension {dim}: low ({low}) must be finite and less than high ({high})")]
    InvalidBounds {
        /// The offending dimension.
        dim: usize,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when a point or bound vector has the wrong number of coordinates.
    #[error("dimension mismatch: expected {expected} coordinates, got {got}")]
    DimensionMismatch {
        /// The domain dimensionality.
        expected: usize,
        /// The length that was supplied.
        got: usize,
    },

    /// Returned when the exploration constant is negative or not finite.
    #[error("invalid exploration constant: {0} must be finite and non-negative")]
    InvalidExplorationConstant(f64),

    /// Returned when a rounding step is not finite and positive.
    #[error("invalid precision step: {0} must be finite and positive")]
    InvalidPrecision(f64),

    /// Returned when an evaluation reports NaN.
    #[error("node {node} received a NaN value")]
    NonFiniteValue {
        /// The node being expanded.
        node: NodeId,
    },

    /// Returned when an evaluated point has a NaN or infinite coordinate.
    #[error("node {node} was evaluated at a non-finite point")]
    NonFinitePoint {
        /// The node being expanded.
        node: NodeId,
    },

    /// Returned when a node id does not belong to the tree.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Returned when a node is expanded a second time.
    #[error("node {0} has already been expanded")]
    AlreadyExpanded(NodeId),

    /// Returned when a cell has zero extent in every dimension and cannot be split.
    #[error("node {node} has a degenerate cell and cannot be split")]
    DegenerateCell {
        /// The node whose cell collapsed.
        node: NodeId,
    },

    /// Returned when every leaf is pending.
    #[error("no leaf is eligible for selection")]
    NoSelectableLeaf,

    /// Returned when a correction targets a point that was never indexed.
    #[error("point {point:?} has no indexed node")]
    UnindexedPoint {
        /// The point that could not be resolved.
        point: Vec<f64>,
    },

    /// Returned when correction inputs have different lengths.
    #[error("length mismatch: {points} points, {values} values, {mask} mask entries")]
    LengthMismatch {
        /// Number of points supplied.
        points: usize,
        /// Number of values supplied.
        values: usize,
        /// Number of feasibility flags supplied.
        mask: usize,
    },

    /// Returned when asking for the best proposal of a rollout that has no values.
    #[error("no evaluated proposals available")]
    NoEvaluations,

    /// Returned when the evaluator fails during a rollout.
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    /// Returned when an internal invariant is violated.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
