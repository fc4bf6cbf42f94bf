//! Core types shared by the tree and the rollout driver.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a node, assigned in creation order.
///
/// Ids are unique within one [`DooTree`](crate::DooTree) and index the
/// tree's node arena directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the creation-order index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The evaluation state of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeValue {
    /// The node's midpoint has not been evaluated yet.
    #[default]
    Unevaluated,
    /// A value is expected but has not been attached yet.
    Pending,
    /// The node carries an evaluated value.
    Evaluated(f64),
}

impl NodeValue {
    /// Returns the evaluated value, if any.
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Evaluated(v) => Some(v),
            Self::Unevaluated | Self::Pending => None,
        }
    }

    /// Returns `true` once the node holds a value or is pending one.
    ///
    /// This is the condition that promotes a pair of siblings into the leaf set.
    #[must_use]
    pub fn is_assigned(self) -> bool {
        !matches!(self, Self::Unevaluated)
    }

    /// Returns `true` if the node is waiting for an out-of-band value.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<Evaluation> for NodeValue {
    fn from(evaluation: Evaluation) -> Self {
        match evaluation {
            Evaluation::Value(v) => Self::Evaluated(v),
            Evaluation::Pending => Self::Pending,
        }
    }
}

/// The outcome reported back to the tree after evaluating a node's point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Evaluation {
    /// The evaluator produced a value.
    Value(f64),
    /// The value will be supplied later through
    /// [`DooTree::apply_corrections`](crate::DooTree::apply_corrections).
    Pending,
}

impl Evaluation {
    /// Returns the reported value, or `None` for [`Evaluation::Pending`].
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Pending => None,
        }
    }
}

impl From<f64> for Evaluation {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}
