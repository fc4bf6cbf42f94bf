#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Deterministic Optimistic Optimization (DOO) for picking the next point to
//! evaluate in a bounded continuous domain.
//!
//! The crate maintains a binary partition of an axis-aligned box. Every cell
//! carries an optimistic bound `value + c * delta_h`: its best known value
//! plus a bonus proportional to its size. Each round the most promising
//! cell is evaluated at its midpoint and split in two along its widest axis.
//! The black box itself (typically a surrogate model) stays outside the tree.
//!
//! # Getting Started
//!
//! ```
//! use doo::prelude::*;
//!
//! let domain = Domain::uniform(2, -5.0, 5.0).unwrap();
//! let mut tree = DooTree::builder(domain).seed(42).build().unwrap();
//!
//! let report = Rollout::new(100)
//!     .run(&mut tree, |x: &[f64]| Ok::<_, Error>(-(x[0] * x[0] + x[1] * x[1])))
//!     .unwrap();
//!
//! let best = report.best().unwrap();
//! println!("best point {:?} -> {:?}", best.point, best.evaluation);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`DooTree`] | Owns the cells; selects the next node and expands it with the reported value. |
//! | [`Node`] | One cell: midpoint, bounds, `delta_h`, value state, parent and children. |
//! | [`Domain`] | The global search box. |
//! | [`Distance`] | Metric used to size each cell's exploration bonus. |
//! | [`Evaluator`] | The black box queried by a [`Rollout`]. |
//! | [`Rollout`] | Runs a fixed number of select → evaluate → expand rounds. |
//!
//! # Driving the tree by hand
//!
//! ```
//! use doo::{DooTree, Domain, Evaluation};
//!
//! let mut tree = DooTree::new(Domain::uniform(1, 0.0, 1.0).unwrap(), 0.01).unwrap();
//! for _ in 0..8 {
//!     let id = tree.select_next().unwrap();
//!     let x = tree.node(id).unwrap().midpoint()[0];
//!     tree.expand(id, Evaluation::Value((x * 6.0).sin())).unwrap();
//! }
//! assert_eq!(tree.expanded().len(), 8);
//! ```
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on snapshots and reports, [`DooTree::save`] | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) during expansion and rollouts | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod distance;
mod domain;
mod error;
mod evaluator;
mod rng_util;
mod rollout;
mod tree;
mod types;

pub use distance::{Chebyshev, Distance, Euclidean, Manhattan};
pub use domain::Domain;
pub use error::{Error, Result};
pub use evaluator::Evaluator;
pub use rollout::{Precision, Proposal, Rollout, RolloutReport};
pub use tree::{DEFAULT_EXPLORATION_CONSTANT, DooTree, DooTreeBuilder, Node, TreeSnapshot};
pub use types::{Evaluation, NodeId, NodeValue};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use doo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::distance::{Chebyshev, Distance, Euclidean, Manhattan};
    pub use crate::domain::Domain;
    pub use crate::error::{Error, Result};
    pub use crate::evaluator::Evaluator;
    pub use crate::rollout::{Precision, Proposal, Rollout, RolloutReport};
    pub use crate::tree::{DooTree, DooTreeBuilder, Node, TreeSnapshot};
    pub use crate::types::{Evaluation, NodeId, NodeValue};
}
