//! Builder for configuring a [`DooTree`].

use crate::distance::{Distance, Euclidean};
use crate::domain::Domain;
use crate::error::{Error, Result};

use super::DooTree;

/// Default weight of the exploration bonus.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 0.01;

/// A builder for [`DooTree`] instances.
///
/// Created via [`DooTree::builder()`].
///
/// # Defaults
///
/// - Exploration constant: [`DEFAULT_EXPLORATION_CONSTANT`] (`0.01`)
/// - Distance: [`Euclidean`]
/// - Seed: none (fresh entropy for the root midpoint)
///
/// # Examples
///
/// ```
/// use doo::distance::Chebyshev;
/// use doo::{DooTree, Domain};
///
/// let tree = DooTree::builder(Domain::uniform(2, -1.0, 1.0).unwrap())
///     .exploration_constant(0.5)
///     .distance(Chebyshev)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(tree.exploration_constant(), 0.5);
/// ```
pub struct DooTreeBuilder<D = Euclidean> {
    domain: Domain,
    exploration: f64,
    distance: D,
    seed: Option<u64>,
}

impl DooTreeBuilder<Euclidean> {
    pub(super) fn new(domain: Domain) -> Self {
        Self {
            domain,
            exploration: DEFAULT_EXPLORATION_CONSTANT,
            distance: Euclidean,
            seed: None,
        }
    }
}

impl<D: Distance> DooTreeBuilder<D> {
    /// Sets the weight of the cell-size bonus in the optimistic bound.
    ///
    /// Validation happens at `build()` time: negative or non-finite values
    /// yield [`Error::InvalidExplorationConstant`].
    #[must_use]
    pub fn exploration_constant(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Sets the metric used to compute each cell's `delta_h`.
    #[must_use]
    pub fn distance<M: Distance>(self, distance: M) -> DooTreeBuilder<M> {
        DooTreeBuilder {
            domain: self.domain,
            exploration: self.exploration,
            distance,
            seed: self.seed,
        }
    }

    /// Fixes the seed used to sample the root midpoint.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExplorationConstant`] if the exploration
    /// constant is negative or not finite.
    pub fn build(self) -> Result<DooTree<D>> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(Error::InvalidExplorationConstant(self.exploration));
        }
        let rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Ok(DooTree::from_parts(
            self.domain,
            self.exploration,
            self.distance,
            rng,
        ))
    }
}
