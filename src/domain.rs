//! The bounded search domain.
//!
//! A [`Domain`] is the axis-aligned box every cell of a
//! [`DooTree`](crate::DooTree) lives in. It is validated once at construction
//! so the tree never has to deal with inverted or empty extents.
//!
//! ```
//! use doo::Domain;
//!
//! let domain = Domain::new(vec![0.0, -1.0], vec![1.0, 1.0]).unwrap();
//! assert_eq!(domain.dims(), 2);
//! assert!(domain.contains(&[0.5, 0.0]));
//!
//! // Same bounds in every dimension.
//! let cube = Domain::uniform(3, -5.0, 5.0).unwrap();
//! assert_eq!(cube.lower(), &[-5.0, -5.0, -5.0]);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rng_util;

/// An axis-aligned box `[lower, upper]` with positive extent in every dimension.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Domain {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Domain {
    /// Creates a domain from per-dimension lower and upper bounds.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyDomain`] if `lower` is empty.
    /// - [`Error::DimensionMismatch`] if `upper` has a different length.
    /// - [`Error::InvalidBounds`] if any bound is non-finite or `low >= high`.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.is_empty() {
            return Err(Error::EmptyDomain);
        }
        if lower.len() != upper.len() {
            return Err(Error::DimensionMismatch {
                expected: lower.len(),
                got: upper.len(),
            });
        }
        for (dim, (&low, &high)) in lower.iter().zip(&upper).enumerate() {
            if !low.is_finite() || !high.is_finite() || low >= high {
                return Err(Error::InvalidBounds { dim, low, high });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Creates a `dims`-dimensional domain with the same bounds on every axis.
    ///
    /// # Errors
    ///
    /// Same as [`Domain::new`].
    pub fn uniform(dims: usize, low: f64, high: f64) -> Result<Self> {
        Self::new(vec![low; dims], vec![high; dims])
    }

    /// Number of dimensions.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Returns `true` if `point` lies inside the box, bounds inclusive.
    #[must_use]
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dims()
            && point
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&x, (&low, &high))| low <= x && x <= high)
    }

    /// Fails with [`Error::DimensionMismatch`] unless `point` has `dims()` coordinates.
    pub(crate) fn check_dims(&self, point: &[f64]) -> Result<()> {
        if point.len() == self.dims() {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dims(),
                got: point.len(),
            })
        }
    }

    /// Draws a point uniformly at random from the domain.
    pub(crate) fn sample(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
        rng_util::uniform_point(rng, &self.lower, &self.upper)
    }
}
