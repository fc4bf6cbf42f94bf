//! Metrics used to size a cell's exploration bonus.
//!
//! The tree only ever asks for the distance between a cell's midpoint and its
//! lower corner, so any function of two equal-length points will do. Closures
//! implement [`Distance`] directly:
//!
//! ```
//! use doo::{DooTree, Domain};
//!
//! let domain = Domain::uniform(2, 0.0, 1.0).unwrap();
//! let tree = DooTree::builder(domain)
//!     .distance(|a: &[f64], b: &[f64]| (a[0] - b[0]).abs())
//!     .build()
//!     .unwrap();
//! assert_eq!(tree.len(), 0);
//! ```

/// A metric over points of the search domain.
pub trait Distance {
    /// Distance between `a` and `b`. Both slices have the domain's dimensionality.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> Distance for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// The L2 norm of `a - b` (the default).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Distance for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }
}

/// The L∞ norm of `a - b`: the largest per-axis gap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Chebyshev;

impl Distance for Chebyshev {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }
}

/// The L1 norm of `a - b`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Distance for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
    }
}
