//! The [`Evaluator`] trait defines the black box a rollout queries.
//!
//! For simple closures, pass them directly to
//! [`Rollout::run`](crate::Rollout::run):
//!
//! ```
//! use doo::prelude::*;
//!
//! let mut tree = DooTree::builder(Domain::uniform(1, -2.0, 2.0).unwrap())
//!     .seed(4)
//!     .build()
//!     .unwrap();
//!
//! let report = Rollout::new(16)
//!     .run(&mut tree, |x: &[f64]| Ok::<_, Error>(-(x[0] - 1.0).powi(2)))
//!     .unwrap();
//! assert_eq!(report.len(), 16);
//! ```
//!
//! For early stopping, implement [`Evaluator`] on a struct:
//!
//! ```
//! use std::ops::ControlFlow;
//!
//! use doo::prelude::*;
//!
//! struct StopAbove {
//!     target: f64,
//! }
//!
//! impl Evaluator for StopAbove {
//!     type Error = Error;
//!
//!     fn evaluate(&self, point: &[f64]) -> Result<Evaluation> {
//!         Ok(Evaluation::Value(-point[0].abs()))
//!     }
//!
//!     fn after_round(&self, proposal: &Proposal) -> ControlFlow<()> {
//!         match proposal.evaluation.value() {
//!             Some(v) if v > self.target => ControlFlow::Break(()),
//!             _ => ControlFlow::Continue(()),
//!         }
//!     }
//! }
//!
//! let mut tree = DooTree::builder(Domain::uniform(1, -1.0, 1.0).unwrap())
//!     .seed(2)
//!     .build()
//!     .unwrap();
//! let report = Rollout::new(500).run(&mut tree, StopAbove { target: -0.05 }).unwrap();
//! assert!(report.len() < 500);
//! ```

use core::ops::ControlFlow;

use crate::rollout::Proposal;
use crate::types::Evaluation;

/// A black-box function queried once per rollout round.
///
/// The only required method is [`evaluate`](Evaluator::evaluate). The
/// tree never calls the evaluator itself; [`Rollout`](crate::Rollout) does,
/// between selecting a node and expanding it.
pub trait Evaluator {
    /// The error type returned by [`evaluate`](Evaluator::evaluate).
    type Error: ToString;

    /// Evaluate the function at `point`.
    ///
    /// Return [`Evaluation::Pending`] when the value will only be known later
    /// and will be supplied through
    /// [`DooTree::apply_corrections`](crate::DooTree::apply_corrections).
    ///
    /// # Errors
    ///
    /// Any error whose type implements `ToString`. The rollout stops and
    /// reports it as [`Error::Evaluation`](crate::Error::Evaluation); no
    /// retry is attempted.
    fn evaluate(&self, point: &[f64]) -> Result<Evaluation, Self::Error>;

    /// Called after each round has been reported to the tree.
    ///
    /// Return `ControlFlow::Break(())` to end the rollout early.
    ///
    /// Default: always continues.
    fn after_round(&self, _proposal: &Proposal) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<F, T, E> Evaluator for F
where
    F: Fn(&[f64]) -> Result<T, E>,
    T: Into<Evaluation>,
    E: ToString,
{
    type Error = E;

    fn evaluate(&self, point: &[f64]) -> Result<Evaluation, E> {
        self(point).map(Into::into)
    }
}
