//! Driving a tree for a fixed number of rounds.
//!
//! A [`Rollout`] repeats select → evaluate → expand against an
//! [`Evaluator`], optionally rounding every point to a fixed [`Precision`]
//! first, and returns a [`RolloutReport`] listing what was proposed.

use core::ops::ControlFlow;

use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::evaluator::Evaluator;
use crate::tree::DooTree;
use crate::types::{Evaluation, NodeId};

const DECADE_EPSILON: f64 = 1e-9;

/// Decimal rounding applied to points before they are evaluated.
///
/// # Examples
///
/// ```
/// use doo::Precision;
///
/// let p = Precision::from_step(0.01).unwrap();
/// assert_eq!(p.decimal_places(), 2);
/// assert_eq!(p.apply(&[0.123_4, -1.005_1]), vec![0.12, -1.01]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision {
    decimals: i32,
}

impl Precision {
    /// Rounds to `decimals` decimal places. Negative values round to tens,
    /// hundreds, and so on.
    #[must_use]
    pub fn decimals(decimals: i32) -> Self {
        Self { decimals }
    }

    /// Rounds to the number of decimals implied by a grid step:
    /// `-log10(step)` truncated toward zero, so a step of `0.001` keeps three
    /// decimals and a step of `0.2` keeps none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrecision`] if `step` is not finite and
    /// positive, or so small or large that `10^decimals` overflows or
    /// underflows.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_step(step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::InvalidPrecision(step));
        }
        // Nudge exact decades past float noise before truncating.
        let decimals = (-step.log10() + DECADE_EPSILON).trunc() as i32;
        let scale = 10f64.powi(decimals);
        if !scale.is_finite() || scale == 0.0 {
            return Err(Error::InvalidPrecision(step));
        }
        Ok(Self::decimals(decimals))
    }

    /// Number of decimal places kept.
    #[must_use]
    pub fn decimal_places(self) -> i32 {
        self.decimals
    }

    /// Rounds every coordinate half-to-even at the configured precision.
    ///
    /// A coordinate that cannot be scaled without overflow is returned as is.
    #[must_use]
    pub fn apply(self, point: &[f64]) -> Vec<f64> {
        let scale = 10f64.powi(self.decimals);
        point
            .iter()
            .map(|&x| {
                let scaled = x * scale;
                if !scaled.is_finite() {
                    return x;
                }
                let rounded = scaled.round_ties_even() / scale;
                if rounded.is_finite() { rounded } else { x }
            })
            .collect()
    }
}

/// One round of a rollout: the node that was selected, the point that was
/// evaluated and what the evaluator reported.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proposal {
    /// The node whose cell produced the point.
    pub node: NodeId,
    /// The point handed to the evaluator (after rounding, if any).
    pub point: Vec<f64>,
    /// The evaluator's report.
    pub evaluation: Evaluation,
}

/// Everything proposed during a rollout, in round order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RolloutReport {
    proposals: Vec<Proposal>,
}

impl RolloutReport {
    /// All proposals in round order.
    #[must_use]
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Number of completed rounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    /// Returns `true` if no round completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Evaluated points, in round order.
    pub fn points(&self) -> impl Iterator<Item = &[f64]> {
        self.proposals.iter().map(|p| p.point.as_slice())
    }

    /// The `n` proposals with the largest values, best first.
    ///
    /// Pending proposals are excluded. Ties keep round order.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<&Proposal> {
        let mut ranked: Vec<&Proposal> = self
            .proposals
            .iter()
            .filter(|p| p.evaluation.value().is_some())
            .collect();
        // Sort best-first; `sort_by` is stable so equal values keep round order.
        ranked.sort_by(|a, b| {
            let (a, b) = (a.evaluation.value(), b.evaluation.value());
            b.unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&a.unwrap_or(f64::NEG_INFINITY))
        });
        ranked.truncate(n);
        ranked
    }

    /// The proposal with the largest value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoEvaluations`] if every proposal is pending or the
    /// report is empty.
    pub fn best(&self) -> Result<&Proposal> {
        self.top_n(1).into_iter().next().ok_or(Error::NoEvaluations)
    }
}

/// Runs a fixed number of select → evaluate → expand rounds.
///
/// # Examples
///
/// ```
/// use doo::prelude::*;
///
/// let mut tree = DooTree::builder(Domain::uniform(2, 0.0, 1.0).unwrap())
///     .exploration_constant(0.05)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// let report = Rollout::new(40)
///     .precision(Precision::from_step(0.001).unwrap())
///     .run(&mut tree, |x: &[f64]| {
///         Ok::<_, Error>(-((x[0] - 0.3).powi(2) + (x[1] - 0.6).powi(2)))
///     })
///     .unwrap();
///
/// let top = report.top_n(4);
/// assert_eq!(top.len(), 4);
/// assert!(top[0].evaluation.value() >= top[3].evaluation.value());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rollout {
    rounds: usize,
    precision: Option<Precision>,
}

impl Rollout {
    /// A rollout of `rounds` rounds without rounding.
    #[must_use]
    pub fn new(rounds: usize) -> Self {
        Self {
            rounds,
            precision: None,
        }
    }

    /// Round points to `precision` before evaluating them.
    ///
    /// The rounded point is what the tree indexes, so corrections must use
    /// the rounded coordinates as well.
    #[must_use]
    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Number of rounds this rollout performs.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Runs the rollout against `tree`.
    ///
    /// Stops early when [`Evaluator::after_round`] breaks.
    ///
    /// # Errors
    ///
    /// - [`Error::Evaluation`] if the evaluator fails. The failing round is
    ///   not reported to the tree.
    /// - Any error from [`DooTree::select_next`] or [`DooTree::expand_at`].
    pub fn run<D, E>(&self, tree: &mut DooTree<D>, evaluator: E) -> Result<RolloutReport>
    where
        D: Distance,
        E: Evaluator,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("rollout", rounds = self.rounds).entered();

        let mut report = RolloutReport {
            proposals: Vec::with_capacity(self.rounds),
        };

        for _ in 0..self.rounds {
            let node = tree.select_next()?;
            let midpoint = tree
                .node(node)
                .ok_or(Error::Internal("selected node is missing from the arena"))?
                .midpoint();
            let point = match self.precision {
                Some(precision) => precision.apply(midpoint),
                None => midpoint.to_vec(),
            };

            let evaluation = evaluator
                .evaluate(&point)
                .map_err(|e| Error::Evaluation(e.to_string()))?;
            tree.expand_at(node, point.clone(), evaluation)?;
            trace_debug!(node = node.index(), "round completed");

            let proposal = Proposal {
                node,
                point,
                evaluation,
            };
            let flow = evaluator.after_round(&proposal);
            report.proposals.push(proposal);
            if let ControlFlow::Break(()) = flow {
                trace_info!(rounds = report.len(), "rollout stopped early");
                break;
            }
        }

        trace_info!(
            rounds = report.len(),
            nodes = tree.len(),
            leaves = tree.leaves().len(),
            "rollout finished"
        );
        Ok(report)
    }
}
