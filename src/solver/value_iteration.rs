//! Bellman fixed-point computation.

use tracing::{debug, trace, warn};

use super::config::{SolverConfig, UpdateStyle};
use super::error::SolveError;
use super::solution::Solution;
use crate::mdp::{State, StateSpace};

/// Value-iteration solver.
///
/// Repeats Bellman backups over every state,
///
/// ```text
/// V(s) = max_a [ reward(a) + γ · Σ_s' P(a, s') · V(s') ]
/// ```
///
/// until the largest change in a sweep drops below the configured tolerance.
/// Ties between actions go to the first one in the state's action list.
#[derive(Debug, Clone, Default)]
pub struct ValueIteration {
    config: SolverConfig,
}

impl ValueIteration {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `space` to convergence.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` / `InitialValuesLength` if the configuration is unusable
    /// - `ConvergenceFailure` if the sweep budget runs out; no partial
    ///   solution is returned
    pub fn solve(&self, space: &StateSpace) -> Result<Solution, SolveError> {
        self.config.validate()?;
        let discount = self.config.discount;

        let mut values = self.config.initial.materialize(space.len())?;
        for state in space.states() {
            if state.actions().is_empty() {
                values[state.id().index()] = 0.0;
            }
        }
        let mut best = vec![None; space.len()];
        let mut residual = f64::INFINITY;

        for sweep in 1..=self.config.max_sweeps {
            residual = match self.config.update {
                UpdateStyle::InPlace => sweep_in_place(space, &mut values, &mut best, discount),
                UpdateStyle::Synchronous => {
                    sweep_synchronous(space, &mut values, &mut best, discount)
                }
            };
            trace!(sweep, residual, "value iteration sweep");

            if residual < self.config.tolerance {
                debug!(sweeps = sweep, residual, discount, "value iteration converged");
                return Ok(Solution {
                    values,
                    best,
                    sweeps: sweep,
                    residual,
                    discount,
                });
            }
        }

        warn!(
            sweeps = self.config.max_sweeps,
            residual, "value iteration did not converge"
        );
        Err(SolveError::ConvergenceFailure {
            sweeps: self.config.max_sweeps,
            residual,
        })
    }
}

/// Gauss-Seidel sweep: each backup immediately overwrites its estimate.
fn sweep_in_place(
    space: &StateSpace,
    values: &mut [f64],
    best: &mut [Option<usize>],
    discount: f64,
) -> f64 {
    let mut residual: f64 = 0.0;
    for state in space.states() {
        let i = state.id().index();
        let (value, action) = backup(state, values, discount);
        residual = residual.max(change(values[i], value));
        values[i] = value;
        best[i] = action;
    }
    residual
}

/// Jacobi sweep: every backup reads the previous sweep's estimates.
fn sweep_synchronous(
    space: &StateSpace,
    values: &mut [f64],
    best: &mut [Option<usize>],
    discount: f64,
) -> f64 {
    let previous = values.to_vec();
    let mut residual: f64 = 0.0;
    for state in space.states() {
        let i = state.id().index();
        let (value, action) = backup(state, &previous, discount);
        residual = residual.max(change(previous[i], value));
        values[i] = value;
        best[i] = action;
    }
    residual
}

/// Best one-step lookahead at `state`. States without actions are worth 0.
fn backup(state: &State, values: &[f64], discount: f64) -> (f64, Option<usize>) {
    let mut best: Option<(usize, f64)> = None;
    for (index, action) in state.actions().iter().enumerate() {
        let q = action.reward() + discount * action.expected(values);
        // Strict comparison: an equal later action never displaces an earlier
        // one, and a NaN lookahead never displaces a number.
        let better = match best {
            None => true,
            Some((_, best_q)) => q > best_q || (best_q.is_nan() && !q.is_nan()),
        };
        if better {
            best = Some((index, q));
        }
    }
    match best {
        Some((index, q)) => (q, Some(index)),
        None => (0.0, None),
    }
}

/// Absolute change between two estimates; identical infinities count as 0.
///
/// A NaN on either side counts as an infinite change so the sweep can never
/// look stable.
fn change(old: f64, new: f64) -> f64 {
    if old.is_nan() || new.is_nan() {
        f64::INFINITY
    } else if old == new {
        0.0
    } else {
        (new - old).abs()
    }
}
