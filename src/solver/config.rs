//! Configuration for the value-iteration solver.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::SolveError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How value estimates are refreshed within a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UpdateStyle {
    /// Gauss-Seidel: later states in a sweep already see earlier updates.
    #[default]
    InPlace,
    /// Jacobi: every state is backed up from the previous sweep's values.
    Synchronous,
}

/// Value estimates used to seed the first sweep.
///
/// The fixed point does not depend on this choice for `discount < 1`; only
/// the number of sweeps does.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitialValues {
    #[default]
    Zero,
    Constant(f64),
    /// Independent draws from `[low, high)` with a fixed seed.
    Uniform { low: f64, high: f64, seed: u64 },
    /// One estimate per state, in state-space order.
    Explicit(Vec<f64>),
}

impl InitialValues {
    /// Produces one estimate per state.
    pub(crate) fn materialize(&self, len: usize) -> Result<Vec<f64>, SolveError> {
        match self {
            InitialValues::Zero => Ok(vec![0.0; len]),
            InitialValues::Constant(v) => Ok(vec![*v; len]),
            InitialValues::Uniform { low, high, seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                Ok((0..len).map(|_| rng.gen_range(*low..*high)).collect())
            }
            InitialValues::Explicit(values) => {
                if values.len() != len {
                    return Err(SolveError::InitialValuesLength {
                        expected: len,
                        actual: values.len(),
                    });
                }
                Ok(values.clone())
            }
        }
    }

    fn validate(&self) -> Result<(), SolveError> {
        match self {
            InitialValues::Zero => Ok(()),
            InitialValues::Constant(v) if v.is_finite() => Ok(()),
            InitialValues::Constant(v) => Err(SolveError::InvalidConfig(format!(
                "initial constant must be finite, got {}",
                v
            ))),
            InitialValues::Uniform { low, high, .. } => {
                if low.is_finite() && high.is_finite() && low < high {
                    Ok(())
                } else {
                    Err(SolveError::InvalidConfig(format!(
                        "initial range [{}, {}) is empty or unbounded",
                        low, high
                    )))
                }
            }
            InitialValues::Explicit(values) => {
                if values.iter().all(|v| v.is_finite()) {
                    Ok(())
                } else {
                    Err(SolveError::InvalidConfig(
                        "explicit initial values must be finite".to_string(),
                    ))
                }
            }
        }
    }
}

/// Parameters of one value-iteration run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Discount factor γ, strictly between 0 and 1.
    pub discount: f64,
    /// Convergence threshold on the largest per-state value change in a sweep.
    pub tolerance: f64,
    /// Sweep budget before reporting a convergence failure.
    pub max_sweeps: usize,
    pub update: UpdateStyle,
    pub initial: InitialValues,
}

impl SolverConfig {
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    pub fn with_update(mut self, update: UpdateStyle) -> Self {
        self.update = update;
        self
    }

    pub fn with_initial(mut self, initial: InitialValues) -> Self {
        self.initial = initial;
        self
    }

    /// Checks that the configuration describes a contraction that can stop.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for a discount outside `(0, 1)`, a non-positive or
    ///   non-finite tolerance, a zero sweep budget or unusable initial values
    pub fn validate(&self) -> Result<(), SolveError> {
        if !(self.discount > 0.0 && self.discount < 1.0) {
            return Err(SolveError::InvalidConfig(format!(
                "discount must lie in (0, 1), got {}",
                self.discount
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SolveError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_sweeps == 0 {
            return Err(SolveError::InvalidConfig(
                "max_sweeps must be at least 1".to_string(),
            ));
        }
        self.initial.validate()
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            discount: 0.5,
            tolerance: 1e-9,
            max_sweeps: 10_000,
            update: UpdateStyle::InPlace,
            initial: InitialValues::Zero,
        }
    }
}
