use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),

    #[error("Initial values cover {actual} states but the space has {expected}")]
    InitialValuesLength { expected: usize, actual: usize },

    #[error("Value iteration did not converge within {sweeps} sweeps (residual {residual:e})")]
    ConvergenceFailure { sweeps: usize, residual: f64 },
}
