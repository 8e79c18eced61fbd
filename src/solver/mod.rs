//! Value-iteration solver for the vehicle MDP.
//!
//! The solver reads a [`StateSpace`](crate::mdp::StateSpace) and returns a
//! [`Solution`] side table; it never writes to the space. Running it again
//! with another [`SolverConfig`] (say, a different discount factor) yields
//! an independent solution.
//!
//! # Stopping Rule
//!
//! A sweep is stable once no state's value moved by more than
//! [`SolverConfig::tolerance`]. Exact float equality is not used: rounding
//! noise can keep it from ever holding. Running out of
//! [`SolverConfig::max_sweeps`] is reported as
//! [`SolveError::ConvergenceFailure`].

mod config;
mod error;
mod solution;
mod value_iteration;


pub use config::{InitialValues, SolverConfig, UpdateStyle};
pub use error::SolveError;
pub use solution::Solution;
pub use value_iteration::ValueIteration;
