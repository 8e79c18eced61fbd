//! reactive-mdp - offline-solved reactive policies for a pickup-and-delivery vehicle.
//!
//! A vehicle drives between cities; at each city it may be offered a task to
//! some destination. The crate models this as a Markov decision process,
//! solves it once by value iteration, and serves the resulting policy through
//! an O(1) lookup at each decision point.
//!
//! Pipeline: [`topology::Topology`] + [`distribution::TaskDistribution`] →
//! [`mdp::StateSpaceBuilder`] → [`solver::ValueIteration`] →
//! [`policy::PolicyIndex`]. [`agent::ReactiveAgent`] wires the steps together.

pub mod agent;
pub mod distribution;
pub mod mdp;
pub mod policy;
pub mod solver;
pub mod topology;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use agent::{AgentError, ReactiveAgent};
pub use policy::{Decision, PolicyError, PolicyIndex};
pub use solver::{SolveError, SolverConfig};
pub use types::{CityId, Kilometers, Pending};
