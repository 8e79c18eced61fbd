//! Markov decision process for a single reactive vehicle.
//!
//! A state is the vehicle's city plus the task (if any) it is being offered
//! there. Actions either move the vehicle to a neighbouring city or accept
//! the task; either way the next state is drawn from the task distribution
//! at the arrival city.
//!
//! # Module Structure
//!
//! - [`state`] - states, actions and transition tables
//! - [`space`] - the immutable state space with its key index
//! - [`builder`] - enumeration from a topology and a task distribution

pub mod builder;
pub mod space;
pub mod state;

pub use builder::StateSpaceBuilder;
pub use space::StateSpace;
pub use state::{Action, ActionKind, State, StateId, StateKey, Transition};
