//! Task arrival model: where tasks appear, where they go, what they pay.

pub mod table;

pub use table::TaskTable;

use crate::types::{CityId, Pending};

/// Probability and reward model for tasks offered to the vehicle.
///
/// # Contract
///
/// For a fixed `from` city, the probabilities over every destination plus
/// [`Pending::NoTask`] are expected to sum to 1. This is not validated; a
/// malformed distribution yields transition tables that do not sum to 1.
pub trait TaskDistribution {
    /// Probability that, on arriving at `from`, the vehicle is offered `pending`.
    fn probability(&self, from: CityId, pending: Pending) -> f64;

    /// Monetary reward for delivering a task from `from` to `to`.
    fn reward(&self, from: CityId, to: CityId) -> f64;
}

