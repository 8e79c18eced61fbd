//! City topology: the road network the vehicle drives on.
//!
//! The [`Topology`] trait is the read-only view the state-space builder
//! consumes. [`CityGraph`] is a petgraph-backed implementation suitable for
//! tests, demos and hosts without their own network model.

pub mod error;
pub mod graph;

pub use error::TopologyError;
pub use graph::CityGraph;

use crate::types::{CityId, Kilometers};

/// Read-only view of a network of cities.
///
/// Implementations must be deterministic: `cities` and `neighbors` are
/// enumerated by the state-space builder, and their order decides how ties
/// between equally good actions are broken.
pub trait Topology {
    /// All cities, in a stable order.
    fn cities(&self) -> Vec<CityId>;

    /// Human-readable name of a city, if it belongs to this topology.
    fn name(&self, city: CityId) -> Option<&str>;

    /// Cities directly reachable from `city`, in a stable order.
    fn neighbors(&self, city: CityId) -> Vec<CityId>;

    /// Travel distance between two cities.
    ///
    /// Must be symmetric and positive for distinct cities.
    fn distance(&self, from: CityId, to: CityId) -> Kilometers;

    /// Number of cities in the topology.
    fn len(&self) -> usize {
        self.cities().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
