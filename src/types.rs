//! Core identity types shared by the topology, distribution and MDP layers.

use std::fmt;

use qtty::{Kilometer, Quantity};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Road distance between two cities.
pub type Kilometers = Quantity<Kilometer>;

/// Opaque identity of a city within a [`Topology`](crate::topology::Topology).
///
/// Ids are dense indices assigned by the topology provider; ordering follows
/// insertion order, which is what the state-space builder enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CityId(pub(crate) usize);

impl CityId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the dense index of this city.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city#{}", self.0)
    }
}

/// The task waiting at the vehicle's current city, if any.
///
/// A task whose destination is the current city is meaningless and collapses
/// to [`Pending::NoTask`]; use [`Pending::at`] to build values from raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Pending {
    /// A delivery task to the given city is on offer.
    Task(CityId),
    /// No task was offered.
    NoTask,
}

impl Pending {
    /// Normalizes an optional task destination observed at `city`.
    pub fn at(city: CityId, destination: Option<CityId>) -> Self {
        match destination {
            Some(dest) if dest != city => Pending::Task(dest),
            _ => Pending::NoTask,
        }
    }

    /// Returns the task destination, if a task is pending.
    pub fn destination(&self) -> Option<CityId> {
        match self {
            Pending::Task(dest) => Some(*dest),
            Pending::NoTask => None,
        }
    }

    pub fn has_task(&self) -> bool {
        matches!(self, Pending::Task(_))
    }
}

impl fmt::Display for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pending::Task(dest) => write!(f, "task to {}", dest),
            Pending::NoTask => write!(f, "no task"),
        }
    }
}
