use std::collections::HashMap;

use super::state::{State, StateId, StateKey};
use crate::types::{CityId, Pending};

/// The complete, immutable state/action graph.
///
/// # Invariants
///
/// - One state per `(city, pending)` key: `len() == cities().len()²`
/// - `states()[i].id() == StateId(i)`
/// - Lookups by key go through a hash index, never a scan
#[derive(Debug, Clone)]
pub struct StateSpace {
    pub(crate) states: Vec<State>,
    pub(crate) index: HashMap<StateKey, StateId>,
    pub(crate) cities: Vec<CityId>,
}

impl StateSpace {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All states in enumeration order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.0)
    }

    /// Finds the state for a city and pending task.
    pub fn lookup(&self, city: CityId, pending: Pending) -> Option<StateId> {
        self.index.get(&StateKey::new(city, pending)).copied()
    }

    /// Cities the space was enumerated over, in enumeration order.
    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    /// Total number of actions across all states.
    pub fn action_count(&self) -> usize {
        self.states.iter().map(|s| s.actions.len()).sum()
    }

    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.states.len()).map(StateId)
    }
}
