use std::collections::HashMap;

use super::decision::Decision;
use super::error::PolicyError;
use crate::mdp::{StateKey, StateSpace};
use crate::solver::Solution;
use crate::types::{CityId, Pending};

/// Solved data for one state, detached from the state space.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyEntry {
    pub key: StateKey,
    /// State description, e.g. `"No task at Geneve"`.
    pub label: String,
    pub value: f64,
    pub decision: Decision,
    /// Description of the chosen action, absent for action-less states.
    pub action_label: Option<String>,
}

/// Immutable decision table for a solved state space.
///
/// Built once from a [`StateSpace`] and its [`Solution`]; owns its data so it
/// can outlive both and be shared across threads. Lookups hash the
/// `(city, pending)` key, there is no scan.
///
/// # Example
///
/// ```ignore
/// let space = StateSpaceBuilder::new(&graph, &table, 5.0).build();
/// let solution = ValueIteration::default().solve(&space)?;
/// let policy = PolicyIndex::new(&space, &solution);
/// match policy.decide(here, offered_task)? {
///     Decision::AcceptTask => { /* pick up */ }
///     Decision::MoveTo(next) => { /* drive to next */ }
///     Decision::NoFeasibleAction => { /* stay put */ }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PolicyIndex {
    entries: Vec<PolicyEntry>,
    by_key: HashMap<StateKey, usize>,
    discount: f64,
}

impl PolicyIndex {
    pub fn new(space: &StateSpace, solution: &Solution) -> Self {
        let mut entries = Vec::with_capacity(space.len());
        let mut by_key = HashMap::with_capacity(space.len());
        for state in space.states() {
            let action = solution.best_action(space, state.id());
            by_key.insert(state.key(), entries.len());
            entries.push(PolicyEntry {
                key: state.key(),
                label: state.label().to_string(),
                value: solution.value(state.id()).unwrap_or(0.0),
                decision: action
                    .map(|a| Decision::from(a.kind()))
                    .unwrap_or(Decision::NoFeasibleAction),
                action_label: action.map(|a| a.label().to_string()),
            });
        }
        Self {
            entries,
            by_key,
            discount: solution.discount(),
        }
    }

    /// Returns the optimal decision at `city` when offered a task to
    /// `task_destination` (or nothing).
    ///
    /// A task destined for `city` itself is treated as no task.
    ///
    /// # Errors
    ///
    /// - `UnknownState` if the key is not part of the solved space
    pub fn decide(
        &self,
        city: CityId,
        task_destination: Option<CityId>,
    ) -> Result<Decision, PolicyError> {
        self.entry(city, Pending::at(city, task_destination))
            .map(|e| e.decision)
    }

    /// Optimal discounted value of a state.
    pub fn value(&self, city: CityId, pending: Pending) -> Result<f64, PolicyError> {
        self.entry(city, pending).map(|e| e.value)
    }

    pub fn entry(&self, city: CityId, pending: Pending) -> Result<&PolicyEntry, PolicyError> {
        self.by_key
            .get(&StateKey::new(city, pending))
            .map(|&i| &self.entries[i])
            .ok_or(PolicyError::UnknownState { city, pending })
    }

    /// Entries in state-space order.
    pub fn iter(&self) -> impl Iterator<Item = &PolicyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discount factor the policy was solved for.
    pub fn discount(&self) -> f64 {
        self.discount
    }
}
