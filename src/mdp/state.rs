//! States and actions of the pickup-and-delivery MDP.

use std::fmt;
use std::sync::Arc;

use crate::types::{CityId, Pending};

/// Dense index of a state inside its [`StateSpace`](super::StateSpace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Identity of a state: where the vehicle is and what it is being offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub city: CityId,
    pub pending: Pending,
}

impl StateKey {
    pub fn new(city: CityId, pending: Pending) -> Self {
        Self { city, pending }
    }
}

/// "The vehicle is at `city` and is offered `pending`."
///
/// States are immutable once the state space is built. Solved values live in
/// a separate [`Solution`](crate::solver::Solution), never on the state.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) id: StateId,
    pub(crate) key: StateKey,
    pub(crate) label: String,
    pub(crate) actions: Vec<Action>,
}

impl State {
    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn key(&self) -> StateKey {
        self.key
    }

    pub fn city(&self) -> CityId {
        self.key.city
    }

    pub fn pending(&self) -> Pending {
        self.key.pending
    }

    pub fn has_task(&self) -> bool {
        self.key.pending.has_task()
    }

    /// Human-readable description, e.g. `"Task to Geneve at Lausanne"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Legal actions in enumeration order: moves by neighbour, then pickup.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

/// What an action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Drive empty to a neighbouring city.
    Move { to: CityId },
    /// Accept the pending task and deliver it.
    Pickup { destination: CityId },
}

impl ActionKind {
    /// City the vehicle ends up in after taking this action.
    pub fn arrival(&self) -> CityId {
        match self {
            ActionKind::Move { to } => *to,
            ActionKind::Pickup { destination } => *destination,
        }
    }
}

/// Probability of landing in `state` after an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: StateId,
    pub probability: f64,
}

/// A legal choice at a state, with its immediate reward and the
/// distribution over successor states.
///
/// The transition table only lists states located at the arrival city,
/// sorted by [`StateId`]; every other state has probability 0. Tables are
/// shared between all actions arriving at the same city.
#[derive(Debug, Clone)]
pub struct Action {
    pub(crate) kind: ActionKind,
    pub(crate) label: String,
    pub(crate) reward: f64,
    pub(crate) transitions: Arc<[Transition]>,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Immediate reward: task reward (for pickups) minus travel cost.
    pub fn reward(&self) -> f64 {
        self.reward
    }

    pub fn arrival(&self) -> CityId {
        self.kind.arrival()
    }

    pub fn is_pickup(&self) -> bool {
        matches!(self.kind, ActionKind::Pickup { .. })
    }

    /// Non-trivial part of the transition table.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Probability of moving to `state`; 0 for states off the arrival city.
    pub fn probability(&self, state: StateId) -> f64 {
        self.transitions
            .binary_search_by_key(&state, |t| t.state)
            .map(|i| self.transitions[i].probability)
            .unwrap_or(0.0)
    }

    /// Sum of the transition table; 1 for a well-formed distribution.
    pub fn total_probability(&self) -> f64 {
        self.transitions.iter().map(|t| t.probability).sum()
    }

    /// Expected value of `values` over the successor distribution.
    ///
    /// Impossible successors are skipped so that an unreachable state with an
    /// infinite value cannot poison the sum with `0 * inf`.
    pub(crate) fn expected(&self, values: &[f64]) -> f64 {
        self.transitions
            .iter()
            .filter(|t| t.probability > 0.0)
            .map(|t| t.probability * values[t.state.0])
            .sum()
    }
}
