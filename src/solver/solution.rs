use crate::mdp::{Action, StateId, StateSpace};

/// Output of a converged value-iteration run.
///
/// A side table indexed by [`StateId`]: the state space it was computed from
/// is left untouched, so the same space can be re-solved under another
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub(crate) values: Vec<f64>,
    pub(crate) best: Vec<Option<usize>>,
    pub(crate) sweeps: usize,
    pub(crate) residual: f64,
    pub(crate) discount: f64,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Optimal discounted value of a state.
    pub fn value(&self, id: StateId) -> Option<f64> {
        self.values.get(id.index()).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Position of the optimal action within the state's action list;
    /// `None` for states without actions.
    pub fn best_action_index(&self, id: StateId) -> Option<usize> {
        self.best.get(id.index()).copied().flatten()
    }

    /// The optimal action itself, resolved against `space`.
    pub fn best_action<'s>(&self, space: &'s StateSpace, id: StateId) -> Option<&'s Action> {
        let index = self.best_action_index(id)?;
        space.state(id)?.actions().get(index)
    }

    /// One-step lookahead value of taking `action_index` at `id` under the
    /// solved values: `reward + discount * E[V(next)]`.
    pub fn q_value(&self, space: &StateSpace, id: StateId, action_index: usize) -> Option<f64> {
        let action = space.state(id)?.actions().get(action_index)?;
        Some(action.reward() + self.discount * action.expected(&self.values))
    }

    /// Sweeps performed before the stopping rule held.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Largest value change in the final sweep.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }
}
