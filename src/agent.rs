//! Reactive agent: the setup/act surface a host simulation drives.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, trace};

use crate::distribution::TaskDistribution;
use crate::mdp::{StateSpace, StateSpaceBuilder};
use crate::policy::{Decision, PolicyError, PolicyIndex};
use crate::solver::{SolveError, SolverConfig, ValueIteration};
use crate::topology::Topology;
use crate::types::{CityId, Pending};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgentError {
    #[error("Cost per km must be non-negative and finite, got {0}")]
    InvalidCost(f64),

    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// A vehicle that reacts to whatever task it is offered, following a policy
/// computed once at setup.
///
/// The agent is immutable after [`setup`](Self::setup). Re-solving with a new
/// configuration returns a fresh agent; policies handed out earlier keep
/// answering as before.
#[derive(Debug, Clone)]
pub struct ReactiveAgent {
    space: Arc<StateSpace>,
    policy: Arc<PolicyIndex>,
    config: SolverConfig,
    cost_per_km: f64,
}

impl ReactiveAgent {
    /// Builds the state space, solves it and indexes the resulting policy.
    ///
    /// # Errors
    ///
    /// - `InvalidCost` for a negative or non-finite `cost_per_km`
    /// - `Solve` if the configuration is invalid or value iteration does not
    ///   converge
    pub fn setup<T, D>(
        topology: &T,
        distribution: &D,
        cost_per_km: f64,
        config: SolverConfig,
    ) -> Result<Self, AgentError>
    where
        T: Topology,
        D: TaskDistribution,
    {
        if !(cost_per_km.is_finite() && cost_per_km >= 0.0) {
            return Err(AgentError::InvalidCost(cost_per_km));
        }
        let space = StateSpaceBuilder::new(topology, distribution, cost_per_km).build();
        Self::solve(Arc::new(space), cost_per_km, config)
    }

    /// Solves the same state space again under `config`.
    pub fn resolve(&self, config: SolverConfig) -> Result<Self, AgentError> {
        Self::solve(Arc::clone(&self.space), self.cost_per_km, config)
    }

    fn solve(
        space: Arc<StateSpace>,
        cost_per_km: f64,
        config: SolverConfig,
    ) -> Result<Self, AgentError> {
        let solution = ValueIteration::new(config.clone()).solve(&space)?;
        let policy = PolicyIndex::new(&space, &solution);
        for entry in policy.iter() {
            trace!(
                state = %entry.label,
                action = entry.action_label.as_deref().unwrap_or("none"),
                value = entry.value,
                "best action"
            );
        }
        debug!(
            states = policy.len(),
            sweeps = solution.sweeps(),
            discount = config.discount,
            "reactive agent ready"
        );
        Ok(Self {
            space,
            policy: Arc::new(policy),
            config,
            cost_per_km,
        })
    }

    /// Decides what to do at `city` when offered a task to `task_destination`.
    pub fn act(
        &self,
        city: CityId,
        task_destination: Option<CityId>,
    ) -> Result<Decision, PolicyError> {
        let entry = self
            .policy
            .entry(city, Pending::at(city, task_destination))?;
        debug!(
            state = %entry.label,
            action = entry.action_label.as_deref().unwrap_or("none"),
            "decision"
        );
        Ok(entry.decision)
    }

    /// Shared handle to the solved policy.
    pub fn policy(&self) -> Arc<PolicyIndex> {
        Arc::clone(&self.policy)
    }

    pub fn space(&self) -> &StateSpace {
        &self.space
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn cost_per_km(&self) -> f64 {
        self.cost_per_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{random_network, two_cities};

    #[test]
    fn setup_and_act_on_worked_scenario() {
        let (g, table, a, b) = two_cities();
        let agent = ReactiveAgent::setup(&g, &table, 1.0, SolverConfig::default()).unwrap();
        assert_eq!(agent.act(a, Some(b)), Ok(Decision::AcceptTask));
        assert_eq!(agent.act(b, None), Ok(Decision::MoveTo(a)));
        assert_eq!(agent.space().len(), 4);
        assert_eq!(agent.cost_per_km(), 1.0);
    }

    #[test]
    fn invalid_cost_rejected() {
        let (g, table, _, _) = two_cities();
        let result = ReactiveAgent::setup(&g, &table, -1.0, SolverConfig::default());
        assert_eq!(result.unwrap_err(), AgentError::InvalidCost(-1.0));
    }

    #[test]
    fn solver_errors_propagate() {
        let (g, table) = random_network(5, 2);
        let config = SolverConfig::default().with_max_sweeps(1);
        let result = ReactiveAgent::setup(&g, &table, 1.0, config);
        assert!(matches!(
            result,
            Err(AgentError::Solve(SolveError::ConvergenceFailure { .. }))
        ));
    }

    #[test]
    fn resolve_returns_independent_agent() {
        let (g, table) = random_network(5, 6);
        let agent = ReactiveAgent::setup(&g, &table, 1.0, SolverConfig::default()).unwrap();
        let held = agent.policy();

        let patient = agent
            .resolve(SolverConfig::default().with_discount(0.95))
            .unwrap();
        assert_eq!(held.discount(), 0.5);
        assert_eq!(patient.policy().discount(), 0.95);
        assert_eq!(agent.policy().discount(), 0.5);
        assert_eq!(patient.config().discount, 0.95);
    }

    #[test]
    fn unknown_city_surfaces_policy_error() {
        let (g, table, _, _) = two_cities();
        let agent = ReactiveAgent::setup(&g, &table, 1.0, SolverConfig::default()).unwrap();
        assert!(matches!(
            agent.act(CityId::new(9), None),
            Err(PolicyError::UnknownState { .. })
        ));
    }
}
