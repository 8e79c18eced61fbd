//! Table-backed task distribution.

use std::collections::HashMap;

use super::TaskDistribution;
use crate::topology::Topology;
use crate::types::{CityId, Pending};

/// Explicit probability and reward entries.
///
/// Entries that were never set read as `0.0`, so a city without a
/// [`Pending::NoTask`] entry reports a zero chance of an empty arrival.
/// Use [`fill_no_task`](Self::fill_no_task) to complete each city's
/// distribution with the remaining mass.
#[derive(Debug, Clone, Default)]
pub struct TaskTable {
    probabilities: HashMap<(CityId, Pending), f64>,
    rewards: HashMap<(CityId, CityId), f64>,
}

impl TaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a distribution where each city offers a task with probability
    /// `task_probability`, spread evenly over every other city, and each task
    /// pays `reward_per_km` times the travel distance.
    ///
    /// Destinations at infinite distance (disconnected cities) are skipped.
    pub fn uniform<T: Topology>(topology: &T, task_probability: f64, reward_per_km: f64) -> Self {
        let cities = topology.cities();
        let mut table = Self::new();
        for &from in &cities {
            let reachable: Vec<CityId> = cities
                .iter()
                .copied()
                .filter(|&to| to != from && topology.distance(from, to).value().is_finite())
                .collect();
            if !reachable.is_empty() {
                let share = task_probability / reachable.len() as f64;
                for &to in &reachable {
                    table.set_probability(from, Pending::Task(to), share);
                    table.set_reward(from, to, reward_per_km * topology.distance(from, to).value());
                }
            }
        }
        table.fill_no_task(&cities);
        table
    }

    /// Sets the probability of being offered `pending` at `from`.
    pub fn set_probability(
        &mut self,
        from: CityId,
        pending: Pending,
        probability: f64,
    ) -> &mut Self {
        self.probabilities.insert((from, pending), probability);
        self
    }

    /// Sets the reward for a task from `from` to `to`.
    pub fn set_reward(&mut self, from: CityId, to: CityId, reward: f64) -> &mut Self {
        self.rewards.insert((from, to), reward);
        self
    }

    /// Sets each city's no-task probability to whatever mass its task entries
    /// leave over (clamped at zero).
    pub fn fill_no_task(&mut self, cities: &[CityId]) -> &mut Self {
        for &from in cities {
            let tasks: f64 = cities
                .iter()
                .filter(|&&to| to != from)
                .map(|&to| self.probability(from, Pending::Task(to)))
                .sum();
            self.probabilities
                .insert((from, Pending::NoTask), (1.0 - tasks).max(0.0));
        }
        self
    }

    /// Sum of the probabilities of every outcome at `from` over `cities`.
    pub fn total_probability(&self, from: CityId, cities: &[CityId]) -> f64 {
        cities
            .iter()
            .map(|&to| self.probability(from, Pending::at(from, Some(to))))
            .sum()
    }
}

impl TaskDistribution for TaskTable {
    fn probability(&self, from: CityId, pending: Pending) -> f64 {
        self.probabilities
            .get(&(from, pending))
            .copied()
            .unwrap_or(0.0)
    }

    fn reward(&self, from: CityId, to: CityId) -> f64 {
        self.rewards.get(&(from, to)).copied().unwrap_or(0.0)
    }
}
