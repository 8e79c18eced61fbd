//! State-space enumeration and transition-model construction.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::space::StateSpace;
use super::state::{Action, ActionKind, State, StateId, StateKey, Transition};
use crate::distribution::TaskDistribution;
use crate::topology::Topology;
use crate::types::{CityId, Pending};

/// Builds the [`StateSpace`] for one vehicle.
///
/// For every ordered pair of cities `(c1, c2)` there is one state: a task to
/// `c2` waiting at `c1`, or no task when `c1 == c2`. Each state gets one move
/// per neighbour (in topology order) and, when a task is pending, a pickup
/// last. That order is what the solver's tie-break relies on.
pub struct StateSpaceBuilder<'a, T, D> {
    topology: &'a T,
    distribution: &'a D,
    cost_per_km: f64,
}

impl<'a, T, D> StateSpaceBuilder<'a, T, D>
where
    T: Topology,
    D: TaskDistribution,
{
    pub fn new(topology: &'a T, distribution: &'a D, cost_per_km: f64) -> Self {
        Self {
            topology,
            distribution,
            cost_per_km,
        }
    }

    pub fn build(&self) -> StateSpace {
        let cities = self.topology.cities();
        let mut states = Vec::with_capacity(cities.len() * cities.len());
        let mut index = HashMap::with_capacity(cities.len() * cities.len());
        let mut by_city: HashMap<CityId, Vec<StateId>> = HashMap::new();

        for &city in &cities {
            for &dest in &cities {
                let key = StateKey::new(city, Pending::at(city, Some(dest)));
                if index.contains_key(&key) {
                    continue;
                }
                let id = StateId(states.len());
                index.insert(key, id);
                by_city.entry(city).or_default().push(id);
                states.push(State {
                    id,
                    key,
                    label: self.state_label(key),
                    actions: Vec::new(),
                });
            }
        }

        // Every action arriving at the same city shares one table.
        let mut tables: HashMap<CityId, Arc<[Transition]>> = HashMap::new();
        let mut actions_by_state = Vec::with_capacity(states.len());
        for state in &states {
            let mut actions = Vec::new();
            for to in self.topology.neighbors(state.key.city) {
                actions.push(self.action(
                    state,
                    ActionKind::Move { to },
                    &states,
                    &by_city,
                    &mut tables,
                ));
            }
            if let Pending::Task(destination) = state.key.pending {
                actions.push(self.action(
                    state,
                    ActionKind::Pickup { destination },
                    &states,
                    &by_city,
                    &mut tables,
                ));
            }
            actions_by_state.push(actions);
        }
        for (state, actions) in states.iter_mut().zip(actions_by_state) {
            state.actions = actions;
        }

        let space = StateSpace {
            states,
            index,
            cities,
        };
        debug!(
            cities = space.cities.len(),
            states = space.len(),
            actions = space.action_count(),
            "built state space"
        );
        space
    }

    fn action(
        &self,
        state: &State,
        kind: ActionKind,
        states: &[State],
        by_city: &HashMap<CityId, Vec<StateId>>,
        tables: &mut HashMap<CityId, Arc<[Transition]>>,
    ) -> Action {
        let from = state.key.city;
        let arrival = kind.arrival();
        // A free vehicle pays nothing even to unreachable cities; avoid 0 * inf.
        let travel = if self.cost_per_km == 0.0 {
            0.0
        } else {
            self.cost_per_km * self.topology.distance(from, arrival).value()
        };
        let (label, reward) = match kind {
            ActionKind::Move { to } => (
                format!("Move to neighbor city {}", self.name(to)),
                -travel,
            ),
            ActionKind::Pickup { destination } => (
                format!("Accept task to {}", self.name(destination)),
                self.distribution.reward(from, destination) - travel,
            ),
        };
        let transitions = tables
            .entry(arrival)
            .or_insert_with(|| self.arrival_table(arrival, states, by_city))
            .clone();
        Action {
            kind,
            label,
            reward,
            transitions,
        }
    }

    /// Successor distribution on arriving at `city`: each state located
    /// there, weighted by the chance of being offered its pending task.
    fn arrival_table(
        &self,
        city: CityId,
        states: &[State],
        by_city: &HashMap<CityId, Vec<StateId>>,
    ) -> Arc<[Transition]> {
        by_city
            .get(&city)
            .map(|ids| {
                ids.iter()
                    .map(|&id| Transition {
                        state: id,
                        probability: self
                            .distribution
                            .probability(city, states[id.0].key.pending),
                    })
                    .collect()
            })
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    fn state_label(&self, key: StateKey) -> String {
        match key.pending {
            Pending::Task(dest) => {
                format!("Task to {} at {}", self.name(dest), self.name(key.city))
            }
            Pending::NoTask => format!("No task at {}", self.name(key.city)),
        }
    }

    fn name(&self, city: CityId) -> String {
        self.topology
            .name(city)
            .map(str::to_owned)
            .unwrap_or_else(|| city.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::TaskTable;
    use crate::topology::CityGraph;

    /// A - B - C line, 10 km and 20 km roads, 60% task chance everywhere.
    fn line() -> (CityGraph, TaskTable, [CityId; 3]) {
        let mut g = CityGraph::new();
        let a = g.add_city("A").unwrap();
        let b = g.add_city("B").unwrap();
        let c = g.add_city("C").unwrap();
        g.connect(a, b, 10.0).unwrap();
        g.connect(b, c, 20.0).unwrap();
        let table = TaskTable::uniform(&g, 0.6, 3.0);
        (g, table, [a, b, c])
    }

    #[test]
    fn one_state_per_city_pair() {
        let (g, table, [a, b, c]) = line();
        let space = StateSpaceBuilder::new(&g, &table, 1.0).build();
        assert_eq!(space.len(), 9);
        for city in [a, b, c] {
            assert!(space.lookup(city, Pending::NoTask).is_some());
        }
        assert!(space.lookup(a, Pending::Task(a)).is_none());
        for (i, state) in space.states().iter().enumerate() {
            assert_eq!(state.id().index(), i);
            assert_eq!(space.lookup(state.city(), state.pending()), Some(state.id()));
        }
    }

    #[test]
    fn labels_name_cities() {
        let (g, table, [a, _, c]) = line();
        let space = StateSpaceBuilder::new(&g, &table, 1.0).build();
        let with_task = space.lookup(a, Pending::Task(c)).unwrap();
        let empty = space.lookup(c, Pending::NoTask).unwrap();
        assert_eq!(space.states()[with_task.index()].label(), "Task to C at A");
        assert_eq!(space.states()[empty.index()].label(), "No task at C");
    }

    #[test]
    fn moves_come_first_and_pickup_last() {
        let (g, table, [a, b, c]) = line();
        let space = StateSpaceBuilder::new(&g, &table, 2.0).build();
        let id = space.lookup(b, Pending::Task(c)).unwrap();
        let kinds: Vec<ActionKind> = space.states()[id.index()]
            .actions()
            .iter()
            .map(|a| a.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::Move { to: a },
                ActionKind::Move { to: c },
                ActionKind::Pickup { destination: c },
            ]
        );
    }

    #[test]
    fn no_task_states_never_offer_pickup() {
        let (g, table, _) = line();
        let space = StateSpaceBuilder::new(&g, &table, 1.0).build();
        for state in space.states().iter().filter(|s| !s.has_task()) {
            assert!(state.actions().iter().all(|a| !a.is_pickup()));
        }
    }

    #[test]
    fn rewards_charge_travel_cost() {
        let (g, table, [a, b, c]) = line();
        let space = StateSpaceBuilder::new(&g, &table, 2.0).build();
        let id = space.lookup(a, Pending::Task(c)).unwrap();
        let actions = space.states()[id.index()].actions();
        // Move A->B: 10 km at 2/km.
        assert_eq!(actions[0].kind(), ActionKind::Move { to: b });
        assert_eq!(actions[0].reward(), -20.0);
        // Pickup A->C: 30 km shortest path, reward 3/km, cost 2/km.
        assert!(actions[1].is_pickup());
        assert!((actions[1].reward() - (90.0 - 60.0)).abs() < 1e-9);
        assert_eq!(actions[1].label(), "Accept task to C");
    }

    #[test]
    fn transitions_only_reach_arrival_city_and_sum_to_one() {
        let (g, table, _) = line();
        let space = StateSpaceBuilder::new(&g, &table, 1.0).build();
        for state in space.states() {
            for action in state.actions() {
                assert!((action.total_probability() - 1.0).abs() < 1e-9);
                for other in space.states() {
                    let p = action.probability(other.id());
                    assert!((0.0..=1.0).contains(&p));
                    if other.city() != action.arrival() {
                        assert_eq!(p, 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn isolated_city_without_task_has_no_actions() {
        let (mut g, _, _) = line();
        let island = g.add_city("Island").unwrap();
        let table = TaskTable::uniform(&g, 0.6, 3.0);
        let space = StateSpaceBuilder::new(&g, &table, 1.0).build();
        assert_eq!(space.len(), 16);
        let id = space.lookup(island, Pending::NoTask).unwrap();
        assert!(space.states()[id.index()].actions().is_empty());
    }
}
