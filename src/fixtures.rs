//! Shared networks for unit tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distribution::TaskTable;
use crate::topology::{CityGraph, Topology};
use crate::types::{CityId, Pending};

/// A and B, 10 km apart. A always offers a task to B worth 50; B never
/// offers anything.
pub(crate) fn two_cities() -> (CityGraph, TaskTable, CityId, CityId) {
    let mut graph = CityGraph::new();
    let a = graph.add_city("A").unwrap();
    let b = graph.add_city("B").unwrap();
    graph.connect(a, b, 10.0).unwrap();

    let mut table = TaskTable::new();
    table
        .set_probability(a, Pending::Task(b), 1.0)
        .set_probability(a, Pending::NoTask, 0.0)
        .set_probability(b, Pending::Task(a), 0.0)
        .set_probability(b, Pending::NoTask, 1.0)
        .set_reward(a, b, 50.0);
    (graph, table, a, b)
}

/// Ring of `n` cities with random chords, road lengths, task mix and
/// per-kilometer rates. Every city's distribution sums to 1.
pub(crate) fn random_network(n: usize, seed: u64) -> (CityGraph, TaskTable) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = CityGraph::new();
    let cities: Vec<CityId> = (0..n)
        .map(|i| graph.add_city(format!("City{}", i)).unwrap())
        .collect();

    for i in 0..n {
        let next = (i + 1) % n;
        if next != i {
            graph
                .connect(cities[i], cities[next], rng.gen_range(5.0..50.0))
                .unwrap();
        }
    }
    for i in 0..n {
        for j in (i + 2)..n {
            if rng.gen_bool(0.3) {
                graph
                    .connect(cities[i], cities[j], rng.gen_range(5.0..80.0))
                    .unwrap();
            }
        }
    }

    let mut table = TaskTable::new();
    for &from in &cities {
        let task_mass: f64 = rng.gen_range(0.2..0.9);
        let weights: Vec<f64> = cities.iter().map(|_| rng.gen_range(0.1..1.0)).collect();
        let total: f64 = cities
            .iter()
            .zip(&weights)
            .filter(|(to, _)| **to != from)
            .map(|(_, w)| w)
            .sum();
        for (&to, w) in cities.iter().zip(&weights) {
            if to == from {
                continue;
            }
            let rate = rng.gen_range(1.0..4.0);
            table
                .set_probability(from, Pending::Task(to), task_mass * w / total)
                .set_reward(from, to, rate * graph.distance(from, to).value());
        }
    }
    table.fill_no_task(&cities);
    (graph, table)
}
