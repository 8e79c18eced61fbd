//! A small ring of cities with uniform task arrivals, solved under two
//! discount factors to show how patience changes the policy.
//!
//! Run with: `cargo run --example ring_network`

use reactive_mdp::distribution::TaskTable;
use reactive_mdp::topology::{CityGraph, Topology};
use reactive_mdp::{Decision, ReactiveAgent, SolverConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let names = ["Lausanne", "Fribourg", "Bern", "Neuchatel", "Yverdon"];
    let roads = [62.0, 34.0, 50.0, 38.0, 37.0];

    let mut graph = CityGraph::new();
    let cities = names
        .iter()
        .map(|n| graph.add_city(*n))
        .collect::<Result<Vec<_>, _>>()?;
    for (i, km) in roads.iter().enumerate() {
        graph.connect(cities[i], cities[(i + 1) % cities.len()], *km)?;
    }

    let table = TaskTable::uniform(&graph, 0.7, 1.5);
    let myopic = ReactiveAgent::setup(&graph, &table, 1.0, SolverConfig::default())?;
    let patient = myopic.resolve(SolverConfig::default().with_discount(0.95))?;

    println!(
        "{} states, {} actions",
        myopic.space().len(),
        myopic.space().action_count()
    );
    println!("\n{:<12}{:<12}{:<22}{:<22}", "at", "task to", "gamma 0.5", "gamma 0.95");
    for &from in &cities {
        for &to in &cities {
            let task = (from != to).then_some(to);
            let describe = |d: Decision| match d {
                Decision::MoveTo(c) => format!("move to {}", graph.name(c).unwrap_or("?")),
                other => other.to_string(),
            };
            println!(
                "{:<12}{:<12}{:<22}{:<22}",
                graph.name(from).unwrap_or("?"),
                task.and_then(|t| graph.name(t)).unwrap_or("-"),
                describe(myopic.act(from, task)?),
                describe(patient.act(from, task)?),
            );
        }
    }
    Ok(())
}
