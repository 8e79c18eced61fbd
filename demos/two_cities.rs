//! The two-city scenario: a lucrative task always waits at A, nothing at B.
//!
//! Run with: `RUST_LOG=debug cargo run --example two_cities`

use reactive_mdp::distribution::TaskTable;
use reactive_mdp::topology::CityGraph;
use reactive_mdp::{Pending, ReactiveAgent, SolverConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut graph = CityGraph::new();
    let a = graph.add_city("A")?;
    let b = graph.add_city("B")?;
    graph.connect(a, b, 10.0)?;

    let mut table = TaskTable::new();
    table
        .set_probability(a, Pending::Task(b), 1.0)
        .set_probability(b, Pending::NoTask, 1.0)
        .set_reward(a, b, 50.0);

    let agent = ReactiveAgent::setup(&graph, &table, 1.0, SolverConfig::default())?;

    println!("=== Solved policy (discount {}) ===", agent.policy().discount());
    for entry in agent.policy().iter() {
        println!(
            "{:<20} value {:>8.3}  ->  {}",
            entry.label,
            entry.value,
            entry.action_label.as_deref().unwrap_or("(nothing to do)")
        );
    }

    println!("\nAt A with a task to B: {}", agent.act(a, Some(b))?);
    println!("At B with nothing on offer: {}", agent.act(b, None)?);
    Ok(())
}
