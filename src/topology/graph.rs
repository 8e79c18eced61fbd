use super::error::TopologyError;
use super::Topology;
use crate::types::{CityId, Kilometers};
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use qtty::Quantity;
use std::collections::HashMap;

/// Undirected road network with weighted edges.
///
/// # Invariants
///
/// - City ids are dense node indices; cities are never removed
/// - Road lengths are positive and finite
/// - [`distance`](Topology::distance) is the shortest-path length, so cities
///   need not be adjacent to have a finite distance
///
/// # Example
///
/// ```ignore
/// let mut graph = CityGraph::new();
/// let a = graph.add_city("Lausanne")?;
/// let b = graph.add_city("Geneve")?;
/// graph.connect(a, b, 62.0)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CityGraph {
    graph: UnGraph<String, f64>,
    by_name: HashMap<String, CityId>,
}

impl CityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a city and returns its id.
    ///
    /// # Errors
    ///
    /// - `DuplicateName` if a city with this name already exists
    pub fn add_city(&mut self, name: impl Into<String>) -> Result<CityId, TopologyError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TopologyError::DuplicateName(name));
        }
        let node = self.graph.add_node(name.clone());
        let id = CityId::new(node.index());
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Adds (or replaces) a road of `km` kilometers between two cities.
    ///
    /// # Errors
    ///
    /// - `UnknownCity` if either city does not exist
    /// - `SelfLoop` if both ends are the same city
    /// - `InvalidDistance` if `km` is not positive and finite
    pub fn connect(&mut self, a: CityId, b: CityId, km: f64) -> Result<(), TopologyError> {
        let na = self.node(a)?;
        let nb = self.node(b)?;
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
        if !km.is_finite() || km <= 0.0 {
            return Err(TopologyError::InvalidDistance(km));
        }
        self.graph.update_edge(na, nb, km);
        Ok(())
    }

    /// Returns the id of the city with the given name.
    pub fn city_by_name(&self, name: &str) -> Option<CityId> {
        self.by_name.get(name).copied()
    }

    /// Returns the length of the direct road between two cities, if any.
    pub fn road(&self, a: CityId, b: CityId) -> Option<f64> {
        let (na, nb) = (self.node(a).ok()?, self.node(b).ok()?);
        self.graph
            .find_edge(na, nb)
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    pub fn road_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node(&self, city: CityId) -> Result<NodeIndex, TopologyError> {
        let node = NodeIndex::new(city.index());
        if self.graph.node_weight(node).is_some() {
            Ok(node)
        } else {
            Err(TopologyError::UnknownCity(city))
        }
    }
}

impl Topology for CityGraph {
    fn cities(&self) -> Vec<CityId> {
        self.graph
            .node_indices()
            .map(|n| CityId::new(n.index()))
            .collect()
    }

    fn name(&self, city: CityId) -> Option<&str> {
        self.graph
            .node_weight(NodeIndex::new(city.index()))
            .map(|s| s.as_str())
    }

    fn neighbors(&self, city: CityId) -> Vec<CityId> {
        let Ok(node) = self.node(city) else {
            return Vec::new();
        };
        // petgraph yields neighbours in reverse insertion order; sort for a
        // stable enumeration independent of how roads were added.
        let mut out: Vec<CityId> = self
            .graph
            .edges(node)
            .map(|e| {
                let other = if e.source() == node {
                    e.target()
                } else {
                    e.source()
                };
                CityId::new(other.index())
            })
            .collect();
        out.sort();
        out.dedup();
        out
    }

    fn distance(&self, from: CityId, to: CityId) -> Kilometers {
        if from == to {
            return Quantity::new(0.0);
        }
        let (Ok(start), Ok(goal)) = (self.node(from), self.node(to)) else {
            return Quantity::new(f64::INFINITY);
        };
        let costs = dijkstra(&self.graph, start, Some(goal), |e| *e.weight());
        Quantity::new(costs.get(&goal).copied().unwrap_or(f64::INFINITY))
    }

    fn len(&self) -> usize {
        self.graph.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (CityGraph, CityId, CityId, CityId) {
        let mut g = CityGraph::new();
        let a = g.add_city("A").unwrap();
        let b = g.add_city("B").unwrap();
        let c = g.add_city("C").unwrap();
        g.connect(a, b, 10.0).unwrap();
        g.connect(b, c, 5.0).unwrap();
        g.connect(a, c, 40.0).unwrap();
        (g, a, b, c)
    }

    #[test]
    fn cities_are_enumerated_in_insertion_order() {
        let (g, a, b, c) = triangle();
        assert_eq!(g.cities(), vec![a, b, c]);
        assert_eq!(g.len(), 3);
        assert_eq!(g.name(b), Some("B"));
        assert_eq!(g.city_by_name("C"), Some(c));
    }

    #[test]
    fn neighbors_are_sorted() {
        let (g, a, b, c) = triangle();
        assert_eq!(g.neighbors(a), vec![b, c]);
        assert_eq!(g.neighbors(c), vec![a, b]);
    }

    #[test]
    fn distance_is_shortest_path() {
        let (g, a, _b, c) = triangle();
        // A-B-C (15) beats the direct A-C road (40).
        assert_eq!(g.distance(a, c).value(), 15.0);
        assert_eq!(g.distance(c, a).value(), 15.0);
        assert_eq!(g.road(a, c), Some(40.0));
    }

    #[test]
    fn distance_to_self_is_zero() {
        let (g, a, _, _) = triangle();
        assert_eq!(g.distance(a, a).value(), 0.0);
    }

    #[test]
    fn disconnected_cities_are_infinitely_far() {
        let (mut g, a, _, _) = triangle();
        let island = g.add_city("Island").unwrap();
        assert!(g.distance(a, island).value().is_infinite());
        assert!(g.neighbors(island).is_empty());
    }

    #[test]
    fn reconnecting_replaces_the_road() {
        let (mut g, a, b, _) = triangle();
        g.connect(b, a, 12.0).unwrap();
        assert_eq!(g.road(a, b), Some(12.0));
        assert_eq!(g.road_count(), 3);
    }

    #[test]
    fn duplicate_name_rejected() {
        let (mut g, _, _, _) = triangle();
        assert_eq!(
            g.add_city("A"),
            Err(TopologyError::DuplicateName("A".to_string()))
        );
    }

    #[test]
    fn invalid_roads_rejected() {
        let (mut g, a, b, _) = triangle();
        assert_eq!(g.connect(a, a, 1.0), Err(TopologyError::SelfLoop(a)));
        assert_eq!(g.connect(a, b, 0.0), Err(TopologyError::InvalidDistance(0.0)));
        assert!(matches!(
            g.connect(a, b, f64::NAN),
            Err(TopologyError::InvalidDistance(_))
        ));
        let ghost = CityId::new(99);
        assert_eq!(g.connect(a, ghost, 1.0), Err(TopologyError::UnknownCity(ghost)));
    }
}
