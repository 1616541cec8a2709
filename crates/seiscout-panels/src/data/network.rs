//! Network panel: connection graph and network statistics.

use rand::rngs::StdRng;
use rand::Rng;
use seiscout_core::{Bounded, RiskLevel};
use serde::Serialize;

use super::centered;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub label: &'static str,
    pub risk: RiskLevel,
    pub color: &'static str,
    pub connections: u32,
    pub volume: u64,
    pub radius: f64,
}

impl GraphNode {
    /// Whether `(x, y)` lies within the node's circle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl NetworkGraph {
    /// Node under the point `(x, y)`, if any. First match in node order wins.
    pub fn node_at(&self, x: f64, y: f64) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.contains(x, y))
    }

    pub fn node(&self, id: u32) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges whose endpoints both exist.
    pub fn resolved_edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode)> {
        self.edges
            .iter()
            .filter_map(|e| Some((self.node(e.from)?, self.node(e.to)?)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub total_connections: u32,
    pub direct_connections: u32,
    pub indirect_connections: u32,
    pub risk: RiskLevel,
    pub influence_score: Bounded,
    pub connection_strength: Bounded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkData {
    pub graph: NetworkGraph,
    pub stats: NetworkStats,
}

impl NetworkData {
    pub(crate) fn baseline(rng: &mut StdRng) -> Self {
        let node = |id, x, y, label, risk: RiskLevel, connections, volume, radius| GraphNode {
            id,
            x,
            y,
            label,
            risk,
            color: risk.node_color(),
            connections,
            volume,
            radius,
        };
        let nodes = vec![
            node(1, 200.0, 150.0, "Exchange", RiskLevel::Low, 45, 125_000, 20.0),
            node(2, 400.0, 100.0, "DeFi Protocol", RiskLevel::Low, 32, 89_000, 18.0),
            node(3, 300.0, 250.0, "Whale Wallet", RiskLevel::Medium, 12, 450_000, 25.0),
            node(4, 150.0, 300.0, "LP Pool", RiskLevel::Low, 28, 67_000, 16.0),
            node(5, 450.0, 280.0, "MEV Bot", RiskLevel::High, 8, 23_000, 14.0),
            node(6, 350.0, 50.0, "Validator", RiskLevel::Low, 15, 34_000, 12.0),
            node(7, 100.0, 200.0, "Bridge", RiskLevel::Medium, 22, 78_000, 19.0),
        ];
        let edges = [(1, 2), (1, 3), (2, 4), (3, 5), (2, 6), (1, 7), (4, 7), (3, 2)]
            .into_iter()
            .map(|(from, to)| GraphEdge { from, to })
            .collect();

        let direct = 23 + rng.gen_range(0..5);
        let indirect = 224 + rng.gen_range(0..20);
        Self {
            graph: NetworkGraph { nodes, edges },
            stats: NetworkStats {
                total_connections: direct + indirect,
                direct_connections: direct,
                indirect_connections: indirect,
                risk: RiskLevel::Low,
                influence_score: Bounded::percent(78.0 + centered(rng, 6.0)),
                connection_strength: Bounded::percent(87.0 + centered(rng, 6.0)),
            },
        }
    }

    pub(crate) fn tick(&mut self, rng: &mut StdRng) {
        self.stats.influence_score.nudge(centered(rng, 2.0));
        self.stats.connection_strength.nudge(centered(rng, 2.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn graph() -> NetworkGraph {
        NetworkData::baseline(&mut StdRng::seed_from_u64(4)).graph
    }

    #[test]
    fn test_node_at_hits_within_radius() {
        let graph = graph();
        assert_eq!(graph.node_at(200.0, 150.0).map(|n| n.id), Some(1));
        // Edge of the whale node (radius 25).
        assert_eq!(graph.node_at(325.0, 250.0).map(|n| n.id), Some(3));
        assert_eq!(graph.node_at(326.0, 250.0).map(|n| n.id), None);
    }

    #[test]
    fn test_node_at_misses_empty_space() {
        assert!(graph().node_at(0.0, 0.0).is_none());
    }

    #[test]
    fn test_edges_resolve() {
        let graph = graph();
        assert_eq!(graph.resolved_edges().count(), graph.edges.len());
    }

    #[test]
    fn test_stats_clamped() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut data = NetworkData::baseline(&mut rng);
        let graph = data.graph.clone();
        for _ in 0..10_000 {
            data.tick(&mut rng);
            for v in [
                data.stats.influence_score.value(),
                data.stats.connection_strength.value(),
            ] {
                assert!((0.0..=100.0).contains(&v));
            }
        }
        // Ticks only move the two scores.
        assert_eq!(data.graph, graph);
    }

    #[test]
    fn test_node_colors_follow_risk() {
        for node in graph().nodes {
            assert_eq!(node.color, node.risk.node_color());
        }
    }
}
