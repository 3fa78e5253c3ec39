//! Snapshot Output
//!
//! Serialization structs capturing the network state at a point in
//! time, for analysis and debugging.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use intrigue_core::{EdgeKind, InfluenceNetwork};

/// One agent's state, with its derived metrics precomputed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: u32,
    pub name: String,
    pub power: f32,
    pub loyalty: f32,
    pub influence_radius: f32,
    pub is_traitor: bool,
    #[serde(default)]
    pub allies: Vec<u32>,
    #[serde(default)]
    pub subordinates: Vec<u32>,
    pub centrality: f32,
    pub vulnerability: f32,
}

/// One edge, in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub source: u32,
    pub target: u32,
    pub kind: EdgeKind,
    pub weight: f32,
    pub trust: f32,
}

/// Full network snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub turn: u32,
    pub total_power: f32,
    pub agents: Vec<AgentSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl NetworkSnapshot {
    /// Capture the current network state.
    pub fn capture(network: &InfluenceNetwork, turn: u32) -> Self {
        let agents = network
            .agents()
            .values()
            .map(|agent| AgentSnapshot {
                id: agent.id.0,
                name: agent.name.clone(),
                power: agent.power,
                loyalty: agent.loyalty,
                influence_radius: agent.influence_radius,
                is_traitor: agent.is_traitor(),
                allies: agent.allies().iter().map(|id| id.0).collect(),
                subordinates: agent.subordinates().iter().map(|id| id.0).collect(),
                centrality: network.centrality(agent.id),
                vulnerability: agent.vulnerability(),
            })
            .collect();

        let edges = network
            .edges()
            .iter()
            .map(|edge| EdgeSnapshot {
                source: edge.source.0,
                target: edge.target.0,
                kind: edge.kind,
                weight: edge.weight,
                trust: edge.trust,
            })
            .collect();

        Self {
            turn,
            total_power: network.total_power(),
            agents,
            edges,
        }
    }

    /// Write the snapshot as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_network() -> InfluenceNetwork {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 15.0);
        let b = network.add_agent("Beta", 12.0);
        network.add_edge(a, b, EdgeKind::Alliance, 1.0);
        network
    }

    #[test]
    fn test_snapshot_serializes_expected_shape() {
        let snapshot = NetworkSnapshot::capture(&sample_network(), 3);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["turn"], 3);
        assert_eq!(json["agents"][0]["name"], "Alpha");
        assert_eq!(json["agents"][0]["allies"][0], 1);
        assert_eq!(json["agents"][1]["allies"][0], 0);
        assert_eq!(json["edges"][0]["kind"], "alliance");
        let trust = json["edges"][0]["trust"].as_f64().unwrap();
        assert!((trust - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_round_trips() {
        let snapshot = NetworkSnapshot::capture(&sample_network(), 1);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: NetworkSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.agents.len(), 2);
        assert_eq!(back.edges.len(), 1);
        assert_eq!(back.turn, 1);
    }

    #[test]
    fn test_snapshot_writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let snapshot = NetworkSnapshot::capture(&sample_network(), 7);
        snapshot.write_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: NetworkSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(back.turn, 7);
    }
}
