//! Influence Network
//!
//! The arena of agents plus the ordered edge list: graph mutation,
//! depth-limited influence propagation, and network-level analytics.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::components::agent::{Agent, AgentId};
use crate::components::edge::{Edge, EdgeKind};

/// Propagation never crosses more than this many hops from the source
const MAX_PROPAGATION_DEPTH: u32 = 3;

/// Branches carrying less than this amount are dropped. The comparison is
/// signed, so negative propagated amounts die here as well.
const MIN_PROPAGATION_AMOUNT: f32 = 0.01;

/// Per-hop decay applied on top of the edge flow
const PROPAGATION_DAMPING: f32 = 0.5;

/// Vulnerability above this marks an agent as a viable target
const VULNERABLE_THRESHOLD: f32 = 0.3;

/// Owns every agent and edge in one political network.
///
/// Agents live in an arena keyed by monotonically increasing id; all
/// cross-references (edges, ally and subordinate sets) are plain id
/// values. Edges keep their insertion order, which propagation relies on
/// for tie-breaking.
#[derive(Debug, Default)]
pub struct InfluenceNetwork {
    agents: BTreeMap<AgentId, Agent>,
    edges: Vec<Edge>,
    next_agent_id: u32,
}

impl InfluenceNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an agent and return its id. Ids are never reused; agents
    /// are never destroyed within a session.
    pub fn add_agent(&mut self, name: impl Into<String>, initial_power: f32) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        self.agents.insert(id, Agent::new(id, name, initial_power));
        id
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// Ordered id -> agent mapping.
    pub fn agents(&self) -> &BTreeMap<AgentId, Agent> {
        &self.agents
    }

    /// Every edge, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Append an edge between two agents.
    ///
    /// Alliance edges record each endpoint as the other's ally;
    /// subordination records the target on the source only (the target is
    /// not informed). Conflict and neutral edges touch no membership.
    /// Membership updates require both endpoints to exist; the edge
    /// itself is appended regardless.
    pub fn add_edge(&mut self, source: AgentId, target: AgentId, kind: EdgeKind, weight: f32) {
        self.edges.push(Edge::new(source, target, kind, weight));

        if !self.agents.contains_key(&source) || !self.agents.contains_key(&target) {
            return;
        }
        match kind {
            EdgeKind::Alliance => {
                if let Some(source_agent) = self.agents.get_mut(&source) {
                    source_agent.add_ally(target);
                }
                if let Some(target_agent) = self.agents.get_mut(&target) {
                    target_agent.add_ally(source);
                }
            }
            EdgeKind::Subordination => {
                if let Some(source_agent) = self.agents.get_mut(&source) {
                    source_agent.add_subordinate(target);
                }
            }
            EdgeKind::Conflict | EdgeKind::Neutral => {}
        }
    }

    /// Remove every edge matching the ordered (source, target) pair.
    ///
    /// Ally and subordinate membership recorded on the agents is left
    /// untouched; outside the betrayal-execution flow this can leave the
    /// relationship sets out of step with the edge list.
    pub fn remove_edge(&mut self, source: AgentId, target: AgentId) {
        self.edges
            .retain(|edge| !(edge.source == source && edge.target == target));
    }

    /// Outgoing edges of an agent, as an owned snapshot independent of
    /// later mutation.
    pub fn edges_from(&self, id: AgentId) -> Vec<Edge> {
        self.edges
            .iter()
            .filter(|edge| edge.source == id)
            .cloned()
            .collect()
    }

    /// Depth-limited, decayed flood of a power delta along outgoing edges.
    ///
    /// Iterative worklist form of a depth-first walk: children are pushed
    /// in reverse edge-insertion order so edges are followed in insertion
    /// order, and the first path to reach a node wins; later paths to an
    /// already-visited node are dropped, not merged. A branch ends when it
    /// would cross more than three hops, revisit a node, or its amount
    /// falls under the absolute cutoff. Every visited agent receives the
    /// current decayed amount; the source itself receives the full
    /// initial amount.
    pub fn propagate_influence(&mut self, source: AgentId, amount: f32) {
        tracing::debug!(source = %source, amount, "propagating influence");

        let mut visited: BTreeSet<AgentId> = BTreeSet::new();
        let mut worklist: Vec<(AgentId, f32, u32)> = vec![(source, amount, 0)];

        while let Some((id, amount, depth)) = worklist.pop() {
            if depth > MAX_PROPAGATION_DEPTH || amount < MIN_PROPAGATION_AMOUNT {
                continue;
            }
            // A node is processed at most once per call; missing nodes
            // are marked too, so no later path retries them.
            if !visited.insert(id) {
                continue;
            }
            let Some(agent) = self.agents.get_mut(&id) else {
                continue;
            };
            agent.modify_power(amount);

            let outgoing = self.edges_from(id);
            for edge in outgoing.iter().rev() {
                let propagated = amount * edge.influence_flow() * PROPAGATION_DAMPING;
                worklist.push((edge.target, propagated, depth + 1));
            }
        }
    }

    /// Recompute every agent's derived influence radius.
    pub fn update_all_influence_radii(&mut self) {
        for agent in self.agents.values_mut() {
            agent.update_influence_radius();
        }
    }

    /// Sum of all agent power.
    pub fn total_power(&self) -> f32 {
        self.agents.values().map(|agent| agent.power).sum()
    }

    /// Up to `count` agent ids, strongest first. The sort is stable and
    /// keyed on power alone, so ties keep ascending-id order.
    pub fn most_influential(&self, count: usize) -> Vec<AgentId> {
        let mut ranked: Vec<(AgentId, f32)> = self
            .agents
            .values()
            .map(|agent| (agent.id, agent.power))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.into_iter().take(count).map(|(id, _)| id).collect()
    }

    /// Degree-weighted structural importance:
    /// (indegree + outdegree) * power, counted over the full edge list.
    /// Zero for a missing agent.
    pub fn centrality(&self, id: AgentId) -> f32 {
        let Some(agent) = self.agents.get(&id) else {
            return 0.0;
        };
        let mut degree = 0u32;
        for edge in &self.edges {
            if edge.target == id {
                degree += 1;
            }
            if edge.source == id {
                degree += 1;
            }
        }
        degree as f32 * agent.power
    }

    /// Agents whose vulnerability exceeds the threshold, most vulnerable
    /// first.
    pub fn vulnerable_targets(&self) -> Vec<AgentId> {
        let mut ranked: Vec<(AgentId, f32)> = self
            .agents
            .values()
            .map(|agent| (agent.id, agent.vulnerability()))
            .filter(|(_, vulnerability)| *vulnerability > VULNERABLE_THRESHOLD)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.into_iter().map(|(id, _)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_agent_ids_are_monotonic() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        assert_eq!(a, AgentId(0));
        assert_eq!(b, AgentId(1));
        assert!(network.agent(a).is_some());
        assert!(network.agent(AgentId(99)).is_none());
    }

    #[test]
    fn test_alliance_membership_is_symmetric() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        network.add_edge(a, b, EdgeKind::Alliance, 1.0);

        assert!(network.agent(a).unwrap().allies().contains(&b));
        assert!(network.agent(b).unwrap().allies().contains(&a));
    }

    #[test]
    fn test_subordination_membership_is_asymmetric() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        network.add_edge(a, b, EdgeKind::Subordination, 1.0);

        assert!(network.agent(a).unwrap().subordinates().contains(&b));
        assert!(network.agent(b).unwrap().subordinates().is_empty());
        assert!(network.agent(b).unwrap().allies().is_empty());
    }

    #[test]
    fn test_conflict_and_neutral_touch_no_membership() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        network.add_edge(a, b, EdgeKind::Conflict, 1.0);
        network.add_edge(a, b, EdgeKind::Neutral, 1.0);

        assert!(network.agent(a).unwrap().allies().is_empty());
        assert!(network.agent(a).unwrap().subordinates().is_empty());
        assert_eq!(network.edges().len(), 2);
    }

    #[test]
    fn test_remove_edge_matches_ordered_pairs_only() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        let c = network.add_agent("Gamma", 3.0);

        // Duplicate ordered pairs may coexist
        network.add_edge(a, b, EdgeKind::Alliance, 1.0);
        network.add_edge(a, b, EdgeKind::Neutral, 2.0);
        network.add_edge(b, a, EdgeKind::Conflict, 1.0);
        network.add_edge(a, c, EdgeKind::Alliance, 1.0);
        assert_eq!(network.edges().len(), 4);

        network.remove_edge(a, b);

        assert_eq!(network.edges().len(), 2);
        assert!(network
            .edges()
            .iter()
            .all(|edge| !(edge.source == a && edge.target == b)));
        // The reverse edge survives
        assert!(network
            .edges()
            .iter()
            .any(|edge| edge.source == b && edge.target == a));
    }

    #[test]
    fn test_membership_survives_edge_removal() {
        // remove_edge does not retract ally or subordinate membership;
        // the relationship sets can drift from the edge list when it is
        // called outside the betrayal flow.
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        network.add_edge(a, b, EdgeKind::Alliance, 1.0);
        network.remove_edge(a, b);

        assert!(network.agent(a).unwrap().allies().contains(&b));
        assert!(network.agent(b).unwrap().allies().contains(&a));
    }

    #[test]
    fn test_edges_from_returns_independent_snapshot() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        network.add_edge(a, b, EdgeKind::Alliance, 1.0);

        let snapshot = network.edges_from(a);
        network.remove_edge(a, b);

        assert_eq!(snapshot.len(), 1);
        assert!(network.edges_from(a).is_empty());
    }

    #[test]
    fn test_propagation_below_threshold_changes_nothing() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        network.add_edge(a, b, EdgeKind::Alliance, 1.0);

        network.propagate_influence(a, 0.005);

        assert!(approx(network.agent(a).unwrap().power, 10.0));
        assert!(approx(network.agent(b).unwrap().power, 5.0));
    }

    #[test]
    fn test_propagation_applies_full_amount_to_source() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);

        network.propagate_influence(a, 4.0);

        assert!(approx(network.agent(a).unwrap().power, 14.0));
    }

    #[test]
    fn test_propagation_stops_past_depth_three() {
        let mut network = InfluenceNetwork::new();
        // Subordination at weight 2.0 amplifies each hop:
        // flow 2.4, damped by 0.5 -> x1.2 per hop, so amounts grow and
        // never hit the cutoff.
        let chain: Vec<AgentId> = (0..5)
            .map(|i| network.add_agent(format!("Agent{i}"), 1.0))
            .collect();
        for pair in chain.windows(2) {
            network.add_edge(pair[0], pair[1], EdgeKind::Subordination, 2.0);
        }

        network.propagate_influence(chain[0], 10.0);

        assert!(approx(network.agent(chain[0]).unwrap().power, 11.0));
        assert!(approx(network.agent(chain[1]).unwrap().power, 13.0));
        assert!(approx(network.agent(chain[2]).unwrap().power, 15.4));
        assert!(approx(network.agent(chain[3]).unwrap().power, 18.28));
        // Four hops out: untouched
        assert!(approx(network.agent(chain[4]).unwrap().power, 1.0));
    }

    #[test]
    fn test_propagation_first_visit_wins_in_insertion_order() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 0.0);
        let b = network.add_agent("Beta", 0.0);
        let c = network.add_agent("Gamma", 0.0);
        let d = network.add_agent("Delta", 0.0);

        // Diamond: a reaches d through b (inserted first) and through the
        // heavier c branch. The b branch claims d; the c->d path is
        // dropped entirely, not merged.
        network.add_edge(a, b, EdgeKind::Alliance, 2.0);
        network.add_edge(a, c, EdgeKind::Alliance, 3.0);
        network.add_edge(b, d, EdgeKind::Alliance, 2.0);
        network.add_edge(c, d, EdgeKind::Alliance, 3.0);

        network.propagate_influence(a, 10.0);

        // Alliance flow at trust 0.8: weight * 0.64; halved per hop.
        assert!(approx(network.agent(a).unwrap().power, 10.0));
        assert!(approx(network.agent(b).unwrap().power, 6.4));
        assert!(approx(network.agent(c).unwrap().power, 9.6));
        assert!(approx(network.agent(d).unwrap().power, 4.096));
    }

    #[test]
    fn test_negative_propagated_amounts_are_dropped() {
        // Conflict flow is negative, and the cutoff is a signed
        // comparison, so the reduction never lands on the neighbor.
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        network.add_edge(a, b, EdgeKind::Conflict, 2.0);

        network.propagate_influence(a, 10.0);

        assert!(approx(network.agent(a).unwrap().power, 20.0));
        assert!(approx(network.agent(b).unwrap().power, 5.0));
    }

    #[test]
    fn test_propagation_from_missing_source_is_a_no_op() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        network.propagate_influence(AgentId(42), 5.0);
        assert!(approx(network.agent(a).unwrap().power, 10.0));
    }

    #[test]
    fn test_total_power_sums_all_agents() {
        let mut network = InfluenceNetwork::new();
        network.add_agent("Alpha", 10.0);
        network.add_agent("Beta", 5.0);
        network.add_agent("Gamma", -2.0);
        assert!(approx(network.total_power(), 13.0));
    }

    #[test]
    fn test_most_influential_is_stable_on_ties() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 5.0);
        let b = network.add_agent("Beta", 10.0);
        let c = network.add_agent("Gamma", 10.0);
        network.add_agent("Delta", 1.0);

        assert_eq!(network.most_influential(3), vec![b, c, a]);
        assert_eq!(network.most_influential(0), Vec::<AgentId>::new());
        assert_eq!(network.most_influential(10).len(), 4);
    }

    #[test]
    fn test_centrality_counts_every_edge() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 5.0);
        let c = network.add_agent("Gamma", 3.0);
        network.add_edge(a, b, EdgeKind::Alliance, 1.0);
        network.add_edge(a, c, EdgeKind::Neutral, 1.0);
        network.add_edge(b, a, EdgeKind::Conflict, 1.0);

        // Two outgoing plus one incoming, times power 10
        assert!(approx(network.centrality(a), 30.0));
        assert_eq!(network.centrality(AgentId(42)), 0.0);
    }

    #[test]
    fn test_vulnerable_targets_filtered_and_sorted() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 0.5); // 1/1.5 = 0.667
        let b = network.add_agent("Beta", 5.0); // 1/6 = 0.167, excluded
        let c = network.add_agent("Gamma", 0.0); // 1.0

        let targets = network.vulnerable_targets();
        assert_eq!(targets, vec![c, a]);
        assert!(!targets.contains(&b));
    }

    #[test]
    fn test_update_all_influence_radii() {
        let mut network = InfluenceNetwork::new();
        let a = network.add_agent("Alpha", 10.0);
        let b = network.add_agent("Beta", 4.0);
        network.add_edge(a, b, EdgeKind::Subordination, 1.0);
        if let Some(agent) = network.agent_mut(a) {
            agent.modify_power(2.0);
        }

        network.update_all_influence_radii();

        assert!(approx(network.agent(a).unwrap().influence_radius, 6.2));
        assert!(approx(network.agent(b).unwrap().influence_radius, 2.0));
    }
}
