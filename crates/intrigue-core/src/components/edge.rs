//! Edge Components
//!
//! Typed, weighted, directed relationships between agents. Each edge
//! carries a bounded trust value and a deterministic influence-flow
//! formula.

use serde::{Deserialize, Serialize};

use super::agent::AgentId;

/// Trust assigned to every newly created edge
pub const INITIAL_TRUST: f32 = 0.8;

/// Kind of relationship an edge represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Alliance,
    Subordination,
    Conflict,
    Neutral,
}

/// A directed relationship from one agent to another.
///
/// Multiple edges between the same ordered pair may coexist; nothing
/// deduplicates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: AgentId,
    pub target: AgentId,
    pub kind: EdgeKind,
    pub weight: f32,
    /// Bounded to [0, 1]; modified only through `modify_trust`
    pub trust: f32,
}

impl Edge {
    pub fn new(source: AgentId, target: AgentId, kind: EdgeKind, weight: f32) -> Self {
        Self {
            source,
            target,
            kind,
            weight,
            trust: INITIAL_TRUST,
        }
    }

    /// Adjust trust by `delta`, keeping the result within [0, 1].
    /// Infallible; out-of-range results are clamped.
    pub fn modify_trust(&mut self, delta: f32) {
        self.trust = (self.trust + delta).clamp(0.0, 1.0);
    }

    /// Influence carried along this edge per unit of propagated power.
    ///
    /// Alliance flow is damped by trust; subordination amplifies;
    /// conflict inverts. Pure function of kind, weight, and trust.
    pub fn influence_flow(&self) -> f32 {
        match self.kind {
            EdgeKind::Alliance => self.weight * self.trust * 0.8,
            EdgeKind::Subordination => self.weight * 1.2,
            EdgeKind::Conflict => -self.weight * 0.5,
            EdgeKind::Neutral => self.weight * 0.3,
        }
    }
}
