//! Agent Components
//!
//! The actors of the influence network: power, loyalty, relationship
//! sets, and the per-agent strategic estimates derived from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Loyalty every agent starts with
const INITIAL_LOYALTY: f32 = 1.0;

/// Vulnerability discount per ally
const ALLY_PROTECTION: f32 = 0.1;

/// Unique identifier for an agent.
///
/// Allocated monotonically by the network at creation; never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An actor in the influence graph.
///
/// `power` and `loyalty` are deliberately unclamped: propagation and
/// betrayal execution may drive either negative or arbitrarily high.
/// Boundary behavior of dependent formulas is pinned down in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub power: f32,
    pub loyalty: f32,
    /// Derived from power and subordinate count; refreshed only on demand
    pub influence_radius: f32,
    traitor: bool,
    allies: BTreeSet<AgentId>,
    subordinates: BTreeSet<AgentId>,
}

impl Agent {
    pub fn new(id: AgentId, name: impl Into<String>, initial_power: f32) -> Self {
        Self {
            id,
            name: name.into(),
            power: initial_power,
            loyalty: INITIAL_LOYALTY,
            influence_radius: initial_power * 0.5,
            traitor: false,
            allies: BTreeSet::new(),
            subordinates: BTreeSet::new(),
        }
    }

    pub fn modify_power(&mut self, delta: f32) {
        self.power += delta;
    }

    pub fn modify_loyalty(&mut self, delta: f32) {
        self.loyalty += delta;
    }

    pub fn is_traitor(&self) -> bool {
        self.traitor
    }

    /// The mark persists; nothing in the engine clears it automatically.
    pub fn mark_traitor(&mut self) {
        self.traitor = true;
    }

    pub fn clear_traitor_mark(&mut self) {
        self.traitor = false;
    }

    /// Agents this one counts as allies, ascending id order.
    pub fn allies(&self) -> &BTreeSet<AgentId> {
        &self.allies
    }

    /// Agents subordinate to this one, ascending id order.
    pub fn subordinates(&self) -> &BTreeSet<AgentId> {
        &self.subordinates
    }

    /// Idempotent; inserting an existing ally is a no-op.
    pub fn add_ally(&mut self, id: AgentId) {
        self.allies.insert(id);
    }

    pub fn remove_ally(&mut self, id: AgentId) {
        self.allies.remove(&id);
    }

    /// Idempotent; inserting an existing subordinate is a no-op.
    pub fn add_subordinate(&mut self, id: AgentId) {
        self.subordinates.insert(id);
    }

    pub fn remove_subordinate(&mut self, id: AgentId) {
        self.subordinates.remove(&id);
    }

    /// Estimated power captured by betraying a target of the given power,
    /// discounted by this agent's own loyalty.
    pub fn betrayal_gain(&self, target_power: f32) -> f32 {
        let base_gain = target_power * 0.6;
        let loyalty_penalty = self.loyalty * target_power * 0.3;
        base_gain - loyalty_penalty
    }

    /// Susceptibility to betrayal: inverse in power, discounted per ally,
    /// floored at zero.
    pub fn vulnerability(&self) -> f32 {
        let base = 1.0 / (self.power + 1.0);
        let ally_protection = self.allies.len() as f32 * ALLY_PROTECTION;
        (base - ally_protection).max(0.0)
    }

    /// Recompute the derived influence radius. Not kept in sync
    /// automatically; callers refresh after power or subordinate changes.
    pub fn update_influence_radius(&mut self) {
        self.influence_radius = self.power * 0.5 + self.subordinates.len() as f32 * 0.2;
    }
}
