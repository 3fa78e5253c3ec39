//! Influence network intrigue engine.
//!
//! A small directed, weighted, typed-edge graph of political agents:
//! influence propagation, vulnerability and centrality analytics, and a
//! betrayal-plan scoring engine over the network.

pub mod components;
pub mod network;
pub mod strategy;

pub use components::agent::{Agent, AgentId};
pub use components::edge::{Edge, EdgeKind};
pub use network::InfluenceNetwork;
pub use strategy::BetrayalPlan;
