//! Betrayal Strategy
//!
//! Stateless scoring over an influence network: evaluates betrayal
//! opportunities, ranks them by return on investment, and executes the
//! chosen plan against the network.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::components::agent::{Agent, AgentId};
use crate::components::edge::EdgeKind;
use crate::network::InfluenceNetwork;

/// Success probability is clamped to this band
const MIN_SUCCESS_PROBABILITY: f32 = 0.05;
const MAX_SUCCESS_PROBABILITY: f32 = 0.95;

/// Ranked plans must clear this success probability
const VIABLE_PROBABILITY: f32 = 0.3;

/// Power gap ratio past which backing allies are required
const ALLY_REQUIREMENT_RATIO: f32 = 1.5;

/// Minimum power for an ally to qualify as backing
const QUALIFYING_ALLY_POWER: f32 = 5.0;

/// At most this many backing allies are recruited per plan
const MAX_REQUIRED_ALLIES: usize = 2;

/// Share of the target's power seized on execution
const POWER_SEIZURE_SHARE: f32 = 0.6;

/// Share of the stolen power that ripples outward afterwards
const AFTERSHOCK_SHARE: f32 = 0.3;

/// Number of targets reported by the dominance ranking
const DOMINANCE_TARGET_COUNT: usize = 5;

/// A scored, costed proposal for one agent to seize power from another.
///
/// Produced by analysis, consumed once by execution; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetrayalPlan {
    pub betrayer: AgentId,
    pub target: AgentId,
    pub expected_gain: f32,
    pub success_probability: f32,
    /// Backing allies, ascending id order
    pub required_allies: Vec<AgentId>,
    pub total_cost: f32,
}

impl BetrayalPlan {
    /// Expected gain per unit of cost; the ranking key for plans.
    pub fn roi(&self) -> f32 {
        self.expected_gain / (self.total_cost + 0.1)
    }

    /// Plan with no effect, returned when an endpoint is missing.
    fn zero(betrayer: AgentId, target: AgentId) -> Self {
        Self {
            betrayer,
            target,
            expected_gain: 0.0,
            success_probability: 0.0,
            required_allies: Vec::new(),
            total_cost: 0.0,
        }
    }
}

/// Score a single betrayer -> target opportunity.
///
/// A missing endpoint yields a zero-valued plan rather than an error;
/// callers that need to distinguish can check `InfluenceNetwork::agent`
/// beforehand.
pub fn analyze_opportunity(
    network: &InfluenceNetwork,
    betrayer: AgentId,
    target: AgentId,
) -> BetrayalPlan {
    let (Some(betrayer_agent), Some(target_agent)) =
        (network.agent(betrayer), network.agent(target))
    else {
        return BetrayalPlan::zero(betrayer, target);
    };

    let expected_gain = betrayer_agent.betrayal_gain(target_agent.power);
    let success_probability = success_probability(betrayer_agent, target_agent);
    let required_allies = identify_backing_allies(network, betrayer_agent, target_agent);
    let total_cost = execution_cost(required_allies.len(), success_probability);

    BetrayalPlan {
        betrayer,
        target,
        expected_gain,
        success_probability,
        required_allies,
        total_cost,
    }
}

fn success_probability(betrayer: &Agent, target: &Agent) -> f32 {
    let power_ratio = betrayer.power / (target.power + 1.0);
    let ally_advantage = betrayer.allies().len() as f32 * 0.1;
    let target_vulnerability = target.vulnerability();

    (power_ratio * 0.5 + ally_advantage + target_vulnerability * 0.3)
        .clamp(MIN_SUCCESS_PROBABILITY, MAX_SUCCESS_PROBABILITY)
}

/// Backing allies are needed only against a clearly stronger target: up
/// to two of the betrayer's allies with enough power of their own.
fn identify_backing_allies(
    network: &InfluenceNetwork,
    betrayer: &Agent,
    target: &Agent,
) -> Vec<AgentId> {
    if target.power <= betrayer.power * ALLY_REQUIREMENT_RATIO {
        return Vec::new();
    }

    let mut backing = Vec::new();
    for &ally_id in betrayer.allies() {
        if let Some(ally) = network.agent(ally_id) {
            if ally.power > QUALIFYING_ALLY_POWER {
                backing.push(ally_id);
                if backing.len() >= MAX_REQUIRED_ALLIES {
                    break;
                }
            }
        }
    }
    backing
}

fn execution_cost(ally_count: usize, success_probability: f32) -> f32 {
    let base_cost = 2.0;
    let ally_cost = ally_count as f32 * 1.5;
    let risk_cost = (1.0 - success_probability) * 5.0;
    base_cost + ally_cost + risk_cost
}

/// Evaluate every other agent as a target and rank the viable plans
/// (positive expected gain, success probability above the viability
/// floor) by descending ROI, truncated to `top_n`.
pub fn find_optimal_betrayals(
    network: &InfluenceNetwork,
    betrayer: AgentId,
    top_n: usize,
) -> Vec<BetrayalPlan> {
    if network.agent(betrayer).is_none() {
        return Vec::new();
    }

    let mut plans: Vec<BetrayalPlan> = network
        .agents()
        .keys()
        .filter(|&&id| id != betrayer)
        .map(|&id| analyze_opportunity(network, betrayer, id))
        .filter(|plan| plan.expected_gain > 0.0 && plan.success_probability > VIABLE_PROBABILITY)
        .collect();

    plans.sort_by(|a, b| b.roi().partial_cmp(&a.roi()).unwrap_or(Ordering::Equal));
    plans.truncate(top_n);
    plans
}

/// Carry out a plan against the network.
///
/// The betrayer is marked a traitor, seizes a share of the target's
/// power (which may push the target negative), loyalty falls for the
/// target and every recruited ally, the direct edge is rewritten to open
/// conflict, and the shock propagates outward from the betrayer. No-op
/// when either endpoint is missing. The steps are sequential, not
/// atomic; callers needing isolation serialize access externally.
pub fn execute_betrayal(network: &mut InfluenceNetwork, plan: &BetrayalPlan) {
    if network.agent(plan.betrayer).is_none() {
        return;
    }
    let Some(target_power) = network.agent(plan.target).map(|target| target.power) else {
        return;
    };
    let power_stolen = target_power * POWER_SEIZURE_SHARE;

    tracing::debug!(
        betrayer = %plan.betrayer,
        target = %plan.target,
        power_stolen,
        "executing betrayal"
    );

    if let Some(betrayer) = network.agent_mut(plan.betrayer) {
        betrayer.mark_traitor();
        betrayer.modify_power(power_stolen);
    }
    if let Some(target) = network.agent_mut(plan.target) {
        target.modify_power(-power_stolen);
        target.modify_loyalty(-0.4);
    }
    for &ally_id in &plan.required_allies {
        if let Some(ally) = network.agent_mut(ally_id) {
            ally.modify_loyalty(-0.2);
        }
    }

    network.remove_edge(plan.betrayer, plan.target);
    network.add_edge(plan.betrayer, plan.target, EdgeKind::Conflict, 1.0);

    network.propagate_influence(plan.betrayer, power_stolen * AFTERSHOCK_SHARE);
}

/// Share of the network an agent controls: power share blended with
/// normalized centrality. The centrality divisor is a fixed constant,
/// not adaptive to network size.
pub fn network_control(network: &InfluenceNetwork, id: AgentId) -> f32 {
    let Some(agent) = network.agent(id) else {
        return 0.0;
    };
    let power_share = agent.power / network.total_power();
    let centrality = network.centrality(id);

    power_share * 0.6 + centrality / 100.0 * 0.4
}

/// Rank every other agent by strategic value for the given player: a
/// blend of power, centrality, and vulnerability. Returns the top five.
pub fn critical_targets(network: &InfluenceNetwork, player: AgentId) -> Vec<AgentId> {
    let mut ranked: Vec<(AgentId, f32)> = network
        .agents()
        .values()
        .filter(|agent| agent.id != player)
        .map(|agent| {
            let strategic_value = agent.power * 0.5
                + network.centrality(agent.id) * 0.3
                + agent.vulnerability() * 0.2;
            (agent.id, strategic_value)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
        .into_iter()
        .take(DOMINANCE_TARGET_COUNT)
        .map(|(id, _)| id)
        .collect()
}
