//! Turn-Based Simulator
//!
//! Drives an influence network through growth, random events, and
//! betrayal phases. All randomness lives here, behind a seeded RNG; the
//! core engine only ever receives explicit values.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use intrigue_core::{strategy, AgentId, EdgeKind, InfluenceNetwork};

use crate::config::Config;
use crate::report;

/// Weight assigned to driver-created relationships
const RELATIONSHIP_WEIGHT: f32 = 1.0;

/// Owns the network and the turn loop.
pub struct Simulator {
    network: InfluenceNetwork,
    rng: SmallRng,
    config: Config,
    current_turn: u32,
}

impl Simulator {
    pub fn new(seed: u64, config: Config) -> Self {
        Self {
            network: InfluenceNetwork::new(),
            rng: SmallRng::seed_from_u64(seed),
            config,
            current_turn: 0,
        }
    }

    pub fn network(&self) -> &InfluenceNetwork {
        &self.network
    }

    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    pub fn create_agent(&mut self, name: impl Into<String>, power: f32) -> AgentId {
        self.network.add_agent(name, power)
    }

    pub fn create_relationship(&mut self, source: AgentId, target: AgentId, kind: EdgeKind) {
        self.network.add_edge(source, target, kind, RELATIONSHIP_WEIGHT);
    }

    /// Run the turn loop: growth and a possible random event each turn,
    /// with a status table at the configured interval and a final
    /// analysis at the end.
    pub fn run(&mut self, turns: u32) {
        println!("\n========== INFLUENCE NETWORK SIMULATION START ==========\n");

        report::print_network_status(&self.network);

        for turn in 1..=turns {
            self.current_turn = turn;
            println!("\n--- TURN {turn} ---");
            tracing::info!(turn, "turn started");

            self.natural_growth();
            self.random_events();

            if self.config.simulation.report_interval > 0
                && turn % self.config.simulation.report_interval == 0
            {
                report::print_network_status(&self.network);
            }
        }

        report::print_final_analysis(&self.network);
    }

    /// Take the best-ranked plan for the agent and carry it out, or
    /// report that nothing viable exists.
    pub fn execute_optimal_betrayal_for(&mut self, agent_id: AgentId) {
        let plans = strategy::find_optimal_betrayals(&self.network, agent_id, 1);

        let Some(best_plan) = plans.first() else {
            println!("\n[NO VIABLE BETRAYAL OPPORTUNITIES]");
            return;
        };

        let betrayer_name = self.agent_name(best_plan.betrayer);
        let target_name = self.agent_name(best_plan.target);

        println!("\n[BETRAYAL EXECUTED]");
        println!("  Betrayer: {betrayer_name}");
        println!("  Target: {target_name}");
        println!("  Expected Gain: {:.2}", best_plan.expected_gain);
        println!(
            "  Success Probability: {:.2}%",
            best_plan.success_probability * 100.0
        );
        println!("  ROI: {:.2}", best_plan.roi());
        tracing::info!(
            betrayer = %best_plan.betrayer,
            target = %best_plan.target,
            roi = best_plan.roi(),
            "betrayal executed"
        );

        strategy::execute_betrayal(&mut self.network, best_plan);
    }

    /// Every agent grows a little each turn; radii are refreshed after.
    fn natural_growth(&mut self) {
        let ids: Vec<AgentId> = self.network.agents().keys().copied().collect();
        for id in ids {
            if let Some(agent) = self.network.agent_mut(id) {
                agent.modify_power(self.config.growth.power_per_turn);
                agent.modify_loyalty(self.config.growth.loyalty_per_turn);
            }
        }
        self.network.update_all_influence_radii();
    }

    /// At most one windfall per turn: a uniformly chosen agent gains a
    /// burst of power.
    fn random_events(&mut self) {
        if self.rng.gen_range(1..=100) >= self.config.events.windfall_chance {
            return;
        }
        let ids: Vec<AgentId> = self.network.agents().keys().copied().collect();
        if ids.is_empty() {
            return;
        }
        let id = ids[self.rng.gen_range(0..ids.len())];
        if let Some(agent) = self.network.agent_mut(id) {
            agent.modify_power(self.config.events.windfall_power);
            println!("  [EVENT] {} gained unexpected power.", agent.name);
            tracing::info!(agent = %id, "windfall event");
        }
    }

    fn agent_name(&self, id: AgentId) -> String {
        self.network
            .agent(id)
            .map(|agent| agent.name.clone())
            .unwrap_or_else(|| format!("agent {id}"))
    }
}
