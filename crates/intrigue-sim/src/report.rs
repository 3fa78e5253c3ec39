//! Console Reporting
//!
//! Status tables and strategic listings printed by the driver.

use intrigue_core::{strategy, AgentId, InfluenceNetwork};

/// How many agents the final analysis highlights per category
const HIGHLIGHT_COUNT: usize = 3;

/// How many opportunities a per-agent listing shows
const OPPORTUNITY_COUNT: usize = 5;

/// Power, loyalty, allies, and centrality for every agent.
pub fn print_network_status(network: &InfluenceNetwork) {
    println!("\n=== NETWORK STATUS ===");
    println!("Total Network Power: {:.2}\n", network.total_power());

    println!(
        "{:<15}{:<10}{:<10}{:<10}{:<12}",
        "Agent", "Power", "Loyalty", "Allies", "Centrality"
    );
    println!("{}", "-".repeat(60));

    for (id, agent) in network.agents() {
        println!(
            "{:<15}{:<10.2}{:<10.2}{:<10}{:<12.2}",
            agent.name,
            agent.power,
            agent.loyalty,
            agent.allies().len(),
            network.centrality(*id)
        );
    }
}

/// Ranked betrayal opportunities for one agent. Silent for missing ids.
pub fn print_betrayal_opportunities(network: &InfluenceNetwork, agent_id: AgentId) {
    let Some(betrayer) = network.agent(agent_id) else {
        return;
    };

    println!("\n=== BETRAYAL OPPORTUNITIES FOR {} ===\n", betrayer.name);

    let plans = strategy::find_optimal_betrayals(network, agent_id, OPPORTUNITY_COUNT);
    if plans.is_empty() {
        println!("No viable betrayal opportunities at this time.");
        return;
    }

    for (i, plan) in plans.iter().enumerate() {
        let target_name = network
            .agent(plan.target)
            .map(|agent| agent.name.as_str())
            .unwrap_or("(unknown)");

        println!("{}. Target: {}", i + 1, target_name);
        println!("   Expected Gain: {:.2}", plan.expected_gain);
        println!("   Success Rate: {:.2}%", plan.success_probability * 100.0);
        println!("   ROI: {:.2}", plan.roi());
        println!("   Required Allies: {}", plan.required_allies.len());
        println!("   Total Cost: {:.2}\n", plan.total_cost);
    }
}

/// Most influential and most vulnerable agents at the end of a run.
pub fn print_final_analysis(network: &InfluenceNetwork) {
    println!("\n========== FINAL ANALYSIS ==========");

    println!("\nMost Influential Agents:");
    for (i, id) in network.most_influential(HIGHLIGHT_COUNT).iter().enumerate() {
        if let Some(agent) = network.agent(*id) {
            println!(
                "{}. {} (Power: {:.2}, Control: {:.1}%)",
                i + 1,
                agent.name,
                agent.power,
                strategy::network_control(network, *id) * 100.0
            );
        }
    }

    println!("\nMost Vulnerable Targets:");
    for (i, id) in network
        .vulnerable_targets()
        .iter()
        .take(HIGHLIGHT_COUNT)
        .enumerate()
    {
        if let Some(agent) = network.agent(*id) {
            println!(
                "{}. {} (Vulnerability: {:.2})",
                i + 1,
                agent.name,
                agent.vulnerability()
            );
        }
    }

    println!("\n========== SIMULATION COMPLETE ==========");
}
