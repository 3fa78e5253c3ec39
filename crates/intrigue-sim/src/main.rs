//! Influence Network Intrigue Simulation
//!
//! A turn-based driver over the intrigue-core engine: natural growth,
//! seeded random events, and betrayal phases for a small political
//! network.

use clap::Parser;
use std::path::PathBuf;

use intrigue_core::EdgeKind;
use intrigue_sim::config::{Config, DEFAULT_TUNING_PATH};
use intrigue_sim::{report, NetworkSnapshot, Simulator};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "intrigue_sim")]
#[command(about = "A turn-based influence network intrigue simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of turns to simulate (tuning default when omitted)
    #[arg(long)]
    turns: Option<u32>,

    /// Path to the tuning file
    #[arg(long, default_value = DEFAULT_TUNING_PATH)]
    tuning: PathBuf,

    /// Write the final network state as JSON to this path
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(&args.tuning);
    let turns = args.turns.unwrap_or(config.simulation.default_turns);

    println!("Influence Network Intrigue Simulation");
    println!("=====================================");
    println!("Seed: {}", args.seed);
    println!("Turns: {}", turns);
    println!();

    let mut sim = Simulator::new(args.seed, config);

    // Initial cast
    let alpha = sim.create_agent("Alpha", 15.0);
    let beta = sim.create_agent("Beta", 12.0);
    let gamma = sim.create_agent("Gamma", 10.0);
    let delta = sim.create_agent("Delta", 8.0);
    let epsilon = sim.create_agent("Epsilon", 7.0);
    let zeta = sim.create_agent("Zeta", 6.0);

    sim.create_relationship(alpha, beta, EdgeKind::Alliance);
    sim.create_relationship(alpha, gamma, EdgeKind::Subordination);
    sim.create_relationship(beta, delta, EdgeKind::Alliance);
    sim.create_relationship(gamma, epsilon, EdgeKind::Subordination);
    sim.create_relationship(delta, zeta, EdgeKind::Alliance);
    sim.create_relationship(epsilon, zeta, EdgeKind::Neutral);
    sim.create_relationship(beta, gamma, EdgeKind::Conflict);

    println!("Initial network configuration established.");
    println!(
        "Agents: {} | Relationships: {}",
        sim.network().agents().len(),
        sim.network().edges().len()
    );

    sim.run(turns);

    println!("\n\n========== STRATEGIC ANALYSIS ==========");
    report::print_betrayal_opportunities(sim.network(), alpha);
    report::print_betrayal_opportunities(sim.network(), beta);

    println!("\n========== BETRAYAL PHASE ==========");
    sim.execute_optimal_betrayal_for(alpha);
    sim.execute_optimal_betrayal_for(delta);

    println!();
    report::print_network_status(sim.network());

    if let Some(path) = args.snapshot_out {
        let snapshot = NetworkSnapshot::capture(sim.network(), sim.current_turn());
        match snapshot.write_json(&path) {
            Ok(()) => println!("\nSnapshot written to {}", path.display()),
            Err(e) => eprintln!("Failed to write snapshot: {}", e),
        }
    }
}
