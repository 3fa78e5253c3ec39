//! Turn-based driver for the influence network intrigue engine.
//!
//! Owns the things the core deliberately does not: the turn loop,
//! seeded randomness, tuning configuration, console reporting, and
//! snapshot output.

pub mod config;
pub mod report;
pub mod simulator;
pub mod snapshot;

pub use config::Config;
pub use simulator::Simulator;
pub use snapshot::NetworkSnapshot;
