//! Stock-flow-consistent agent-based UBI x automation simulator.
//!
//! The engine simulates a closed macroeconomy with a foreign sector at
//! monthly frequency: firms on a small-world imitation network decide
//! between traditional, hybrid, and fully automated production under
//! network and macroeconomic pressure, while labor market, inflation,
//! central bank, banking, foreign, and government sub-states feed back on
//! those decisions. The Monte Carlo orchestrator runs many seeded
//! replications and aggregates cross-seed statistics.

pub mod bank;
pub mod config;
pub mod decision;
pub mod firm;
pub mod macroeconomy;
pub mod monte_carlo;
pub mod network;
pub mod output;
pub mod run;
pub mod sectors;
pub mod step;
pub mod world;

pub use config::{ConfigError, RunConfig};
pub use firm::{BankruptcyReason, Firm, TechnologyState};
pub use monte_carlo::{run_monte_carlo, MonteCarloResult};
pub use run::{run_single, RunResult};
pub use world::WorldState;
