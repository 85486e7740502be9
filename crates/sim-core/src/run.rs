//! Single-Run Driver
//!
//! Initializes one replication (network, sector assignment, firm
//! population, initial world state) and iterates the monthly orchestrator
//! over the full horizon, recording one output row per month. Everything
//! stochastic draws from the single replication RNG passed in.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::{calib, RunConfig};
use crate::firm::{Firm, TechnologyState};
use crate::network::{watts_strogatz, DEFAULT_K, DEFAULT_P};
use crate::output::MonthRow;
use crate::sectors::SECTORS;
use crate::step::advance_month;
use crate::world::WorldState;

/// Firm initialization tuning.
pub mod params {
    /// Starting cash band
    pub const CASH_MIN: f64 = 50_000.0;
    pub const CASH_MAX: f64 = 150_000.0;
    /// Innovation-cost factor band
    pub const INNOVATION_MIN: f64 = 0.9;
    pub const INNOVATION_MAX: f64 = 1.1;
    /// Spread of the initial digital-readiness draw around the sector center
    pub const READINESS_SPREAD: f64 = 0.15;
    /// Digital-readiness truncation band
    pub const READINESS_MIN: f64 = 0.05;
    pub const READINESS_MAX: f64 = 0.95;
}

/// Complete output of one replication.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub seed: u64,
    pub rows: Vec<MonthRow>,
}

impl RunResult {
    /// The terminal-month row.
    pub fn terminal(&self) -> &MonthRow {
        self.rows.last().expect("a run has at least one month")
    }
}

/// Standard-normal-ish draw from three uniforms (Irwin-Hall), bounded to
/// about +/-3 by construction so no rejection loop is needed.
fn gaussian_ish(rng: &mut SmallRng) -> f64 {
    let sum: f64 = rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>();
    (sum - 1.5) / 0.5
}

/// Assign sector indices proportionally to the registry shares, remainder
/// to the last sector, then shuffle to avoid spatial clustering on the ring.
fn assign_sectors(firms_count: usize, rng: &mut SmallRng) -> Vec<usize> {
    let mut assignment = Vec::with_capacity(firms_count);
    for (idx, sector) in SECTORS.iter().enumerate() {
        let quota = if idx == SECTORS.len() - 1 {
            firms_count - assignment.len()
        } else {
            (sector.share * firms_count as f64).floor() as usize
        };
        assignment.extend(std::iter::repeat(idx).take(quota));
    }
    assignment.shuffle(rng);
    assignment
}

/// Build the firm population for one replication.
fn spawn_firms(cfg: &RunConfig, rng: &mut SmallRng) -> Vec<Firm> {
    let adjacency = watts_strogatz(cfg.firms_count, DEFAULT_K, DEFAULT_P, rng);
    let sectors = assign_sectors(cfg.firms_count, rng);

    let mut firms = Vec::with_capacity(cfg.firms_count);
    for (id, neighbors) in adjacency.into_iter().enumerate() {
        let sector_idx = sectors[id];
        let center = SECTORS[sector_idx].readiness_center;
        let readiness = (center + params::READINESS_SPREAD * gaussian_ish(rng))
            .clamp(params::READINESS_MIN, params::READINESS_MAX);
        firms.push(Firm {
            id,
            cash: rng.gen_range(params::CASH_MIN..params::CASH_MAX),
            debt: 0.0,
            technology: TechnologyState::Traditional {
                workers: calib::INITIAL_WORKERS,
            },
            risk_profile: rng.gen::<f64>(),
            innovation_cost_factor: rng.gen_range(params::INNOVATION_MIN..params::INNOVATION_MAX),
            digital_readiness: readiness,
            sector: sector_idx,
            neighbors,
        });
    }
    firms
}

/// Run one full replication on the given seed.
pub fn run_single(cfg: &RunConfig, seed: u64) -> RunResult {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut firms = spawn_firms(cfg, &mut rng);
    let mut world = WorldState::initial(cfg.firms_count);

    let mut rows = Vec::with_capacity(cfg.horizon_months as usize);
    for _ in 0..cfg.horizon_months {
        let (next_world, next_firms) = advance_month(&world, &firms, cfg, &mut rng);
        world = next_world;
        firms = next_firms;
        rows.push(MonthRow::from_world(&world));
    }
    tracing::debug!(
        seed,
        terminal_adoption = world.automation_ratio + world.hybrid_ratio,
        terminal_unemployment = world.unemployment_rate,
        "replication finished"
    );
    RunResult { seed, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_cfg() -> RunConfig {
        let mut cfg = RunConfig::new("test", 0.0, 1);
        cfg.firms_count = 120;
        cfg.horizon_months = 12;
        cfg
    }

    #[test]
    fn test_sector_assignment_proportions() {
        let mut rng = SmallRng::seed_from_u64(8);
        let assignment = assign_sectors(10_000, &mut rng);
        assert_eq!(assignment.len(), 10_000);
        for (idx, sector) in SECTORS.iter().enumerate() {
            let count = assignment.iter().filter(|&&s| s == idx).count();
            let expected = sector.share * 10_000.0;
            assert!(
                (count as f64 - expected).abs() <= SECTORS.len() as f64,
                "sector {idx}: {count} vs expected {expected}"
            );
        }
    }

    #[test]
    fn test_spawned_firms_start_traditional() {
        let cfg = tiny_cfg();
        let mut rng = SmallRng::seed_from_u64(2);
        let firms = spawn_firms(&cfg, &mut rng);
        assert_eq!(firms.len(), cfg.firms_count);
        for f in &firms {
            assert!(matches!(
                f.technology,
                TechnologyState::Traditional { workers } if workers == calib::INITIAL_WORKERS
            ));
            assert!(f.digital_readiness >= params::READINESS_MIN);
            assert!(f.digital_readiness <= params::READINESS_MAX);
            assert!(f.risk_profile >= 0.0 && f.risk_profile < 1.0);
            assert_eq!(f.debt, 0.0);
        }
    }

    #[test]
    fn test_run_produces_one_row_per_month() {
        let cfg = tiny_cfg();
        let result = run_single(&cfg, 3);
        assert_eq!(result.rows.len(), cfg.horizon_months as usize);
        for (i, row) in result.rows.iter().enumerate() {
            assert_eq!(row.month, i as u32 + 1);
            assert!((0.0..=1.0).contains(&row.unemployment));
            assert!((0.0..=1.0).contains(&row.automation));
            assert!((0.0..=1.0).contains(&row.hybrid));
            assert!(row.automation + row.hybrid <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_rows() {
        let cfg = tiny_cfg();
        let a = run_single(&cfg, 42);
        let b = run_single(&cfg, 42);
        assert_eq!(a.rows, b.rows);
    }

    #[test]
    fn test_different_seeds_differ() {
        let cfg = tiny_cfg();
        let a = run_single(&cfg, 1);
        let b = run_single(&cfg, 2);
        assert_ne!(a.rows, b.rows);
    }
}
