//! Run Configuration and Calibration
//!
//! `RunConfig` carries the per-batch knobs (UBI amount, replication count,
//! horizon); everything else is a fixed calibration constant. The model is
//! deliberately not user-extensible - entity counts and economic
//! relationships are pinned by the calibration, not by configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Economy-wide calibration constants (monthly frequency, PLN).
pub mod calib {
    /// Number of firms in the economy
    pub const FIRMS_COUNT: usize = 10_000;
    /// Workers per firm at initialization
    pub const INITIAL_WORKERS: u32 = 10;
    /// Reference workforce used by the capacity formulas
    pub const WORKERS_PER_FIRM: f64 = 10.0;
    /// UBI-eligible population per firm (15.0 * 10 000 firms = 150 000)
    pub const POPULATION_PER_FIRM: f64 = 15.0;
    /// Raw labor force per firm (upper bound on participation)
    pub const LABOR_FORCE_PER_FIRM: f64 = 11.0;
    /// Simulation horizon in months
    pub const HORIZON_MONTHS: u32 = 120;
    /// Month the UBI transfer switches on
    pub const SHOCK_MONTH: u32 = 30;

    /// Monthly revenue of a firm at capacity 1.0 (demand multiplier 1, price level 1)
    pub const BASE_REVENUE: f64 = 93_000.0;
    /// Initial market wage
    pub const INITIAL_WAGE: f64 = 7_000.0;
    /// Reservation wage base (scales with the price level)
    pub const RESERVATION_BASE: f64 = 3_200.0;
    /// How much of the UBI transfer feeds the reservation wage
    pub const RESERVATION_UBI_WEIGHT: f64 = 1.2;
    /// Fixed monthly overhead per firm (scales with the price level)
    pub const FIXED_OTHER_COST: f64 = 8_000.0;
    /// Operating expenses per unit of capacity
    pub const OPEX_PER_CAPACITY: f64 = 12_000.0;
    /// Share of opex sourced domestically (rest is imported)
    pub const OPEX_DOMESTIC_SHARE: f64 = 0.6;
    /// Skeleton crew kept by a fully automated firm
    pub const SKELETON_CREW: u32 = 2;
    /// Workforce floor for traditional and hybrid firms
    pub const MIN_WORKERS: u32 = 3;
    /// Monthly upward drift of digital readiness
    pub const READINESS_DRIFT: f64 = 0.005;
    /// Minimum digital readiness for full automation
    pub const FULL_AI_READINESS_MIN: f64 = 0.45;
    /// Minimum digital readiness for hybrid adoption
    pub const HYBRID_READINESS_MIN: f64 = 0.30;

    /// Full-automation capital expenditure (before sector multiplier)
    pub const FULL_AI_CAPEX: f64 = 420_000.0;
    /// Hybrid capital expenditure (before sector multiplier)
    pub const HYBRID_AI_CAPEX: f64 = 160_000.0;
    /// Loan share of full-automation capex (the rest is a cash down payment)
    pub const FULL_AI_LOAN_SHARE: f64 = 0.85;
    /// Loan share of hybrid capex
    pub const HYBRID_LOAN_SHARE: f64 = 0.80;
    /// Imported share of automation capex (counts toward tech imports)
    pub const TECH_IMPORT_SHARE: f64 = 0.6;

    /// Corporate income tax rate
    pub const CIT_RATE: f64 = 0.19;
    /// Value added tax rate
    pub const VAT_RATE: f64 = 0.23;
    /// Marginal propensity to consume out of household income
    pub const MPC: f64 = 0.9;
    /// Import share of consumption at the initial exchange rate
    pub const IMPORT_CONSUMPTION_SHARE: f64 = 0.25;
    /// Demand multiplier sensitivity to income deviation
    pub const DEMAND_SENSITIVITY: f64 = 0.8;
    /// Demand multiplier band
    pub const DEMAND_MULT_MIN: f64 = 0.5;
    pub const DEMAND_MULT_MAX: f64 = 1.8;

    /// Initial PLN/EUR exchange rate
    pub const INITIAL_EX_RATE: f64 = 4.30;
    /// Monthly government base spending per firm (scales with the price level)
    pub const GOV_BASE_SPEND_PER_FIRM: f64 = 15_000.0;
    /// Price level floor
    pub const PRICE_LEVEL_FLOOR: f64 = 0.30;
}

/// Per-batch run configuration, validated before any simulation work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Monthly UBI transfer per capita, PLN (0 disables the shock entirely)
    pub ubi_monthly: f64,
    /// Number of Monte Carlo replications
    pub replications: usize,
    /// Scenario label used for output file names
    pub label: String,
    /// Horizon in months
    pub horizon_months: u32,
    /// Firm population size
    pub firms_count: usize,
    /// Base seed; replication `i` runs on `seed_base + i`
    pub seed_base: u64,
}

impl RunConfig {
    /// Baseline configuration for a scenario label and UBI level.
    pub fn new(label: impl Into<String>, ubi_monthly: f64, replications: usize) -> Self {
        Self {
            ubi_monthly,
            replications,
            label: label.into(),
            horizon_months: calib::HORIZON_MONTHS,
            firms_count: calib::FIRMS_COUNT,
            seed_base: 1,
        }
    }

    /// The no-UBI branch changes the uncertainty-discount schedule.
    pub fn is_no_ubi(&self) -> bool {
        self.ubi_monthly == 0.0
    }

    /// UBI-eligible population at this firm count.
    pub fn population(&self) -> f64 {
        calib::POPULATION_PER_FIRM * self.firms_count as f64
    }

    /// Raw labor force at this firm count.
    pub fn labor_force(&self) -> f64 {
        calib::LABOR_FORCE_PER_FIRM * self.firms_count as f64
    }

    /// Household income that maps to a demand multiplier of 1.0.
    pub fn baseline_income(&self) -> f64 {
        self.firms_count as f64 * calib::WORKERS_PER_FIRM * calib::INITIAL_WAGE
    }

    /// Check fatal preconditions. Called once, before the batch starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ubi_monthly < 0.0 {
            return Err(ConfigError::NegativeUbi(self.ubi_monthly));
        }
        if self.replications == 0 {
            return Err(ConfigError::ZeroReplications);
        }
        if self.horizon_months == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if self.firms_count == 0 {
            return Err(ConfigError::ZeroFirms);
        }
        Ok(())
    }
}

/// Fatal precondition violations in the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("UBI amount must be non-negative, got {0}")]
    NegativeUbi(f64),
    #[error("replication count must be at least 1")]
    ZeroReplications,
    #[error("horizon must be a positive number of months")]
    ZeroHorizon,
    #[error("firm count must be at least 1")]
    ZeroFirms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let cfg = RunConfig::new("baseline", 2000.0, 100);
        assert!(cfg.validate().is_ok());
        assert!(!cfg.is_no_ubi());
    }

    #[test]
    fn test_zero_ubi_selects_no_ubi_branch() {
        let cfg = RunConfig::new("nobdp", 0.0, 10);
        assert!(cfg.validate().is_ok());
        assert!(cfg.is_no_ubi());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut cfg = RunConfig::new("bad", -1.0, 10);
        assert!(matches!(cfg.validate(), Err(ConfigError::NegativeUbi(_))));

        cfg = RunConfig::new("bad", 0.0, 0);
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroReplications)));

        cfg = RunConfig::new("bad", 0.0, 1);
        cfg.horizon_months = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroHorizon)));

        cfg = RunConfig::new("bad", 0.0, 1);
        cfg.firms_count = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroFirms)));
    }
}
