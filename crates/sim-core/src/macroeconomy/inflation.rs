//! Inflation
//!
//! Monthly inflation combines demand pull, cost push (wage growth),
//! imported inflation (positive exchange-rate deviation only) and
//! technology-driven deflation, with automation weighted above hybrid to
//! reflect supply-chain spillovers. Deflation beyond 1.5% a month only
//! passes through at 30% (sticky-price asymmetry). The annualized value
//! is smoothed 70/30 against the previous month.

use crate::config::calib;

pub mod params {
    /// Monthly inflation per unit of demand-multiplier deviation
    pub const DEMAND_PULL: f64 = 0.010;
    /// Pass-through of monthly wage growth
    pub const COST_PUSH: f64 = 0.30;
    /// Monthly inflation per unit of positive exchange-rate deviation
    pub const IMPORTED: f64 = 0.010;
    /// Monthly deflation per unit of automation ratio
    pub const TECH_DEFLATION_AUTO: f64 = 0.006;
    /// Monthly deflation per unit of hybrid ratio
    pub const TECH_DEFLATION_HYBRID: f64 = 0.002;
    /// Soft floor: monthly deflation beyond this only partially passes through
    pub const DEFLATION_SOFT_FLOOR: f64 = -0.015;
    /// Pass-through share below the soft floor
    pub const DEFLATION_PASSTHROUGH: f64 = 0.30;
    /// Smoothing weight on the previous annualized value
    pub const SMOOTHING: f64 = 0.7;
}

/// This month's inflation drivers.
#[derive(Debug, Clone, Copy)]
pub struct InflationInputs {
    pub demand_multiplier: f64,
    /// Monthly market wage growth
    pub wage_growth: f64,
    /// (exchange rate - initial) / initial
    pub ex_rate_deviation: f64,
    pub automation_ratio: f64,
    pub hybrid_ratio: f64,
}

/// New (annualized inflation, price level) pair.
pub fn update_inflation(
    prev_annual: f64,
    prev_price_level: f64,
    inputs: &InflationInputs,
) -> (f64, f64) {
    let mut monthly = params::DEMAND_PULL * (inputs.demand_multiplier - 1.0)
        + params::COST_PUSH * inputs.wage_growth
        + params::IMPORTED * inputs.ex_rate_deviation.max(0.0)
        - params::TECH_DEFLATION_AUTO * inputs.automation_ratio
        - params::TECH_DEFLATION_HYBRID * inputs.hybrid_ratio;

    if monthly < params::DEFLATION_SOFT_FLOOR {
        let excess = monthly - params::DEFLATION_SOFT_FLOOR;
        monthly = params::DEFLATION_SOFT_FLOOR + params::DEFLATION_PASSTHROUGH * excess;
    }

    let annual = params::SMOOTHING * prev_annual + (1.0 - params::SMOOTHING) * monthly * 12.0;
    let price_level = (prev_price_level * (1.0 + monthly)).max(calib::PRICE_LEVEL_FLOOR);
    (annual, price_level)
}
