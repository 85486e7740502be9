//! Central Bank Rate Rule
//!
//! Augmented Taylor rule: neutral rate plus a positive-only inflation gap
//! term plus a positive-only exchange-rate pressure term, smoothed against
//! the previous rate with high inertia and clamped to a floor/ceiling band.

use crate::config::calib;

pub mod params {
    pub const NEUTRAL_RATE: f64 = 0.045;
    pub const INFLATION_TARGET: f64 = 0.025;
    /// Response to the positive inflation gap
    pub const ALPHA_INFLATION: f64 = 1.5;
    /// Response to positive exchange-rate depreciation pressure
    pub const BETA_EX_RATE: f64 = 0.5;
    /// Weight on the previous rate
    pub const INERTIA: f64 = 0.85;
    pub const RATE_FLOOR: f64 = 0.005;
    pub const RATE_CEILING: f64 = 0.12;
}

/// New annualized reference rate.
pub fn update_reference_rate(prev_rate: f64, inflation_annual: f64, exchange_rate: f64) -> f64 {
    let inflation_gap = (inflation_annual - params::INFLATION_TARGET).max(0.0);
    let ex_pressure = (exchange_rate / calib::INITIAL_EX_RATE - 1.0).max(0.0);
    let target = params::NEUTRAL_RATE
        + params::ALPHA_INFLATION * inflation_gap
        + params::BETA_EX_RATE * ex_pressure;
    let smoothed = params::INERTIA * prev_rate + (1.0 - params::INERTIA) * target;
    smoothed.clamp(params::RATE_FLOOR, params::RATE_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_target_drifts_to_neutral() {
        let mut rate = 0.10;
        for _ in 0..200 {
            rate = update_reference_rate(rate, params::INFLATION_TARGET, calib::INITIAL_EX_RATE);
        }
        assert!((rate - params::NEUTRAL_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_inflation_gap_is_one_sided() {
        let below = update_reference_rate(0.05, -0.05, calib::INITIAL_EX_RATE);
        let at = update_reference_rate(0.05, params::INFLATION_TARGET, calib::INITIAL_EX_RATE);
        assert_eq!(below, at);
        let above = update_reference_rate(0.05, 0.10, calib::INITIAL_EX_RATE);
        assert!(above > at);
    }

    #[test]
    fn test_depreciation_raises_rate() {
        let calm = update_reference_rate(0.05, 0.02, calib::INITIAL_EX_RATE);
        let weak_pln = update_reference_rate(0.05, 0.02, calib::INITIAL_EX_RATE * 1.2);
        assert!(weak_pln > calm);
        // Appreciation exerts no downward pressure
        let strong_pln = update_reference_rate(0.05, 0.02, calib::INITIAL_EX_RATE * 0.8);
        assert_eq!(strong_pln, calm);
    }

    #[test]
    fn test_band_clamp() {
        assert!(update_reference_rate(0.5, 0.8, 8.0) <= params::RATE_CEILING);
        assert!(update_reference_rate(0.0, -0.1, 3.0) >= params::RATE_FLOOR);
    }
}
