//! Foreign Sector
//!
//! Exports scale with real exchange-rate competitiveness and an
//! automation-driven boost; imports are consumption imports plus
//! technology imports. The trade balance plus interest-differential
//! capital flows produce balance-of-payments pressure that moves the
//! exchange rate at a capped speed within a plausible band.

use crate::config::calib;
use crate::world::ForeignState;

pub mod params {
    /// Monthly export volume per firm at the initial exchange rate
    pub const EXPORT_BASE_PER_FIRM: f64 = 20_000.0;
    /// Export elasticity to exchange-rate competitiveness
    pub const EXPORT_ELASTICITY: f64 = 0.8;
    /// Export boost at full automation
    pub const EXPORT_AUTO_BOOST: f64 = 0.5;
    /// Foreign (ECB) policy rate for the interest differential
    pub const FOREIGN_RATE: f64 = 0.02;
    /// Capital inflow per firm per unit of interest differential
    pub const CAPITAL_FLOW_SCALE_PER_FIRM: f64 = 400_000.0;
    /// Normalization of BoP pressure, per firm
    pub const BOP_NORM_PER_FIRM: f64 = 100_000.0;
    /// Exchange-rate adjustment speed per unit of pressure
    pub const EX_ADJ_SPEED: f64 = 0.01;
    /// Monthly exchange-rate move cap
    pub const EX_STEP_CAP: f64 = 0.02;
    pub const EX_RATE_MIN: f64 = 3.0;
    pub const EX_RATE_MAX: f64 = 8.0;
}

/// This month's foreign-sector drivers.
#[derive(Debug, Clone, Copy)]
pub struct ForeignInputs {
    pub consumption_imports: f64,
    pub tech_imports: f64,
    pub automation_ratio: f64,
    pub reference_rate: f64,
    pub price_level: f64,
    /// Firm population, used to scale the absolute flow volumes
    pub firms_count: f64,
}

/// New foreign-sector sub-state.
pub fn update_foreign(prev: &ForeignState, inputs: &ForeignInputs) -> ForeignState {
    // Real competitiveness: a weaker PLN or lower domestic prices helps exports
    let competitiveness =
        (prev.exchange_rate / calib::INITIAL_EX_RATE) / inputs.price_level.max(0.1);
    let exports = params::EXPORT_BASE_PER_FIRM
        * inputs.firms_count
        * competitiveness.powf(params::EXPORT_ELASTICITY)
        * (1.0 + params::EXPORT_AUTO_BOOST * inputs.automation_ratio);

    let imports = inputs.consumption_imports + inputs.tech_imports;
    let trade_balance = exports - imports;

    let capital_flows = (inputs.reference_rate - params::FOREIGN_RATE)
        * params::CAPITAL_FLOW_SCALE_PER_FIRM
        * inputs.firms_count;
    let bop_pressure =
        (trade_balance + capital_flows) / (params::BOP_NORM_PER_FIRM * inputs.firms_count);

    // Surplus appreciates the PLN (rate falls), deficit depreciates it
    let step = (-params::EX_ADJ_SPEED * bop_pressure)
        .clamp(-params::EX_STEP_CAP, params::EX_STEP_CAP);
    let exchange_rate = (prev.exchange_rate * (1.0 + step))
        .clamp(params::EX_RATE_MIN, params::EX_RATE_MAX);

    ForeignState {
        exchange_rate,
        imports,
        exports,
        trade_balance,
        tech_imports: inputs.tech_imports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prev() -> ForeignState {
        ForeignState {
            exchange_rate: calib::INITIAL_EX_RATE,
            imports: 150_000_000.0,
            exports: 200_000_000.0,
            trade_balance: 50_000_000.0,
            tech_imports: 0.0,
        }
    }

    fn inputs() -> ForeignInputs {
        ForeignInputs {
            consumption_imports: 150_000_000.0,
            tech_imports: 0.0,
            automation_ratio: 0.0,
            reference_rate: 0.05,
            price_level: 1.0,
            firms_count: 10_000.0,
        }
    }

    #[test]
    fn test_exchange_rate_stays_in_band() {
        let mut state = prev();
        let mut driving = inputs();
        driving.tech_imports = 5_000_000_000.0;
        for _ in 0..600 {
            state = update_foreign(&state, &driving);
            assert!(state.exchange_rate >= params::EX_RATE_MIN);
            assert!(state.exchange_rate <= params::EX_RATE_MAX);
        }
    }

    #[test]
    fn test_automation_boosts_exports() {
        let base = update_foreign(&prev(), &inputs());
        let mut automated = inputs();
        automated.automation_ratio = 1.0;
        let boosted = update_foreign(&prev(), &automated);
        assert!(boosted.exports > base.exports);
    }

    #[test]
    fn test_surplus_appreciates() {
        let mut surplus = inputs();
        surplus.consumption_imports = 0.0;
        surplus.reference_rate = 0.10;
        let next = update_foreign(&prev(), &surplus);
        assert!(next.exchange_rate < prev().exchange_rate);
    }

    #[test]
    fn test_monthly_move_capped() {
        let mut deficit = inputs();
        deficit.tech_imports = 50_000_000_000.0;
        let next = update_foreign(&prev(), &deficit);
        let max_up = prev().exchange_rate * (1.0 + params::EX_STEP_CAP);
        assert!(next.exchange_rate <= max_up + 1e-9);
    }
}
