//! Labor Market
//!
//! Logistic labor-supply curve in wage/reservation-wage; the wage adjusts
//! toward clearing via an excess-demand term, and employment is the
//! minimum of demand and supply at the new wage. Unemployment is measured
//! against participating supply, so a higher reservation wage (e.g. from
//! UBI) shrinks the base.

pub mod params {
    /// Steepness of the logistic participation curve
    pub const SUPPLY_STEEPNESS: f64 = 5.0;
    /// Wage adjustment speed toward clearing
    pub const WAGE_ADJ_SPEED: f64 = 0.4;
    /// Monthly wage change cap (either direction)
    pub const WAGE_STEP_CAP: f64 = 0.02;
    /// Nominal wage floor
    pub const WAGE_FLOOR: f64 = 1_000.0;
}

/// Result of one month's labor-market clearing.
#[derive(Debug, Clone, Copy)]
pub struct LaborOutcome {
    pub market_wage: f64,
    pub labor_supply: f64,
    pub employed: f64,
    pub unemployment_rate: f64,
}

/// Participating labor supply at a given wage and reservation wage.
fn labor_supply(wage: f64, reservation_wage: f64, labor_force: f64) -> f64 {
    let x = wage / reservation_wage.max(1.0) - 1.0;
    let participation = 1.0 / (1.0 + (-params::SUPPLY_STEEPNESS * x).exp());
    labor_force * participation
}

/// Clear the labor market for one month.
pub fn clear_labor_market(
    prev_wage: f64,
    reservation_wage: f64,
    labor_demand: f64,
    labor_force: f64,
) -> LaborOutcome {
    let supply_at_prev = labor_supply(prev_wage, reservation_wage, labor_force);
    let excess = (labor_demand - supply_at_prev) / labor_force;
    let step = (params::WAGE_ADJ_SPEED * excess).clamp(-params::WAGE_STEP_CAP, params::WAGE_STEP_CAP);
    let market_wage = (prev_wage * (1.0 + step)).max(params::WAGE_FLOOR);

    let supply = labor_supply(market_wage, reservation_wage, labor_force);
    let employed = labor_demand.min(supply).max(0.0);
    let unemployment_rate = if supply <= 0.0 {
        0.0
    } else {
        (1.0 - employed / supply).clamp(0.0, 1.0)
    };
    LaborOutcome {
        market_wage,
        labor_supply: supply,
        employed,
        unemployment_rate,
    }
}
