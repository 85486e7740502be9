//! Government Accounts
//!
//! UBI spending (population times per-capita amount, when active) plus
//! price-indexed base spending, minus CIT and VAT revenue, accumulated
//! into cumulative debt. Deficits are permanently financed; there is no
//! solvency constraint.

use crate::world::GovernmentState;

/// This month's fiscal flows.
#[derive(Debug, Clone, Copy)]
pub struct GovernmentInputs {
    pub ubi_active: bool,
    /// Per-capita monthly UBI amount
    pub ubi_monthly: f64,
    /// UBI-eligible population
    pub population: f64,
    /// Base spending at price level 1.0
    pub base_spend: f64,
    pub price_level: f64,
    /// CIT collected from firms this month
    pub cit_revenue: f64,
    /// VAT collected on consumption this month
    pub vat_revenue: f64,
}

/// New government sub-state.
pub fn update_government(prev: &GovernmentState, inputs: &GovernmentInputs) -> GovernmentState {
    let ubi_spending = if inputs.ubi_active {
        inputs.population * inputs.ubi_monthly
    } else {
        0.0
    };
    let base_spending = inputs.base_spend * inputs.price_level;
    let tax_revenue = inputs.cit_revenue + inputs.vat_revenue;
    let deficit = ubi_spending + base_spending - tax_revenue;
    GovernmentState {
        ubi_active: inputs.ubi_active,
        tax_revenue,
        ubi_spending,
        deficit,
        debt: prev.debt + deficit,
    }
}
