//! Firm Entity and Derived Quantities
//!
//! Per-firm state plus the pure functions computing capacity, operating
//! costs, and profit/loss. The technology state is a closed sum type:
//! every consumer matches exhaustively, so adding a variant forces all
//! call sites to be revisited.

use serde::{Deserialize, Serialize};

use crate::config::calib;
use crate::sectors::Sector;

/// Why a firm went under. Bankrupt is a domain outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankruptcyReason {
    /// Traditional firm's closing cash went negative
    LaborCostInsolvency,
    /// Hybrid firm's closing cash went negative
    HybridInsolvency,
    /// Automated firm's closing cash went negative
    LiquidityTrap,
    /// An automation rollout failed outright
    ImplementationFailure,
}

impl BankruptcyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankruptcyReason::LaborCostInsolvency => "labor cost insolvency",
            BankruptcyReason::HybridInsolvency => "hybrid insolvency",
            BankruptcyReason::LiquidityTrap => "liquidity trap",
            BankruptcyReason::ImplementationFailure => "AI implementation failure",
        }
    }
}

/// Technology state of a firm.
///
/// Transitions are one-directional except Traditional->Traditional
/// (worker shedding) and Hybrid->Hybrid (efficiency update). Any state
/// may transition to Bankrupt; Bankrupt is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TechnologyState {
    Traditional { workers: u32 },
    Hybrid { workers: u32, ai_efficiency: f64 },
    Automated { efficiency: f64 },
    Bankrupt { reason: BankruptcyReason },
}

impl TechnologyState {
    /// Workforce this firm contributes to labor demand.
    pub fn workers(&self) -> u32 {
        match self {
            TechnologyState::Traditional { workers } => *workers,
            TechnologyState::Hybrid { workers, .. } => *workers,
            TechnologyState::Automated { .. } => calib::SKELETON_CREW,
            TechnologyState::Bankrupt { .. } => 0,
        }
    }

    pub fn is_bankrupt(&self) -> bool {
        matches!(self, TechnologyState::Bankrupt { .. })
    }

    pub fn is_automated(&self) -> bool {
        matches!(self, TechnologyState::Automated { .. })
    }

    pub fn is_hybrid(&self) -> bool {
        matches!(self, TechnologyState::Hybrid { .. })
    }
}

/// One firm. Lives in a flat, index-stable arena for the whole run;
/// neighbor relations are plain indices into that arena. Bankrupt firms
/// keep their slot and their network node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firm {
    /// Stable arena index
    pub id: usize,
    pub cash: f64,
    pub debt: f64,
    pub technology: TechnologyState,
    /// Appetite for risky investment, fixed at creation, uniform in [0, 1]
    pub risk_profile: f64,
    /// Idiosyncratic innovation cost scaling, fixed at creation
    pub innovation_cost_factor: f64,
    /// Drifts upward toward 1.0 over the run
    pub digital_readiness: f64,
    /// Index into the sector registry
    pub sector: usize,
    /// Neighbor arena indices, fixed at creation from the network
    pub neighbors: Vec<usize>,
}

impl Firm {
    /// Production capacity in baseline-revenue units.
    pub fn capacity(&self, sector: &Sector) -> f64 {
        let raw = match self.technology {
            TechnologyState::Traditional { workers } => {
                (f64::from(workers) / calib::WORKERS_PER_FIRM).sqrt()
            }
            TechnologyState::Hybrid {
                workers,
                ai_efficiency,
            } => {
                0.4 * (f64::from(workers) / calib::WORKERS_PER_FIRM).sqrt() + 0.6 * ai_efficiency
            }
            TechnologyState::Automated { efficiency } => efficiency,
            TechnologyState::Bankrupt { .. } => 0.0,
        };
        raw * sector.revenue_mult
    }
}

/// Macro quantities a firm's monthly profit/loss depends on.
#[derive(Debug, Clone, Copy)]
pub struct CostContext {
    pub market_wage: f64,
    pub price_level: f64,
    /// Exchange rate relative to its initial value; prices imported inputs
    pub import_price_factor: f64,
    pub demand_multiplier: f64,
    /// Annualized bank lending rate
    pub lending_rate: f64,
}

/// One month's revenue, cost, and tax picture for a firm.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatingResult {
    pub revenue: f64,
    pub costs: f64,
    /// CIT on positive pre-tax profit
    pub tax: f64,
    /// Profit after tax (may be negative)
    pub net: f64,
    /// Interest on outstanding debt (included in `costs`)
    pub interest: f64,
}

/// Monthly cost bill for a given workforce, capacity, and debt.
pub fn monthly_costs(
    workers: u32,
    capacity: f64,
    debt: f64,
    sector: &Sector,
    ctx: &CostContext,
) -> f64 {
    let wage_bill = f64::from(workers) * ctx.market_wage * sector.wage_mult;
    let fixed = calib::FIXED_OTHER_COST * ctx.price_level;
    let opex = calib::OPEX_PER_CAPACITY
        * capacity
        * ctx.price_level
        * (calib::OPEX_DOMESTIC_SHARE
            + (1.0 - calib::OPEX_DOMESTIC_SHARE) * ctx.import_price_factor);
    let interest = debt * ctx.lending_rate / 12.0;
    wage_bill + fixed + opex + interest
}

/// Compute a firm's ordinary monthly operating result.
pub fn operating_result(firm: &Firm, sector: &Sector, ctx: &CostContext) -> OperatingResult {
    if firm.technology.is_bankrupt() {
        return OperatingResult::default();
    }
    let capacity = firm.capacity(sector);
    let revenue = capacity * calib::BASE_REVENUE * ctx.demand_multiplier * ctx.price_level;
    let costs = monthly_costs(firm.technology.workers(), capacity, firm.debt, sector, ctx);
    let interest = firm.debt * ctx.lending_rate / 12.0;
    let pre_tax = revenue - costs;
    let tax = calib::CIT_RATE * pre_tax.max(0.0);
    OperatingResult {
        revenue,
        costs,
        tax,
        net: pre_tax - tax,
        interest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sectors::SECTORS;

    fn ctx() -> CostContext {
        CostContext {
            market_wage: calib::INITIAL_WAGE,
            price_level: 1.0,
            import_price_factor: 1.0,
            demand_multiplier: 1.0,
            lending_rate: 0.08,
        }
    }

    fn test_firm(technology: TechnologyState) -> Firm {
        Firm {
            id: 0,
            cash: 100_000.0,
            debt: 0.0,
            technology,
            risk_profile: 0.5,
            innovation_cost_factor: 1.0,
            digital_readiness: 0.5,
            sector: 2,
            neighbors: vec![],
        }
    }

    #[test]
    fn test_workers_per_variant() {
        assert_eq!(TechnologyState::Traditional { workers: 10 }.workers(), 10);
        assert_eq!(
            TechnologyState::Hybrid {
                workers: 5,
                ai_efficiency: 1.1
            }
            .workers(),
            5
        );
        assert_eq!(
            TechnologyState::Automated { efficiency: 1.3 }.workers(),
            calib::SKELETON_CREW
        );
        assert_eq!(
            TechnologyState::Bankrupt {
                reason: BankruptcyReason::LiquidityTrap
            }
            .workers(),
            0
        );
    }

    #[test]
    fn test_bankrupt_has_zero_capacity_and_result() {
        let firm = test_firm(TechnologyState::Bankrupt {
            reason: BankruptcyReason::LaborCostInsolvency,
        });
        assert_eq!(firm.capacity(&SECTORS[2]), 0.0);
        let res = operating_result(&firm, &SECTORS[2], &ctx());
        assert_eq!(res.revenue, 0.0);
        assert_eq!(res.costs, 0.0);
        assert_eq!(res.tax, 0.0);
    }

    #[test]
    fn test_traditional_capacity_sqrt_scaling() {
        let full = test_firm(TechnologyState::Traditional { workers: 10 });
        let half = test_firm(TechnologyState::Traditional { workers: 5 });
        let s = &SECTORS[2];
        assert!((full.capacity(s) - s.revenue_mult).abs() < 1e-12);
        assert!((half.capacity(s) - s.revenue_mult * 0.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_interest_enters_costs() {
        let mut firm = test_firm(TechnologyState::Traditional { workers: 10 });
        let base = operating_result(&firm, &SECTORS[2], &ctx()).costs;
        firm.debt = 120_000.0;
        let with_debt = operating_result(&firm, &SECTORS[2], &ctx());
        assert!((with_debt.costs - base - 120_000.0 * 0.08 / 12.0).abs() < 1e-9);
        assert!(with_debt.interest > 0.0);
    }

    #[test]
    fn test_tax_only_on_profit() {
        let firm = test_firm(TechnologyState::Traditional { workers: 10 });
        let mut expensive = ctx();
        expensive.market_wage = 100_000.0;
        let loss = operating_result(&firm, &SECTORS[2], &expensive);
        assert_eq!(loss.tax, 0.0);
        assert!(loss.net < 0.0);

        let mut boom = ctx();
        boom.demand_multiplier = 1.8;
        let profit = operating_result(&firm, &SECTORS[2], &boom);
        assert!(profit.tax > 0.0);
    }
}
