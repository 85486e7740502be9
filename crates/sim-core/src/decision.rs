//! Firm Decision Engine
//!
//! The stochastic per-firm monthly transition. Given a firm, the previous
//! month's macro state, the bank's credit desk and read-only access to the
//! previous population snapshot (for neighbor lookups), produce the firm's
//! new state plus the monetary flows it generated. Deterministic given the
//! replication RNG's state; the credit desk consumes its own draw per
//! candidate loan, full option first, hybrid second.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::bank::LoanDesk;
use crate::config::{calib, RunConfig};
use crate::firm::{
    monthly_costs, operating_result, BankruptcyReason, CostContext, Firm, TechnologyState,
};
use crate::sectors::{sector, sigma_threshold, Sector};
use crate::world::WorldState;

/// Adoption-probability tuning.
pub mod params {
    /// Risk-profile weight in the full-automation probability
    pub const FULL_RISK_WEIGHT: f64 = 0.1;
    /// Risk-profile weight in the hybrid probability
    pub const HYBRID_RISK_WEIGHT: f64 = 0.04;
    /// Weight of the local (neighbor) automation ratio in network pressure
    pub const LOCAL_PRESSURE_WEIGHT: f64 = 0.4;
    /// Weight of the global adoption ratio in network pressure
    pub const GLOBAL_PRESSURE_WEIGHT: f64 = 0.4;
    /// Pressure bonus when the firm is currently loss-making
    pub const DISTRESS_BONUS: f64 = 0.2;
    /// Weight of the "stuck" probability when only the cost gate blocks
    pub const STUCK_WEIGHT: f64 = 0.02;
    /// Required cost margin over projected full-automation cost
    pub const FULL_COST_MARGIN: f64 = 1.1;
    /// Required cost margin over projected hybrid cost
    pub const HYBRID_COST_MARGIN: f64 = 1.05;
    /// Local neighbor automation beyond this adds a demonstration bonus
    pub const DEMO_THRESHOLD: f64 = 0.4;
    /// Demonstration bonus per unit of excess local automation
    pub const DEMO_WEIGHT: f64 = 0.15;
    /// Hybrid-upgrade probability weights (risk, global automation)
    pub const UPGRADE_RISK_WEIGHT: f64 = 0.15;
    pub const UPGRADE_AUTO_WEIGHT: f64 = 0.3;
    /// Base implementation failure rate; poor readiness adds up to 0.10
    pub const FAIL_BASE: f64 = 0.05;
    pub const FAIL_READINESS_WEIGHT: f64 = 0.10;
    /// Probability a loss-making traditional firm sheds workers
    pub const SHED_PROB: f64 = 0.10;
    /// Workers shed at a time
    pub const SHED_COUNT: u32 = 2;
}

/// Monetary flows one firm generated this month.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirmFlows {
    /// CIT paid
    pub tax: f64,
    /// Capital expenditure (down payment + loan)
    pub capex: f64,
    /// Imported share of capex
    pub tech_imports: f64,
    /// New loan volume taken on
    pub new_loans: f64,
    /// Interest paid on outstanding debt
    pub interest_paid: f64,
    /// Outstanding debt defaulted on (bankruptcy this month)
    pub defaulted_debt: f64,
    /// Whether the firm went bankrupt this month
    pub went_bankrupt: bool,
}

/// Uncertainty discount gating all traditional-firm adoption probability.
///
/// Without UBI it ramps linearly from 0.15 toward 0.30 over the horizon;
/// with the UBI shock it is 0.15 before the shock month and 1.0 from the
/// shock month onward. Local neighbor automation above 40% adds a
/// demonstration bonus, capped so the total never exceeds 1.0.
pub fn uncertainty_discount(cfg: &RunConfig, month: u32, local_automation: f64) -> f64 {
    let base = if cfg.is_no_ubi() {
        0.15 + 0.15 * f64::from(month) / f64::from(cfg.horizon_months)
    } else if month < calib::SHOCK_MONTH {
        0.15
    } else {
        1.0
    };
    let demo = if local_automation > params::DEMO_THRESHOLD {
        params::DEMO_WEIGHT * (local_automation - params::DEMO_THRESHOLD)
    } else {
        0.0
    };
    (base + demo).min(1.0)
}

/// Share of this firm's graph neighbors that are fully automated.
/// Bankrupt neighbors still occupy their node and count as non-automated.
fn local_automation_ratio(firm: &Firm, population: &[Firm]) -> f64 {
    if firm.neighbors.is_empty() {
        return 0.0;
    }
    let automated = firm
        .neighbors
        .iter()
        .filter(|&&n| population[n].technology.is_automated())
        .count();
    automated as f64 / firm.neighbors.len() as f64
}

/// Projected monthly cost of running this firm fully automated
/// (efficiency 1.0, skeleton crew, loan added to the debt stock).
fn projected_full_cost(firm: &Firm, sec: &Sector, loan: f64, ctx: &CostContext) -> f64 {
    monthly_costs(
        calib::SKELETON_CREW,
        sec.revenue_mult,
        firm.debt + loan,
        sec,
        ctx,
    )
}

/// Projected monthly cost of hybrid mode with the retained workforce.
fn projected_hybrid_cost(
    firm: &Firm,
    sec: &Sector,
    retained: u32,
    loan: f64,
    ctx: &CostContext,
) -> f64 {
    let capacity =
        (0.4 * (f64::from(retained) / calib::WORKERS_PER_FIRM).sqrt() + 0.6) * sec.revenue_mult;
    monthly_costs(retained, capacity, firm.debt + loan, sec, ctx)
}

fn drift_readiness(readiness: f64) -> f64 {
    (readiness + calib::READINESS_DRIFT).min(1.0)
}

/// Process one firm for one month. Returns the replacement firm value and
/// the flows it generated. Reads only the previous month's world state and
/// population snapshot, so firms within a month are order-independent
/// except for their RNG draws.
pub fn decide(
    firm: &Firm,
    world: &WorldState,
    lending_rate: f64,
    desk: &LoanDesk,
    population: &[Firm],
    cfg: &RunConfig,
    rng: &mut SmallRng,
) -> (Firm, FirmFlows) {
    let mut next = firm.clone();
    let mut flows = FirmFlows::default();
    let sec = sector(firm.sector);
    let ctx = CostContext {
        market_wage: world.households.market_wage,
        price_level: world.price_level,
        import_price_factor: world.foreign.exchange_rate / calib::INITIAL_EX_RATE,
        demand_multiplier: world.demand_multiplier,
        lending_rate,
    };

    match firm.technology {
        TechnologyState::Bankrupt { .. } => (next, flows),
        TechnologyState::Automated { .. } => {
            let res = operating_result(firm, sec, &ctx);
            flows.tax = res.tax;
            flows.interest_paid = res.interest;
            next.digital_readiness = drift_readiness(firm.digital_readiness);
            if firm.cash + res.net < 0.0 {
                go_bankrupt(&mut next, &mut flows, res.net, BankruptcyReason::LiquidityTrap);
            } else {
                next.cash += res.net;
            }
            (next, flows)
        }
        TechnologyState::Hybrid { .. } => {
            decide_hybrid(firm, next, flows, world, sec, &ctx, desk, rng)
        }
        TechnologyState::Traditional { workers } => decide_traditional(
            firm, next, flows, workers, world, sec, &ctx, desk, cfg, population, rng,
        ),
    }
}

fn go_bankrupt(next: &mut Firm, flows: &mut FirmFlows, net: f64, reason: BankruptcyReason) {
    next.cash += net;
    flows.defaulted_debt = next.debt;
    flows.went_bankrupt = true;
    next.debt = 0.0;
    next.technology = TechnologyState::Bankrupt { reason };
}

#[allow(clippy::too_many_arguments)]
fn decide_hybrid(
    firm: &Firm,
    mut next: Firm,
    mut flows: FirmFlows,
    world: &WorldState,
    sec: &Sector,
    ctx: &CostContext,
    desk: &LoanDesk,
    rng: &mut SmallRng,
) -> (Firm, FirmFlows) {
    let res = operating_result(firm, sec, ctx);
    next.digital_readiness = drift_readiness(firm.digital_readiness);

    // Evaluate the upgrade to full automation
    let capex = calib::FULL_AI_CAPEX * sec.capex_mult * firm.innovation_cost_factor;
    let down = (1.0 - calib::FULL_AI_LOAN_SHARE) * capex;
    let loan = calib::FULL_AI_LOAN_SHARE * capex;
    let projected = projected_full_cost(firm, sec, loan, ctx);

    let cost_ok = res.costs > params::FULL_COST_MARGIN * projected;
    let afford_ok = firm.cash > down;
    let ready_ok = firm.digital_readiness >= calib::FULL_AI_READINESS_MIN;
    let gates_pass = desk_approves_if(cost_ok && afford_ok && ready_ok, desk, loan, rng);

    let upgrade_prob = if gates_pass {
        (firm.risk_profile * params::UPGRADE_RISK_WEIGHT
            + world.automation_ratio * params::UPGRADE_AUTO_WEIGHT)
            * firm.digital_readiness
    } else {
        0.0
    };

    if rng.gen::<f64>() < upgrade_prob {
        let efficiency = 1.0 + rng.gen_range(0.2..0.6) * firm.digital_readiness;
        next.technology = TechnologyState::Automated { efficiency };
        next.cash -= down;
        next.debt += loan;
        flows.capex = capex;
        flows.tech_imports = calib::TECH_IMPORT_SHARE * capex;
        flows.new_loans = loan;
        return (next, flows);
    }

    flows.tax = res.tax;
    flows.interest_paid = res.interest;
    if firm.cash + res.net < 0.0 {
        go_bankrupt(&mut next, &mut flows, res.net, BankruptcyReason::HybridInsolvency);
    } else {
        next.cash += res.net;
    }
    (next, flows)
}

/// Consult the credit desk only when the non-stochastic gates passed, so
/// the approval draw stays a separate, conditional call.
fn desk_approves_if(gates: bool, desk: &LoanDesk, loan: f64, rng: &mut SmallRng) -> bool {
    gates && desk.approves(loan, rng)
}

#[allow(clippy::too_many_arguments)]
fn decide_traditional(
    firm: &Firm,
    mut next: Firm,
    mut flows: FirmFlows,
    workers: u32,
    world: &WorldState,
    sec: &Sector,
    ctx: &CostContext,
    desk: &LoanDesk,
    cfg: &RunConfig,
    population: &[Firm],
    rng: &mut SmallRng,
) -> (Firm, FirmFlows) {
    let res = operating_result(firm, sec, ctx);
    next.digital_readiness = drift_readiness(firm.digital_readiness);
    let threshold = sigma_threshold(sec.sigma);

    // Option A: full automation
    let full_capex = calib::FULL_AI_CAPEX * sec.capex_mult * firm.innovation_cost_factor;
    let full_down = (1.0 - calib::FULL_AI_LOAN_SHARE) * full_capex;
    let full_loan = calib::FULL_AI_LOAN_SHARE * full_capex;
    let full_projected = projected_full_cost(firm, sec, full_loan, ctx);
    let full_cost_ok = res.costs > (params::FULL_COST_MARGIN / threshold) * full_projected;
    let full_afford_ok = firm.cash > full_down;
    let full_ready_ok = firm.digital_readiness >= calib::FULL_AI_READINESS_MIN;
    let full_bank_ok = desk_approves_if(
        full_cost_ok && full_afford_ok && full_ready_ok,
        desk,
        full_loan,
        rng,
    );
    let full_ok = full_cost_ok && full_afford_ok && full_ready_ok && full_bank_ok;

    // Option B: hybrid
    let retained = ((sec.hybrid_retain_frac * f64::from(workers)).round() as u32)
        .max(calib::MIN_WORKERS);
    let hyb_capex = calib::HYBRID_AI_CAPEX * sec.capex_mult * firm.innovation_cost_factor;
    let hyb_down = (1.0 - calib::HYBRID_LOAN_SHARE) * hyb_capex;
    let hyb_loan = calib::HYBRID_LOAN_SHARE * hyb_capex;
    let hyb_projected = projected_hybrid_cost(firm, sec, retained, hyb_loan, ctx);
    let hyb_cost_ok = res.costs > (params::HYBRID_COST_MARGIN / threshold) * hyb_projected;
    let hyb_afford_ok = firm.cash > hyb_down;
    let hyb_ready_ok = firm.digital_readiness >= calib::HYBRID_READINESS_MIN;
    let hyb_bank_ok = desk_approves_if(
        hyb_cost_ok && hyb_afford_ok && hyb_ready_ok,
        desk,
        hyb_loan,
        rng,
    );
    let hyb_ok = hyb_cost_ok && hyb_afford_ok && hyb_ready_ok && hyb_bank_ok;

    // Social/network pressure
    let local = local_automation_ratio(firm, population);
    let global = world.automation_ratio + 0.5 * world.hybrid_ratio;
    let mut pressure =
        params::LOCAL_PRESSURE_WEIGHT * local + params::GLOBAL_PRESSURE_WEIGHT * global;
    let distress = if res.net < 0.0 { params::DISTRESS_BONUS } else { 0.0 };
    pressure += distress;

    // A firm blocked only by the cost gate still tinkers at a small rate
    let stuck = !full_cost_ok && full_afford_ok && full_ready_ok;
    let stuck_prob = if stuck {
        params::STUCK_WEIGHT * firm.risk_profile * firm.digital_readiness
    } else {
        0.0
    };

    let discount = uncertainty_discount(cfg, world.month, local);
    let p_full = discount
        * if full_ok {
            (firm.risk_profile * params::FULL_RISK_WEIGHT + pressure) * firm.digital_readiness
        } else {
            stuck_prob
        };
    let p_hybrid = discount
        * if hyb_ok {
            (firm.risk_profile * params::HYBRID_RISK_WEIGHT
                + 0.5 * (pressure - distress)
                + 0.5 * distress)
                * firm.digital_readiness
        } else {
            0.0
        };

    let draw: f64 = rng.gen();
    if draw < p_full {
        return attempt_full(next, flows, firm, full_capex, full_down, full_loan, rng);
    }
    if draw < p_full + p_hybrid {
        return attempt_hybrid(next, flows, firm, retained, hyb_capex, hyb_down, hyb_loan, rng);
    }

    // Loss-making firms occasionally shed workers instead of investing
    let mut workers_now = workers;
    if res.net < 0.0
        && workers > calib::MIN_WORKERS
        && rng.gen::<f64>() < params::SHED_PROB
    {
        workers_now = workers.saturating_sub(params::SHED_COUNT).max(calib::MIN_WORKERS);
        next.technology = TechnologyState::Traditional {
            workers: workers_now,
        };
    }

    // Ordinary month: profit/loss at the (possibly reduced) workforce
    let res = if workers_now != workers {
        operating_result(&next, sec, ctx)
    } else {
        res
    };
    flows.tax = res.tax;
    flows.interest_paid = res.interest;
    if firm.cash + res.net < 0.0 {
        go_bankrupt(
            &mut next,
            &mut flows,
            res.net,
            BankruptcyReason::LaborCostInsolvency,
        );
    } else {
        next.cash += res.net;
    }
    (next, flows)
}

fn attempt_full(
    mut next: Firm,
    mut flows: FirmFlows,
    firm: &Firm,
    capex: f64,
    down: f64,
    loan: f64,
    rng: &mut SmallRng,
) -> (Firm, FirmFlows) {
    let fail_rate =
        params::FAIL_BASE + (1.0 - firm.digital_readiness) * params::FAIL_READINESS_WEIGHT;
    if rng.gen::<f64>() < fail_rate {
        // Rollout collapses: the down payment is sunk, no loan is booked
        next.cash -= down;
        flows.defaulted_debt = next.debt;
        flows.went_bankrupt = true;
        next.debt = 0.0;
        next.technology = TechnologyState::Bankrupt {
            reason: BankruptcyReason::ImplementationFailure,
        };
        return (next, flows);
    }
    let efficiency = 1.0 + rng.gen_range(0.05..0.6) * firm.digital_readiness;
    next.technology = TechnologyState::Automated { efficiency };
    next.cash -= down;
    next.debt += loan;
    flows.capex = capex;
    flows.tech_imports = calib::TECH_IMPORT_SHARE * capex;
    flows.new_loans = loan;
    (next, flows)
}

#[allow(clippy::too_many_arguments)]
fn attempt_hybrid(
    mut next: Firm,
    mut flows: FirmFlows,
    firm: &Firm,
    retained: u32,
    capex: f64,
    down: f64,
    loan: f64,
    rng: &mut SmallRng,
) -> (Firm, FirmFlows) {
    let fail_rate =
        params::FAIL_BASE + (1.0 - firm.digital_readiness) * params::FAIL_READINESS_WEIGHT;
    let draw: f64 = rng.gen();
    if draw < 0.4 * fail_rate {
        // Full failure of the hybrid rollout
        next.cash -= down;
        flows.defaulted_debt = next.debt;
        flows.went_bankrupt = true;
        next.debt = 0.0;
        next.technology = TechnologyState::Bankrupt {
            reason: BankruptcyReason::ImplementationFailure,
        };
        return (next, flows);
    }
    let ai_efficiency = if draw < fail_rate {
        // Partial failure: hybrid runs, but degraded
        rng.gen_range(0.85..1.05)
    } else {
        1.0 + (0.05 + rng.gen_range(0.0..0.15)) * (0.5 + 0.5 * firm.digital_readiness)
    };
    next.technology = TechnologyState::Hybrid {
        workers: retained,
        ai_efficiency,
    };
    next.cash -= down;
    next.debt += loan;
    flows.capex = capex;
    flows.tech_imports = calib::TECH_IMPORT_SHARE * capex;
    flows.new_loans = loan;
    (next, flows)
}
