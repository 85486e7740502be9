//! Monthly Step Orchestrator
//!
//! Sequences firm processing and macro updates for one simulated month,
//! enforcing stock-flow consistency: every monetary flow accumulated from
//! the firms lands in a matching stock (bank book, government debt,
//! household accounts). Produces a brand-new world state and firm array;
//! the previous month's values are never mutated.

use rand::rngs::SmallRng;

use crate::bank::{lending_rate, update_banking, BankFlows, LoanDesk};
use crate::config::{calib, RunConfig};
use crate::decision::decide;
use crate::firm::Firm;
use crate::macroeconomy::central_bank::update_reference_rate;
use crate::macroeconomy::foreign::{update_foreign, ForeignInputs};
use crate::macroeconomy::government::{update_government, GovernmentInputs};
use crate::macroeconomy::inflation::{update_inflation, InflationInputs};
use crate::macroeconomy::labor::clear_labor_market;
use crate::sectors::SECTOR_COUNT;
use crate::world::{HouseholdState, WorldState};

/// Advance the economy by one month.
pub fn advance_month(
    world: &WorldState,
    firms: &[Firm],
    cfg: &RunConfig,
    rng: &mut SmallRng,
) -> (WorldState, Vec<Firm>) {
    let month = world.month + 1;
    let ubi_active = !cfg.is_no_ubi() && month >= calib::SHOCK_MONTH;

    // Labor market
    let reservation_wage = calib::RESERVATION_BASE * world.price_level
        + if ubi_active {
            calib::RESERVATION_UBI_WEIGHT * cfg.ubi_monthly
        } else {
            0.0
        };
    let labor_demand: f64 = firms
        .iter()
        .map(|f| f64::from(f.technology.workers()))
        .sum();
    let labor = clear_labor_market(
        world.households.market_wage,
        reservation_wage,
        labor_demand,
        cfg.labor_force(),
    );

    // Household income, consumption and its domestic/import split
    let ubi_income = if ubi_active {
        cfg.population() * cfg.ubi_monthly
    } else {
        0.0
    };
    let total_income = labor.employed * labor.market_wage + ubi_income;
    let consumption = calib::MPC * total_income;
    let import_share = (calib::IMPORT_CONSUMPTION_SHARE * calib::INITIAL_EX_RATE
        / world.foreign.exchange_rate)
        .clamp(0.10, 0.40);
    let consumption_imported = import_share * consumption;
    let consumption_domestic = consumption - consumption_imported;

    // Demand multiplier from income deviation
    let baseline_income = cfg.baseline_income();
    let income_deviation = (total_income - baseline_income) / baseline_income;
    let demand_multiplier = (1.0 + calib::DEMAND_SENSITIVITY * income_deviation)
        .clamp(calib::DEMAND_MULT_MIN, calib::DEMAND_MULT_MAX);

    // Bank lending conditions for the month
    let npl_ratio = world.banking.npl_ratio();
    let rate = lending_rate(world.central_bank.reference_rate, npl_ratio);
    let desk = LoanDesk::new(&world.banking);

    // The world the firms see: previous month's macro state with this
    // month's demand conditions already resolved
    let mut firm_view = world.clone();
    firm_view.month = month;
    firm_view.demand_multiplier = demand_multiplier;
    firm_view.households.market_wage = labor.market_wage;

    // Process every firm against the previous population snapshot
    let mut next_firms = Vec::with_capacity(firms.len());
    let mut total_cit = 0.0;
    let mut total_capex = 0.0;
    let mut total_tech_imports = 0.0;
    let mut total_new_loans = 0.0;
    let mut total_interest = 0.0;
    let mut new_npl = 0.0;
    for firm in firms {
        let (next, flows) = decide(firm, &firm_view, rate, &desk, firms, cfg, rng);
        total_cit += flows.tax;
        total_capex += flows.capex;
        total_tech_imports += flows.tech_imports;
        total_new_loans += flows.new_loans;
        total_interest += flows.interest_paid;
        new_npl += flows.defaulted_debt;
        next_firms.push(next);
    }
    tracing::debug!(
        month,
        capex = total_capex,
        new_loans = total_new_loans,
        defaults = new_npl,
        "firm flows accumulated"
    );

    // Bank balance sheet
    let banking = update_banking(
        &world.banking,
        &BankFlows {
            new_loans: total_new_loans,
            new_npl,
            interest_income: total_interest,
            household_saving: total_income - consumption,
        },
    );

    // Aggregate adoption ratios and the GDP proxy
    let total = next_firms.len().max(1) as f64;
    let automated = next_firms
        .iter()
        .filter(|f| f.technology.is_automated())
        .count() as f64;
    let hybrid = next_firms
        .iter()
        .filter(|f| f.technology.is_hybrid())
        .count() as f64;
    let automation_ratio = automated / total;
    let hybrid_ratio = hybrid / total;

    let mut sector_total = [0usize; SECTOR_COUNT];
    let mut sector_adopted = [0usize; SECTOR_COUNT];
    for f in &next_firms {
        sector_total[f.sector] += 1;
        if f.technology.is_automated() || f.technology.is_hybrid() {
            sector_adopted[f.sector] += 1;
        }
    }
    let mut sector_adoption = [0.0; SECTOR_COUNT];
    for i in 0..SECTOR_COUNT {
        sector_adoption[i] = if sector_total[i] == 0 {
            0.0
        } else {
            sector_adopted[i] as f64 / sector_total[i] as f64
        };
    }

    let base_spend = calib::GOV_BASE_SPEND_PER_FIRM * cfg.firms_count as f64;
    let gdp_proxy =
        consumption_domestic + base_spend * world.price_level + world.foreign.exports;

    // Macro updates, in dependency order
    let wage_growth = labor.market_wage / world.households.market_wage - 1.0;
    let ex_deviation = world.foreign.exchange_rate / calib::INITIAL_EX_RATE - 1.0;
    let (inflation_annual, price_level) = update_inflation(
        world.inflation_annual,
        world.price_level,
        &InflationInputs {
            demand_multiplier,
            wage_growth,
            ex_rate_deviation: ex_deviation,
            automation_ratio,
            hybrid_ratio,
        },
    );

    let foreign = update_foreign(
        &world.foreign,
        &ForeignInputs {
            consumption_imports: consumption_imported,
            tech_imports: total_tech_imports,
            automation_ratio,
            reference_rate: world.central_bank.reference_rate,
            price_level,
            firms_count: cfg.firms_count as f64,
        },
    );

    let reference_rate = update_reference_rate(
        world.central_bank.reference_rate,
        inflation_annual,
        foreign.exchange_rate,
    );

    let vat_revenue = calib::VAT_RATE * consumption / (1.0 + calib::VAT_RATE);
    let government = update_government(
        &world.government,
        &GovernmentInputs {
            ubi_active,
            ubi_monthly: cfg.ubi_monthly,
            population: cfg.population(),
            base_spend,
            price_level,
            cit_revenue: total_cit,
            vat_revenue,
        },
    );

    let next_world = WorldState {
        month,
        inflation_annual,
        price_level,
        demand_multiplier,
        government,
        central_bank: crate::world::CentralBankState { reference_rate },
        banking,
        foreign,
        households: HouseholdState {
            employed: labor.employed,
            market_wage: labor.market_wage,
            reservation_wage,
            labor_supply: labor.labor_supply,
            total_income,
            consumption_domestic,
            consumption_imported,
        },
        automation_ratio,
        hybrid_ratio,
        sector_adoption,
        gdp_proxy,
        unemployment_rate: labor.unemployment_rate,
    };

    (next_world, next_firms)
}
