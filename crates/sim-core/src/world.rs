//! World State
//!
//! The macro state of the economy. Exactly one live instance per
//! replication; the monthly orchestrator is the only writer and replaces
//! the whole value each month, so the previous month's state stays
//! inspectable and partial updates are impossible.

use serde::Serialize;

use crate::config::calib;
use crate::sectors::SECTOR_COUNT;

/// Government accounts. Deficits are permanently financed; there is no
/// solvency constraint on the sovereign.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GovernmentState {
    pub ubi_active: bool,
    pub tax_revenue: f64,
    pub ubi_spending: f64,
    pub deficit: f64,
    pub debt: f64,
}

/// Central bank sub-state.
#[derive(Debug, Clone, Serialize)]
pub struct CentralBankState {
    /// Annualized reference rate
    pub reference_rate: f64,
}

/// Banking sector balance sheet.
#[derive(Debug, Clone, Serialize)]
pub struct BankingState {
    pub loans: f64,
    /// Non-performing loan stock
    pub npl: f64,
    pub capital: f64,
    pub deposits: f64,
}

impl BankingState {
    /// NPL share of the total credit book, in [0, 1].
    pub fn npl_ratio(&self) -> f64 {
        let book = self.loans + self.npl;
        if book <= 0.0 {
            0.0
        } else {
            (self.npl / book).clamp(0.0, 1.0)
        }
    }
}

/// Foreign sector sub-state.
#[derive(Debug, Clone, Serialize)]
pub struct ForeignState {
    /// PLN/EUR, clamped to [3.0, 8.0]
    pub exchange_rate: f64,
    pub imports: f64,
    pub exports: f64,
    pub trade_balance: f64,
    pub tech_imports: f64,
}

/// Household sub-state.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdState {
    pub employed: f64,
    pub market_wage: f64,
    pub reservation_wage: f64,
    /// Participating labor supply at the current wage
    pub labor_supply: f64,
    pub total_income: f64,
    pub consumption_domestic: f64,
    pub consumption_imported: f64,
}

/// The full macro state for one month.
#[derive(Debug, Clone, Serialize)]
pub struct WorldState {
    pub month: u32,
    /// Annualized, smoothed inflation
    pub inflation_annual: f64,
    /// Cumulative price index, floored at 0.30
    pub price_level: f64,
    pub demand_multiplier: f64,
    pub government: GovernmentState,
    pub central_bank: CentralBankState,
    pub banking: BankingState,
    pub foreign: ForeignState,
    pub households: HouseholdState,
    /// Share of firms fully automated
    pub automation_ratio: f64,
    /// Share of firms in hybrid mode
    pub hybrid_ratio: f64,
    /// Automated + hybrid share per sector, registry order
    pub sector_adoption: [f64; SECTOR_COUNT],
    /// Domestic consumption + government base spending + exports
    pub gdp_proxy: f64,
    pub unemployment_rate: f64,
}

impl WorldState {
    /// Month-zero state from the calibration constants. All stocks scale
    /// with the firm count so small runs behave like the full economy.
    pub fn initial(firms_count: usize) -> Self {
        let firms = firms_count as f64;
        let labor_force = calib::LABOR_FORCE_PER_FIRM * firms;
        let employed = firms * f64::from(calib::INITIAL_WORKERS);
        let income = employed * calib::INITIAL_WAGE;
        let consumption = calib::MPC * income;
        let imported = calib::IMPORT_CONSUMPTION_SHARE * consumption;
        let exports = crate::macroeconomy::foreign::params::EXPORT_BASE_PER_FIRM * firms;
        WorldState {
            month: 0,
            inflation_annual: 0.035,
            price_level: 1.0,
            demand_multiplier: 1.0,
            government: GovernmentState::default(),
            central_bank: CentralBankState {
                reference_rate: 0.0575,
            },
            banking: BankingState {
                loans: 50_000.0 * firms,
                npl: 1_000.0 * firms,
                capital: 8_000.0 * firms,
                deposits: 90_000.0 * firms,
            },
            foreign: ForeignState {
                exchange_rate: calib::INITIAL_EX_RATE,
                imports: imported,
                exports,
                trade_balance: 0.0,
                tech_imports: 0.0,
            },
            households: HouseholdState {
                employed,
                market_wage: calib::INITIAL_WAGE,
                reservation_wage: calib::RESERVATION_BASE,
                labor_supply: labor_force,
                total_income: income,
                consumption_domestic: consumption - imported,
                consumption_imported: imported,
            },
            automation_ratio: 0.0,
            hybrid_ratio: 0.0,
            sector_adoption: [0.0; SECTOR_COUNT],
            gdp_proxy: consumption - imported
                + calib::GOV_BASE_SPEND_PER_FIRM * firms
                + exports,
            unemployment_rate: 1.0 - employed / labor_force,
        }
    }
}
