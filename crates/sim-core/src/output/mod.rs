//! Output Tables
//!
//! Row and column definitions for the per-month output table, plus the
//! CSV/JSON writers the reporting pipeline consumes. Column order and
//! naming are fixed for downstream compatibility.

pub mod csv;

use serde::Serialize;

use crate::sectors::SECTOR_COUNT;
use crate::world::WorldState;

/// Number of output columns (Month included).
pub const COLUMN_COUNT: usize = 12 + SECTOR_COUNT;

/// Output column names, in order. The six trailing columns are the
/// per-sector automated+hybrid shares in registry order.
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "Month",
    "Inflation",
    "Unemployment",
    "TotalAdoption",
    "ExRate",
    "MarketWage",
    "GovDebt",
    "NPL",
    "RefRate",
    "PriceLevel",
    "Automation",
    "Hybrid",
    "BPO_Auto",
    "Manuf_Auto",
    "Retail_Auto",
    "Health_Auto",
    "Public_Auto",
    "Agri_Auto",
];

/// One month of a single replication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    pub month: u32,
    pub inflation: f64,
    pub unemployment: f64,
    pub total_adoption: f64,
    pub ex_rate: f64,
    pub market_wage: f64,
    pub gov_debt: f64,
    pub npl: f64,
    pub ref_rate: f64,
    pub price_level: f64,
    pub automation: f64,
    pub hybrid: f64,
    pub sector_adoption: [f64; SECTOR_COUNT],
}

impl MonthRow {
    /// Snapshot the designated columns out of a world state.
    pub fn from_world(world: &WorldState) -> Self {
        MonthRow {
            month: world.month,
            inflation: world.inflation_annual,
            unemployment: world.unemployment_rate,
            total_adoption: world.automation_ratio + world.hybrid_ratio,
            ex_rate: world.foreign.exchange_rate,
            market_wage: world.households.market_wage,
            gov_debt: world.government.debt,
            npl: world.banking.npl_ratio(),
            ref_rate: world.central_bank.reference_rate,
            price_level: world.price_level,
            automation: world.automation_ratio,
            hybrid: world.hybrid_ratio,
            sector_adoption: world.sector_adoption,
        }
    }

    /// All column values in output order, month cast to f64.
    pub fn values(&self) -> [f64; COLUMN_COUNT] {
        let mut v = [0.0; COLUMN_COUNT];
        v[0] = f64::from(self.month);
        v[1] = self.inflation;
        v[2] = self.unemployment;
        v[3] = self.total_adoption;
        v[4] = self.ex_rate;
        v[5] = self.market_wage;
        v[6] = self.gov_debt;
        v[7] = self.npl;
        v[8] = self.ref_rate;
        v[9] = self.price_level;
        v[10] = self.automation;
        v[11] = self.hybrid;
        v[12..].copy_from_slice(&self.sector_adoption);
        v
    }
}
