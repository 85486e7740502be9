//! Sector Registry
//!
//! Static table of the six sectors (GUS 2024 calibration). Population
//! shares sum to exactly 1.0; rounding is absorbed by the last sector.
//! Higher CES elasticity (sigma) means capital substitutes for labor more
//! easily, which relaxes the profitability bar for automation.

/// Immutable sector definition.
#[derive(Debug, Clone, Copy)]
pub struct Sector {
    pub name: &'static str,
    /// Output column name for this sector's adoption ratio
    pub column: &'static str,
    /// Share of the firm population
    pub share: f64,
    /// CES elasticity of substitution
    pub sigma: f64,
    /// Wage level relative to the national baseline
    pub wage_mult: f64,
    /// Revenue per unit capacity relative to the national baseline
    pub revenue_mult: f64,
    /// Capex relative to the national baseline
    pub capex_mult: f64,
    /// Center of the initial digital-readiness distribution
    pub readiness_center: f64,
    /// Fraction of the workforce a hybrid conversion retains
    pub hybrid_retain_frac: f64,
}

/// The fixed sector table, in registry (output column) order.
pub const SECTORS: [Sector; 6] = [
    Sector {
        name: "BPO/SSC",
        column: "BPO_Auto",
        share: 0.03,
        sigma: 50.0,
        wage_mult: 1.6,
        revenue_mult: 1.5,
        capex_mult: 1.2,
        readiness_center: 0.75,
        hybrid_retain_frac: 0.30,
    },
    Sector {
        name: "Manufacturing",
        column: "Manuf_Auto",
        share: 0.16,
        sigma: 10.0,
        wage_mult: 1.1,
        revenue_mult: 1.2,
        capex_mult: 1.4,
        readiness_center: 0.55,
        hybrid_retain_frac: 0.40,
    },
    Sector {
        name: "Retail/Services",
        column: "Retail_Auto",
        share: 0.45,
        sigma: 5.0,
        wage_mult: 0.9,
        revenue_mult: 1.0,
        capex_mult: 1.0,
        readiness_center: 0.45,
        hybrid_retain_frac: 0.50,
    },
    Sector {
        name: "Healthcare",
        column: "Health_Auto",
        share: 0.06,
        sigma: 2.0,
        wage_mult: 1.25,
        revenue_mult: 1.1,
        capex_mult: 1.3,
        readiness_center: 0.35,
        hybrid_retain_frac: 0.65,
    },
    Sector {
        name: "Public sector",
        column: "Public_Auto",
        share: 0.22,
        sigma: 1.0,
        wage_mult: 1.0,
        revenue_mult: 0.9,
        capex_mult: 1.1,
        readiness_center: 0.30,
        hybrid_retain_frac: 0.70,
    },
    Sector {
        name: "Agriculture",
        column: "Agri_Auto",
        share: 0.08,
        sigma: 3.0,
        wage_mult: 0.7,
        revenue_mult: 0.8,
        capex_mult: 1.15,
        readiness_center: 0.25,
        hybrid_retain_frac: 0.45,
    },
];

/// Number of sectors in the registry.
pub const SECTOR_COUNT: usize = SECTORS.len();

/// Lookup by registry index.
pub fn sector(index: usize) -> &'static Sector {
    &SECTORS[index]
}

/// Profitability-bar multiplier derived from sigma.
///
/// Monotonically increasing in sigma and capped at 1.0: high-sigma sectors
/// face a laxer cost margin before automation clears the bar, asymptoting
/// near certainty for very high sigma and never exceeding it.
pub fn sigma_threshold(sigma: f64) -> f64 {
    (0.88 + 0.075 * sigma.log10()).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_sum_to_one() {
        let total: f64 = SECTORS.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-12, "shares sum to {total}");
    }

    #[test]
    fn test_sigma_threshold_monotone_and_capped() {
        let sigmas = [0.5, 1.0, 2.0, 3.0, 5.0, 10.0, 50.0, 500.0];
        let mut prev = f64::NEG_INFINITY;
        for &s in &sigmas {
            let t = sigma_threshold(s);
            assert!(t >= prev, "threshold must be non-decreasing in sigma");
            assert!(t <= 1.0, "threshold must never exceed 1.0");
            prev = t;
        }
    }

    #[test]
    fn test_sigma_threshold_anchor_points() {
        // sigma = 1 sits at the 0.88 base; sigma = 50 is capped at 1.0
        assert!((sigma_threshold(1.0) - 0.88).abs() < 1e-12);
        assert_eq!(sigma_threshold(50.0), 1.0);
    }

    #[test]
    fn test_registry_order_matches_columns() {
        let cols: Vec<&str> = SECTORS.iter().map(|s| s.column).collect();
        assert_eq!(
            cols,
            vec![
                "BPO_Auto",
                "Manuf_Auto",
                "Retail_Auto",
                "Health_Auto",
                "Public_Auto",
                "Agri_Auto"
            ]
        );
    }
}
