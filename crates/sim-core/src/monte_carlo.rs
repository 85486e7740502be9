//! Monte Carlo Orchestrator
//!
//! Runs N independent replications, each on its own deterministically
//! derived seed, and folds them into cross-replication statistics: per
//! month and per column, the mean, standard deviation, and 5th/95th
//! nearest-rank percentiles, plus a per-replication terminal table.
//!
//! Replications are embarrassingly parallel: each owns its RNG, so the
//! fan-out over a rayon pool is bit-identical to the sequential order.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::RunConfig;
use crate::output::{MonthRow, COLUMNS, COLUMN_COUNT};
use crate::run::{run_single, RunResult};

/// Mean/std/percentile summary of one column at one month.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub std: f64,
    pub p05: f64,
    pub p95: f64,
}

/// Cross-replication time series: `stats[month][column]` for every
/// non-Month column, in output column order.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedTimeseries {
    pub months: Vec<u32>,
    pub stats: Vec<Vec<ColumnStats>>,
}

/// Everything a Monte Carlo batch produces.
#[derive(Debug, Clone)]
pub struct MonteCarloResult {
    pub config: RunConfig,
    /// One result per replication, in replication order
    pub runs: Vec<RunResult>,
    pub timeseries: AggregatedTimeseries,
    /// Cross-replication stats of the terminal month, per non-Month column
    pub terminal_stats: Vec<ColumnStats>,
}

/// Nearest-rank percentile of a sorted slice (q in [0, 1]).
pub fn percentile_nearest_rank(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = ((q * sorted.len() as f64).ceil() as usize).max(1);
    sorted[rank.min(sorted.len()) - 1]
}

/// Summarize one sample of column values across replications.
pub fn column_stats(values: &[f64]) -> ColumnStats {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite column values"));
    ColumnStats {
        mean,
        std: variance.sqrt(),
        p05: percentile_nearest_rank(&sorted, 0.05),
        p95: percentile_nearest_rank(&sorted, 0.95),
    }
}

fn aggregate_timeseries(runs: &[RunResult], horizon: usize) -> AggregatedTimeseries {
    let mut months = Vec::with_capacity(horizon);
    let mut stats = Vec::with_capacity(horizon);
    for m in 0..horizon {
        months.push(runs[0].rows[m].month);
        let per_month: Vec<[f64; COLUMN_COUNT]> =
            runs.iter().map(|r| r.rows[m].values()).collect();
        let mut month_stats = Vec::with_capacity(COLUMN_COUNT - 1);
        for col in 1..COLUMN_COUNT {
            let values: Vec<f64> = per_month.iter().map(|v| v[col]).collect();
            month_stats.push(column_stats(&values));
        }
        stats.push(month_stats);
    }
    AggregatedTimeseries { months, stats }
}

fn aggregate_terminal(runs: &[RunResult]) -> Vec<ColumnStats> {
    let terminal: Vec<[f64; COLUMN_COUNT]> =
        runs.iter().map(|r| r.terminal().values()).collect();
    (1..COLUMN_COUNT)
        .map(|col| {
            let values: Vec<f64> = terminal.iter().map(|v| v[col]).collect();
            column_stats(&values)
        })
        .collect()
}

/// Run the full batch. `parallel = false` forces sequential execution;
/// results are identical either way because replication `i` always runs
/// on seed `seed_base + i`.
pub fn run_monte_carlo(cfg: &RunConfig, parallel: bool) -> MonteCarloResult {
    tracing::info!(
        label = %cfg.label,
        ubi = cfg.ubi_monthly,
        replications = cfg.replications,
        parallel,
        "starting Monte Carlo batch"
    );
    let seeds: Vec<u64> = (0..cfg.replications)
        .map(|i| cfg.seed_base + i as u64)
        .collect();
    let runs: Vec<RunResult> = if parallel {
        seeds.par_iter().map(|&s| run_single(cfg, s)).collect()
    } else {
        seeds.iter().map(|&s| run_single(cfg, s)).collect()
    };

    let horizon = cfg.horizon_months as usize;
    let timeseries = aggregate_timeseries(&runs, horizon);
    let terminal_stats = aggregate_terminal(&runs);
    tracing::info!(label = %cfg.label, "batch finished");
    MonteCarloResult {
        config: cfg.clone(),
        runs,
        timeseries,
        terminal_stats,
    }
}

/// JSON-friendly batch summary (configuration + terminal stats by column).
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub config: RunConfig,
    pub terminal: Vec<NamedStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedStats {
    pub column: &'static str,
    #[serde(flatten)]
    pub stats: ColumnStats,
}

impl MonteCarloResult {
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            config: self.config.clone(),
            terminal: self
                .terminal_stats
                .iter()
                .enumerate()
                .map(|(i, &stats)| NamedStats {
                    column: COLUMNS[i + 1],
                    stats,
                })
                .collect(),
        }
    }
}
