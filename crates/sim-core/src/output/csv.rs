//! CSV Writers
//!
//! Semicolon-separated, decimal-comma CSV (Polish locale), the dialect the
//! downstream analysis pipeline loads. Three artifacts per scenario label:
//! the aggregated time series, the per-replication terminal table, and a
//! JSON summary.

use std::fs;
use std::io;
use std::path::Path;

use crate::monte_carlo::MonteCarloResult;
use crate::output::{COLUMNS, COLUMN_COUNT};

/// Format one value with a decimal comma.
fn fmt_pl(value: f64) -> String {
    format!("{value:.6}").replace('.', ",")
}

/// Write `<label>_timeseries.csv`: per month, mean/std/p05/p95 of every
/// non-Month column.
pub fn write_timeseries(dir: &Path, result: &MonteCarloResult) -> io::Result<()> {
    let mut header = vec!["Month".to_string()];
    for col in &COLUMNS[1..] {
        for suffix in ["mean", "std", "p05", "p95"] {
            header.push(format!("{col}_{suffix}"));
        }
    }
    let mut lines = vec![header.join(";")];
    let ts = &result.timeseries;
    for (i, &month) in ts.months.iter().enumerate() {
        let mut fields = vec![month.to_string()];
        for s in &ts.stats[i] {
            fields.push(fmt_pl(s.mean));
            fields.push(fmt_pl(s.std));
            fields.push(fmt_pl(s.p05));
            fields.push(fmt_pl(s.p95));
        }
        lines.push(fields.join(";"));
    }
    let path = dir.join(format!("{}_timeseries.csv", result.config.label));
    fs::write(path, lines.join("\n") + "\n")
}

/// Write `<label>_terminal.csv`: one row per replication with the
/// terminal-month value of every column.
pub fn write_terminal(dir: &Path, result: &MonteCarloResult) -> io::Result<()> {
    let mut header = vec!["Seed".to_string()];
    header.extend(COLUMNS[1..].iter().map(|c| c.to_string()));
    let mut lines = vec![header.join(";")];
    for run in &result.runs {
        let values = run.terminal().values();
        let mut fields = vec![run.seed.to_string()];
        fields.extend(values[1..COLUMN_COUNT].iter().map(|&v| fmt_pl(v)));
        lines.push(fields.join(";"));
    }
    let path = dir.join(format!("{}_terminal.csv", result.config.label));
    fs::write(path, lines.join("\n") + "\n")
}

/// Write `<label>_summary.json` for quick inspection.
pub fn write_summary(dir: &Path, result: &MonteCarloResult) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&result.summary())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let path = dir.join(format!("{}_summary.json", result.config.label));
    fs::write(path, json)
}

/// Write all three artifacts into `dir`, creating it if needed.
pub fn write_all(dir: &Path, result: &MonteCarloResult) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    write_timeseries(dir, result)?;
    write_terminal(dir, result)?;
    write_summary(dir, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::monte_carlo::run_monte_carlo;

    #[test]
    fn test_decimal_comma_formatting() {
        assert_eq!(fmt_pl(4.25), "4,250000");
        assert_eq!(fmt_pl(-0.5), "-0,500000");
    }

    #[test]
    fn test_artifacts_written() {
        let mut cfg = RunConfig::new("csvtest", 0.0, 2);
        cfg.firms_count = 50;
        cfg.horizon_months = 3;
        let result = run_monte_carlo(&cfg, false);

        let dir = std::env::temp_dir().join("sfc_abm_csv_test");
        write_all(&dir, &result).unwrap();

        let ts = fs::read_to_string(dir.join("csvtest_timeseries.csv")).unwrap();
        let mut lines = ts.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Month;Inflation_mean;Inflation_std"));
        assert_eq!(lines.count(), 3);

        let term = fs::read_to_string(dir.join("csvtest_terminal.csv")).unwrap();
        let mut lines = term.lines();
        assert!(lines.next().unwrap().starts_with("Seed;Inflation;"));
        assert_eq!(lines.count(), 2);

        let summary = fs::read_to_string(dir.join("csvtest_summary.json")).unwrap();
        assert!(summary.contains("\"TotalAdoption\""));

        fs::remove_dir_all(&dir).ok();
    }
}
