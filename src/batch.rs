// src/batch.rs
//! CSV batch estimation: one payout breakdown per input row.
//!
//! Input columns: `salary,fee_percentage,roles`, where `roles` is a list
//! separated by `;` or `|`. Rows that fail to parse are reported and skipped.

use crate::calculator::CalculatorState;
use crate::types::{CalculatorInput, Tier};
use crate::utils::{parse_amount, parse_role_list};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{Read, Write};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub line: u64,
    pub salary: f64,
    pub fee_percentage: f64,
    pub roles: String,
    pub effective_fee: f64,
    pub free_payout: f64,
    pub paid_payout: f64,
    pub premium_payout: f64,
    pub premium_vs_free: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
    pub errors: Vec<RowError>,
}

impl BatchReport {
    pub fn success_count(&self) -> usize {
        self.rows.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

fn parse_record(record: &csv::StringRecord) -> Result<CalculatorInput> {
    if record.len() < 3 {
        anyhow::bail!("Expected 3 columns (salary,fee_percentage,roles), found {}", record.len());
    }

    let salary = parse_amount(&record[0]).context("salary column")?;
    let fee_percentage = parse_amount(&record[1]).context("fee_percentage column")?;
    let selected_roles = parse_role_list(&record[2]).context("roles column")?;

    Ok(CalculatorInput {
        salary,
        fee_percentage,
        selected_roles,
    })
}

fn estimate_row(line: u64, input: &CalculatorInput) -> BatchRow {
    let state = CalculatorState::from(input);
    let breakdown = state.breakdown();
    let roles = state
        .selected_roles()
        .iter()
        .map(|role| role.as_str())
        .collect::<Vec<_>>()
        .join(";");

    BatchRow {
        line,
        salary: state.salary(),
        fee_percentage: state.fee_percentage(),
        roles,
        effective_fee: breakdown.effective_fee,
        free_payout: breakdown.payout(Tier::Free),
        paid_payout: breakdown.payout(Tier::Paid),
        premium_payout: breakdown.payout(Tier::Premium),
        premium_vs_free: breakdown.upgrade_value.premium_vs_free,
    }
}

/// Read a headered CSV and estimate every row.
pub fn run_batch<R: Read>(input: R) -> Result<BatchReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let mut report = BatchReport::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                warn!("CSV parsing error at line {}: {}", line, e);
                report.errors.push(RowError {
                    line,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_record(&record) {
            Ok(input) => report.rows.push(estimate_row(line, &input)),
            Err(e) => {
                warn!("Skipping line {}: {:#}", line, e);
                report.errors.push(RowError {
                    line,
                    message: format!("{:#}", e),
                });
            }
        }
    }

    info!(
        "Batch completed: {} estimated, {} skipped",
        report.success_count(),
        report.error_count()
    );
    Ok(report)
}

pub fn write_rows<W: Write>(rows: &[BatchRow], output: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
salary,fee_percentage,roles
100000,20,candidate_recruiter
\"$150,000\",20,candidate_recruiter;job_owner
90000,15,
80000,abc,job_owner
70000,10,talent_scout
";

    #[test]
    fn test_batch_estimates_valid_rows_and_reports_bad_ones() {
        let report = run_batch(INPUT.as_bytes()).unwrap();

        assert_eq!(report.success_count(), 3);
        assert_eq!(report.error_count(), 2);

        let first = &report.rows[0];
        assert_eq!(first.line, 2);
        assert_eq!(first.effective_fee, 20_000.0);
        assert!((first.premium_payout - 8_000.0).abs() < 1e-6);

        let second = &report.rows[1];
        assert_eq!(second.roles, "candidate_recruiter;job_owner");
        assert!((second.premium_payout - 18_000.0).abs() < 1e-6);

        let empty_roles = &report.rows[2];
        assert_eq!(empty_roles.free_payout, 0.0);
        assert_eq!(empty_roles.premium_payout, 0.0);

        assert_eq!(report.errors[0].line, 5);
        assert!(report.errors[0].message.contains("fee_percentage"));
        assert!(report.errors[1].message.contains("talent_scout"));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let report = run_batch("salary,fee_percentage,roles\n100000,20\n".as_bytes()).unwrap();
        assert_eq!(report.success_count(), 0);
        assert!(report.errors[0].message.contains("Expected 3 columns"));
    }

    #[test]
    fn test_non_finite_amounts_are_reported() {
        let csv = "salary,fee_percentage,roles\ninf,0,job_owner\ninf,20,job_owner\n100000,NaN,job_owner\n";
        let report = run_batch(csv.as_bytes()).unwrap();

        assert_eq!(report.success_count(), 0);
        assert_eq!(report.error_count(), 3);
        assert!(report.errors[0].message.contains("salary"));
        assert!(report.errors[2].message.contains("fee_percentage"));
    }

    #[test]
    fn test_write_rows_emits_header() {
        let report = run_batch(INPUT.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_rows(&report.rows[..1], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "line,salary,fee_percentage,roles,effective_fee,free_payout,paid_payout,premium_payout,premium_vs_free"
        );
        let fields: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[0], "2");
        assert_eq!(fields[3], "candidate_recruiter");
        assert_eq!(fields[7].parse::<f64>().unwrap(), 8_000.0);
        assert!(lines.next().is_none());
    }
}
