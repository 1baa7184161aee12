// src/utils.rs
use crate::types::RecruiterRole;
use anyhow::{Context, Result};
use std::path::Path;

/// Normalize a role name to its wire form: "Job Owner" / "job-owner" -> "job_owner"
pub fn normalize_role_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Parse a delimited role list such as "candidate_recruiter;job_owner".
/// Accepts `,`, `;` and `|` as separators. Unknown roles are an error.
pub fn parse_role_list(raw: &str) -> Result<Vec<RecruiterRole>> {
    raw.split([',', ';', '|'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<RecruiterRole>())
        .collect()
}

/// Parse a number that may carry currency formatting: "$150,000" -> 150000.0
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_' | '%' | ' '))
        .collect();

    let amount = cleaned
        .parse::<f64>()
        .with_context(|| format!("Invalid amount: '{}'", raw.trim()))?;

    if !amount.is_finite() {
        anyhow::bail!("Amount must be a finite number, got '{}'", raw.trim());
    }
    Ok(amount)
}

/// Format an amount with thousands grouping and two decimals: 22500.0 -> "$22,500.00"
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

/// Format a fraction as a percentage: 0.4 -> "40%", 0.075 -> "7.5%"
pub fn format_rate(rate: f64) -> String {
    let pct = format!("{:.2}", rate * 100.0);
    let trimmed = pct.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", trimmed)
}

/// Read file content as string with proper error context
pub fn read_file_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &Path) -> Option<String> {
    filename
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
