// src/cli.rs
use crate::batch::{run_batch, write_rows};
use crate::calculator::CalculatorState;
use crate::environment::EnvironmentConfig;
use crate::rates::{rate_card, RateCard};
use crate::types::{CalculatorInput, PayoutBreakdown, RecruiterRole, Tier};
use crate::utils::{format_currency, format_rate, get_file_extension, read_file_content};
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "payout-calc")]
#[command(about = "Recruiter commission and payout calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        #[arg(long, default_value = crate::environment::DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Estimate payouts for one placement
    Estimate {
        /// Annual salary (accepts "$150,000")
        #[arg(long, allow_hyphen_values = true, value_parser = crate::utils::parse_amount)]
        salary: Option<f64>,
        /// Placement fee as a percentage of salary
        #[arg(long, allow_hyphen_values = true, value_parser = crate::utils::parse_amount)]
        fee: Option<f64>,
        /// Role held on the deal; repeat for several roles
        #[arg(long = "role")]
        roles: Vec<RecruiterRole>,
        /// Estimate with no roles selected
        #[arg(long, conflicts_with = "roles")]
        no_roles: bool,
        /// TOML file with salary, fee_percentage and selected_roles
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Placements per month used to recommend a tier
        #[arg(long, default_value_t = 1)]
        placements: u32,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the commission rate card
    Rates {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Estimate every row of a CSV file (salary,fee_percentage,roles)
    Batch {
        input: PathBuf,
        /// Write results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Build the calculator input from an optional scenario file and flags.
/// Flags win over the scenario; anything unset keeps the default.
/// `roles` of `None` keeps the scenario's selection, `Some(&[])` clears it.
pub fn resolve_input(
    scenario: Option<&CalculatorInput>,
    salary: Option<f64>,
    fee: Option<f64>,
    roles: Option<&[RecruiterRole]>,
) -> CalculatorInput {
    let base = scenario.cloned().unwrap_or_default();

    CalculatorInput {
        salary: salary.unwrap_or(base.salary),
        fee_percentage: fee.unwrap_or(base.fee_percentage),
        selected_roles: match roles {
            Some(roles) => roles.to_vec(),
            None => base.selected_roles,
        },
    }
}

pub fn load_scenario(path: &PathBuf) -> Result<CalculatorInput> {
    let content = read_file_content(path)?;

    match get_file_extension(path).as_deref() {
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario: {}", path.display())),
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scenario: {}", path.display())),
        _ => anyhow::bail!(
            "Unsupported scenario file: {}. Use .toml or .json",
            path.display()
        ),
    }
}

pub fn render_estimate(state: &CalculatorState, breakdown: &PayoutBreakdown, best: Tier) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Salary:         {}", format_currency(state.salary()));
    let _ = writeln!(out, "Fee:            {}%", state.fee_percentage());
    let _ = writeln!(out, "Placement fee:  {}", format_currency(breakdown.effective_fee));
    let _ = writeln!(out, "Roles:          {}", state.selected_roles());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<10} {:>8} {:>8} {:>16} {:>16}",
        "Tier", "Price", "Split", "Payout", "Platform take"
    );
    let _ = writeln!(out, "{}", "-".repeat(62));

    for payout in &breakdown.payouts {
        let marker = if payout.tier == best { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:<10} {:>8} {:>8} {:>16} {:>16}{}",
            payout.tier_name,
            format!("${}/mo", payout.monthly_price),
            format_rate(payout.combined_rate),
            format_currency(payout.payout),
            format_currency(payout.platform_take),
            marker
        );
    }

    let upgrade = &breakdown.upgrade_value;
    let _ = writeln!(out);
    let _ = writeln!(out, "Pro vs Starter:      +{}", format_currency(upgrade.paid_vs_free));
    let _ = writeln!(out, "Partner vs Starter:  +{}", format_currency(upgrade.premium_vs_free));
    let _ = writeln!(out, "Partner vs Pro:      +{}", format_currency(upgrade.premium_vs_paid));
    out
}

pub fn render_rate_card(card: &RateCard) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<22}", "Role");
    for tier in &card.tiers {
        let _ = write!(out, " {:>9}", tier.name);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(22 + 10 * card.tiers.len()));

    for role in &card.roles {
        let _ = write!(out, "{:<22}", role.label);
        for tier in &card.tiers {
            let rate = tier.rates.get(&role.role).copied().unwrap_or_default();
            let _ = write!(out, " {:>9}", format_rate(rate));
        }
        let _ = writeln!(out);
    }

    let _ = write!(out, "{:<22}", "Platform take");
    for tier in &card.tiers {
        let _ = write!(out, " {:>9}", format_rate(tier.platform_take));
    }
    let _ = writeln!(out);

    let _ = write!(out, "{:<22}", "Monthly price");
    for tier in &card.tiers {
        let _ = write!(out, " {:>9}", format!("${}", tier.monthly_price));
    }
    let _ = writeln!(out);
    out
}

pub fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "payout_calculator=debug"
    } else {
        "payout_calculator=warn"
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { config } => {
            let config = EnvironmentConfig::load_from(&config)?;
            let filter = if cli.verbose {
                log_filter(true).to_string()
            } else {
                config.log_filter.clone()
            };
            crate::logging::init_logging(&filter, config.log_file.as_deref())?;
            info!(
                "Configuration loaded for environment {}: {}",
                EnvironmentConfig::get_environment(),
                config
            );
            start_web_server(config).await?;
        }

        Command::Estimate {
            salary,
            fee,
            roles,
            no_roles,
            scenario,
            placements,
            format,
        } => {
            crate::logging::init_logging(log_filter(cli.verbose), None)?;

            let scenario = scenario.as_ref().map(load_scenario).transpose()?;
            let roles = if no_roles {
                Some(&[][..])
            } else if roles.is_empty() {
                None
            } else {
                Some(roles.as_slice())
            };
            let input = resolve_input(scenario.as_ref(), salary, fee, roles);
            let state = CalculatorState::from(&input);
            let breakdown = state.breakdown();
            let best = state.best_tier(placements);

            match format {
                OutputFormat::Text => print!("{}", render_estimate(&state, &breakdown, best)),
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "input": state.to_input(),
                        "breakdown": breakdown,
                        "recommended_tier": best,
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
            }
        }

        Command::Rates { format } => {
            crate::logging::init_logging(log_filter(cli.verbose), None)?;

            let card = rate_card();
            match format {
                OutputFormat::Text => print!("{}", render_rate_card(&card)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
            }
        }

        Command::Batch { input, output } => {
            crate::logging::init_logging(log_filter(cli.verbose), None)?;

            let file = File::open(&input)
                .with_context(|| format!("Failed to open CSV file: {}", input.display()))?;
            let report = run_batch(file)?;

            for error in &report.errors {
                eprintln!("⚠️  Line {}: {}", error.line, error.message);
            }

            match output {
                Some(path) => {
                    let out = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    write_rows(&report.rows, out)?;
                    info!("Wrote {} estimates to {}", report.rows.len(), path.display());
                }
                None => write_rows(&report.rows, std::io::stdout().lock())?,
            }

            eprintln!(
                "Batch completed: ✅ {} estimated, ❌ {} skipped",
                report.success_count(),
                report.error_count()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_estimate_flags() {
        let cli = Cli::try_parse_from([
            "payout-calc",
            "estimate",
            "--salary",
            "$150,000",
            "--fee",
            "20",
            "--role",
            "candidate_recruiter",
            "--role",
            "Job Owner",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Estimate {
                salary,
                fee,
                roles,
                format,
                placements,
                ..
            } => {
                assert_eq!(salary, Some(150_000.0));
                assert_eq!(fee, Some(20.0));
                assert_eq!(
                    roles,
                    vec![RecruiterRole::CandidateRecruiter, RecruiterRole::JobOwner]
                );
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(placements, 1);
            }
            _ => panic!("expected estimate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_role() {
        let result = Cli::try_parse_from(["payout-calc", "estimate", "--role", "closer"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_input_prefers_flags_over_scenario() {
        let scenario = CalculatorInput {
            salary: 90_000.0,
            fee_percentage: 25.0,
            selected_roles: vec![RecruiterRole::CompanySourcer],
        };

        let input = resolve_input(Some(&scenario), None, Some(18.0), None);
        assert_eq!(input.salary, 90_000.0);
        assert_eq!(input.fee_percentage, 18.0);
        assert_eq!(input.selected_roles, vec![RecruiterRole::CompanySourcer]);

        let defaults = resolve_input(None, None, None, None);
        assert_eq!(defaults, CalculatorInput::default());
    }

    #[test]
    fn test_cli_accepts_negative_amounts_and_clamps_them() {
        let cli = Cli::try_parse_from(["payout-calc", "estimate", "--salary", "-500", "--fee", "-5"])
            .unwrap();

        match cli.command {
            Command::Estimate { salary, fee, .. } => {
                assert_eq!(salary, Some(-500.0));
                assert_eq!(fee, Some(-5.0));

                let input = resolve_input(None, salary, fee, None);
                let state = CalculatorState::from(&input);
                assert_eq!(state.salary(), 0.0);
                assert_eq!(state.fee_percentage(), 0.0);
            }
            _ => panic!("expected estimate command"),
        }
    }

    #[test]
    fn test_no_roles_flag_selects_empty_set() {
        let cli = Cli::try_parse_from(["payout-calc", "estimate", "--no-roles"]).unwrap();
        match cli.command {
            Command::Estimate { no_roles, roles, .. } => {
                assert!(no_roles);
                assert!(roles.is_empty());
            }
            _ => panic!("expected estimate command"),
        }

        let input = resolve_input(None, Some(150_000.0), Some(20.0), Some(&[][..]));
        assert!(input.selected_roles.is_empty());
        let state = CalculatorState::from(&input);
        for tier in Tier::ALL {
            assert_eq!(state.payout(tier), 0.0);
        }

        assert!(Cli::try_parse_from([
            "payout-calc",
            "estimate",
            "--no-roles",
            "--role",
            "job_owner"
        ])
        .is_err());
    }

    #[test]
    fn test_scenario_with_empty_roles_is_kept() {
        let scenario: CalculatorInput = toml::from_str(
            r#"
salary = 150000
fee_percentage = 20
selected_roles = []
"#,
        )
        .unwrap();

        let input = resolve_input(Some(&scenario), None, None, None);
        assert!(input.selected_roles.is_empty());
    }

    #[test]
    fn test_scenario_toml_parses() {
        let input: CalculatorInput = toml::from_str(
            r#"
salary = 150000
fee_percentage = 20
selected_roles = ["candidate_recruiter", "job_owner"]
"#,
        )
        .unwrap();
        assert_eq!(input.salary, 150_000.0);
        assert_eq!(input.selected_roles.len(), 2);
    }

    #[test]
    fn test_render_estimate_marks_best_tier() {
        let state = CalculatorState::default();
        let breakdown = state.breakdown();
        let text = render_estimate(&state, &breakdown, Tier::Premium);

        assert!(text.contains("Placement fee:  $20,000.00"));
        assert!(text.contains("$8,000.00"));
        let partner_line = text.lines().find(|l| l.starts_with("Partner")).unwrap();
        assert!(partner_line.ends_with(" *"));
        assert!(text.contains("Partner vs Starter:  +$4,000.00"));
    }

    #[test]
    fn test_render_rate_card_lists_every_role() {
        let text = render_rate_card(&rate_card());
        for role in RecruiterRole::ALL {
            assert!(text.contains(crate::rates::role_meta(role).label));
        }
        assert!(text.contains("48%"));
        assert!(text.contains("$249"));
    }
}
