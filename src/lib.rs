//! Recruiter commission calculator: placement fee, per-tier payouts and
//! upgrade deltas, exposed as a library, an HTTP API and a CLI.

pub mod batch;
pub mod calculator;
pub mod cli;
pub mod environment;
pub mod logging;
pub mod rates;
pub mod types;
pub mod utils;
pub mod web;

pub use calculator::{compute_payouts, CalculatorState};
pub use environment::EnvironmentConfig;
pub use rates::{rate_card, RateCard};
pub use types::{
    CalculatorInput, PayoutBreakdown, RecruiterRole, RoleSet, Tier, TierPayout, UpgradeValue,
};
pub use web::{build_rocket, start_web_server};
