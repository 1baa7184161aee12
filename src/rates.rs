// src/rates.rs
//! Compiled-in commission tables.
//!
//! Rates are fractions of the placement fee paid to a recruiter holding a
//! single role. For every role the rate must not decrease from one tier to
//! the next, otherwise upgrade deltas turn negative.

use crate::types::{RecruiterRole, RoleMeta, Tier, TierInfo};
use serde::Serialize;
use std::collections::BTreeMap;

/// Rows indexed by [`Tier::index`], columns by [`RecruiterRole::index`].
pub const COMMISSION_RATES: [[f64; RecruiterRole::COUNT]; Tier::COUNT] = [
    // candidate_recruiter, job_owner, company_recruiter, candidate_sourcer, company_sourcer
    [0.20, 0.10, 0.10, 0.06, 0.06],
    [0.30, 0.15, 0.15, 0.08, 0.08],
    [0.40, 0.20, 0.20, 0.10, 0.10],
];

/// Display figure only; not derived from the role rates.
pub const PLATFORM_TAKE: [f64; Tier::COUNT] = [0.48, 0.24, 0.00];

pub const TIER_INFO: [TierInfo; Tier::COUNT] = [
    TierInfo {
        name: "Starter",
        monthly_price: 0,
    },
    TierInfo {
        name: "Pro",
        monthly_price: 99,
    },
    TierInfo {
        name: "Partner",
        monthly_price: 249,
    },
];

pub const ROLE_META: [RoleMeta; RecruiterRole::COUNT] = [
    RoleMeta {
        label: "Candidate Recruiter",
        description: "Represents the candidate who was hired",
    },
    RoleMeta {
        label: "Job Owner",
        description: "Owns the client relationship and the job order",
    },
    RoleMeta {
        label: "Company Recruiter",
        description: "Manages the hiring company account",
    },
    RoleMeta {
        label: "Candidate Sourcer",
        description: "First introduced the candidate to the platform",
    },
    RoleMeta {
        label: "Company Sourcer",
        description: "Brought the hiring company to the platform",
    },
];

pub fn commission_rate(tier: Tier, role: RecruiterRole) -> f64 {
    COMMISSION_RATES[tier.index()][role.index()]
}

pub fn platform_take(tier: Tier) -> f64 {
    PLATFORM_TAKE[tier.index()]
}

pub fn tier_info(tier: Tier) -> &'static TierInfo {
    &TIER_INFO[tier.index()]
}

pub fn role_meta(role: RecruiterRole) -> &'static RoleMeta {
    &ROLE_META[role.index()]
}

#[derive(Debug, Clone, Serialize)]
pub struct TierRates {
    pub tier: Tier,
    pub name: &'static str,
    pub monthly_price: u32,
    pub platform_take: f64,
    pub rates: BTreeMap<RecruiterRole, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleInfo {
    pub role: RecruiterRole,
    pub label: &'static str,
    pub description: &'static str,
}

/// Full view of the tables, for listing endpoints and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct RateCard {
    pub tiers: Vec<TierRates>,
    pub roles: Vec<RoleInfo>,
}

pub fn role_infos() -> Vec<RoleInfo> {
    RecruiterRole::ALL
        .into_iter()
        .map(|role| {
            let meta = role_meta(role);
            RoleInfo {
                role,
                label: meta.label,
                description: meta.description,
            }
        })
        .collect()
}

pub fn rate_card() -> RateCard {
    let tiers = Tier::ALL
        .into_iter()
        .map(|tier| {
            let info = tier_info(tier);
            TierRates {
                tier,
                name: info.name,
                monthly_price: info.monthly_price,
                platform_take: platform_take(tier),
                rates: RecruiterRole::ALL
                    .into_iter()
                    .map(|role| (role, commission_rate(tier, role)))
                    .collect(),
            }
        })
        .collect();

    RateCard {
        tiers,
        roles: role_infos(),
    }
}
