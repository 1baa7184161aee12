// src/types/payout.rs
use super::roles::RecruiterRole;
use super::tier::Tier;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SALARY: f64 = 100_000.0;
pub const DEFAULT_FEE_PERCENTAGE: f64 = 20.0;

/// Raw calculator input as supplied by a caller (HTTP body, CLI flags, CSV row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInput {
    pub salary: f64,
    #[serde(alias = "feePercentage")]
    pub fee_percentage: f64,
    #[serde(alias = "selectedRoles")]
    pub selected_roles: Vec<RecruiterRole>,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self {
            salary: DEFAULT_SALARY,
            fee_percentage: DEFAULT_FEE_PERCENTAGE,
            selected_roles: vec![RecruiterRole::CandidateRecruiter],
        }
    }
}

/// Payout for one subscription tier. Always derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPayout {
    pub tier: Tier,
    pub tier_name: String,
    pub monthly_price: u32,
    pub payout: f64,
    pub platform_take: f64,
    /// Sum of the tier's rates over the selected roles.
    pub combined_rate: f64,
    /// Placements needed for the gain over the free tier to cover one month
    /// of this tier's price. `None` for the free tier or when there is no gain.
    pub placements_to_cover_subscription: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpgradeValue {
    pub paid_vs_free: f64,
    pub premium_vs_free: f64,
    pub premium_vs_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutBreakdown {
    pub effective_fee: f64,
    /// Ordered free, paid, premium.
    pub payouts: [TierPayout; Tier::COUNT],
    pub upgrade_value: UpgradeValue,
}

impl PayoutBreakdown {
    pub fn tier(&self, tier: Tier) -> &TierPayout {
        &self.payouts[tier.index()]
    }

    pub fn payout(&self, tier: Tier) -> f64 {
        self.tier(tier).payout
    }
}
