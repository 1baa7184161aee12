// src/calculator.rs
//! Payout engine and the mutable calculator state it projects from.

use crate::rates::{commission_rate, platform_take, tier_info};
use crate::types::{
    CalculatorInput, PayoutBreakdown, RecruiterRole, RoleSet, Tier, TierPayout, UpgradeValue,
    DEFAULT_FEE_PERCENTAGE, DEFAULT_SALARY,
};
use tracing::{debug, trace};

/// Placement fee: `salary * fee_percentage / 100`, unrounded.
pub fn effective_fee(salary: f64, fee_percentage: f64) -> f64 {
    salary * fee_percentage / 100.0
}

/// Sum of the tier's rates over `roles`.
pub fn combined_rate(tier: Tier, roles: &RoleSet) -> f64 {
    roles
        .iter()
        .fold(0.0, |total, role| total + commission_rate(tier, role))
}

pub fn payout_for_tier(effective_fee: f64, roles: &RoleSet, tier: Tier) -> f64 {
    if roles.is_empty() {
        return 0.0;
    }
    effective_fee * combined_rate(tier, roles)
}

/// One entry per tier, ordered free, paid, premium.
pub fn tier_payouts(effective_fee: f64, roles: &RoleSet) -> [TierPayout; Tier::COUNT] {
    let free_payout = payout_for_tier(effective_fee, roles, Tier::Free);

    Tier::ALL.map(|tier| {
        let info = tier_info(tier);
        let payout = payout_for_tier(effective_fee, roles, tier);
        let gain = payout - free_payout;

        let placements_to_cover_subscription = if info.monthly_price > 0 && gain > 0.0 {
            Some(f64::from(info.monthly_price) / gain)
        } else {
            None
        };

        TierPayout {
            tier,
            tier_name: info.name.to_string(),
            monthly_price: info.monthly_price,
            payout,
            platform_take: effective_fee * platform_take(tier),
            combined_rate: combined_rate(tier, roles),
            placements_to_cover_subscription,
        }
    })
}

pub fn upgrade_value(payouts: &[TierPayout; Tier::COUNT]) -> UpgradeValue {
    let free = payouts[Tier::Free.index()].payout;
    let paid = payouts[Tier::Paid.index()].payout;
    let premium = payouts[Tier::Premium.index()].payout;

    UpgradeValue {
        paid_vs_free: paid - free,
        premium_vs_free: premium - free,
        premium_vs_paid: premium - paid,
    }
}

/// Stateless entry point: clamp the input exactly as the state mutators do,
/// then compute the full breakdown.
pub fn compute_payouts(input: &CalculatorInput) -> PayoutBreakdown {
    let state = CalculatorState::from(input);
    debug!(
        "Computing payouts: salary={} fee_percentage={} roles=[{}]",
        state.salary(),
        state.fee_percentage(),
        state.selected_roles()
    );
    state.breakdown()
}

fn clamp_salary(value: f64) -> f64 {
    // NaN and infinities store 0.
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn clamp_fee_percentage(value: f64) -> f64 {
    // f64::max discards NaN.
    value.max(0.0).min(100.0)
}

/// Ephemeral user input for one calculator session.
///
/// Out-of-range numbers are clamped silently rather than rejected, so every
/// state is valid and every projection is defined.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    salary: f64,
    fee_percentage: f64,
    selected_roles: RoleSet,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            salary: DEFAULT_SALARY,
            fee_percentage: DEFAULT_FEE_PERCENTAGE,
            selected_roles: [RecruiterRole::CandidateRecruiter].into_iter().collect(),
        }
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn fee_percentage(&self) -> f64 {
        self.fee_percentage
    }

    pub fn selected_roles(&self) -> &RoleSet {
        &self.selected_roles
    }

    pub fn set_salary(&mut self, value: f64) {
        self.salary = clamp_salary(value);
        trace!("Salary set to {}", self.salary);
    }

    pub fn set_fee_percentage(&mut self, value: f64) {
        self.fee_percentage = clamp_fee_percentage(value);
        trace!("Fee percentage set to {}", self.fee_percentage);
    }

    /// Returns whether `role` is selected after the toggle.
    pub fn toggle_role(&mut self, role: RecruiterRole) -> bool {
        let selected = self.selected_roles.toggle(role);
        trace!("Role {} toggled, selected={}", role, selected);
        selected
    }

    pub fn set_selected_roles<I>(&mut self, roles: I)
    where
        I: IntoIterator<Item = RecruiterRole>,
    {
        self.selected_roles = roles.into_iter().collect();
    }

    pub fn with_salary(mut self, value: f64) -> Self {
        self.set_salary(value);
        self
    }

    pub fn with_fee_percentage(mut self, value: f64) -> Self {
        self.set_fee_percentage(value);
        self
    }

    pub fn with_selected_roles<I>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = RecruiterRole>,
    {
        self.set_selected_roles(roles);
        self
    }

    pub fn effective_fee(&self) -> f64 {
        effective_fee(self.salary, self.fee_percentage)
    }

    pub fn payout(&self, tier: Tier) -> f64 {
        payout_for_tier(self.effective_fee(), &self.selected_roles, tier)
    }

    pub fn payouts(&self) -> [TierPayout; Tier::COUNT] {
        tier_payouts(self.effective_fee(), &self.selected_roles)
    }

    pub fn upgrade_value(&self) -> UpgradeValue {
        upgrade_value(&self.payouts())
    }

    pub fn breakdown(&self) -> PayoutBreakdown {
        let payouts = self.payouts();
        let upgrade_value = upgrade_value(&payouts);

        PayoutBreakdown {
            effective_fee: self.effective_fee(),
            payouts,
            upgrade_value,
        }
    }

    /// Tier with the highest monthly earnings net of its subscription price,
    /// assuming `placements_per_month` deals of the current shape. Ties go to
    /// the cheaper tier.
    pub fn best_tier(&self, placements_per_month: u32) -> Tier {
        let placements = f64::from(placements_per_month);
        let net = |tier: Tier| {
            self.payout(tier) * placements - f64::from(tier_info(tier).monthly_price)
        };

        Tier::ALL
            .into_iter()
            .fold(Tier::Free, |best, tier| {
                if net(tier) > net(best) {
                    tier
                } else {
                    best
                }
            })
    }

    pub fn to_input(&self) -> CalculatorInput {
        CalculatorInput {
            salary: self.salary,
            fee_percentage: self.fee_percentage,
            selected_roles: self.selected_roles.to_vec(),
        }
    }
}

impl From<&CalculatorInput> for CalculatorState {
    fn from(input: &CalculatorInput) -> Self {
        CalculatorState::new()
            .with_salary(input.salary)
            .with_fee_percentage(input.fee_percentage)
            .with_selected_roles(input.selected_roles.iter().copied())
    }
}
