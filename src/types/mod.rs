pub mod payout;
pub mod roles;
pub mod tier;

pub use payout::{
    CalculatorInput, PayoutBreakdown, TierPayout, UpgradeValue, DEFAULT_FEE_PERCENTAGE,
    DEFAULT_SALARY,
};
pub use roles::{RecruiterRole, RoleMeta, RoleSet};
pub use tier::{Tier, TierInfo};
