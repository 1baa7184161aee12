// src/types/tier.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription plan level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Paid,
    Premium,
}

impl Tier {
    pub const COUNT: usize = 3;

    /// Fixed presentation order for payout lists.
    pub const ALL: [Tier; Self::COUNT] = [Tier::Free, Tier::Paid, Tier::Premium];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Paid => "paid",
            Tier::Premium => "premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static plan facts shown next to each payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierInfo {
    pub name: &'static str,
    /// Whole currency units per month.
    pub monthly_price: u32,
}
