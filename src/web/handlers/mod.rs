pub mod payout_handlers;
pub mod system_handlers;

pub use payout_handlers::*;
pub use system_handlers::*;
