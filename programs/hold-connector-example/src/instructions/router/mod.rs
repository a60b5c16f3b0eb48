pub mod claim_rewards;
pub mod hooks;
pub mod redeem;

pub use claim_rewards::*;
pub use hooks::*;
pub use redeem::*;
