pub mod update_underlying_amount;

pub use update_underlying_amount::*;
