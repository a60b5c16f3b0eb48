pub mod admin;
pub mod cranks;
pub mod router;

pub use admin::*;
pub use cranks::*;
pub use router::*;
