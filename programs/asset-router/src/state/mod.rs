pub mod external;
pub mod router;

pub use router::*;
