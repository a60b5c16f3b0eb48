pub mod connector_ops;
pub mod poke;
pub mod sync_connector;

pub use poke::*;
pub use sync_connector::*;
