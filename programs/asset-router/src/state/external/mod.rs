pub mod common_connector_state;

pub use common_connector_state::*;
