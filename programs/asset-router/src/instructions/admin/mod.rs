pub mod call_external;
pub mod configure_router;
pub mod emergency_withdraw;
pub mod initialize;
pub mod manual_rebalance;
pub mod migrate;
pub mod set_connector_list;
pub mod set_connector_params;

pub use call_external::*;
pub use configure_router::*;
pub use emergency_withdraw::*;
pub use initialize::*;
pub use manual_rebalance::*;
pub use migrate::*;
pub use set_connector_list::*;
pub use set_connector_params::*;
