pub mod admin;
pub mod cranks;
pub mod users;

pub use admin::*;
pub use cranks::*;
pub use users::*;
