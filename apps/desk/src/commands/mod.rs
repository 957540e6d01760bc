//! CLI command implementations.

mod bill;
mod config;
mod customer;

pub use bill::BillCmd;
pub use config::ConfigCmd;
pub use customer::CustomerCmd;
