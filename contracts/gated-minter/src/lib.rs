mod admin;
mod allowlist;
pub mod contract;
mod error;
pub mod helpers;
pub mod msg;
mod payment;
pub mod query;
pub mod quota;
pub mod state;
pub mod status;
pub mod sudo;

pub use crate::error::ContractError;
