pub mod contract;
pub mod error;
pub mod execute;
pub mod msg;
pub mod query;
pub mod reconcile;
pub mod state;
pub mod tracker;
pub mod trust;
pub mod wormhole;

pub use crate::error::ContractError;
