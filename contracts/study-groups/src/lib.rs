pub mod contract;
pub mod error;
pub mod governance;
pub mod msg;
pub mod rewards;
pub mod state;

pub use crate::error::ContractError;
