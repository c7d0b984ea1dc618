use cosmwasm_std::StdError;
use thiserror::Error;

use cw_controllers::AdminError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("Price must be greater than zero")]
    ZeroPrice {},

    #[error("Asset symbol must not be empty")]
    EmptySymbol {},
}
