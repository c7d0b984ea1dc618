use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Decimal, Timestamp};

/// Execute messages every price feed understands
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum PriceFeedExecuteMsg {
    /// Publish a new price of one `base` unit expressed in `quote`. Operator only.
    SetPrice { price: Decimal },
}

/// Query messages every price feed understands
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum PriceFeedQueryMsg {
    /// Returns PriceResponse
    Price {},
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct PriceResponse {
    /// Asset being priced, e.g. the staking denom
    pub base: String,
    /// Currency the price is expressed in
    pub quote: String,
    pub price: Decimal,
    pub updated_at: Timestamp,
}
