use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::Decimal;

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct InstantiateMsg {
    /// The admin is the only account allowed to publish prices.
    /// Omit it to freeze the feed at the initial price.
    pub admin: Option<String>,
    /// Asset being priced
    pub base: String,
    /// Currency the price is expressed in
    pub quote: String,
    /// Optional initial price
    pub price: Option<Decimal>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Change the admin
    UpdateAdmin { admin: Option<String> },
    /// Publish a new price. Same shape as `study_price::PriceFeedExecuteMsg::SetPrice`.
    SetPrice { price: Decimal },
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns `study_price::PriceResponse`
    Price {},
    /// Returns AdminResponse
    Admin {},
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct MigrateMsg {}
