use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{to_binary, Addr, CosmosMsg, Decimal, QuerierWrapper, StdResult, WasmMsg};

use crate::msg::{PriceFeedExecuteMsg, PriceFeedQueryMsg, PriceResponse};

/// PriceFeedContract is a wrapper around Addr that provides helpers
/// for working with price feed contracts
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PriceFeedContract(pub Addr);

impl PriceFeedContract {
    pub fn new(addr: Addr) -> Self {
        PriceFeedContract(addr)
    }

    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn set_price(&self, price: Decimal) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg: to_binary(&PriceFeedExecuteMsg::SetPrice { price })?,
            funds: vec![],
        }
        .into())
    }

    /// Latest published price. Fails if the feed never published one.
    pub fn price(&self, querier: &QuerierWrapper) -> StdResult<PriceResponse> {
        querier.query_wasm_smart(self.addr(), &PriceFeedQueryMsg::Price {})
    }
}
