mod helpers;
mod msg;

pub use crate::helpers::PriceFeedContract;
pub use crate::msg::{PriceFeedExecuteMsg, PriceFeedQueryMsg, PriceResponse};
