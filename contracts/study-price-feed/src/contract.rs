#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Binary, Decimal, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Timestamp,
};

use cw2::set_contract_version;
use cw_utils::maybe_addr;
use study_price::PriceResponse;
use study_utils::ensure_from_older_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{Config, PriceRecord, ADMIN, CONFIG, PRICE};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:study-price-feed";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    let api = deps.api;
    ADMIN.set(deps.branch(), maybe_addr(api, msg.admin)?)?;

    let base = msg.base.trim().to_owned();
    let quote = msg.quote.trim().to_owned();
    if base.is_empty() || quote.is_empty() {
        return Err(ContractError::EmptySymbol {});
    }
    CONFIG.save(deps.storage, &Config { base, quote })?;

    if let Some(price) = msg.price {
        save_price(deps, price, env.block.time)?;
    }

    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let api = deps.api;
    match msg {
        ExecuteMsg::UpdateAdmin { admin } => Ok(ADMIN.execute_update_admin(
            deps,
            info,
            admin.map(|admin| api.addr_validate(&admin)).transpose()?,
        )?),
        ExecuteMsg::SetPrice { price } => execute_set_price(deps, env, info, price),
    }
}

pub fn execute_set_price(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    price: Decimal,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    save_price(deps, price, env.block.time)?;

    Ok(Response::new()
        .add_attribute("action", "set_price")
        .add_attribute("price", price.to_string())
        .add_attribute("sender", info.sender))
}

fn save_price(deps: DepsMut, price: Decimal, time: Timestamp) -> Result<(), ContractError> {
    if price.is_zero() {
        return Err(ContractError::ZeroPrice {});
    }
    PRICE.save(
        deps.storage,
        &PriceRecord {
            price,
            updated_at: time,
        },
    )?;
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Price {} => to_binary(&query_price(deps)?),
        QueryMsg::Admin {} => to_binary(&ADMIN.query_admin(deps)?),
    }
}

fn query_price(deps: Deps) -> StdResult<PriceResponse> {
    let Config { base, quote } = CONFIG.load(deps.storage)?;
    let PriceRecord { price, updated_at } = PRICE.load(deps.storage)?;
    Ok(PriceResponse {
        base,
        quote,
        price,
        updated_at,
    })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    ensure_from_older_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new())
}
