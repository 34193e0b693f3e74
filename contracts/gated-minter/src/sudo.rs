#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{Coin, DepsMut, Env, Event, StdResult};
use sg_std::Response;

use crate::{msg::SudoMsg, state::CONFIG, ContractError};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: DepsMut, _env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::UpdateParams {
            unit_price,
            allowlist_price,
            public_cap,
            allowlist_cap,
            max_supply,
        } => sudo_update_params(
            deps,
            unit_price,
            allowlist_price,
            public_cap,
            allowlist_cap,
            max_supply,
        ),
        SudoMsg::RemoveMaxSupply {} => sudo_remove_max_supply(deps),
    }
}

/// Unset fields keep their current value
pub fn sudo_update_params(
    deps: DepsMut,
    unit_price: Option<Coin>,
    allowlist_price: Option<Coin>,
    public_cap: Option<u32>,
    allowlist_cap: Option<u32>,
    max_supply: Option<u64>,
) -> Result<Response, ContractError> {
    let config = CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.unit_price = unit_price.unwrap_or(config.unit_price);
        config.allowlist_price = allowlist_price.unwrap_or(config.allowlist_price);
        config.public_cap = public_cap.unwrap_or(config.public_cap);
        config.allowlist_cap = allowlist_cap.unwrap_or(config.allowlist_cap);
        config.max_supply = max_supply.or(config.max_supply);
        config.version += 1;
        Ok(config)
    })?;

    let event = Event::new("update_params")
        .add_attribute("unit_price", config.unit_price.to_string())
        .add_attribute("allowlist_price", config.allowlist_price.to_string())
        .add_attribute("public_cap", config.public_cap.to_string())
        .add_attribute("allowlist_cap", config.allowlist_cap.to_string())
        .add_attribute("max_supply", supply_limit(config.max_supply))
        .add_attribute("version", config.version.to_string());
    Ok(Response::new().add_event(event))
}

pub fn sudo_remove_max_supply(deps: DepsMut) -> Result<Response, ContractError> {
    let config = CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.max_supply = None;
        config.version += 1;
        Ok(config)
    })?;

    let event = Event::new("remove_max_supply")
        .add_attribute("max_supply", supply_limit(config.max_supply))
        .add_attribute("version", config.version.to_string());
    Ok(Response::new().add_event(event))
}

fn supply_limit(max_supply: Option<u64>) -> String {
    max_supply.map_or_else(|| "unlimited".to_string(), |m| m.to_string())
}
