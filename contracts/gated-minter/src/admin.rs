use cosmwasm_std::{Addr, BankMsg, Deps, DepsMut, Env, Event, MessageInfo, StdResult};
use cw_utils::nonpayable;
use sg_std::Response;

use crate::allowlist::normalize_root;
use crate::state::{bump_version, CONFIG, MERKLE_ROOT, OWNER, SEEDED_ALLOWANCES, STATUS};
use crate::status::Status;
use crate::ContractError;

fn only_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if !OWNER.is_admin(deps, sender)? {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

/// Any status may follow any other
pub fn execute_set_status(
    deps: DepsMut,
    info: MessageInfo,
    status: Status,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    only_owner(deps.as_ref(), &info.sender)?;

    let previous = STATUS.load(deps.storage)?;
    STATUS.save(deps.storage, &status)?;
    let version = bump_version(deps.storage)?;

    let event = Event::new("set_status")
        .add_attribute("previous", previous.to_string())
        .add_attribute("status", status.to_string())
        .add_attribute("version", version.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_set_merkle_root(
    deps: DepsMut,
    info: MessageInfo,
    root: Option<String>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    only_owner(deps.as_ref(), &info.sender)?;

    let root = normalize_root(root)?;
    MERKLE_ROOT.save(deps.storage, &root)?;
    let version = bump_version(deps.storage)?;

    let event = Event::new("set_merkle_root")
        .add_attribute("root", root.unwrap_or_else(|| "none".to_string()))
        .add_attribute("version", version.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

/// Overwrites the seeded allowance of each address. A repeated address keeps
/// its last allowance, a zero allowance removes it from the list.
pub fn execute_seed_allowlist(
    deps: DepsMut,
    info: MessageInfo,
    addresses: Vec<String>,
    allowances: Vec<u32>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    only_owner(deps.as_ref(), &info.sender)?;

    if addresses.len() != allowances.len() {
        return Err(ContractError::AllowlistLengthMismatch {
            addresses: addresses.len(),
            allowances: allowances.len(),
        });
    }

    // validate everything before the first write
    let entries = addresses
        .iter()
        .map(|address| deps.api.addr_validate(address))
        .collect::<StdResult<Vec<_>>>()?
        .into_iter()
        .zip(allowances)
        .collect::<Vec<_>>();

    for (addr, allowance) in entries.iter() {
        if *allowance == 0 {
            SEEDED_ALLOWANCES.remove(deps.storage, addr);
        } else {
            SEEDED_ALLOWANCES.save(deps.storage, addr, allowance)?;
        }
    }
    let version = bump_version(deps.storage)?;

    let event = Event::new("seed_allowlist")
        .add_attribute("count", entries.len().to_string())
        .add_attribute("version", version.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_transfer_ownership(
    mut deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    only_owner(deps.as_ref(), &info.sender)?;

    let new_owner = deps.api.addr_validate(&new_owner)?;
    OWNER.set(deps.branch(), Some(new_owner.clone()))?;
    let version = bump_version(deps.storage)?;

    let event = Event::new("transfer_ownership")
        .add_attribute("new_owner", new_owner)
        .add_attribute("version", version.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

/// Applies to tokens minted from now on
pub fn execute_update_base_uri(
    deps: DepsMut,
    info: MessageInfo,
    base_uri: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    only_owner(deps.as_ref(), &info.sender)?;

    let config = CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.base_uri = base_uri;
        config.version += 1;
        Ok(config)
    })?;

    let event = Event::new("update_base_uri")
        .add_attribute("base_uri", config.base_uri)
        .add_attribute("version", config.version.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

/// Sends every coin the contract holds to the owner, including proceeds in
/// denoms the price no longer uses
pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    only_owner(deps.as_ref(), &info.sender)?;

    let balances = deps.querier.query_all_balances(env.contract.address)?;
    let amount = balances
        .into_iter()
        .filter(|coin| !coin.amount.is_zero())
        .collect::<Vec<_>>();
    if amount.is_empty() {
        return Err(ContractError::NothingToWithdraw {});
    }

    let withdrawn = amount
        .iter()
        .map(|coin| coin.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let msg = BankMsg::Send {
        to_address: info.sender.to_string(),
        amount,
    };

    let event = Event::new("withdraw")
        .add_attribute("amount", withdrawn)
        .add_attribute("recipient", info.sender);
    Ok(Response::new().add_message(msg).add_event(event))
}
