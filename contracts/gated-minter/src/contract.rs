#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, DepsMut, Empty, Env, Event, MessageInfo, OverflowError, OverflowOperation, Reply,
    StdError, StdResult, SubMsg, WasmMsg,
};
use cw2::set_contract_version;
use cw721_base::InstantiateMsg as Cw721InstantiateMsg;
use cw_utils::{nonpayable, parse_reply_instantiate_data};
use semver::Version;
use sg_std::Response;

use crate::admin::{
    execute_seed_allowlist, execute_set_merkle_root, execute_set_status,
    execute_transfer_ownership, execute_update_base_uri, execute_withdraw,
};
use crate::allowlist::{normalize_root, verify_membership};
use crate::error::ContractError;
use crate::helpers::CollectionContract;
use crate::msg::{ExecuteMsg, InstantiateMsg};
use crate::payment::{paid_amount, settle};
use crate::quota::{check_and_reserve, Pool, Reservation};
use crate::state::{
    Config, MintSnapshot, COLLECTION, CONFIG, MERKLE_ROOT, MINTED_SUPPLY, OWNER, STATUS,
};
use crate::status::{require_enabled, MintPath, Status};

// version info for migration info
pub const CONTRACT_NAME: &str = "crates.io:gated-minter";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const INIT_COLLECTION_REPLY_ID: u64 = 1;

pub const DEFAULT_PUBLIC_CAP: u32 = 2;
pub const DEFAULT_ALLOWLIST_CAP: u32 = 2;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let api = deps.api;
    let owner = match msg.owner {
        Some(owner) => api.addr_validate(&owner)?,
        None => info.sender.clone(),
    };
    OWNER.set(deps.branch(), Some(owner.clone()))?;

    let config = Config {
        allowlist_price: msg.allowlist_price.unwrap_or_else(|| msg.unit_price.clone()),
        unit_price: msg.unit_price,
        public_cap: msg.public_cap.unwrap_or(DEFAULT_PUBLIC_CAP),
        allowlist_cap: msg.allowlist_cap.unwrap_or(DEFAULT_ALLOWLIST_CAP),
        max_supply: msg.max_supply,
        base_uri: msg.base_uri,
        version: 0,
    };
    CONFIG.save(deps.storage, &config)?;
    STATUS.save(deps.storage, &Status::Closed)?;
    MERKLE_ROOT.save(deps.storage, &normalize_root(msg.merkle_root)?)?;
    MINTED_SUPPLY.save(deps.storage, &0)?;

    let wasm_msg = WasmMsg::Instantiate {
        code_id: msg.collection_code_id,
        msg: to_binary(&Cw721InstantiateMsg {
            name: msg.collection_name.clone(),
            symbol: msg.collection_symbol,
            minter: env.contract.address.to_string(),
        })?,
        funds: vec![],
        admin: Some(owner.to_string()),
        label: format!("{} Collection", msg.collection_name),
    };
    let submsg = SubMsg::reply_on_success(wasm_msg, INIT_COLLECTION_REPLY_ID);

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("unit_price", config.unit_price.to_string())
        .add_attribute("allowlist_price", config.allowlist_price.to_string())
        .add_submessage(submsg))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != INIT_COLLECTION_REPLY_ID {
        return Err(ContractError::InvalidReplyID {});
    }

    let reply = parse_reply_instantiate_data(msg);
    match reply {
        Ok(res) => {
            let collection = deps.api.addr_validate(&res.contract_address)?;
            COLLECTION.save(deps.storage, &collection)?;

            Ok(Response::default()
                .add_attribute("action", "init_collection_reply")
                .add_attribute("collection", collection))
        }
        Err(_) => Err(ContractError::ReplyOnSuccess {}),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint { quantity } => execute_mint(deps, info, quantity),
        ExecuteMsg::AllowlistMint { quantity, proof } => {
            execute_allowlist_mint(deps, info, quantity, proof)
        }
        ExecuteMsg::SeededAllowlistMint { quantity } => {
            execute_seeded_allowlist_mint(deps, info, quantity)
        }
        ExecuteMsg::SetStatus { status } => execute_set_status(deps, info, status),
        ExecuteMsg::SetMerkleRoot { root } => execute_set_merkle_root(deps, info, root),
        ExecuteMsg::SeedAllowlist {
            addresses,
            allowances,
        } => execute_seed_allowlist(deps, info, addresses, allowances),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::UpdateBaseUri { base_uri } => execute_update_base_uri(deps, info, base_uri),
        ExecuteMsg::Withdraw {} => execute_withdraw(deps, env, info),
    }
}

/// Public mint, bounded by the per-address public cap
pub fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    quantity: u32,
) -> Result<Response, ContractError> {
    let snapshot = MintSnapshot::load(deps.storage)?;

    require_enabled(snapshot.status, MintPath::Public)?;
    validate_quantity(quantity)?;
    let reservation = check_and_reserve(
        deps.storage,
        &info.sender,
        Pool::Public,
        quantity,
        &snapshot.config,
    )?;

    issue(deps, &info, &snapshot, reservation)
}

/// Allowlist mint, the sender proves membership in the committed Merkle root
pub fn execute_allowlist_mint(
    deps: DepsMut,
    info: MessageInfo,
    quantity: u32,
    proof: Vec<String>,
) -> Result<Response, ContractError> {
    let snapshot = MintSnapshot::load(deps.storage)?;

    require_enabled(snapshot.status, MintPath::Allowlist)?;
    validate_quantity(quantity)?;
    verify_membership(snapshot.merkle_root.as_deref(), &info.sender, &proof)?;
    let reservation = check_and_reserve(
        deps.storage,
        &info.sender,
        Pool::Allowlist,
        quantity,
        &snapshot.config,
    )?;

    issue(deps, &info, &snapshot, reservation)
}

/// Allowlist mint against the allowance the owner seeded for the sender
pub fn execute_seeded_allowlist_mint(
    deps: DepsMut,
    info: MessageInfo,
    quantity: u32,
) -> Result<Response, ContractError> {
    let snapshot = MintSnapshot::load(deps.storage)?;

    require_enabled(snapshot.status, MintPath::Allowlist)?;
    validate_quantity(quantity)?;
    let reservation = check_and_reserve(
        deps.storage,
        &info.sender,
        Pool::Seeded,
        quantity,
        &snapshot.config,
    )?;

    issue(deps, &info, &snapshot, reservation)
}

fn validate_quantity(quantity: u32) -> Result<(), ContractError> {
    if quantity == 0 {
        return Err(ContractError::InvalidQuantity {});
    }
    Ok(())
}

/// Final steps shared by every mint path: supply limit, payment, then the
/// writes and messages. Nothing is written until every check has passed.
/// The mint and refund messages run in the same transaction, so if either
/// fails the quota and supply updates are reverted with it.
fn issue(
    deps: DepsMut,
    info: &MessageInfo,
    snapshot: &MintSnapshot,
    reservation: Reservation,
) -> Result<Response, ContractError> {
    let config = &snapshot.config;
    let quantity = u64::from(reservation.quantity);

    if let Some(max_supply) = config.max_supply {
        let remaining = max_supply.saturating_sub(snapshot.minted_supply);
        if quantity > remaining {
            return Err(ContractError::SoldOut { remaining });
        }
    }

    let price = config.price_for(reservation.pool);
    let paid = paid_amount(info, price)?;
    let settlement = settle(paid, price.amount, reservation.quantity)?;

    let first_token_id = snapshot.minted_supply + 1;
    let minted_supply = snapshot.minted_supply.checked_add(quantity).ok_or_else(|| {
        OverflowError::new(OverflowOperation::Add, snapshot.minted_supply, quantity)
    })?;

    reservation.commit(deps.storage)?;
    MINTED_SUPPLY.save(deps.storage, &minted_supply)?;

    let collection = CollectionContract(COLLECTION.load(deps.storage)?);
    let mint_msgs = (first_token_id..=minted_supply)
        .map(|token_id| {
            collection.mint(
                token_id.to_string(),
                &info.sender,
                Some(format!("{}{}", config.base_uri, token_id)),
            )
        })
        .collect::<StdResult<Vec<_>>>()?;

    let mut res = Response::new().add_messages(mint_msgs);
    if let Some(refund_msg) = settlement.refund_msg(&info.sender, &price.denom) {
        res = res.add_message(refund_msg);
    }

    let event = Event::new("mint")
        .add_attribute("minter", info.sender.to_string())
        .add_attribute("pool", reservation.pool.to_string())
        .add_attribute("quantity", reservation.quantity.to_string())
        .add_attribute("first_token_id", first_token_id.to_string())
        .add_attribute("pool_count", reservation.value.to_string())
        .add_attribute("price", settlement.required.to_string())
        .add_attribute("refund", settlement.refund.to_string());

    Ok(res.add_event(event))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: Empty) -> Result<Response, ContractError> {
    let current_version = cw2::get_contract_version(deps.storage)?;
    if current_version.contract != CONTRACT_NAME {
        return Err(StdError::generic_err("Cannot upgrade to a different contract").into());
    }
    let version: Version = current_version
        .version
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;
    let new_version: Version = CONTRACT_VERSION
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;

    if version > new_version {
        return Err(StdError::generic_err("Cannot upgrade to a previous contract version").into());
    }
    // if same version return
    if version == new_version {
        return Ok(Response::new());
    }

    // set new contract version
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let event = Event::new("migrate")
        .add_attribute("from_version", current_version.version)
        .add_attribute("to_version", CONTRACT_VERSION);
    Ok(Response::new().add_event(event))
}
