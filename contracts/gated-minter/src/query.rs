#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Binary, Deps, Env, StdError, StdResult};

use crate::{
    allowlist::verify_membership,
    helpers::CollectionContract,
    msg::{
        CollectionResponse, MerkleRootResponse, MintCountResponse, QueryMsg, StatusResponse,
        TotalMintedResponse,
    },
    quota::{minted, remaining, Pool},
    state::{Config, COLLECTION, CONFIG, MERKLE_ROOT, MINTED_SUPPLY, OWNER, STATUS},
    ContractError,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Owner {} => to_binary(&OWNER.query_admin(deps)?),
        QueryMsg::BaseUri {} => to_binary(&CONFIG.load(deps.storage)?.base_uri),
        QueryMsg::Status {} => to_binary(&query_status(deps)?),
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::MerkleRoot {} => to_binary(&query_merkle_root(deps)?),
        QueryMsg::Collection {} => to_binary(&query_collection(deps)?),
        QueryMsg::MintCount { address } => to_binary(&query_mint_count(deps, address)?),
        QueryMsg::Allowance { address } => to_binary(&query_allowance(deps, address)?),
        QueryMsg::IncludesAddress { address, proof } => {
            to_binary(&query_includes_address(deps, address, proof)?)
        }
        QueryMsg::BalanceOf { address } => to_binary(&query_balance_of(deps, address)?),
        QueryMsg::TotalMinted {} => to_binary(&query_total_minted(deps, env)?),
    }
}

fn query_status(deps: Deps) -> StdResult<StatusResponse> {
    Ok(StatusResponse {
        status: STATUS.load(deps.storage)?,
        version: CONFIG.load(deps.storage)?.version,
    })
}

fn query_config(deps: Deps) -> StdResult<Config> {
    CONFIG.load(deps.storage)
}

fn query_merkle_root(deps: Deps) -> StdResult<MerkleRootResponse> {
    Ok(MerkleRootResponse {
        root: MERKLE_ROOT.load(deps.storage)?,
    })
}

fn query_collection(deps: Deps) -> StdResult<CollectionResponse> {
    let collection = COLLECTION.load(deps.storage)?;
    Ok(CollectionResponse {
        collection: collection.to_string(),
    })
}

fn query_mint_count(deps: Deps, address: String) -> StdResult<MintCountResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let config = CONFIG.load(deps.storage)?;

    Ok(MintCountResponse {
        public_minted: minted(deps.storage, &addr, Pool::Public)?,
        public_remaining: remaining(deps.storage, &addr, Pool::Public, &config)?,
        allowlist_minted: minted(deps.storage, &addr, Pool::Allowlist)?,
        allowlist_remaining: remaining(deps.storage, &addr, Pool::Allowlist, &config)?,
        seeded_remaining: remaining(deps.storage, &addr, Pool::Seeded, &config)?,
    })
}

fn query_allowance(deps: Deps, address: String) -> StdResult<u32> {
    let addr = deps.api.addr_validate(&address)?;
    let config = CONFIG.load(deps.storage)?;
    remaining(deps.storage, &addr, Pool::Seeded, &config)
}

fn query_includes_address(deps: Deps, address: String, proof: Vec<String>) -> StdResult<bool> {
    let addr = deps.api.addr_validate(&address)?;
    let root = MERKLE_ROOT.load(deps.storage)?;

    match verify_membership(root.as_deref(), &addr, &proof) {
        Ok(()) => Ok(true),
        Err(ContractError::NotInAllowlist {}) => Ok(false),
        Err(err) => Err(StdError::generic_err(err.to_string())),
    }
}

fn query_balance_of(deps: Deps, address: String) -> StdResult<u64> {
    let addr = deps.api.addr_validate(&address)?;
    let collection = CollectionContract(COLLECTION.load(deps.storage)?);
    collection.balance_of(&deps.querier, &addr)
}

fn query_total_minted(deps: Deps, env: Env) -> StdResult<TotalMintedResponse> {
    let config = CONFIG.load(deps.storage)?;
    let balance = deps
        .querier
        .query_balance(env.contract.address, config.unit_price.denom)?;

    Ok(TotalMintedResponse {
        minted: MINTED_SUPPLY.load(deps.storage)?,
        max_supply: config.max_supply,
        balance: balance.amount,
    })
}
