use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, StdResult, Storage};
use cw_controllers::Admin;
use cw_storage_plus::{Item, Map};

use crate::quota::Pool;
use crate::status::Status;

#[cw_serde]
pub struct Config {
    /// Native-currency cost of one unit on the public path
    pub unit_price: Coin,
    /// Cost of one unit on either allowlist path
    pub allowlist_price: Coin,
    /// Per-address limit of the public pool
    pub public_cap: u32,
    /// Per-address limit of the Merkle allowlist pool
    pub allowlist_cap: u32,
    /// Total units this minter may ever issue, unlimited when `None`
    pub max_supply: Option<u64>,
    /// Token URI prefix, the token id is appended
    pub base_uri: String,
    /// Bumped on every owner or governance mutation
    pub version: u64,
}

impl Config {
    pub fn price_for(&self, pool: Pool) -> &Coin {
        match pool {
            Pool::Public => &self.unit_price,
            Pool::Allowlist | Pool::Seeded => &self.allowlist_price,
        }
    }
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Single owner. Admin-only operations check against this.
pub const OWNER: Admin = Admin::new("owner");

pub const STATUS: Item<Status> = Item::new("status");

/// Hex encoded root of the committed allowlist
pub const MERKLE_ROOT: Item<Option<String>> = Item::new("merkle-root");

pub const COLLECTION: Item<Addr> = Item::new("collection");

/// Units issued so far, also the last token id handed out
pub const MINTED_SUPPLY: Item<u64> = Item::new("minted-supply");

pub const PUBLIC_MINTED: Map<&Addr, u32> = Map::new("public-minted");

pub const ALLOWLIST_MINTED: Map<&Addr, u32> = Map::new("allowlist-minted");

/// Owner seeded allowances, decremented on use
pub const SEEDED_ALLOWANCES: Map<&Addr, u32> = Map::new("seeded-allowances");

/// Everything a mint call reads from shared configuration, loaded once per call
#[cw_serde]
pub struct MintSnapshot {
    pub status: Status,
    pub merkle_root: Option<String>,
    pub config: Config,
    pub minted_supply: u64,
}

impl MintSnapshot {
    pub fn load(storage: &dyn Storage) -> StdResult<Self> {
        Ok(MintSnapshot {
            status: STATUS.load(storage)?,
            merkle_root: MERKLE_ROOT.load(storage)?,
            config: CONFIG.load(storage)?,
            minted_supply: MINTED_SUPPLY.load(storage)?,
        })
    }
}

/// Increments the config version after an owner or governance change
pub fn bump_version(storage: &mut dyn Storage) -> StdResult<u64> {
    let config = CONFIG.update(storage, |mut config| -> StdResult<_> {
        config.version += 1;
        Ok(config)
    })?;
    Ok(config.version)
}
