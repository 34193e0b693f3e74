use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Uint128};
use cw_controllers::AdminResponse;

use crate::state::Config;
use crate::status::Status;

#[cw_serde]
pub struct InstantiateMsg {
    /// Code id of the cw721 collection this minter issues into
    pub collection_code_id: u64,
    pub collection_name: String,
    pub collection_symbol: String,
    pub unit_price: Coin,
    /// Price on the allowlist paths, defaults to `unit_price`
    pub allowlist_price: Option<Coin>,
    /// Defaults to 2
    pub public_cap: Option<u32>,
    /// Defaults to 2
    pub allowlist_cap: Option<u32>,
    pub max_supply: Option<u64>,
    pub base_uri: String,
    /// Defaults to the sender
    pub owner: Option<String>,
    /// Hex encoded allowlist root
    pub merkle_root: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Public mint, capped per address
    Mint { quantity: u32 },
    /// Allowlist mint with a Merkle proof of the sender's membership
    AllowlistMint { quantity: u32, proof: Vec<String> },
    /// Allowlist mint against an allowance seeded by the owner
    SeededAllowlistMint { quantity: u32 },
    /// Only callable by the owner
    SetStatus { status: Status },
    /// Only callable by the owner. `None` clears the allowlist.
    SetMerkleRoot { root: Option<String> },
    /// Only callable by the owner. Overwrites the allowance of each address.
    SeedAllowlist {
        addresses: Vec<String>,
        allowances: Vec<u32>,
    },
    TransferOwnership { new_owner: String },
    UpdateBaseUri { base_uri: String },
    /// Send mint proceeds to the owner
    Withdraw {},
}

#[cw_serde]
pub enum SudoMsg {
    /// Update minting parameters
    /// Can only be called by governance
    UpdateParams {
        unit_price: Option<Coin>,
        allowlist_price: Option<Coin>,
        public_cap: Option<u32>,
        allowlist_cap: Option<u32>,
        max_supply: Option<u64>,
    },
    /// Lift the total supply limit
    RemoveMaxSupply {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(AdminResponse)]
    Owner {},
    #[returns(String)]
    BaseUri {},
    #[returns(StatusResponse)]
    Status {},
    #[returns(Config)]
    Config {},
    #[returns(MerkleRootResponse)]
    MerkleRoot {},
    #[returns(CollectionResponse)]
    Collection {},
    #[returns(MintCountResponse)]
    MintCount { address: String },
    /// Remaining seeded allowance
    #[returns(u32)]
    Allowance { address: String },
    /// Whether the proof places the address in the current allowlist
    #[returns(bool)]
    IncludesAddress { address: String, proof: Vec<String> },
    /// Number of tokens the address holds in the collection
    #[returns(u64)]
    BalanceOf { address: String },
    #[returns(TotalMintedResponse)]
    TotalMinted {},
}

#[cw_serde]
pub struct StatusResponse {
    pub status: Status,
    pub version: u64,
}

#[cw_serde]
pub struct MerkleRootResponse {
    pub root: Option<String>,
}

#[cw_serde]
pub struct CollectionResponse {
    pub collection: String,
}

#[cw_serde]
pub struct MintCountResponse {
    pub public_minted: u32,
    pub public_remaining: u32,
    pub allowlist_minted: u32,
    pub allowlist_remaining: u32,
    pub seeded_remaining: u32,
}

#[cw_serde]
pub struct TotalMintedResponse {
    pub minted: u64,
    pub max_supply: Option<u64>,
    /// Current contract balance in the public price denom
    pub balance: Uint128,
}
