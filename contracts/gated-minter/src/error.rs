use allowlist_merkle::MerkleError;
use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

use crate::quota::Pool;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Gated Minter: Unauthorized")]
    Unauthorized {},

    #[error("NotStarted")]
    NotStarted {},

    #[error("QuotaExceeded: {pool} pool, requested {requested}, remaining {remaining}")]
    QuotaExceeded {
        pool: Pool,
        requested: u32,
        remaining: u32,
    },

    #[error("NotInAllowlist")]
    NotInAllowlist {},

    #[error("Insufficient payment, required: {required}, paid {paid}")]
    InsufficientPayment { required: Uint128, paid: Uint128 },

    #[error("InvalidQuantity")]
    InvalidQuantity {},

    #[error("SoldOut: {remaining} remaining")]
    SoldOut { remaining: u64 },

    #[error("AllowlistLengthMismatch: {addresses} addresses, {allowances} allowances")]
    AllowlistLengthMismatch { addresses: usize, allowances: usize },

    #[error("NothingToWithdraw")]
    NothingToWithdraw {},

    #[error("InvalidHash: {0}")]
    InvalidHash(#[from] MerkleError),

    #[error("Invalid reply ID")]
    InvalidReplyID {},

    #[error("Reply error")]
    ReplyOnSuccess {},
}
