use allowlist_merkle::{leaf_hash, parse_hash, parse_proof, to_hex, verify};
use cosmwasm_std::Addr;

use crate::ContractError;

/// Validates a hex root and stores it in one canonical form (lowercase, no prefix)
pub fn normalize_root(root: Option<String>) -> Result<Option<String>, ContractError> {
    Ok(root
        .map(|r| parse_hash(&r))
        .transpose()?
        .map(|hash| to_hex(&hash)))
}

/// Fails with `NotInAllowlist` unless `proof` places `account` under `root`,
/// including when a proof element is not a 32 byte hex hash.
/// With no root committed nobody is on the list.
pub fn verify_membership(
    root: Option<&str>,
    account: &Addr,
    proof: &[String],
) -> Result<(), ContractError> {
    let root = match root {
        Some(root) => parse_hash(root)?,
        None => return Err(ContractError::NotInAllowlist {}),
    };
    // a malformed proof proves nothing
    let proof = parse_proof(proof).map_err(|_| ContractError::NotInAllowlist {})?;

    if !verify(&root, leaf_hash(account.as_str()), &proof) {
        return Err(ContractError::NotInAllowlist {});
    }
    Ok(())
}
