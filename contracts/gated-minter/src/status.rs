use cosmwasm_schema::cw_serde;
use std::fmt;

use crate::ContractError;

/// Minting phase, only changed by the owner
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Status {
    Closed,
    Open,
    Paused,
    AllowlistOnly,
}

/// Which entry point a mint came through
#[cw_serde]
#[derive(Copy, Eq)]
pub enum MintPath {
    Public,
    Allowlist,
}

impl Status {
    pub fn permits(&self, path: MintPath) -> bool {
        match (self, path) {
            (Status::Open, _) => true,
            (Status::AllowlistOnly, MintPath::Allowlist) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Closed => "closed",
            Status::Open => "open",
            Status::Paused => "paused",
            Status::AllowlistOnly => "allowlist_only",
        };
        f.write_str(s)
    }
}

pub fn require_enabled(status: Status, path: MintPath) -> Result<(), ContractError> {
    if !status.permits(path) {
        return Err(ContractError::NotStarted {});
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_policy() {
        let cases = [
            (Status::Open, MintPath::Public, true),
            (Status::Open, MintPath::Allowlist, true),
            (Status::AllowlistOnly, MintPath::Public, false),
            (Status::AllowlistOnly, MintPath::Allowlist, true),
            (Status::Closed, MintPath::Public, false),
            (Status::Closed, MintPath::Allowlist, false),
            (Status::Paused, MintPath::Public, false),
            (Status::Paused, MintPath::Allowlist, false),
        ];
        for (status, path, allowed) in cases {
            assert_eq!(status.permits(path), allowed, "{} {:?}", status, path);
            match require_enabled(status, path) {
                Ok(()) => assert!(allowed),
                Err(err) => assert_eq!(err, ContractError::NotStarted {}),
            }
        }
    }

    #[test]
    fn serializes_snake_case() {
        let json = cosmwasm_std::to_binary(&Status::AllowlistOnly).unwrap();
        assert_eq!(json.as_slice(), br#""allowlist_only""#);
    }
}
