use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use std::fmt;

use crate::state::{Config, ALLOWLIST_MINTED, PUBLIC_MINTED, SEEDED_ALLOWANCES};
use crate::ContractError;

/// Independent per-account quota pools
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Pool {
    /// Capped by `public_cap`
    Public,
    /// Merkle allowlist, capped by `allowlist_cap`
    Allowlist,
    /// Owner seeded allowance
    Seeded,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pool::Public => "public",
            Pool::Allowlist => "allowlist",
            Pool::Seeded => "seeded",
        };
        f.write_str(s)
    }
}

/// A checked but not yet written quota update.
///
/// Holds the counter value the account ends up with once the mint goes through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub account: Addr,
    pub pool: Pool,
    pub quantity: u32,
    pub value: u32,
}

impl Reservation {
    pub fn commit(&self, storage: &mut dyn Storage) -> StdResult<()> {
        match self.pool {
            Pool::Public => PUBLIC_MINTED.save(storage, &self.account, &self.value),
            Pool::Allowlist => ALLOWLIST_MINTED.save(storage, &self.account, &self.value),
            Pool::Seeded => SEEDED_ALLOWANCES.save(storage, &self.account, &self.value),
        }
    }
}

/// Checks that `account` may take `quantity` more units from `pool`.
///
/// Nothing is written here. The mint handler commits the returned reservation
/// once every other check of the call has passed, so a rejected call never
/// leaves a counter changed.
pub fn check_and_reserve(
    storage: &dyn Storage,
    account: &Addr,
    pool: Pool,
    quantity: u32,
    config: &Config,
) -> Result<Reservation, ContractError> {
    let value = match pool {
        Pool::Public | Pool::Allowlist => {
            let minted = minted(storage, account, pool)?;
            let remaining = remaining(storage, account, pool, config)?;
            if quantity > remaining {
                return Err(ContractError::QuotaExceeded {
                    pool,
                    requested: quantity,
                    remaining,
                });
            }
            minted + quantity
        }
        Pool::Seeded => {
            let allowance = SEEDED_ALLOWANCES
                .may_load(storage, account)?
                .unwrap_or_default();
            // an exhausted allowance counts as removal from the list
            if allowance == 0 {
                return Err(ContractError::NotInAllowlist {});
            }
            if quantity > allowance {
                return Err(ContractError::QuotaExceeded {
                    pool,
                    requested: quantity,
                    remaining: allowance,
                });
            }
            allowance - quantity
        }
    };

    Ok(Reservation {
        account: account.clone(),
        pool,
        quantity,
        value,
    })
}

/// Units already minted from a capped pool. Seeded allowances are not counted.
pub fn minted(storage: &dyn Storage, account: &Addr, pool: Pool) -> StdResult<u32> {
    let count = match pool {
        Pool::Public => PUBLIC_MINTED.may_load(storage, account)?,
        Pool::Allowlist => ALLOWLIST_MINTED.may_load(storage, account)?,
        Pool::Seeded => None,
    };
    Ok(count.unwrap_or_default())
}

pub fn remaining(
    storage: &dyn Storage,
    account: &Addr,
    pool: Pool,
    config: &Config,
) -> StdResult<u32> {
    let remaining = match pool {
        Pool::Public => config
            .public_cap
            .saturating_sub(minted(storage, account, pool)?),
        Pool::Allowlist => config
            .allowlist_cap
            .saturating_sub(minted(storage, account, pool)?),
        Pool::Seeded => SEEDED_ALLOWANCES
            .may_load(storage, account)?
            .unwrap_or_default(),
    };
    Ok(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::coin;
    use cosmwasm_std::testing::MockStorage;

    fn config() -> Config {
        Config {
            unit_price: coin(10_000, "ustars"),
            allowlist_price: coin(2_500, "ustars"),
            public_cap: 2,
            allowlist_cap: 2,
            max_supply: None,
            base_uri: "ipfs://base/".to_string(),
            version: 0,
        }
    }

    fn reserve_and_commit(
        storage: &mut MockStorage,
        account: &Addr,
        pool: Pool,
        quantity: u32,
    ) -> Result<Reservation, ContractError> {
        let reservation = check_and_reserve(&*storage, account, pool, quantity, &config())?;
        reservation.commit(storage)?;
        Ok(reservation)
    }

    #[test]
    fn public_cap_is_enforced_before_mutation() {
        let mut storage = MockStorage::new();
        let user = Addr::unchecked("user");

        reserve_and_commit(&mut storage, &user, Pool::Public, 1).unwrap();
        assert_eq!(minted(&storage, &user, Pool::Public).unwrap(), 1);

        let err = reserve_and_commit(&mut storage, &user, Pool::Public, 2).unwrap_err();
        assert_eq!(
            err,
            ContractError::QuotaExceeded {
                pool: Pool::Public,
                requested: 2,
                remaining: 1
            }
        );
        assert_eq!(minted(&storage, &user, Pool::Public).unwrap(), 1);

        reserve_and_commit(&mut storage, &user, Pool::Public, 1).unwrap();
        assert_eq!(remaining(&storage, &user, Pool::Public, &config()).unwrap(), 0);
    }

    #[test]
    fn unchecked_reservation_writes_nothing() {
        let storage = MockStorage::new();
        let user = Addr::unchecked("user");

        let reservation =
            check_and_reserve(&storage, &user, Pool::Allowlist, 2, &config()).unwrap();
        assert_eq!(reservation.value, 2);
        assert_eq!(minted(&storage, &user, Pool::Allowlist).unwrap(), 0);
    }

    #[test]
    fn pools_do_not_interact() {
        let mut storage = MockStorage::new();
        let user = Addr::unchecked("user");
        SEEDED_ALLOWANCES.save(&mut storage, &user, &3).unwrap();

        reserve_and_commit(&mut storage, &user, Pool::Public, 2).unwrap();
        reserve_and_commit(&mut storage, &user, Pool::Allowlist, 2).unwrap();
        reserve_and_commit(&mut storage, &user, Pool::Seeded, 3).unwrap();

        assert_eq!(minted(&storage, &user, Pool::Public).unwrap(), 2);
        assert_eq!(minted(&storage, &user, Pool::Allowlist).unwrap(), 2);
        assert_eq!(remaining(&storage, &user, Pool::Seeded, &config()).unwrap(), 0);
    }

    #[test]
    fn seeded_allowance_counts_down_to_removal() {
        let mut storage = MockStorage::new();
        let user = Addr::unchecked("user");
        SEEDED_ALLOWANCES.save(&mut storage, &user, &3).unwrap();

        let err = reserve_and_commit(&mut storage, &user, Pool::Seeded, 4).unwrap_err();
        assert_eq!(
            err,
            ContractError::QuotaExceeded {
                pool: Pool::Seeded,
                requested: 4,
                remaining: 3
            }
        );

        reserve_and_commit(&mut storage, &user, Pool::Seeded, 3).unwrap();
        let err = reserve_and_commit(&mut storage, &user, Pool::Seeded, 1).unwrap_err();
        assert_eq!(err, ContractError::NotInAllowlist {});
    }

    #[test]
    fn unknown_account_is_not_seeded() {
        let storage = MockStorage::new();
        let err = check_and_reserve(
            &storage,
            &Addr::unchecked("stranger"),
            Pool::Seeded,
            1,
            &config(),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::NotInAllowlist {});
    }

    #[test]
    fn caps_come_from_config() {
        let storage = MockStorage::new();
        let user = Addr::unchecked("user");
        let config = Config {
            public_cap: 5,
            ..config()
        };
        let reservation = check_and_reserve(&storage, &user, Pool::Public, 5, &config).unwrap();
        assert_eq!(reservation.value, 5);
        assert!(check_and_reserve(&storage, &user, Pool::Allowlist, 3, &config).is_err());
    }
}
