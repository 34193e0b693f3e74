use cosmwasm_std::{coins, Addr, BankMsg, Coin, MessageInfo, Uint128};
use cw_utils::may_pay;

use crate::ContractError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// `unit_price * quantity`, kept by the contract
    pub required: Uint128,
    /// Overpayment sent back to the payer
    pub refund: Uint128,
}

pub fn settle(
    paid: Uint128,
    unit_price: Uint128,
    quantity: u32,
) -> Result<Settlement, ContractError> {
    let required = unit_price.checked_mul(Uint128::from(quantity))?;
    if paid < required {
        return Err(ContractError::InsufficientPayment { required, paid });
    }

    Ok(Settlement {
        required,
        refund: paid - required,
    })
}

/// Amount sent in the price denom. Sending nothing is a zero payment so free
/// mints need no funds, other denoms are rejected.
pub fn paid_amount(info: &MessageInfo, unit_price: &Coin) -> Result<Uint128, ContractError> {
    Ok(may_pay(info, &unit_price.denom)?)
}

impl Settlement {
    pub fn refund_msg(&self, payer: &Addr, denom: &str) -> Option<BankMsg> {
        if self.refund.is_zero() {
            return None;
        }
        Some(BankMsg::Send {
            to_address: payer.to_string(),
            amount: coins(self.refund.u128(), denom),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_info;
    use cosmwasm_std::coin;
    use cw_utils::PaymentError;

    // 18 decimal places, as on chains that price in wei
    const ONE: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn exact_payment_has_no_refund() {
        let settlement = settle(Uint128::new(300), Uint128::new(100), 3).unwrap();
        assert_eq!(settlement.required, Uint128::new(300));
        assert_eq!(settlement.refund, Uint128::zero());
        assert_eq!(settlement.refund_msg(&Addr::unchecked("user"), "ustars"), None);
    }

    #[test]
    fn overpayment_is_refunded() {
        // 10.0 paid against 0.04 required
        let settlement = settle(Uint128::new(10 * ONE), Uint128::new(4 * ONE / 100), 1).unwrap();
        assert_eq!(settlement.refund, Uint128::new(996 * ONE / 100));

        let msg = settlement
            .refund_msg(&Addr::unchecked("user"), "ustars")
            .unwrap();
        assert_eq!(
            msg,
            BankMsg::Send {
                to_address: "user".to_string(),
                amount: coins(996 * ONE / 100, "ustars"),
            }
        );
    }

    #[test]
    fn underpayment_is_rejected() {
        let err = settle(Uint128::new(199), Uint128::new(100), 2).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientPayment {
                required: Uint128::new(200),
                paid: Uint128::new(199)
            }
        );
    }

    #[test]
    fn price_overflow_is_an_error() {
        let err = settle(Uint128::MAX, Uint128::MAX, 2).unwrap_err();
        assert!(matches!(err, ContractError::Overflow(_)));
    }

    #[test]
    fn free_mint_needs_no_funds() {
        let price = coin(0, "ustars");
        let paid = paid_amount(&mock_info("user", &[]), &price).unwrap();
        assert_eq!(settle(paid, price.amount, 2).unwrap().refund, Uint128::zero());
    }

    #[test]
    fn wrong_denom_is_rejected() {
        let price = coin(100, "ustars");
        let err = paid_amount(&mock_info("user", &[coin(100, "uatom")]), &price).unwrap_err();
        assert_eq!(
            err,
            ContractError::Payment(PaymentError::ExtraDenom("uatom".to_string()))
        );
    }
}
