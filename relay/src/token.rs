//! The bound cw20 token.
//!
//! Builds the token messages for each leg and keeps the lock-mode
//! `LOCKED_BALANCE` in step with what the relay actually holds for users.

use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, Storage, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::state::{Config, TokenMode, LOCKED_BALANCE};

/// Message paying `amount` of the bound token to `to`: a mint in
/// mint/burn mode, a transfer out of the relay's balance in lock mode.
///
/// Returns `None` for a zero amount; cw20 rejects zero mints and transfers.
pub fn payout_msg(config: &Config, to: &Addr, amount: Uint128) -> StdResult<Option<CosmosMsg>> {
    if amount.is_zero() {
        return Ok(None);
    }
    let msg = match config.token_mode {
        TokenMode::MintBurn => Cw20ExecuteMsg::Mint {
            recipient: to.to_string(),
            amount,
        },
        TokenMode::LockUnlock => Cw20ExecuteMsg::Transfer {
            recipient: to.to_string(),
            amount,
        },
    };
    Ok(Some(execute_msg(&config.token, &msg)?))
}

/// Burn `amount` out of the relay's own balance.
pub fn burn_msg(config: &Config, amount: Uint128) -> StdResult<CosmosMsg> {
    execute_msg(&config.token, &Cw20ExecuteMsg::Burn { amount })
}

fn execute_msg(token: &Addr, msg: &Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

// ============================================================================
// Locked balance
// ============================================================================

pub fn locked_balance(storage: &dyn Storage) -> StdResult<Uint128> {
    Ok(LOCKED_BALANCE.may_load(storage)?.unwrap_or_default())
}

/// Record `amount` as held for future releases.
pub fn lock(storage: &mut dyn Storage, amount: Uint128) -> StdResult<Uint128> {
    let locked = locked_balance(storage)?.checked_add(amount)?;
    LOCKED_BALANCE.save(storage, &locked)?;
    Ok(locked)
}

/// Release `amount` from the locked bucket.
pub fn unlock(storage: &mut dyn Storage, amount: Uint128) -> Result<Uint128, ContractError> {
    let locked = locked_balance(storage)?;
    if locked < amount {
        return Err(ContractError::InsufficientLiquidity {
            locked,
            requested: amount,
        });
    }
    let remaining = locked - amount;
    LOCKED_BALANCE.save(storage, &remaining)?;
    Ok(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;
    use cosmwasm_std::from_json;

    fn config(mode: TokenMode) -> Config {
        Config {
            token: Addr::unchecked("token"),
            token_mode: mode,
            chain_id: 1,
        }
    }

    fn inner(msg: CosmosMsg) -> Cw20ExecuteMsg {
        match msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, "token");
                from_json(msg).unwrap()
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_payout_follows_mode() {
        let to = Addr::unchecked("bob");
        let mint = payout_msg(&config(TokenMode::MintBurn), &to, Uint128::new(5))
            .unwrap()
            .unwrap();
        assert_eq!(
            inner(mint),
            Cw20ExecuteMsg::Mint {
                recipient: "bob".to_string(),
                amount: Uint128::new(5)
            }
        );

        let transfer = payout_msg(&config(TokenMode::LockUnlock), &to, Uint128::new(5))
            .unwrap()
            .unwrap();
        assert_eq!(
            inner(transfer),
            Cw20ExecuteMsg::Transfer {
                recipient: "bob".to_string(),
                amount: Uint128::new(5)
            }
        );
    }

    #[test]
    fn test_zero_payout_is_skipped() {
        let msg = payout_msg(
            &config(TokenMode::MintBurn),
            &Addr::unchecked("bob"),
            Uint128::zero(),
        )
        .unwrap();
        assert!(msg.is_none());
    }

    #[test]
    fn test_unlock_requires_liquidity() {
        let mut deps = mock_dependencies();
        assert_eq!(locked_balance(deps.as_ref().storage).unwrap(), Uint128::zero());

        lock(deps.as_mut().storage, Uint128::new(50)).unwrap();
        let err = unlock(deps.as_mut().storage, Uint128::new(51)).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientLiquidity {
                locked: Uint128::new(50),
                requested: Uint128::new(51)
            }
        );
        assert_eq!(unlock(deps.as_mut().storage, Uint128::new(20)).unwrap(), Uint128::new(30));
    }
}
