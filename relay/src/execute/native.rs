//! Native coin handlers.
//!
//! The relay never bridges native coins, but it accepts them (for example to
//! fund relaying costs) and lets the owner send them back out.

use cosmwasm_std::{BankMsg, Coin, DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::ownership::ensure_owner;

pub fn execute_receive_native(info: MessageInfo) -> Result<Response, ContractError> {
    if info.funds.is_empty() || info.funds.iter().all(|c| c.amount.is_zero()) {
        return Err(ContractError::NoFundsSent);
    }

    let funds = info
        .funds
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");

    Ok(Response::new()
        .add_attribute("method", "native_received")
        .add_attribute("sender", info.sender)
        .add_attribute("funds", funds))
}

pub fn execute_withdraw_native(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    amount: Uint128,
    to: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }
    let to_addr = deps.api.addr_validate(&to)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: to_addr.to_string(),
            amount: vec![Coin {
                denom: denom.clone(),
                amount,
            }],
        })
        .add_attribute("method", "native_withdraw")
        .add_attribute("to", to_addr)
        .add_attribute("denom", denom)
        .add_attribute("amount", amount.to_string()))
}
