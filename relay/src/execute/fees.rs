//! Fee withdrawal and operator fee settings.

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::ownership::{ensure_operator, ensure_owner};
use crate::fee_manager::{debit_admin_fee, debit_gas_fee, FEE_CONFIG};
use crate::state::CONFIG;
use crate::token::payout_msg;

// ============================================================================
// Withdrawals (owner)
// ============================================================================

pub fn execute_withdraw_admin_fee(
    deps: DepsMut,
    info: MessageInfo,
    to: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;
    let to_addr = deps.api.addr_validate(&to)?;

    let remaining = debit_admin_fee(deps.storage, amount)?;

    let config = CONFIG.load(deps.storage)?;
    let msg = payout_msg(&config, &to_addr, amount)?;

    Ok(Response::new()
        .add_messages(msg)
        .add_attribute("method", "admin_fee_withdraw")
        .add_attribute("to", to_addr)
        .add_attribute("amount", amount.to_string())
        .add_attribute("remaining", remaining.to_string()))
}

pub fn execute_withdraw_gas_fee(
    deps: DepsMut,
    info: MessageInfo,
    to: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;
    let to_addr = deps.api.addr_validate(&to)?;

    let remaining = debit_gas_fee(deps.storage, amount)?;

    let config = CONFIG.load(deps.storage)?;
    let msg = payout_msg(&config, &to_addr, amount)?;

    Ok(Response::new()
        .add_messages(msg)
        .add_attribute("method", "gas_fee_withdraw")
        .add_attribute("to", to_addr)
        .add_attribute("amount", amount.to_string())
        .add_attribute("remaining", remaining.to_string()))
}

// ============================================================================
// Settings (operator)
// ============================================================================

/// Set the fixed gas fee charged on every release. Zero disables it.
pub fn execute_set_base_gas(
    deps: DepsMut,
    info: MessageInfo,
    gas_fee: Uint128,
) -> Result<Response, ContractError> {
    ensure_operator(deps.storage, &info.sender)?;

    let mut fee_config = FEE_CONFIG.load(deps.storage)?;
    let previous = fee_config.gas_fee;
    fee_config.gas_fee = gas_fee;
    FEE_CONFIG.save(deps.storage, &fee_config)?;

    Ok(Response::new()
        .add_attribute("method", "base_gas_changed")
        .add_attribute("previous_gas_fee", previous.to_string())
        .add_attribute("gas_fee", gas_fee.to_string()))
}

pub fn execute_set_min_transfer_amount(
    deps: DepsMut,
    info: MessageInfo,
    min_transfer_amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_operator(deps.storage, &info.sender)?;

    let mut fee_config = FEE_CONFIG.load(deps.storage)?;
    let previous = fee_config.min_transfer_amount;
    fee_config.min_transfer_amount = min_transfer_amount;
    FEE_CONFIG.save(deps.storage, &fee_config)?;

    Ok(Response::new()
        .add_attribute("method", "min_transfer_amount_changed")
        .add_attribute("previous_min_transfer_amount", previous.to_string())
        .add_attribute("min_transfer_amount", min_transfer_amount.to_string()))
}
