//! Ownership and operator handlers.
//!
//! This module handles:
//! - Two-step ownership transfer (transfer/accept) and renounce
//! - Operator registration
//! - The `ensure_owner` / `ensure_operator` guards used by other handlers

use cosmwasm_std::{Addr, DepsMut, Empty, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::state::{Ownership, OPERATORS, OWNERSHIP};

// ============================================================================
// Guards
// ============================================================================

/// Fails with `CallerNoOwner` unless `sender` is the current owner.
pub fn ensure_owner(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    let ownership = OWNERSHIP.load(storage)?;
    match ownership.owner {
        Some(owner) if owner == *sender => Ok(()),
        _ => Err(ContractError::CallerNoOwner),
    }
}

/// Fails with `CallerNoOperator` unless `sender` is an operator or the owner.
pub fn ensure_operator(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if OPERATORS.has(storage, sender) || ensure_owner(storage, sender).is_ok() {
        return Ok(());
    }
    Err(ContractError::CallerNoOperator)
}

// ============================================================================
// Ownership Transfer
// ============================================================================

/// Nominate a new owner. Takes effect once they accept.
pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    if new_owner.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "new owner must not be empty".to_string(),
        });
    }
    let new_owner_addr = deps.api.addr_validate(&new_owner)?;

    let mut ownership = OWNERSHIP.load(deps.storage)?;
    ownership.pending_owner = Some(new_owner_addr.clone());
    OWNERSHIP.save(deps.storage, &ownership)?;

    Ok(Response::new()
        .add_attribute("method", "ownership_transfer_started")
        .add_attribute("previous_owner", info.sender)
        .add_attribute("pending_owner", new_owner_addr))
}

pub fn execute_accept_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let ownership = OWNERSHIP.load(deps.storage)?;
    if ownership.pending_owner.as_ref() != Some(&info.sender) {
        return Err(ContractError::CallerNoNewOwner);
    }

    let previous = ownership.owner.map(|o| o.to_string()).unwrap_or_default();
    OWNERSHIP.save(
        deps.storage,
        &Ownership {
            owner: Some(info.sender.clone()),
            pending_owner: None,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "ownership_transferred")
        .add_attribute("previous_owner", previous)
        .add_attribute("new_owner", info.sender))
}

/// Clear the owner and any pending nomination. Irreversible.
pub fn execute_renounce_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    OWNERSHIP.save(
        deps.storage,
        &Ownership {
            owner: None,
            pending_owner: None,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "ownership_transferred")
        .add_attribute("previous_owner", info.sender)
        .add_attribute("new_owner", ""))
}

// ============================================================================
// Operators
// ============================================================================

pub fn execute_add_operator(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let operator_addr = deps.api.addr_validate(&operator)?;
    if OPERATORS.has(deps.storage, &operator_addr) {
        return Err(ContractError::OperatorAlreadyRegistered);
    }
    OPERATORS.save(deps.storage, &operator_addr, &Empty {})?;

    Ok(Response::new()
        .add_attribute("method", "add_operator")
        .add_attribute("operator", operator_addr))
}

pub fn execute_remove_operator(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let operator_addr = deps.api.addr_validate(&operator)?;
    if !OPERATORS.has(deps.storage, &operator_addr) {
        return Err(ContractError::OperatorNotRegistered);
    }
    OPERATORS.remove(deps.storage, &operator_addr);

    Ok(Response::new()
        .add_attribute("method", "remove_operator")
        .add_attribute("operator", operator_addr))
}
