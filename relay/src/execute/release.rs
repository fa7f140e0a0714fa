//! Release leg handlers (Send and SendBatch).
//!
//! A release marks its source nonce processed, splits the amount into fees
//! and the recipient's share, and pays the recipient (and the bridge wallet,
//! if one is set) in the bound token. `send` is authorized by a signer
//! quorum; `send_batch` by an operator.

use cosmwasm_std::{
    Addr, Api, Binary, CosmosMsg, DepsMut, Empty, Env, MessageInfo, Response, Storage, Uint128,
};

use common::send_digest;

use crate::error::ContractError;
use crate::execute::ownership::ensure_operator;
use crate::fee_manager::{accrue_fees, split_amount, FeeConfig, FeeSplit, FEE_CONFIG};
use crate::quorum::{domain, verify_quorum};
use crate::state::{Config, TokenMode, CONFIG, PROCESSED_BATCHES, PROCESSED_NONCES, STATS};
use crate::token::{payout_msg, unlock};

/// Result of settling one release
struct Settlement {
    split: FeeSplit,
    messages: Vec<CosmosMsg>,
}

// ============================================================================
// Send
// ============================================================================

/// Release a deposit authorized by the signer quorum.
///
/// The processed-nonce check runs first, so a replay fails with
/// `NonceAlreadyProcessed` whatever signatures accompany it.
pub fn execute_send(
    deps: DepsMut,
    env: Env,
    sender: String,
    recipient: String,
    amount: Uint128,
    nonce: u64,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    ensure_unprocessed(deps.storage, nonce)?;

    let config = CONFIG.load(deps.storage)?;
    let digest = send_digest(
        &domain(&config, &env),
        &sender,
        &recipient,
        amount.u128(),
        nonce,
    );
    let approvers = verify_quorum(deps.as_ref(), &digest, &signatures)?;

    let recipient_addr = validate_recipient(deps.api, &recipient)?;
    let fee_config = FEE_CONFIG.load(deps.storage)?;

    let settlement = settle(
        deps.storage,
        &config,
        &fee_config,
        &recipient_addr,
        amount,
        nonce,
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_releases += 1;
    stats.total_released = stats.total_released.checked_add(amount)?;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(settlement.messages)
        .add_attribute("method", "sent")
        .add_attribute("sender", sender)
        .add_attribute("recipient", recipient_addr)
        .add_attribute("amount", settlement.split.recipient_amount.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("admin_fee", settlement.split.admin_fee.to_string())
        .add_attribute("gas_fee", settlement.split.gas_fee.to_string())
        .add_attribute("signatures", approvers.len().to_string()))
}

// ============================================================================
// SendBatch
// ============================================================================

/// Release several deposits in one call.
///
/// `batch_nonce` can be used once. Every `refs[i]` is also marked processed,
/// so an element can be released neither twice within the batch nor again
/// later through `send`.
pub fn execute_send_batch(
    deps: DepsMut,
    info: MessageInfo,
    recipients: Vec<String>,
    amounts: Vec<Uint128>,
    refs: Vec<u64>,
    batch_nonce: u64,
) -> Result<Response, ContractError> {
    ensure_operator(deps.storage, &info.sender)?;

    if recipients.is_empty() || recipients.len() != amounts.len() || amounts.len() != refs.len()
    {
        return Err(ContractError::ParamsLengthMismatch);
    }

    if PROCESSED_BATCHES.has(deps.storage, batch_nonce) {
        return Err(ContractError::BatchNonceAlreadyProcessed { batch_nonce });
    }
    PROCESSED_BATCHES.save(deps.storage, batch_nonce, &Empty {})?;

    let config = CONFIG.load(deps.storage)?;
    let fee_config = FEE_CONFIG.load(deps.storage)?;

    let mut messages: Vec<CosmosMsg> = Vec::with_capacity(recipients.len() * 2);
    let mut total_amount = Uint128::zero();
    let mut total_admin_fee = Uint128::zero();
    let mut total_gas_fee = Uint128::zero();

    for ((recipient, amount), nonce) in recipients.iter().zip(amounts.iter()).zip(refs.iter()) {
        let recipient_addr = validate_recipient(deps.api, recipient)?;
        let settlement = settle(
            deps.storage,
            &config,
            &fee_config,
            &recipient_addr,
            *amount,
            *nonce,
        )?;

        total_amount = total_amount.checked_add(*amount)?;
        total_admin_fee += settlement.split.admin_fee;
        total_gas_fee += settlement.split.gas_fee;
        messages.extend(settlement.messages);
    }

    let mut stats = STATS.load(deps.storage)?;
    stats.total_releases += refs.len() as u64;
    stats.total_released = stats.total_released.checked_add(total_amount)?;
    STATS.save(deps.storage, &stats)?;

    let refs_attr = refs
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",");

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "send_batch")
        .add_attribute("batch_nonce", batch_nonce.to_string())
        .add_attribute("count", refs.len().to_string())
        .add_attribute("refs", refs_attr)
        .add_attribute("total_amount", total_amount.to_string())
        .add_attribute("admin_fee", total_admin_fee.to_string())
        .add_attribute("gas_fee", total_gas_fee.to_string()))
}

// ============================================================================
// Helpers
// ============================================================================

fn ensure_unprocessed(storage: &dyn Storage, nonce: u64) -> Result<(), ContractError> {
    if PROCESSED_NONCES.has(storage, nonce) {
        return Err(ContractError::NonceAlreadyProcessed { nonce });
    }
    Ok(())
}

fn validate_recipient(api: &dyn Api, recipient: &str) -> Result<Addr, ContractError> {
    if recipient.trim().is_empty() {
        return Err(ContractError::ReceiverZeroAddress);
    }
    Ok(api.addr_validate(recipient)?)
}

/// Mark `nonce` processed, split `amount` and build the payouts.
fn settle(
    storage: &mut dyn Storage,
    config: &Config,
    fee_config: &FeeConfig,
    recipient: &Addr,
    amount: Uint128,
    nonce: u64,
) -> Result<Settlement, ContractError> {
    ensure_unprocessed(storage, nonce)?;
    PROCESSED_NONCES.save(storage, nonce, &Empty {})?;

    let split = split_amount(fee_config, amount)?;

    if config.token_mode == TokenMode::LockUnlock {
        unlock(storage, amount)?;
    }

    let fee_wallet = accrue_fees(storage, fee_config, &split)?;

    let mut messages = vec![];
    if let Some(msg) = payout_msg(config, recipient, split.recipient_amount)? {
        messages.push(msg);
    }
    if let Some(wallet) = fee_wallet {
        if let Some(msg) = payout_msg(config, &wallet, split.admin_fee)? {
            messages.push(msg);
        }
    }

    Ok(Settlement { split, messages })
}
