//! Deposit leg: the relay receives the bound token via cw20 `Send` and
//! records an outbound transfer for the signers to pick up.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, DepsMut, Env, MessageInfo, Response, Uint128,
};
use cw20::Cw20ReceiveMsg;

use crate::error::ContractError;
use crate::fee_manager::{total_fee, FEE_CONFIG};
use crate::msg::ReceiveMsg;
use crate::state::{Config, DepositRecord, TokenMode, CONFIG, DEPOSITS, OUTGOING_NONCE, STATS};
use crate::token::{burn_msg, lock};

/// cw20 receiver hook. Only the bound token is accepted.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.token {
        return Err(ContractError::UnsupportedToken {
            token: info.sender.to_string(),
        });
    }

    let depositor = deps.api.addr_validate(&wrapper.sender)?;
    match from_json(&wrapper.msg)? {
        ReceiveMsg::Deposit {
            recipient,
            destination_chain_id,
        } => execute_deposit(
            deps,
            env,
            &config,
            depositor,
            recipient,
            wrapper.amount,
            destination_chain_id,
        ),
    }
}

/// Record a deposit of `amount` already held by the relay.
///
/// The assigned nonce is returned as the response data.
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    config: &Config,
    depositor: Addr,
    recipient: String,
    amount: Uint128,
    destination_chain_id: u64,
) -> Result<Response, ContractError> {
    if is_null_recipient(&recipient) {
        return Err(ContractError::ReceiverZeroAddress);
    }

    if destination_chain_id == 0 || destination_chain_id == config.chain_id {
        return Err(ContractError::InvalidChainId {
            chain_id: destination_chain_id,
        });
    }

    let fee_config = FEE_CONFIG.load(deps.storage)?;
    if amount <= fee_config.min_transfer_amount {
        return Err(ContractError::DepositAmountInvalid {
            reason: format!(
                "amount {} must exceed minimum {}",
                amount, fee_config.min_transfer_amount
            ),
        });
    }
    let fee = total_fee(&fee_config, amount)?;
    if amount <= fee {
        return Err(ContractError::DepositAmountInvalid {
            reason: format!("amount {} must exceed fee {}", amount, fee),
        });
    }

    // Take custody of the tokens
    let mut response = Response::new();
    match config.token_mode {
        TokenMode::MintBurn => {
            response = response.add_message(burn_msg(config, amount)?);
        }
        TokenMode::LockUnlock => {
            lock(deps.storage, amount)?;
        }
    }

    let nonce = OUTGOING_NONCE.load(deps.storage)?;
    OUTGOING_NONCE.save(deps.storage, &(nonce + 1))?;

    let record = DepositRecord {
        nonce,
        depositor: depositor.clone(),
        recipient: recipient.clone(),
        amount,
        destination_chain_id,
        timestamp: env.block.time,
    };
    DEPOSITS.save(deps.storage, nonce, &record)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_deposits += 1;
    stats.total_deposited = stats.total_deposited.checked_add(amount)?;
    STATS.save(deps.storage, &stats)?;

    Ok(response
        .set_data(to_json_binary(&nonce)?)
        .add_attribute("method", "deposited")
        .add_attribute("depositor", depositor)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("destination_chain_id", destination_chain_id.to_string())
        .add_attribute("token_mode", config.token_mode.as_str()))
}

/// The empty string, or hex (with or without `0x`) made only of zero bytes.
pub fn is_null_recipient(recipient: &str) -> bool {
    let trimmed = recipient.trim();
    if trimmed.is_empty() {
        return true;
    }
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    match hex::decode(stripped) {
        Ok(bytes) => bytes.iter().all(|b| *b == 0),
        Err(_) => false,
    }
}
