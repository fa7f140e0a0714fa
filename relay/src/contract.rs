//! Quorum Relay Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//!
//! Every execute call runs inside [`atomic`], so a failing handler leaves
//! storage exactly as it found it.

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_ownership, execute_add_operator, execute_add_signer, execute_receive,
    execute_receive_native, execute_remove_operator, execute_remove_signer,
    execute_renounce_ownership, execute_send, execute_send_batch, execute_set_admin_fee,
    execute_set_base_gas, execute_set_bridge_wallet, execute_set_min_transfer_amount,
    execute_set_threshold, execute_transfer_ownership, execute_withdraw_admin_fee,
    execute_withdraw_gas_fee, execute_withdraw_native,
};
use crate::fee_manager::{
    validate_bridge_wallet, FeeAccumulator, FeeConfig, FEE_ACCUMULATOR, FEE_CONFIG,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_calculate_fee, query_config, query_deposit, query_deposits, query_fee_accumulator,
    query_fee_config, query_governance_digest, query_governance_nonce, query_is_batch_processed,
    query_is_operator, query_is_processed, query_is_signer, query_locked_balance,
    query_next_nonce, query_operators, query_ownership, query_send_digest, query_signer_length,
    query_signers, query_stats, query_threshold,
};
use crate::quorum::{init_signers, parse_signer};
use crate::state::{
    Config, Ownership, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, LOCKED_BALANCE, OPERATORS,
    OUTGOING_NONCE, OWNERSHIP, STATS,
};
use crate::transaction::atomic;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let token = deps.api.addr_validate(&msg.token)?;

    if msg.chain_id == 0 {
        return Err(ContractError::InvalidChainId {
            chain_id: msg.chain_id,
        });
    }

    let config = Config {
        token,
        token_mode: msg.token_mode,
        chain_id: msg.chain_id,
    };
    CONFIG.save(deps.storage, &config)?;

    OWNERSHIP.save(
        deps.storage,
        &Ownership {
            owner: Some(owner.clone()),
            pending_owner: None,
        },
    )?;

    for operator in &msg.operators {
        let operator = deps.api.addr_validate(operator)?;
        OPERATORS.save(deps.storage, &operator, &Empty {})?;
    }

    // Signer registry
    let signers = msg
        .signers
        .iter()
        .map(|s| parse_signer(s))
        .collect::<Result<Vec<_>, _>>()?;
    init_signers(deps.storage, &signers, msg.threshold)?;

    // Fees
    let bridge_wallet = msg
        .bridge_wallet
        .map(|w| validate_bridge_wallet(deps.api, &env.contract.address, &w))
        .transpose()?;
    let fee_config = FeeConfig {
        admin_fee_bps: msg.admin_fee_bps,
        gas_fee: msg.gas_fee,
        min_transfer_amount: msg.min_transfer_amount,
        bridge_wallet,
    };
    fee_config.validate()?;
    FEE_CONFIG.save(deps.storage, &fee_config)?;
    FEE_ACCUMULATOR.save(deps.storage, &FeeAccumulator::default())?;

    OUTGOING_NONCE.save(deps.storage, &0u64)?;
    LOCKED_BALANCE.save(deps.storage, &Uint128::zero())?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("token", config.token)
        .add_attribute("token_mode", config.token_mode.as_str())
        .add_attribute("chain_id", config.chain_id.to_string())
        .add_attribute("operator_count", msg.operators.len().to_string())
        .add_attribute("signer_count", signers.len().to_string())
        .add_attribute("threshold", msg.threshold.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    atomic(deps, |deps| dispatch(deps, env, info, msg))
}

fn dispatch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Deposit leg
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Release leg
        ExecuteMsg::Send {
            sender,
            recipient,
            amount,
            nonce,
            signatures,
        } => execute_send(deps, env, sender, recipient, amount, nonce, signatures),
        ExecuteMsg::SendBatch {
            recipients,
            amounts,
            refs,
            batch_nonce,
        } => execute_send_batch(deps, info, recipients, amounts, refs, batch_nonce),

        // Governance
        ExecuteMsg::AddSigner { signer, signatures } => {
            execute_add_signer(deps, env, signer, signatures)
        }
        ExecuteMsg::RemoveSigner { signer, signatures } => {
            execute_remove_signer(deps, env, signer, signatures)
        }
        ExecuteMsg::SetThreshold {
            threshold,
            signatures,
        } => execute_set_threshold(deps, env, threshold, signatures),
        ExecuteMsg::SetAdminFee {
            admin_fee_bps,
            signatures,
        } => execute_set_admin_fee(deps, env, admin_fee_bps, signatures),
        ExecuteMsg::SetBridgeWallet {
            bridge_wallet,
            signatures,
        } => execute_set_bridge_wallet(deps, env, bridge_wallet, signatures),

        // Fees
        ExecuteMsg::SetBaseGas { gas_fee } => execute_set_base_gas(deps, info, gas_fee),
        ExecuteMsg::SetMinTransferAmount {
            min_transfer_amount,
        } => execute_set_min_transfer_amount(deps, info, min_transfer_amount),
        ExecuteMsg::WithdrawAdminFee { to, amount } => {
            execute_withdraw_admin_fee(deps, info, to, amount)
        }
        ExecuteMsg::WithdrawGasFee { to, amount } => {
            execute_withdraw_gas_fee(deps, info, to, amount)
        }

        // Ownership
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::AcceptOwnership {} => execute_accept_ownership(deps, info),
        ExecuteMsg::RenounceOwnership {} => execute_renounce_ownership(deps, info),
        ExecuteMsg::AddOperator { operator } => execute_add_operator(deps, info, operator),
        ExecuteMsg::RemoveOperator { operator } => execute_remove_operator(deps, info, operator),

        // Native funds
        ExecuteMsg::ReceiveNative {} => execute_receive_native(info),
        ExecuteMsg::WithdrawNative { denom, amount, to } => {
            execute_withdraw_native(deps, info, denom, amount, to)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Core
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Ownership {} => to_json_binary(&query_ownership(deps)?),
        QueryMsg::Operators {} => to_json_binary(&query_operators(deps)?),
        QueryMsg::IsOperator { address } => to_json_binary(&query_is_operator(deps, address)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),

        // Signer registry
        QueryMsg::Signers {} => to_json_binary(&query_signers(deps)?),
        QueryMsg::IsSigner { signer } => to_json_binary(&query_is_signer(deps, signer)?),
        QueryMsg::SignerLength {} => to_json_binary(&query_signer_length(deps)?),
        QueryMsg::Threshold {} => to_json_binary(&query_threshold(deps)?),
        QueryMsg::GovernanceNonce {} => to_json_binary(&query_governance_nonce(deps)?),
        QueryMsg::GovernanceDigest { action } => {
            to_json_binary(&query_governance_digest(deps, env, action)?)
        }
        QueryMsg::SendDigest {
            sender,
            recipient,
            amount,
            nonce,
        } => {
            let digest = query_send_digest(deps, env, sender, recipient, amount, nonce)?;
            to_json_binary(&digest)
        }

        // Fees
        QueryMsg::FeeConfig {} => to_json_binary(&query_fee_config(deps)?),
        QueryMsg::FeeAccumulator {} => to_json_binary(&query_fee_accumulator(deps)?),
        QueryMsg::CalculateFee { amount } => to_json_binary(&query_calculate_fee(deps, amount)?),

        // Deposits
        QueryMsg::NextNonce {} => to_json_binary(&query_next_nonce(deps)?),
        QueryMsg::Deposit { nonce } => to_json_binary(&query_deposit(deps, nonce)?),
        QueryMsg::Deposits { start_after, limit } => {
            to_json_binary(&query_deposits(deps, start_after, limit)?)
        }

        // Releases
        QueryMsg::IsProcessed { nonce } => to_json_binary(&query_is_processed(deps, nonce)?),
        QueryMsg::IsBatchProcessed { batch_nonce } => {
            to_json_binary(&query_is_batch_processed(deps, batch_nonce)?)
        }
        QueryMsg::LockedBalance {} => to_json_binary(&query_locked_balance(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
