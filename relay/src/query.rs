//! Query handlers for the quorum relay contract.

use cosmwasm_std::{Addr, Binary, Deps, Env, Order, StdResult, Uint128};
use cw_storage_plus::Bound;

use common::{bytes32_to_hex, send_digest, GovernanceAction, SignerId};

use crate::fee_manager::{
    calculate_admin_fee, FeeAccumulator, FeeConfig, FEE_ACCUMULATOR, FEE_CONFIG,
};
use crate::msg::{
    CalculateFeeResponse, ConfigResponse, DepositResponse, DepositsResponse, DigestResponse,
    GovernanceNonceResponse, IsOperatorResponse, IsSignerResponse, LockedBalanceResponse,
    NonceResponse, OperatorsResponse, OwnershipResponse, ProcessedResponse, SignerLengthResponse,
    SignersResponse, StatsResponse, ThresholdResponse,
};
use crate::quorum;
use crate::state::{
    DepositRecord, CONFIG, DEFAULT_LIMIT, DEPOSITS, GOVERNANCE_NONCE, MAX_LIMIT, OPERATORS,
    OUTGOING_NONCE, OWNERSHIP, PROCESSED_BATCHES, PROCESSED_NONCES, STATS, THRESHOLD,
};
use crate::token::locked_balance;

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        token: config.token,
        token_mode: config.token_mode,
        chain_id: config.chain_id,
    })
}

pub fn query_ownership(deps: Deps) -> StdResult<OwnershipResponse> {
    let ownership = OWNERSHIP.load(deps.storage)?;
    Ok(OwnershipResponse {
        owner: ownership.owner,
        pending_owner: ownership.pending_owner,
    })
}

pub fn query_operators(deps: Deps) -> StdResult<OperatorsResponse> {
    let operators = OPERATORS
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<Addr>>>()?;
    Ok(OperatorsResponse { operators })
}

pub fn query_is_operator(deps: Deps, address: String) -> StdResult<IsOperatorResponse> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(IsOperatorResponse {
        is_operator: OPERATORS.has(deps.storage, &addr),
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_deposits: stats.total_deposits,
        total_releases: stats.total_releases,
        total_deposited: stats.total_deposited,
        total_released: stats.total_released,
    })
}

// ============================================================================
// Signer Registry Queries
// ============================================================================

pub fn query_signers(deps: Deps) -> StdResult<SignersResponse> {
    let signers = quorum::signers_in_insertion_order(deps.storage)?
        .iter()
        .map(SignerId::to_hex)
        .collect();
    Ok(SignersResponse { signers })
}

/// Malformed ids are simply not signers.
pub fn query_is_signer(deps: Deps, signer: String) -> StdResult<IsSignerResponse> {
    let is_signer = match SignerId::from_hex(&signer) {
        Ok(id) => quorum::is_signer(deps.storage, &id),
        Err(_) => false,
    };
    Ok(IsSignerResponse { is_signer })
}

pub fn query_signer_length(deps: Deps) -> StdResult<SignerLengthResponse> {
    Ok(SignerLengthResponse {
        length: quorum::signer_count(deps.storage)?,
    })
}

pub fn query_threshold(deps: Deps) -> StdResult<ThresholdResponse> {
    Ok(ThresholdResponse {
        threshold: THRESHOLD.load(deps.storage)?,
    })
}

pub fn query_governance_nonce(deps: Deps) -> StdResult<GovernanceNonceResponse> {
    Ok(GovernanceNonceResponse {
        nonce: GOVERNANCE_NONCE.load(deps.storage)?,
    })
}

pub fn query_governance_digest(
    deps: Deps,
    env: Env,
    action: GovernanceAction,
) -> StdResult<DigestResponse> {
    let config = CONFIG.load(deps.storage)?;
    let nonce = GOVERNANCE_NONCE.load(deps.storage)?;
    let digest = action.digest(&quorum::domain(&config, &env), nonce)?;
    Ok(digest_response(digest))
}

pub fn query_send_digest(
    deps: Deps,
    env: Env,
    sender: String,
    recipient: String,
    amount: Uint128,
    nonce: u64,
) -> StdResult<DigestResponse> {
    let config = CONFIG.load(deps.storage)?;
    let digest = send_digest(
        &quorum::domain(&config, &env),
        &sender,
        &recipient,
        amount.u128(),
        nonce,
    );
    Ok(digest_response(digest))
}

fn digest_response(digest: [u8; 32]) -> DigestResponse {
    DigestResponse {
        digest: Binary::from(digest.to_vec()),
        digest_hex: bytes32_to_hex(&digest),
    }
}

// ============================================================================
// Fee Queries
// ============================================================================

pub fn query_fee_config(deps: Deps) -> StdResult<FeeConfig> {
    FEE_CONFIG.load(deps.storage)
}

pub fn query_fee_accumulator(deps: Deps) -> StdResult<FeeAccumulator> {
    FEE_ACCUMULATOR.load(deps.storage)
}

pub fn query_calculate_fee(deps: Deps, amount: Uint128) -> StdResult<CalculateFeeResponse> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let admin_fee = calculate_admin_fee(amount, config.admin_fee_bps);
    let recipient_amount = amount
        .checked_sub(admin_fee)
        .and_then(|rest| rest.checked_sub(config.gas_fee))
        .unwrap_or_default();
    Ok(CalculateFeeResponse {
        admin_fee,
        gas_fee: config.gas_fee,
        recipient_amount,
    })
}

// ============================================================================
// Deposit Queries
// ============================================================================

pub fn query_next_nonce(deps: Deps) -> StdResult<NonceResponse> {
    Ok(NonceResponse {
        nonce: OUTGOING_NONCE.load(deps.storage)?,
    })
}

pub fn query_deposit(deps: Deps, nonce: u64) -> StdResult<Option<DepositResponse>> {
    Ok(DEPOSITS.may_load(deps.storage, nonce)?.map(deposit_response))
}

pub fn query_deposits(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<DepositsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let deposits = DEPOSITS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, record)| deposit_response(record)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(DepositsResponse { deposits })
}

fn deposit_response(record: DepositRecord) -> DepositResponse {
    DepositResponse {
        nonce: record.nonce,
        depositor: record.depositor,
        recipient: record.recipient,
        amount: record.amount,
        destination_chain_id: record.destination_chain_id,
        timestamp: record.timestamp,
    }
}

// ============================================================================
// Release Queries
// ============================================================================

pub fn query_is_processed(deps: Deps, nonce: u64) -> StdResult<ProcessedResponse> {
    Ok(ProcessedResponse {
        processed: PROCESSED_NONCES.has(deps.storage, nonce),
    })
}

pub fn query_is_batch_processed(deps: Deps, batch_nonce: u64) -> StdResult<ProcessedResponse> {
    Ok(ProcessedResponse {
        processed: PROCESSED_BATCHES.has(deps.storage, batch_nonce),
    })
}

pub fn query_locked_balance(deps: Deps) -> StdResult<LockedBalanceResponse> {
    Ok(LockedBalanceResponse {
        locked: locked_balance(deps.storage)?,
    })
}
