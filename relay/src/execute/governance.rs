//! Quorum-gated configuration changes.
//!
//! Each handler rebuilds the [`GovernanceAction`] digest at the current
//! governance nonce, verifies the quorum, applies exactly one mutation and
//! bumps the nonce so the same signatures cannot be replayed.

use cosmwasm_std::{Binary, Deps, DepsMut, Env, Response};

use common::GovernanceAction;

use crate::error::ContractError;
use crate::fee_manager::{validate_admin_fee, validate_bridge_wallet, FEE_CONFIG};
use crate::quorum::{self, domain, verify_quorum};
use crate::state::{CONFIG, GOVERNANCE_NONCE};

/// Verify `signatures` approve `action` on this deployment at the current
/// governance nonce. Returns that nonce.
fn authorize(
    deps: Deps,
    env: &Env,
    action: &GovernanceAction,
    signatures: &[Binary],
) -> Result<u64, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let nonce = GOVERNANCE_NONCE.load(deps.storage)?;
    let digest = action
        .digest(&domain(&config, env), nonce)
        .map_err(|e| ContractError::InvalidAddress {
            reason: e.to_string(),
        })?;
    verify_quorum(deps, &digest, signatures)?;
    Ok(nonce)
}

fn governance_response(method: &str, nonce: u64) -> Response {
    Response::new()
        .add_attribute("method", method)
        .add_attribute("governance_nonce", nonce.to_string())
}

// ============================================================================
// Signer Set
// ============================================================================

pub fn execute_add_signer(
    deps: DepsMut,
    env: Env,
    signer: String,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    let id = quorum::parse_signer(&signer)?;
    let action = GovernanceAction::AddSigner { signer };
    let nonce = authorize(deps.as_ref(), &env, &action, &signatures)?;

    let count = quorum::add_signer(deps.storage, &id)?;
    quorum::bump_governance_nonce(deps.storage)?;

    Ok(governance_response("add_signer", nonce)
        .add_attribute("signer", id.to_hex())
        .add_attribute("signer_count", count.to_string()))
}

pub fn execute_remove_signer(
    deps: DepsMut,
    env: Env,
    signer: String,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    let id = quorum::parse_signer(&signer)?;
    let action = GovernanceAction::RemoveSigner { signer };
    let nonce = authorize(deps.as_ref(), &env, &action, &signatures)?;

    let count = quorum::remove_signer(deps.storage, &id)?;
    quorum::bump_governance_nonce(deps.storage)?;

    Ok(governance_response("remove_signer", nonce)
        .add_attribute("signer", id.to_hex())
        .add_attribute("signer_count", count.to_string()))
}

pub fn execute_set_threshold(
    deps: DepsMut,
    env: Env,
    threshold: u32,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    let action = GovernanceAction::SetThreshold { threshold };
    let nonce = authorize(deps.as_ref(), &env, &action, &signatures)?;

    quorum::set_threshold(deps.storage, threshold)?;
    quorum::bump_governance_nonce(deps.storage)?;

    Ok(governance_response("set_threshold", nonce)
        .add_attribute("threshold", threshold.to_string()))
}

// ============================================================================
// Fee Settings
// ============================================================================

pub fn execute_set_admin_fee(
    deps: DepsMut,
    env: Env,
    admin_fee_bps: u64,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    let action = GovernanceAction::SetAdminFee { admin_fee_bps };
    let nonce = authorize(deps.as_ref(), &env, &action, &signatures)?;

    validate_admin_fee(admin_fee_bps)?;
    let mut fee_config = FEE_CONFIG.load(deps.storage)?;
    let previous = fee_config.admin_fee_bps;
    fee_config.admin_fee_bps = admin_fee_bps;
    FEE_CONFIG.save(deps.storage, &fee_config)?;
    quorum::bump_governance_nonce(deps.storage)?;

    Ok(governance_response("admin_fee_changed", nonce)
        .add_attribute("previous_admin_fee_bps", previous.to_string())
        .add_attribute("admin_fee_bps", admin_fee_bps.to_string()))
}

/// Set or clear the wallet that receives admin fees directly.
pub fn execute_set_bridge_wallet(
    deps: DepsMut,
    env: Env,
    bridge_wallet: Option<String>,
    signatures: Vec<Binary>,
) -> Result<Response, ContractError> {
    let action = GovernanceAction::SetBridgeWallet {
        bridge_wallet: bridge_wallet.clone(),
    };
    let nonce = authorize(deps.as_ref(), &env, &action, &signatures)?;

    let wallet = bridge_wallet
        .map(|w| validate_bridge_wallet(deps.api, &env.contract.address, &w))
        .transpose()?;

    let mut fee_config = FEE_CONFIG.load(deps.storage)?;
    fee_config.bridge_wallet = wallet.clone();
    FEE_CONFIG.save(deps.storage, &fee_config)?;
    quorum::bump_governance_nonce(deps.storage)?;

    Ok(governance_response("bridge_wallet_changed", nonce).add_attribute(
        "bridge_wallet",
        wallet.map(|w| w.to_string()).unwrap_or_default(),
    ))
}
