//! Signer registry and quorum verification.
//!
//! A quorum is `threshold` signatures over a digest whose recovered signer
//! ids are registered and strictly increasing. The ordering rule rejects a
//! signer counted twice without a separate dedup pass.

use cosmwasm_std::{Api, Binary, Deps, Env, Order, StdResult, Storage};

use common::{Domain, RecoverableSignature, SignerId};

use crate::error::ContractError;
use crate::state::{Config, GOVERNANCE_NONCE, SIGNERS, SIGNER_COUNT, SIGNER_SEQ, THRESHOLD};

// ============================================================================
// Registry
// ============================================================================

/// Parse a signer id supplied in a message.
pub fn parse_signer(signer: &str) -> Result<SignerId, ContractError> {
    let id = SignerId::from_hex(signer).map_err(|e| ContractError::InvalidAddress {
        reason: e.to_string(),
    })?;
    if id.is_zero() {
        return Err(ContractError::InvalidAddress {
            reason: "signer must not be the zero address".to_string(),
        });
    }
    Ok(id)
}

/// Seed the registry at instantiation.
pub fn init_signers(
    storage: &mut dyn Storage,
    signers: &[SignerId],
    threshold: u32,
) -> Result<(), ContractError> {
    SIGNER_COUNT.save(storage, &0)?;
    SIGNER_SEQ.save(storage, &0)?;
    for signer in signers {
        insert_signer(storage, signer)?;
    }
    validate_threshold(threshold, signers.len() as u32)?;
    THRESHOLD.save(storage, &threshold)?;
    GOVERNANCE_NONCE.save(storage, &0)?;
    Ok(())
}

pub fn is_signer(storage: &dyn Storage, signer: &SignerId) -> bool {
    SIGNERS.has(storage, signer.as_slice())
}

pub fn signer_count(storage: &dyn Storage) -> StdResult<u32> {
    SIGNER_COUNT.load(storage)
}

/// Active signers in the order they were added.
pub fn signers_in_insertion_order(storage: &dyn Storage) -> StdResult<Vec<SignerId>> {
    let mut entries = SIGNERS
        .range(storage, None, None, Order::Ascending)
        .map(|item| {
            let (key, seq) = item?;
            Ok((seq, SignerId::from_slice(&key)?))
        })
        .collect::<StdResult<Vec<_>>>()?;
    entries.sort_by_key(|(seq, _)| *seq);
    Ok(entries.into_iter().map(|(_, id)| id).collect())
}

pub fn validate_threshold(threshold: u32, signers: u32) -> Result<(), ContractError> {
    if threshold == 0 || threshold > signers {
        return Err(ContractError::ThresholdInvalid { threshold, signers });
    }
    Ok(())
}

fn insert_signer(storage: &mut dyn Storage, signer: &SignerId) -> Result<u32, ContractError> {
    if signer.is_zero() {
        return Err(ContractError::InvalidAddress {
            reason: "signer must not be the zero address".to_string(),
        });
    }
    if is_signer(storage, signer) {
        return Err(ContractError::SignerAlreadyRegistered {
            signer: signer.to_hex(),
        });
    }
    let seq = SIGNER_SEQ.load(storage)?;
    SIGNERS.save(storage, signer.as_slice(), &seq)?;
    SIGNER_SEQ.save(storage, &(seq + 1))?;
    let count = SIGNER_COUNT.load(storage)? + 1;
    SIGNER_COUNT.save(storage, &count)?;
    Ok(count)
}

/// Add a signer. Returns the new signer count.
pub fn add_signer(storage: &mut dyn Storage, signer: &SignerId) -> Result<u32, ContractError> {
    insert_signer(storage, signer)
}

/// Remove a signer. The set may not become empty or smaller than the
/// current threshold. Returns the new signer count.
pub fn remove_signer(storage: &mut dyn Storage, signer: &SignerId) -> Result<u32, ContractError> {
    if !is_signer(storage, signer) {
        return Err(ContractError::SignerNotRegistered {
            signer: signer.to_hex(),
        });
    }
    let count = SIGNER_COUNT.load(storage)?;
    if count <= 1 {
        return Err(ContractError::CannotRemoveLastSigner);
    }
    let threshold = THRESHOLD.load(storage)?;
    if count - 1 < threshold {
        return Err(ContractError::ThresholdInvalid {
            threshold,
            signers: count - 1,
        });
    }
    SIGNERS.remove(storage, signer.as_slice());
    SIGNER_COUNT.save(storage, &(count - 1))?;
    Ok(count - 1)
}

pub fn set_threshold(storage: &mut dyn Storage, threshold: u32) -> Result<(), ContractError> {
    validate_threshold(threshold, SIGNER_COUNT.load(storage)?)?;
    THRESHOLD.save(storage, &threshold)?;
    Ok(())
}

/// Consume the current governance nonce. Returns the next one.
pub fn bump_governance_nonce(storage: &mut dyn Storage) -> StdResult<u64> {
    let next = GOVERNANCE_NONCE.load(storage)? + 1;
    GOVERNANCE_NONCE.save(storage, &next)?;
    Ok(next)
}

// ============================================================================
// Verification
// ============================================================================

/// Domain every approval for this deployment is signed over.
pub fn domain<'a>(config: &Config, env: &'a Env) -> Domain<'a> {
    Domain {
        chain_id: config.chain_id,
        relay: env.contract.address.as_str(),
    }
}

/// Recover the signer id behind a 65-byte `r || s || v` signature.
pub fn recover_signer(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
) -> Result<SignerId, ContractError> {
    let sig = RecoverableSignature::from_slice(signature)
        .map_err(|_| ContractError::InvalidSignature)?;
    let pubkey = api
        .secp256k1_recover_pubkey(digest, &sig.rs, sig.recovery_param)
        .map_err(|_| ContractError::InvalidSignature)?;
    SignerId::from_uncompressed_pubkey(&pubkey).map_err(|_| ContractError::InvalidSignature)
}

/// Check that `signatures` form a quorum over `digest` under the current
/// registry. Returns the approving signers in signature order.
///
/// Fails with `InvalidSignature` if any signature is malformed, recovers to a
/// non-member, is not strictly greater than its predecessor, or if fewer
/// than `threshold` signatures are supplied.
pub fn verify_quorum(
    deps: Deps,
    digest: &[u8; 32],
    signatures: &[Binary],
) -> Result<Vec<SignerId>, ContractError> {
    let threshold = THRESHOLD.load(deps.storage)?;
    let mut approvers: Vec<SignerId> = Vec::with_capacity(signatures.len());

    for signature in signatures {
        let signer = recover_signer(deps.api, digest, signature.as_slice())?;
        if let Some(previous) = approvers.last() {
            if signer <= *previous {
                return Err(ContractError::InvalidSignature);
            }
        }
        if !is_signer(deps.storage, &signer) {
            return Err(ContractError::InvalidSignature);
        }
        approvers.push(signer);
    }

    if (approvers.len() as u64) < u64::from(threshold) {
        return Err(ContractError::InvalidSignature);
    }
    Ok(approvers)
}
