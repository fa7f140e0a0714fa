//! Error types for the quorum relay contract.
//!
//! Every error aborts the whole call; `transaction::atomic` rolls back any
//! storage writes made before the failure.

use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Access Control
    // ========================================================================

    #[error("CallerNoOwner: only the owner can perform this action")]
    CallerNoOwner,

    #[error("CallerNoOperator: only an operator can perform this action")]
    CallerNoOperator,

    #[error("CallerNoNewOwner: only the pending owner can accept ownership")]
    CallerNoNewOwner,

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Operator already registered")]
    OperatorAlreadyRegistered,

    #[error("Operator not registered")]
    OperatorNotRegistered,

    // ========================================================================
    // Quorum
    // ========================================================================

    #[error("InvalidSignature: quorum not satisfied")]
    InvalidSignature,

    #[error("Signer already registered: {signer}")]
    SignerAlreadyRegistered { signer: String },

    #[error("Signer not registered: {signer}")]
    SignerNotRegistered { signer: String },

    #[error("Cannot remove last signer")]
    CannotRemoveLastSigner,

    // ========================================================================
    // Replay Protection
    // ========================================================================

    #[error("NonceAlreadyProcessed: nonce {nonce}")]
    NonceAlreadyProcessed { nonce: u64 },

    #[error("NonceAlreadyProcessed: batch nonce {batch_nonce}")]
    BatchNonceAlreadyProcessed { batch_nonce: u64 },

    // ========================================================================
    // Deposit Validation
    // ========================================================================

    #[error("DepositAmountInvalid: {reason}")]
    DepositAmountInvalid { reason: String },

    #[error("ReceiverZeroAddress: recipient must not be the null identity")]
    ReceiverZeroAddress,

    #[error("Invalid destination chain id: {chain_id}")]
    InvalidChainId { chain_id: u64 },

    #[error("Token not supported: {token}")]
    UnsupportedToken { token: String },

    // ========================================================================
    // Release
    // ========================================================================

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Insufficient locked liquidity: locked {locked}, requested {requested}")]
    InsufficientLiquidity { locked: Uint128, requested: Uint128 },

    #[error("ParamsLengthMismatch: batch arrays must be non-empty and equal length")]
    ParamsLengthMismatch,

    // ========================================================================
    // Setter Validation
    // ========================================================================

    #[error("AdminFeeInvalid: {fee_bps} bps is outside 1..={max_bps}")]
    AdminFeeInvalid { fee_bps: u64, max_bps: u64 },

    #[error("ThresholdInvalid: threshold {threshold} with {signers} signers")]
    ThresholdInvalid { threshold: u32, signers: u32 },

    #[error("BridgeWalletInvalid: {reason}")]
    BridgeWalletInvalid { reason: String },

    // ========================================================================
    // Fee Withdrawal
    // ========================================================================

    #[error("InsufficientAdminFee: available {available}, requested {requested}")]
    InsufficientAdminFee {
        available: Uint128,
        requested: Uint128,
    },

    #[error("InsufficientGasFee: available {available}, requested {requested}")]
    InsufficientGasFee {
        available: Uint128,
        requested: Uint128,
    },

    // ========================================================================
    // Native Funds
    // ========================================================================

    #[error("No funds sent")]
    NoFundsSent,
}
