//! Message types for the quorum relay contract
//!
//! This module defines all messages for instantiation, execution, and queries.

use common::GovernanceAction;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};

use crate::state::TokenMode;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address for contract management
    pub owner: String,
    /// Initial operator addresses
    pub operators: Vec<String>,
    /// Initial signer ids (20-byte hex addresses)
    pub signers: Vec<String>,
    /// Signatures required to authorize a release or governance action
    pub threshold: u32,
    /// cw20 token this relay moves
    pub token: String,
    pub token_mode: TokenMode,
    /// Chain id of this deployment
    pub chain_id: u64,
    /// Admin fee in basis points (1..=1000)
    pub admin_fee_bps: u64,
    /// Fixed fee deducted from every release
    pub gas_fee: Uint128,
    /// Deposits must be strictly larger than this
    pub min_transfer_amount: Uint128,
    /// Optional wallet that receives admin fees directly
    pub bridge_wallet: Option<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Deposit Leg
    // ========================================================================
    /// Deposit the bound cw20 token (called via cw20 `Send`)
    /// Implements the cw20 Receiver interface
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Release Leg
    // ========================================================================
    /// Release a deposit made on the source chain
    ///
    /// Authorization: quorum signatures over
    /// `send_digest(domain, sender, recipient, amount, nonce)`, sorted by
    /// signer id. The domain is this relay's chain id and contract address.
    Send {
        /// Depositor on the source chain
        sender: String,
        /// Recipient on this chain
        recipient: String,
        /// Gross amount; fees are deducted from it
        amount: Uint128,
        /// Source deposit nonce
        nonce: u64,
        signatures: Vec<Binary>,
    },

    /// Release several deposits at once
    ///
    /// Authorization: Operator
    SendBatch {
        recipients: Vec<String>,
        amounts: Vec<Uint128>,
        /// Source deposit nonce of each element
        refs: Vec<u64>,
        /// Identifies the batch as a whole; usable once
        batch_nonce: u64,
    },

    // ========================================================================
    // Governance (quorum-gated)
    // ========================================================================
    AddSigner {
        signer: String,
        signatures: Vec<Binary>,
    },

    RemoveSigner {
        signer: String,
        signatures: Vec<Binary>,
    },

    SetThreshold {
        threshold: u32,
        signatures: Vec<Binary>,
    },

    SetAdminFee {
        admin_fee_bps: u64,
        signatures: Vec<Binary>,
    },

    /// `None` clears the wallet so admin fees accumulate again
    SetBridgeWallet {
        bridge_wallet: Option<String>,
        signatures: Vec<Binary>,
    },

    // ========================================================================
    // Fees
    // ========================================================================
    /// Authorization: Operator
    SetBaseGas { gas_fee: Uint128 },

    /// Authorization: Operator
    SetMinTransferAmount { min_transfer_amount: Uint128 },

    /// Authorization: Owner
    WithdrawAdminFee { to: String, amount: Uint128 },

    /// Authorization: Owner
    WithdrawGasFee { to: String, amount: Uint128 },

    // ========================================================================
    // Ownership
    // ========================================================================
    /// Start a two-step ownership transfer
    TransferOwnership { new_owner: String },

    /// Complete the transfer (pending owner only)
    AcceptOwnership {},

    /// Give up ownership for good
    RenounceOwnership {},

    AddOperator { operator: String },

    RemoveOperator { operator: String },

    // ========================================================================
    // Native Funds
    // ========================================================================
    /// Accept native coins sent to the relay
    ReceiveNative {},

    /// Authorization: Owner
    WithdrawNative {
        denom: String,
        amount: Uint128,
        to: String,
    },
}

/// Payload of a cw20 `Send` to the relay
#[cw_serde]
pub enum ReceiveMsg {
    Deposit {
        /// Recipient on the destination chain
        recipient: String,
        destination_chain_id: u64,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // ========================================================================
    // Core
    // ========================================================================
    #[returns(ConfigResponse)]
    Config {},

    #[returns(OwnershipResponse)]
    Ownership {},

    #[returns(OperatorsResponse)]
    Operators {},

    #[returns(IsOperatorResponse)]
    IsOperator { address: String },

    #[returns(StatsResponse)]
    Stats {},

    // ========================================================================
    // Signer Registry
    // ========================================================================
    /// Signers in insertion order
    #[returns(SignersResponse)]
    Signers {},

    #[returns(IsSignerResponse)]
    IsSigner { signer: String },

    #[returns(SignerLengthResponse)]
    SignerLength {},

    #[returns(ThresholdResponse)]
    Threshold {},

    #[returns(GovernanceNonceResponse)]
    GovernanceNonce {},

    /// Digest signers must sign to authorize `action` on this relay now
    #[returns(DigestResponse)]
    GovernanceDigest { action: GovernanceAction },

    /// Digest signers must sign to authorize a release on this relay
    #[returns(DigestResponse)]
    SendDigest {
        sender: String,
        recipient: String,
        amount: Uint128,
        nonce: u64,
    },

    // ========================================================================
    // Fees
    // ========================================================================
    #[returns(crate::fee_manager::FeeConfig)]
    FeeConfig {},

    #[returns(crate::fee_manager::FeeAccumulator)]
    FeeAccumulator {},

    #[returns(CalculateFeeResponse)]
    CalculateFee { amount: Uint128 },

    // ========================================================================
    // Deposits
    // ========================================================================
    /// Nonce the next deposit will receive
    #[returns(NonceResponse)]
    NextNonce {},

    #[returns(Option<DepositResponse>)]
    Deposit { nonce: u64 },

    #[returns(DepositsResponse)]
    Deposits {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    // ========================================================================
    // Releases
    // ========================================================================
    #[returns(ProcessedResponse)]
    IsProcessed { nonce: u64 },

    #[returns(ProcessedResponse)]
    IsBatchProcessed { batch_nonce: u64 },

    #[returns(LockedBalanceResponse)]
    LockedBalance {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub token: Addr,
    pub token_mode: TokenMode,
    pub chain_id: u64,
}

#[cw_serde]
pub struct OwnershipResponse {
    pub owner: Option<Addr>,
    pub pending_owner: Option<Addr>,
}

#[cw_serde]
pub struct OperatorsResponse {
    pub operators: Vec<Addr>,
}

#[cw_serde]
pub struct IsOperatorResponse {
    pub is_operator: bool,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_deposits: u64,
    pub total_releases: u64,
    pub total_deposited: Uint128,
    pub total_released: Uint128,
}

#[cw_serde]
pub struct SignersResponse {
    /// Lower-case `0x` hex
    pub signers: Vec<String>,
}

#[cw_serde]
pub struct IsSignerResponse {
    pub is_signer: bool,
}

#[cw_serde]
pub struct SignerLengthResponse {
    pub length: u32,
}

#[cw_serde]
pub struct ThresholdResponse {
    pub threshold: u32,
}

#[cw_serde]
pub struct GovernanceNonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct DigestResponse {
    pub digest: Binary,
    /// Same digest as `0x` hex
    pub digest_hex: String,
}

#[cw_serde]
pub struct CalculateFeeResponse {
    pub admin_fee: Uint128,
    pub gas_fee: Uint128,
    /// Zero if the fees swallow the amount
    pub recipient_amount: Uint128,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct DepositResponse {
    pub nonce: u64,
    pub depositor: Addr,
    pub recipient: String,
    pub amount: Uint128,
    pub destination_chain_id: u64,
    pub timestamp: Timestamp,
}

#[cw_serde]
pub struct DepositsResponse {
    pub deposits: Vec<DepositResponse>,
}

#[cw_serde]
pub struct ProcessedResponse {
    pub processed: bool,
}

#[cw_serde]
pub struct LockedBalanceResponse {
    pub locked: Uint128,
}
