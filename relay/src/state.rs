//! State definitions for the quorum relay contract.
//!
//! Each piece of mutable state is written by exactly one module:
//! - signer set, threshold, governance nonce: `quorum`
//! - fee config and accumulators: `fee_manager`
//! - deposits and the outgoing nonce: `execute::deposit`
//! - processed nonces and batch nonces: `execute::release`
//! - locked balance: `token`
//! - ownership and operators: `execute::ownership`

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// How the relay moves the bound token on each leg
#[cw_serde]
pub enum TokenMode {
    /// Deposits burn, releases mint. The relay must be the token's minter.
    MintBurn,
    /// Deposits are held by the relay, releases transfer them back out.
    LockUnlock,
}

impl TokenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenMode::MintBurn => "mint_burn",
            TokenMode::LockUnlock => "lock_unlock",
        }
    }
}

/// Immutable deployment configuration
#[cw_serde]
pub struct Config {
    /// cw20 token bridged by this relay
    pub token: Addr,
    pub token_mode: TokenMode,
    /// Chain id of this deployment; deposits may not target it
    pub chain_id: u64,
}

/// Two-step ownership state
#[cw_serde]
pub struct Ownership {
    /// `None` once ownership has been renounced
    pub owner: Option<Addr>,
    pub pending_owner: Option<Addr>,
}

/// Outbound transfer intent recorded on the source leg
#[cw_serde]
pub struct DepositRecord {
    pub nonce: u64,
    pub depositor: Addr,
    /// Recipient on the destination chain
    pub recipient: String,
    pub amount: Uint128,
    pub destination_chain_id: u64,
    pub timestamp: Timestamp,
}

/// Relay statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_deposits: u64,
    pub total_releases: u64,
    pub total_deposited: Uint128,
    pub total_released: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:quorum-relay";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default page size for paginated queries
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum page size for paginated queries
pub const MAX_LIMIT: u32 = 30;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const OWNERSHIP: Item<Ownership> = Item::new("ownership");

/// Operator addresses (lower-privilege administration)
pub const OPERATORS: Map<&Addr, Empty> = Map::new("operators");

pub const STATS: Item<Stats> = Item::new("stats");

// Signer registry

/// Active signers. Key: 20-byte signer id, Value: insertion sequence
pub const SIGNERS: Map<&[u8], u64> = Map::new("signers");

/// Number of active signers
pub const SIGNER_COUNT: Item<u32> = Item::new("signer_count");

/// Next insertion sequence for `SIGNERS`
pub const SIGNER_SEQ: Item<u64> = Item::new("signer_seq");

/// Quorum threshold; `1 <= THRESHOLD <= SIGNER_COUNT`
pub const THRESHOLD: Item<u32> = Item::new("threshold");

/// Bumped after every applied quorum mutation
pub const GOVERNANCE_NONCE: Item<u64> = Item::new("governance_nonce");

// Deposit leg

/// Nonce the next deposit will receive
pub const OUTGOING_NONCE: Item<u64> = Item::new("outgoing_nonce");

/// Key: deposit nonce
pub const DEPOSITS: Map<u64, DepositRecord> = Map::new("deposits");

// Release leg

/// Released source nonces. Entries are never removed.
pub const PROCESSED_NONCES: Map<u64, Empty> = Map::new("processed_nonces");

/// Released batch nonces. Entries are never removed.
pub const PROCESSED_BATCHES: Map<u64, Empty> = Map::new("processed_batches");

/// Tokens held for lock-mode releases
pub const LOCKED_BALANCE: Item<Uint128> = Item::new("locked_balance");
