//! Quorum Relay Contract - Multisig-Gated Cross-Chain Token Relay
//!
//! Moves one cw20 token between chains. Each chain runs its own instance;
//! nothing links them but an off-chain signer set.
//!
//! # Deposit Leg
//! 1. User sends the token to the relay with `ReceiveMsg::Deposit`
//! 2. The relay burns (mint/burn mode) or locks (lock/unlock mode) it and
//!    records a `DepositRecord` under the next nonce
//! 3. Signers observe the `deposited` event and sign the release
//!
//! # Release Leg
//! 1. Anyone submits `Send` with the signers' signatures, sorted by signer id
//! 2. The relay checks the nonce is unprocessed and the quorum holds
//! 3. Fees are split off and the recipient is paid by mint or transfer
//!
//! # Security
//! - M-of-N signer quorum over domain-separated keccak256 digests
//! - Strictly increasing signer order rejects duplicate signatures
//! - Processed nonces are never cleared
//! - Signer set, threshold, admin fee and bridge wallet change only by quorum
//! - Every execute call is atomic via an explicit undo log

pub mod contract;
pub mod error;
mod execute;
pub mod fee_manager;
pub mod msg;
mod query;
pub mod quorum;
pub mod state;
pub mod token;
pub mod transaction;

pub use crate::error::ContractError;
pub use crate::fee_manager::{split_amount, FeeConfig, FeeSplit};
pub use common::{send_digest, Domain, GovernanceAction, SignerId};
