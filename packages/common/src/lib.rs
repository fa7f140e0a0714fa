//! Common - Shared Types for the Quorum Relay
//!
//! Signer identities and the digests they sign. Kept free of contract storage
//! so that off-chain signers can build byte-identical digests.

pub mod digest;
pub mod signer;

pub use digest::{
    bytes32_to_hex, keccak256, send_digest, ActionTag, DigestBuilder, Domain, GovernanceAction,
};
pub use signer::{RecoverableSignature, SignerId};

#[cfg(feature = "testing")]
pub mod testing;
