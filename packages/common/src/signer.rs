//! Signer identity codec.
//!
//! A signer is identified by the 20-byte address derived from its secp256k1
//! public key, the same way EVM accounts are: the last 20 bytes of
//! `keccak256(pubkey_x || pubkey_y)`. Byte order of the address is the order
//! used by the quorum verifier.

use std::fmt;

use cosmwasm_std::{StdError, StdResult};

use crate::digest::keccak256;

/// Length of an uncompressed SEC1 public key (0x04 prefix + x + y)
pub const UNCOMPRESSED_PUBKEY_LEN: usize = 65;

/// Length of a recoverable signature (r || s || v)
pub const SIGNATURE_LEN: usize = 65;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignerId([u8; 20]);

impl SignerId {
    pub const LEN: usize = 20;

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> StdResult<Self> {
        let array: [u8; 20] = bytes.try_into().map_err(|_| {
            StdError::generic_err(format!(
                "signer id must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Parse a hex address, with or without `0x`, in any letter case.
    pub fn from_hex(input: &str) -> StdResult<Self> {
        let stripped = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        if stripped.len() != Self::LEN * 2 {
            return Err(StdError::generic_err(format!(
                "signer id must be {} hex characters, got {}",
                Self::LEN * 2,
                stripped.len()
            )));
        }
        let bytes = hex::decode(stripped)
            .map_err(|e| StdError::generic_err(format!("invalid signer hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// Derive the identity from an uncompressed public key as returned by
    /// `Api::secp256k1_recover_pubkey`.
    pub fn from_uncompressed_pubkey(pubkey: &[u8]) -> StdResult<Self> {
        if pubkey.len() != UNCOMPRESSED_PUBKEY_LEN || pubkey[0] != 0x04 {
            return Err(StdError::generic_err(
                "expected a 65-byte uncompressed secp256k1 public key",
            ));
        }
        let hash = keccak256(&pubkey[1..]);
        let mut id = [0u8; 20];
        id.copy_from_slice(&hash[12..]);
        Ok(Self(id))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Lower-case `0x`-prefixed hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A 65-byte `r || s || v` signature split into the parts the host's
/// recovery function expects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub rs: [u8; 64],
    pub recovery_param: u8,
}

impl RecoverableSignature {
    /// Accepts `v` as 0/1 or the legacy 27/28 encoding.
    pub fn from_slice(bytes: &[u8]) -> StdResult<Self> {
        if bytes.len() != SIGNATURE_LEN {
            let got = bytes.len();
            return Err(StdError::generic_err(format!(
                "signature must be {SIGNATURE_LEN} bytes, got {got}"
            )));
        }
        let recovery_param = match bytes[64] {
            0 | 1 => bytes[64],
            27 | 28 => bytes[64] - 27,
            v => return Err(StdError::generic_err(format!("invalid recovery byte {v}"))),
        };
        let mut rs = [0u8; 64];
        rs.copy_from_slice(&bytes[..64]);
        Ok(Self { rs, recovery_param })
    }
}
