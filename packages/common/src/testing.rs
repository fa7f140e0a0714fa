//! Deterministic signers for tests.
//!
//! Wraps alloy's `PrivateKeySigner` so tests can produce the 65-byte
//! `r || s || v` signatures the relay verifies.

use alloy::primitives::B256;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use cosmwasm_std::Binary;

use crate::signer::SignerId;

pub struct TestSigner {
    signer: PrivateKeySigner,
    id: SignerId,
}

impl TestSigner {
    /// Signer whose private key is the 32-byte big-endian encoding of `seed`.
    /// `seed` must be non-zero.
    pub fn new(seed: u64) -> Self {
        let signer: PrivateKeySigner = format!("{:064x}", seed)
            .parse()
            .expect("seed is a valid secp256k1 scalar");
        let id = SignerId::from_bytes(signer.address().0 .0);
        Self { signer, id }
    }

    /// `n` signers (seeds `1..=n`) sorted by signer id.
    pub fn sorted(n: u64) -> Vec<Self> {
        let mut signers: Vec<Self> = (1..=n).map(Self::new).collect();
        signers.sort_by_key(|s| s.id);
        signers
    }

    pub fn id(&self) -> SignerId {
        self.id
    }

    pub fn hex(&self) -> String {
        self.id.to_hex()
    }

    pub fn sign(&self, digest: &[u8; 32]) -> Binary {
        let signature = self
            .signer
            .sign_hash_sync(&B256::from(*digest))
            .expect("signing a prehash cannot fail");
        Binary::from(signature.as_bytes().to_vec())
    }
}
