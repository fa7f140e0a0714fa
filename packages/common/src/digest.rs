//! Domain-separated digests signed by the signer set.
//!
//! Every digest is
//! `keccak256(tag_slot || chain_id_slot || relay_slot || payload_slots...)`
//! where each slot is 32 bytes:
//!
//! | Field            | Encoding                                  |
//! |------------------|-------------------------------------------|
//! | action tag       | `keccak256(tag string)`                   |
//! | string           | `keccak256(utf8 bytes)`                   |
//! | integer          | big-endian, left-padded                   |
//! | signer id        | 20 bytes, left-padded                     |
//! | absent optional  | 32 zero bytes                             |
//!
//! The tag slot keeps a signature over one kind of action from being
//! accepted for another. The [`Domain`] slots (chain id and relay address of
//! the executing deployment) keep an approval for one deployment from being
//! accepted by another that shares the signer set. Governance payloads
//! additionally start with the contract's governance nonce so each quorum
//! approval is single-use.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::StdResult;
use tiny_keccak::{Hasher, Keccak};

use crate::signer::SignerId;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionTag {
    Send,
    AddSigner,
    RemoveSigner,
    SetThreshold,
    SetAdminFee,
    SetBridgeWallet,
}

impl ActionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTag::Send => "RELAY_SEND",
            ActionTag::AddSigner => "RELAY_ADD_SIGNER",
            ActionTag::RemoveSigner => "RELAY_REMOVE_SIGNER",
            ActionTag::SetThreshold => "RELAY_SET_THRESHOLD",
            ActionTag::SetAdminFee => "RELAY_SET_ADMIN_FEE",
            ActionTag::SetBridgeWallet => "RELAY_SET_BRIDGE_WALLET",
        }
    }

    pub fn hash(&self) -> [u8; 32] {
        keccak256(self.as_str().as_bytes())
    }
}

/// The deployment a digest authorizes an action on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Domain<'a> {
    /// Chain the executing relay runs on
    pub chain_id: u64,
    /// Address of the executing relay contract
    pub relay: &'a str,
}

/// Slot-by-slot digest encoder.
pub struct DigestBuilder {
    data: Vec<u8>,
}

impl DigestBuilder {
    /// Start a digest with the tag and domain slots.
    pub fn new(tag: ActionTag, domain: &Domain) -> Self {
        let mut data = Vec::with_capacity(32 * 8);
        data.extend_from_slice(&tag.hash());
        Self { data }.uint64(domain.chain_id).string(domain.relay)
    }

    pub fn string(mut self, value: &str) -> Self {
        self.data.extend_from_slice(&keccak256(value.as_bytes()));
        self
    }

    pub fn optional_string(mut self, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.string(v),
            None => {
                self.data.extend_from_slice(&[0u8; 32]);
                self
            }
        }
    }

    pub fn uint128(mut self, value: u128) -> Self {
        let mut slot = [0u8; 32];
        slot[16..].copy_from_slice(&value.to_be_bytes());
        self.data.extend_from_slice(&slot);
        self
    }

    pub fn uint64(mut self, value: u64) -> Self {
        let mut slot = [0u8; 32];
        slot[24..].copy_from_slice(&value.to_be_bytes());
        self.data.extend_from_slice(&slot);
        self
    }

    pub fn signer(mut self, signer: &SignerId) -> Self {
        let mut slot = [0u8; 32];
        slot[12..].copy_from_slice(signer.as_slice());
        self.data.extend_from_slice(&slot);
        self
    }

    pub fn finish(self) -> [u8; 32] {
        keccak256(&self.data)
    }
}

/// Digest authorizing a release of `amount` to `recipient` for source
/// deposit `nonce` on the relay identified by `domain`.
pub fn send_digest(
    domain: &Domain,
    sender: &str,
    recipient: &str,
    amount: u128,
    nonce: u64,
) -> [u8; 32] {
    DigestBuilder::new(ActionTag::Send, domain)
        .string(sender)
        .string(recipient)
        .uint128(amount)
        .uint64(nonce)
        .finish()
}

/// A quorum-gated mutation of the relay's own configuration.
#[cw_serde]
pub enum GovernanceAction {
    AddSigner { signer: String },
    RemoveSigner { signer: String },
    SetThreshold { threshold: u32 },
    SetAdminFee { admin_fee_bps: u64 },
    SetBridgeWallet { bridge_wallet: Option<String> },
}

impl GovernanceAction {
    pub fn tag(&self) -> ActionTag {
        match self {
            GovernanceAction::AddSigner { .. } => ActionTag::AddSigner,
            GovernanceAction::RemoveSigner { .. } => ActionTag::RemoveSigner,
            GovernanceAction::SetThreshold { .. } => ActionTag::SetThreshold,
            GovernanceAction::SetAdminFee { .. } => ActionTag::SetAdminFee,
            GovernanceAction::SetBridgeWallet { .. } => ActionTag::SetBridgeWallet,
        }
    }

    /// Digest for this action on `domain` at the given governance nonce.
    ///
    /// Fails only if a signer argument is not a valid hex address.
    pub fn digest(&self, domain: &Domain, governance_nonce: u64) -> StdResult<[u8; 32]> {
        let builder = DigestBuilder::new(self.tag(), domain).uint64(governance_nonce);
        let digest = match self {
            GovernanceAction::AddSigner { signer } | GovernanceAction::RemoveSigner { signer } => {
                builder.signer(&SignerId::from_hex(signer)?).finish()
            }
            GovernanceAction::SetThreshold { threshold } => {
                builder.uint64(u64::from(*threshold)).finish()
            }
            GovernanceAction::SetAdminFee { admin_fee_bps } => {
                builder.uint64(*admin_fee_bps).finish()
            }
            GovernanceAction::SetBridgeWallet { bridge_wallet } => {
                builder.optional_string(bridge_wallet.as_deref()).finish()
            }
        };
        Ok(digest)
    }
}
