/// Transaction types for PQChain
use crate::crypto::{digest, digest_to_hex, Hash32};
use crate::encoding::{encode_tx_body, encode_tx_full};
use serde::{Deserialize, Serialize};

/// A signed transfer between two public keys.
///
/// Keys and signature are opaque bytes whose sizes are set by the signature
/// backend. An unsigned transaction carries an empty signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(with = "serde_bytes")]
    pub sender_public_key: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub recipient_public_key: Vec<u8>,
    pub amount: u64,
    /// Caller-supplied; not checked for uniqueness or ordering.
    pub nonce: u64,
    #[serde(with = "serde_bytes", default)]
    pub signature: Vec<u8>,
}

impl Transaction {
    pub fn new(
        sender_public_key: Vec<u8>,
        recipient_public_key: Vec<u8>,
        amount: u64,
        nonce: u64,
    ) -> Self {
        Transaction {
            sender_public_key,
            recipient_public_key,
            amount,
            nonce,
            signature: Vec::new(),
        }
    }

    /// Bytes covered by the signature.
    pub fn signable_message(&self) -> Vec<u8> {
        encode_tx_body(self)
    }

    pub fn attach_signature(&mut self, signature: Vec<u8>) {
        self.signature = signature;
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// Digest of the body together with the signature.
    pub fn id(&self) -> Hash32 {
        digest(&encode_tx_full(self))
    }

    pub fn id_hex(&self) -> String {
        digest_to_hex(&self.id())
    }
}
