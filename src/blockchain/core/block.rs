use crate::crypto::{digest, digest_to_hex, Hash32, ZERO_DIGEST};
use crate::encoding::{encode_block_full, encode_block_payload};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// An ordered batch of transactions linked to its predecessor by digest.
///
/// `digest` is computed once in [`Block::new`]. A tampered block is a
/// modified clone whose stored digest no longer matches its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u32,
    pub previous_digest: Hash32,
    /// Logical time; blocks built by the chain use their index.
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub digest: Hash32,
}

impl Block {
    pub fn new(
        index: u32,
        previous_digest: Hash32,
        timestamp: u64,
        transactions: Vec<Transaction>,
    ) -> Self {
        let mut block = Block {
            index,
            previous_digest,
            timestamp,
            transactions,
            digest: ZERO_DIGEST,
        };
        block.digest = block.compute_digest();
        block
    }

    /// Index 0, zero predecessor, timestamp 0, no transactions. The digest
    /// goes through the same pipeline as any other block.
    pub fn genesis() -> Self {
        Block::new(0, ZERO_DIGEST, 0, Vec::new())
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    pub fn payload_bytes(&self) -> Vec<u8> {
        encode_block_payload(self)
    }

    pub fn compute_digest(&self) -> Hash32 {
        digest(&self.payload_bytes())
    }

    pub fn has_valid_digest(&self) -> bool {
        self.compute_digest() == self.digest
    }

    pub fn digest_hex(&self) -> String {
        digest_to_hex(&self.digest)
    }

    /// Size of the full serialized block, digest included.
    pub fn encoded_size(&self) -> usize {
        encode_block_full(self).len()
    }
}
