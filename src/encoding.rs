//! Canonical byte encodings.
//!
//! The same bytes are used for signing and for content addressing, so every
//! integer is little-endian and every variable-length field is preceded by
//! its length as a `u64`. Only fixed-width fields (the 32-byte digests) go
//! without a prefix.

use crate::blockchain::Block;
use crate::transaction::Transaction;

pub fn append_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn append_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Length prefix followed by the bytes themselves.
pub fn append_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    append_u64(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

/// The signed portion of a transaction: sender key, recipient key, amount,
/// nonce. The signature is excluded.
pub fn encode_tx_body(tx: &Transaction) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(32 + tx.sender_public_key.len() + tx.recipient_public_key.len());
    append_bytes(&mut out, &tx.sender_public_key);
    append_bytes(&mut out, &tx.recipient_public_key);
    append_u64(&mut out, tx.amount);
    append_u64(&mut out, tx.nonce);
    out
}

/// A transaction as it appears inside a block: framed body, then framed
/// signature.
pub fn encode_tx_full(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::new();
    append_tx_entry(&mut out, tx);
    out
}

fn append_tx_entry(out: &mut Vec<u8>, tx: &Transaction) {
    append_bytes(out, &encode_tx_body(tx));
    append_bytes(out, &tx.signature);
}

fn append_transactions(out: &mut Vec<u8>, transactions: &[Transaction]) {
    append_u64(out, transactions.len() as u64);
    for tx in transactions {
        append_tx_entry(out, tx);
    }
}

/// Everything the block digest commits to: index, previous digest,
/// timestamp and the framed transactions including their signatures.
pub fn encode_block_payload(block: &Block) -> Vec<u8> {
    let mut out = Vec::new();
    append_u32(&mut out, block.index);
    out.extend_from_slice(&block.previous_digest);
    append_u64(&mut out, block.timestamp);
    append_transactions(&mut out, &block.transactions);
    out
}

/// Payload plus the block's own digest, placed after the timestamp. Only used
/// to report serialized size; it is never hashed.
pub fn encode_block_full(block: &Block) -> Vec<u8> {
    let mut out = Vec::new();
    append_u32(&mut out, block.index);
    out.extend_from_slice(&block.previous_digest);
    append_u64(&mut out, block.timestamp);
    out.extend_from_slice(&block.digest);
    append_transactions(&mut out, &block.transactions);
    out
}
