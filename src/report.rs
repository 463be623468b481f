//! Read-only summaries of blocks and transactions for console and JSON output.

use crate::blockchain::Block;
use crate::encoding::{encode_block_full, encode_tx_body};
use crate::transaction::Transaction;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;

/// Default number of bytes shown in hex previews.
pub const PREVIEW_BYTES: usize = 64;

/// Hex of the first `max_bytes` bytes, with `...` appended when truncated.
pub fn hex_preview(bytes: &[u8], max_bytes: usize) -> String {
    if bytes.len() > max_bytes {
        format!("{}...", hex::encode(&bytes[..max_bytes]))
    } else {
        hex::encode(bytes)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionSummary {
    pub sender_key_size: usize,
    pub recipient_key_size: usize,
    pub amount: u64,
    pub nonce: u64,
    pub body_len: usize,
    pub signature_len: usize,
    pub body_preview: String,
    pub signature_preview: String,
}

impl TransactionSummary {
    pub fn from_transaction(tx: &Transaction) -> Self {
        let body = encode_tx_body(tx);
        Self {
            sender_key_size: tx.sender_public_key.len(),
            recipient_key_size: tx.recipient_public_key.len(),
            amount: tx.amount,
            nonce: tx.nonce,
            body_len: body.len(),
            signature_len: tx.signature.len(),
            body_preview: hex_preview(&body, PREVIEW_BYTES),
            signature_preview: hex_preview(&tx.signature, PREVIEW_BYTES),
        }
    }

    pub fn to_table(&self) -> Table {
        field_table(vec![
            ("sender key", format!("{} bytes", self.sender_key_size)),
            (
                "recipient key",
                format!("{} bytes", self.recipient_key_size),
            ),
            ("amount", self.amount.to_string()),
            ("nonce", self.nonce.to_string()),
            ("body length", format!("{} bytes", self.body_len)),
            ("signature length", format!("{} bytes", self.signature_len)),
            ("body", self.body_preview.clone()),
            ("signature", self.signature_preview.clone()),
        ])
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockSummary {
    pub index: u32,
    pub timestamp: u64,
    pub transaction_count: usize,
    pub previous_digest: String,
    pub digest: String,
    pub serialized_size: usize,
    /// Serialized size divided by the transaction count; zero for an empty block.
    pub average_tx_size: f64,
    pub serialized_preview: String,
}

impl BlockSummary {
    pub fn from_block(block: &Block) -> Self {
        let serialized = encode_block_full(block);
        let average_tx_size = if block.transactions.is_empty() {
            0.0
        } else {
            serialized.len() as f64 / block.transactions.len() as f64
        };
        Self {
            index: block.index,
            timestamp: block.timestamp,
            transaction_count: block.transactions.len(),
            previous_digest: hex::encode(block.previous_digest),
            digest: hex::encode(block.digest),
            serialized_size: serialized.len(),
            average_tx_size,
            serialized_preview: hex_preview(&serialized, PREVIEW_BYTES),
        }
    }

    pub fn to_table(&self) -> Table {
        field_table(vec![
            ("index", self.index.to_string()),
            ("timestamp", self.timestamp.to_string()),
            ("transactions", self.transaction_count.to_string()),
            ("previous digest", self.previous_digest.clone()),
            ("digest", self.digest.clone()),
            ("serialized size", format!("{} bytes", self.serialized_size)),
            ("avg tx size", format!("{:.2} bytes", self.average_tx_size)),
            ("serialized", self.serialized_preview.clone()),
        ])
    }
}

/// Two-column Field/Value table, one row per entry.
fn field_table(rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Field"), Cell::new("Value")]);
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table
}

/// Coloured OK/FAIL marker for console output.
pub fn status_label(ok: bool) -> ColoredString {
    if ok {
        "OK".green().bold()
    } else {
        "FAIL".red().bold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::ZERO_DIGEST;

    #[test]
    fn test_hex_preview_truncates() {
        assert_eq!(hex_preview(&[0xAB, 0xCD], 64), "abcd");
        assert_eq!(hex_preview(&[0x01, 0x02, 0x03], 2), "0102...");
        assert_eq!(hex_preview(&[], 4), "");
        assert_eq!(hex_preview(&[0xFF; 64], 64).len(), 128);
    }

    #[test]
    fn test_transaction_summary() {
        let mut tx = Transaction::new(vec![1; 10], vec![2; 12], 3, 4);
        tx.attach_signature(vec![5; 100]);
        let summary = TransactionSummary::from_transaction(&tx);

        assert_eq!(summary.sender_key_size, 10);
        assert_eq!(summary.recipient_key_size, 12);
        assert_eq!(summary.body_len, 8 + 10 + 8 + 12 + 8 + 8);
        assert_eq!(summary.signature_len, 100);
        assert!(summary.signature_preview.ends_with("..."));
        assert!(!summary.body_preview.ends_with("..."));
    }

    #[test]
    fn test_block_summary() {
        let mut tx = Transaction::new(vec![1; 10], vec![2; 10], 1, 1);
        tx.attach_signature(vec![3; 20]);
        let block = Block::new(1, ZERO_DIGEST, 1, vec![tx.clone(), tx]);
        let summary = BlockSummary::from_block(&block);

        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.serialized_size, block.encoded_size());
        assert_eq!(summary.average_tx_size, block.encoded_size() as f64 / 2.0);
        assert_eq!(summary.digest, block.digest_hex());
        assert_eq!(summary.previous_digest, "0".repeat(64));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["index"], 1);
        assert_eq!(json["transaction_count"], 2);
    }

    #[test]
    fn test_empty_block_average_is_zero() {
        let summary = BlockSummary::from_block(&Block::genesis());
        assert_eq!(summary.average_tx_size, 0.0);
        assert_eq!(summary.transaction_count, 0);
    }

    #[test]
    fn test_tables_render_every_field() {
        let summary = BlockSummary::from_block(&Block::genesis());
        let rendered = summary.to_table().to_string();
        assert!(rendered.contains("serialized size"));
        assert!(rendered.contains(&summary.digest[..16]));
    }
}
