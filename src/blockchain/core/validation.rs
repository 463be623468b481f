use crate::blockchain::core::block::Block;
use crate::crypto::{Hash32, SignatureBackend, ZERO_DIGEST};
use rayon::prelude::*;
use thiserror::Error;

/// Why a candidate block was rejected. Rejection is an expected outcome,
/// not a failure of the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockRejection {
    #[error("Invalid block index. Expected {expected}, but got {found}.")]
    IndexMismatch { expected: u32, found: u32 },

    #[error("Chain is full: no block can follow index {tip}.")]
    HeightExhausted { tip: u32 },

    #[error(
        "Invalid previous block digest. Expected {}, but got {}.",
        hex::encode(.expected),
        hex::encode(.found)
    )]
    PreviousDigestMismatch { expected: Hash32, found: Hash32 },

    #[error(
        "Block digest mismatch. Computed {}, but block declares {}.",
        hex::encode(.computed),
        hex::encode(.declared)
    )]
    DigestMismatch { computed: Hash32, declared: Hash32 },

    #[error("Signature of transaction {position} does not verify.")]
    InvalidSignature { position: usize },

    #[error("Genesis block is malformed: {0}")]
    InvalidGenesis(String),
}

/// Index of the block that may follow `tip`, or `None` once the `u32`
/// index space is used up.
pub fn successor_index(tip: &Block) -> Option<u32> {
    tip.index.checked_add(1)
}

/// Step 1: the block must sit directly on top of `tip`.
pub fn check_linkage(tip: &Block, block: &Block) -> Result<(), BlockRejection> {
    let expected = match successor_index(tip) {
        Some(index) => index,
        None => return Err(BlockRejection::HeightExhausted { tip: tip.index }),
    };
    if block.index != expected {
        return Err(BlockRejection::IndexMismatch {
            expected,
            found: block.index,
        });
    }
    if block.previous_digest != tip.digest {
        return Err(BlockRejection::PreviousDigestMismatch {
            expected: tip.digest,
            found: block.previous_digest,
        });
    }
    Ok(())
}

/// Step 2: the stored digest must match the recomputed payload digest.
pub fn check_integrity(block: &Block) -> Result<(), BlockRejection> {
    let computed = block.compute_digest();
    if computed != block.digest {
        return Err(BlockRejection::DigestMismatch {
            computed,
            declared: block.digest,
        });
    }
    Ok(())
}

/// Step 3: every transaction signature must verify, checked in order.
pub fn check_authorization(
    block: &Block,
    backend: &SignatureBackend,
) -> Result<(), BlockRejection> {
    match block
        .transactions
        .iter()
        .position(|tx| !tx.verify_signature(backend))
    {
        Some(position) => Err(BlockRejection::InvalidSignature { position }),
        None => Ok(()),
    }
}

/// Step 3 with signatures verified on the rayon pool. Reports the same
/// (lowest) failing position as [`check_authorization`].
pub fn check_authorization_parallel(
    block: &Block,
    backend: &SignatureBackend,
) -> Result<(), BlockRejection> {
    match block
        .transactions
        .par_iter()
        .position_first(|tx| !tx.verify_signature(backend))
    {
        Some(position) => Err(BlockRejection::InvalidSignature { position }),
        None => Ok(()),
    }
}

/// The fixed shape every genesis block must have.
pub fn check_genesis(block: &Block) -> Result<(), BlockRejection> {
    if block.index != 0 {
        return Err(BlockRejection::InvalidGenesis(format!("index is {}", block.index)));
    }
    if block.previous_digest != ZERO_DIGEST {
        return Err(BlockRejection::InvalidGenesis("previous digest is not zero".to_string()));
    }
    if block.timestamp != 0 {
        return Err(BlockRejection::InvalidGenesis(format!("timestamp is {}", block.timestamp)));
    }
    if !block.transactions.is_empty() {
        return Err(BlockRejection::InvalidGenesis(format!(
            "contains {} transactions",
            block.transactions.len()
        )));
    }
    check_integrity(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Algorithm;
    use crate::wallet::Wallet;
    use std::sync::Arc;

    #[test]
    fn test_linkage_accepts_successor() {
        let genesis = Block::genesis();
        let next = Block::new(1, genesis.digest, 1, Vec::new());
        assert!(check_linkage(&genesis, &next).is_ok());
    }

    #[test]
    fn test_linkage_rejects_skipped_index() {
        let genesis = Block::genesis();
        let skipped = Block::new(2, genesis.digest, 2, Vec::new());
        assert_eq!(
            check_linkage(&genesis, &skipped),
            Err(BlockRejection::IndexMismatch {
                expected: 1,
                found: 2,
            })
        );
    }

    #[test]
    fn test_linkage_rejects_wrong_previous_digest() {
        let genesis = Block::genesis();
        let orphan = Block::new(1, [1u8; 32], 1, Vec::new());
        let err = check_linkage(&genesis, &orphan).unwrap_err();
        assert!(matches!(err, BlockRejection::PreviousDigestMismatch { .. }));
        assert!(err.to_string().contains(&hex::encode(genesis.digest)));
    }

    #[test]
    fn test_linkage_at_index_ceiling() {
        let tip = Block::new(u32::MAX, ZERO_DIGEST, u64::from(u32::MAX), Vec::new());
        assert_eq!(successor_index(&tip), None);

        let wrapped = Block::new(0, tip.digest, 0, Vec::new());
        let repeated = Block::new(u32::MAX, tip.digest, 0, Vec::new());
        let expected = Err(BlockRejection::HeightExhausted { tip: u32::MAX });
        assert_eq!(check_linkage(&tip, &wrapped), expected);
        assert_eq!(check_linkage(&tip, &repeated), expected);

        let below = Block::new(u32::MAX - 1, ZERO_DIGEST, 0, Vec::new());
        assert_eq!(successor_index(&below), Some(u32::MAX));
    }

    #[test]
    fn test_integrity_rejects_stale_digest() {
        let mut block = Block::new(1, ZERO_DIGEST, 1, Vec::new());
        assert!(check_integrity(&block).is_ok());
        block.timestamp = 2;
        assert!(matches!(
            check_integrity(&block),
            Err(BlockRejection::DigestMismatch { .. })
        ));
    }

    #[test]
    fn test_genesis_checks() {
        assert!(check_genesis(&Block::genesis()).is_ok());

        let late = Block::new(0, ZERO_DIGEST, 5, Vec::new());
        let linked = Block::new(0, [2u8; 32], 0, Vec::new());
        let numbered = Block::new(1, ZERO_DIGEST, 0, Vec::new());
        for block in [late, linked, numbered] {
            assert!(check_genesis(&block).is_err());
        }
    }

    #[test]
    fn test_sequential_and_parallel_report_same_position() {
        let backend = Arc::new(SignatureBackend::new(Algorithm::MlDsa44).unwrap());
        let alice = Wallet::generate(backend.clone()).unwrap();
        let bob = Wallet::generate(backend.clone()).unwrap();

        let mut transactions: Vec<_> = (1..=6)
            .map(|i| alice.create_transaction(bob.public_key(), i, i).unwrap())
            .collect();
        let block = Block::new(1, ZERO_DIGEST, 1, transactions.clone());
        assert!(check_authorization(&block, &backend).is_ok());
        assert!(check_authorization_parallel(&block, &backend).is_ok());

        transactions[2].signature[0] ^= 1;
        transactions[4].signature[0] ^= 1;
        let block = Block::new(1, ZERO_DIGEST, 1, transactions);
        let expected = Err(BlockRejection::InvalidSignature { position: 2 });
        assert_eq!(check_authorization(&block, &backend), expected);
        assert_eq!(check_authorization_parallel(&block, &backend), expected);
    }
}
