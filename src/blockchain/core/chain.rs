use crate::blockchain::core::block::Block;
use crate::blockchain::core::validation::{
    check_authorization, check_authorization_parallel, check_genesis, check_integrity,
    check_linkage, successor_index, BlockRejection,
};
use crate::crypto::{Hash32, SignatureBackend};
use crate::error::ChainError;
use crate::transaction::Transaction;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Append-ordered sequence of blocks bound to a single signature backend.
///
/// Blocks move through three stages: proposed by [`Blockchain::create_block`],
/// validated by [`Blockchain::validate_block`], and accepted by
/// [`Blockchain::append_block`]. Validation never touches the stored chain;
/// appending is always an explicit call.
#[derive(Debug, Clone)]
pub struct Blockchain {
    blocks: Vec<Block>,
    backend: Arc<SignatureBackend>,
}

impl Blockchain {
    /// Create a chain holding only the genesis block.
    pub fn new(backend: Arc<SignatureBackend>) -> Self {
        let genesis = Block::genesis();
        info!(
            "Initialized chain with {} (genesis {})",
            backend.name(),
            genesis.digest_hex()
        );
        Blockchain {
            blocks: vec![genesis],
            backend,
        }
    }

    /// Rebuild a chain from an existing block sequence, auditing every block.
    pub fn from_blocks(
        backend: Arc<SignatureBackend>,
        blocks: Vec<Block>,
    ) -> Result<Self, ChainError> {
        if blocks.is_empty() {
            let reason = BlockRejection::InvalidGenesis("chain has no blocks".to_string());
            return Err(reason.into());
        }
        let chain = Blockchain { blocks, backend };
        chain.verify_chain()?;
        Ok(chain)
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn latest_block(&self) -> &Block {
        // Never empty: constructors always install a genesis block.
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn latest_digest(&self) -> Hash32 {
        self.latest_block().digest
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn height(&self) -> u32 {
        self.latest_block().index
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn backend(&self) -> &Arc<SignatureBackend> {
        &self.backend
    }

    /// Propose a block on top of the current tip. The chain is not modified.
    ///
    /// Indices are `u32`. Once the tip sits at `u32::MAX` the proposal reuses
    /// that index and validation rejects it with
    /// [`BlockRejection::HeightExhausted`].
    pub fn create_block(&self, transactions: Vec<Transaction>) -> Block {
        let tip = self.latest_block();
        let index = successor_index(tip).unwrap_or(tip.index);
        let block = Block::new(index, tip.digest, u64::from(index), transactions);
        debug!(
            "Proposed block {} with {} transactions ({})",
            block.index,
            block.transactions.len(),
            block.digest_hex()
        );
        block
    }

    /// Linkage, integrity and authorization, in that order, stopping at the
    /// first failure.
    pub fn check_block(&self, block: &Block) -> Result<(), BlockRejection> {
        check_linkage(self.latest_block(), block)?;
        check_integrity(block)?;
        check_authorization(block, &self.backend)
    }

    /// Same checks as [`Blockchain::check_block`], with signature
    /// verification spread over the rayon pool.
    pub fn check_block_parallel(&self, block: &Block) -> Result<(), BlockRejection> {
        check_linkage(self.latest_block(), block)?;
        check_integrity(block)?;
        check_authorization_parallel(block, &self.backend)
    }

    pub fn validate_block(&self, block: &Block) -> bool {
        match self.check_block(block) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Block {} rejected: {}", block.index, reason);
                false
            }
        }
    }

    pub fn validate_block_parallel(&self, block: &Block) -> bool {
        match self.check_block_parallel(block) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Block {} rejected: {}", block.index, reason);
                false
            }
        }
    }

    /// Validate and, on success, append. A rejected block leaves the chain
    /// untouched.
    pub fn append_block(&mut self, block: Block) -> Result<(), ChainError> {
        if let Err(reason) = self.check_block(&block) {
            warn!("Refusing to append block {}: {}", block.index, reason);
            return Err(reason.into());
        }
        info!(
            "Appended block {} with {} transactions ({})",
            block.index,
            block.transactions.len(),
            block.digest_hex()
        );
        self.blocks.push(block);
        Ok(())
    }

    /// Re-check the whole stored chain: genesis shape, then every block's
    /// linkage, digest and signatures against its predecessor.
    pub fn verify_chain(&self) -> Result<(), ChainError> {
        check_genesis(self.genesis())?;
        for pair in self.blocks.windows(2) {
            let (previous, block) = (&pair[0], &pair[1]);
            check_linkage(previous, block)?;
            check_integrity(block)?;
            check_authorization(block, &self.backend)?;
        }
        Ok(())
    }
}
