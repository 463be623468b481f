//! Benchmark harness shared by the `pqchain-bench` and `pqchain-crypto-bench`
//! binaries.
//!
//! Both runs return plain serializable reports; printing is left to the caller.

use crate::blockchain::{Block, BlockRejection, Blockchain};
use crate::config::BenchmarkConfig;
use crate::crypto::SignatureBackend;
use crate::error::ChainError;
use crate::report::{BlockSummary, TransactionSummary};
use crate::wallet::Wallet;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const SELF_CHECK_MESSAGE: &[u8] = b"hello";

#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    pub iterations: usize,
    pub total_ms: f64,
    pub average_us: f64,
}

impl Timing {
    fn new(iterations: usize, elapsed: Duration) -> Self {
        let total_us = elapsed.as_secs_f64() * 1_000_000.0;
        Timing {
            iterations,
            total_ms: total_us / 1000.0,
            average_us: if iterations == 0 {
                0.0
            } else {
                total_us / iterations as f64
            },
        }
    }

    pub fn per_second(&self) -> f64 {
        if self.average_us == 0.0 {
            0.0
        } else {
            1_000_000.0 / self.average_us
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CryptoReport {
    pub algorithm: String,
    pub public_key_size: usize,
    pub secret_key_size: usize,
    pub max_signature_size: usize,
    pub sample_signature_size: usize,
    pub keygen: Timing,
    pub sign: Timing,
    pub verify: Timing,
    pub message_len: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerReport {
    pub algorithm: String,
    pub wallet_keygen: Timing,
    /// Signing of every transfer placed in the block, averaged per transaction.
    pub tx_sign: Timing,
    pub block_creation: Timing,
    pub first_transaction: Option<TransactionSummary>,
    pub block: BlockSummary,
    pub tampered_rejected: bool,
    pub parallel_validation: bool,
    pub validation: Timing,
    /// Average block validation time divided by the transactions in it.
    pub verify_per_tx_us: f64,
}

/// Time raw oracle operations: keygen, then sign and verify over seeded
/// random messages.
pub fn run_crypto_benchmark(
    backend: &SignatureBackend,
    config: &BenchmarkConfig,
) -> Result<CryptoReport, ChainError> {
    config.validate()?;
    info!("Running crypto benchmark for {}", backend.name());

    let (public_key, secret_key) = backend.generate_keypair()?;

    let start = Instant::now();
    for _ in 0..config.keygen_iterations {
        backend.generate_keypair()?;
    }
    let keygen = Timing::new(config.keygen_iterations, start.elapsed());
    debug!("keygen: {:.2} us/op", keygen.average_us);

    let sample = backend.sign(SELF_CHECK_MESSAGE, &secret_key)?;
    if !backend.verify(SELF_CHECK_MESSAGE, &sample, &public_key) {
        return Err(ChainError::SelfCheckFailed(format!(
            "{} could not verify its own signature",
            backend.name()
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut message = vec![0u8; config.message_len];
    let mut sign_elapsed = Duration::ZERO;
    let mut verify_elapsed = Duration::ZERO;

    for round in 0..config.sign_iterations {
        rng.fill_bytes(&mut message);

        let start = Instant::now();
        let signature = backend.sign(&message, &secret_key)?;
        sign_elapsed += start.elapsed();

        let start = Instant::now();
        let ok = backend.verify(&message, &signature, &public_key);
        verify_elapsed += start.elapsed();

        if !ok {
            return Err(ChainError::SelfCheckFailed(format!(
                "{} rejected its own signature in round {}",
                backend.name(),
                round
            )));
        }
    }

    Ok(CryptoReport {
        algorithm: backend.name().to_string(),
        public_key_size: public_key.len(),
        secret_key_size: secret_key.len(),
        max_signature_size: backend.max_signature_size(),
        sample_signature_size: sample.len(),
        keygen,
        sign: Timing::new(config.sign_iterations, sign_elapsed),
        verify: Timing::new(config.sign_iterations, verify_elapsed),
        message_len: config.message_len,
    })
}

/// Build one full block of transfers on a fresh chain and time its validation.
pub fn run_ledger_benchmark(
    backend: Arc<SignatureBackend>,
    config: &BenchmarkConfig,
) -> Result<LedgerReport, ChainError> {
    config.validate()?;
    info!(
        "Running ledger benchmark for {} ({} transactions per block)",
        backend.name(),
        config.transactions_per_block
    );

    let start = Instant::now();
    for _ in 0..config.wallets {
        backend.generate_keypair()?;
    }
    let wallet_keygen = Timing::new(config.wallets, start.elapsed());

    let chain = Blockchain::new(backend.clone());
    let alice = Wallet::generate(backend.clone())?;
    let bob = Wallet::generate(backend.clone())?;

    let start = Instant::now();
    let transactions = (1..=config.transactions_per_block as u64)
        .map(|i| alice.create_transaction(bob.public_key(), i, i))
        .collect::<Result<Vec<_>, _>>()?;
    let tx_sign = Timing::new(config.transactions_per_block, start.elapsed());

    let start = Instant::now();
    let block = chain.create_block(transactions);
    let block_creation = Timing::new(1, start.elapsed());

    let first_transaction = block
        .transactions
        .first()
        .map(TransactionSummary::from_transaction);
    let summary = BlockSummary::from_block(&block);

    let check = |candidate: &Block| {
        if config.parallel_validation {
            chain.check_block_parallel(candidate)
        } else {
            chain.check_block(candidate)
        }
    };

    check(&block)?;

    let mut tampered = block.clone();
    if let Some(tx) = tampered.transactions.first_mut() {
        if let Some(byte) = tx.signature.first_mut() {
            *byte ^= 0x01;
        }
    }
    // Re-seal so the rejection comes from the signature, not the digest.
    tampered.digest = tampered.compute_digest();
    let tampered_rejected = matches!(
        check(&tampered),
        Err(BlockRejection::InvalidSignature { .. })
    );

    let start = Instant::now();
    for _ in 0..config.validation_iterations {
        check(&block)?;
    }
    let validation = Timing::new(config.validation_iterations, start.elapsed());
    let verify_per_tx_us = validation.average_us / config.transactions_per_block as f64;
    info!(
        "Validated block {} {} times, {:.2} ms each",
        block.index,
        config.validation_iterations,
        validation.average_us / 1000.0
    );

    Ok(LedgerReport {
        algorithm: backend.name().to_string(),
        wallet_keygen,
        tx_sign,
        block_creation,
        first_transaction,
        block: summary,
        tampered_rejected,
        parallel_validation: config.parallel_validation,
        validation,
        verify_per_tx_us,
    })
}
