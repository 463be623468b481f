//! Shared helpers for integration tests.

#![allow(dead_code)]

use pqchain::crypto::oracle::SignatureOracle;
use pqchain::crypto::{digest, Algorithm, SignatureBackend};
use pqchain::ChainError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Stretch `seed` to `len` bytes with counter-mode SHA3-256.
fn expand(seed: &[u8], len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len + 32);
    let mut counter = 0u64;
    while out.len() < len {
        let mut block = seed.to_vec();
        block.extend_from_slice(&counter.to_le_bytes());
        out.extend_from_slice(&digest(&block));
        counter += 1;
    }
    out.truncate(len);
    out
}

/// Deterministic stand-in for a Hawk library. Keys and signatures have the
/// real Hawk sizes; the public key is derived from the secret key, and a
/// signature is a keyed expansion of (public key, message). Not secure.
pub struct MockHawkOracle {
    algorithm: Algorithm,
    next_seed: AtomicU64,
}

impl MockHawkOracle {
    pub fn new(algorithm: Algorithm) -> Self {
        MockHawkOracle {
            algorithm,
            next_seed: AtomicU64::new(1),
        }
    }

    fn public_key_for(&self, secret_key: &[u8]) -> Vec<u8> {
        expand(&digest(secret_key), self.algorithm.public_key_size())
    }

    fn signature_for(&self, message: &[u8], public_key: &[u8]) -> Vec<u8> {
        let mut seed = digest(public_key).to_vec();
        seed.extend_from_slice(&digest(message));
        expand(&seed, self.algorithm.max_signature_size())
    }
}

impl SignatureOracle for MockHawkOracle {
    fn keypair(&self) -> Result<(Vec<u8>, Vec<u8>), ChainError> {
        let seed = self.next_seed.fetch_add(1, Ordering::Relaxed);
        let secret_key = expand(&seed.to_le_bytes(), self.algorithm.secret_key_size());
        Ok((self.public_key_for(&secret_key), secret_key))
    }

    fn sign(&self, message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>, ChainError> {
        let public_key = self.public_key_for(secret_key);
        Ok(self.signature_for(message, &public_key))
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        signature == self.signature_for(message, public_key).as_slice()
    }
}

pub fn hawk_backend(algorithm: Algorithm) -> Arc<SignatureBackend> {
    Arc::new(SignatureBackend::with_oracle(
        algorithm,
        Box::new(MockHawkOracle::new(algorithm)),
    ))
}

/// Algorithms with a bundled oracle.
pub fn bundled_algorithms() -> Vec<Algorithm> {
    Algorithm::ALL
        .into_iter()
        .filter(|algorithm| SignatureBackend::new(*algorithm).is_ok())
        .collect()
}
