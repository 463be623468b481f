//! Wallet: one keypair from one signature backend.

use crate::crypto::{digest, digest_to_hex, Hash32, SignatureBackend};
use crate::error::ChainError;
use crate::transaction::Transaction;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub struct Wallet {
    backend: Arc<SignatureBackend>,
    public_key: Vec<u8>,
    secret_key: Vec<u8>,
}

impl Wallet {
    /// Create a wallet with a freshly generated keypair.
    pub fn generate(backend: Arc<SignatureBackend>) -> Result<Self, ChainError> {
        let (public_key, secret_key) = backend.generate_keypair()?;
        Ok(Wallet {
            backend,
            public_key,
            secret_key,
        })
    }

    /// Wrap an existing keypair. Both keys must match the backend's sizes.
    pub fn from_keypair(
        backend: Arc<SignatureBackend>,
        public_key: Vec<u8>,
        secret_key: Vec<u8>,
    ) -> Result<Self, ChainError> {
        if public_key.len() != backend.public_key_size() {
            return Err(ChainError::WalletError(format!(
                "{} public key must be {} bytes, got {}",
                backend.name(),
                backend.public_key_size(),
                public_key.len()
            )));
        }
        if secret_key.len() != backend.secret_key_size() {
            return Err(ChainError::WalletError(format!(
                "{} secret key must be {} bytes, got {}",
                backend.name(),
                backend.secret_key_size(),
                secret_key.len()
            )));
        }
        Ok(Wallet {
            backend,
            public_key,
            secret_key,
        })
    }

    /// Replace the keypair with a new one. On failure the old keys are kept.
    pub fn regenerate_keypair(&mut self) -> Result<(), ChainError> {
        let (public_key, secret_key) = self.backend.generate_keypair()?;
        self.public_key = public_key;
        self.secret_key = secret_key;
        Ok(())
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }

    pub fn backend(&self) -> &Arc<SignatureBackend> {
        &self.backend
    }

    /// SHA3-256 fingerprint of the public key, for display.
    pub fn address(&self) -> Hash32 {
        digest(&self.public_key)
    }

    pub fn address_hex(&self) -> String {
        digest_to_hex(&self.address())
    }

    /// Build and sign a transfer from this wallet to `recipient_public_key`.
    pub fn create_transaction(
        &self,
        recipient_public_key: &[u8],
        amount: u64,
        nonce: u64,
    ) -> Result<Transaction, ChainError> {
        let mut tx = Transaction::new(
            self.public_key.clone(),
            recipient_public_key.to_vec(),
            amount,
            nonce,
        );
        let signature = self.backend.sign(&tx.signable_message(), &self.secret_key)?;
        debug!(
            "Signed transaction nonce={} with {} ({} byte signature)",
            nonce,
            self.backend.name(),
            signature.len()
        );
        tx.attach_signature(signature);
        Ok(tx)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("algorithm", &self.backend.algorithm())
            .field("address", &self.address_hex())
            .finish_non_exhaustive()
    }
}
