//! External signature oracles.
//!
//! An oracle is the library that actually performs key generation, signing
//! and verification for one algorithm. The ledger trusts its math and only
//! checks the length preconditions it defines itself (see
//! [`SignatureBackend`](super::SignatureBackend)).
//!
//! ML-DSA and Falcon are served by the PQClean bindings in the `pqcrypto`
//! crates. Hawk has no bundled binding; callers supply one through
//! [`SignatureBackend::with_oracle`](super::SignatureBackend::with_oracle).

use super::Algorithm;
use crate::error::ChainError;

/// Raw key generation, signing and verification for a single algorithm.
///
/// Implementations must be safe to share across threads. Oracles that keep
/// signing randomness in internal state are responsible for synchronizing it.
pub trait SignatureOracle: Send + Sync {
    /// Returns `(public_key, secret_key)`.
    fn keypair(&self) -> Result<(Vec<u8>, Vec<u8>), ChainError>;

    fn sign(&self, message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>, ChainError>;

    /// Must return `false`, never panic, for malformed input.
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool;
}

macro_rules! pqclean_scheme {
    ($krate:ident :: $scheme:ident) => {
        mod $scheme {
            use ::$krate::$scheme::{
                detached_sign, keypair as generate, verify_detached_signature, DetachedSignature,
                PublicKey, SecretKey,
            };
            use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _, SecretKey as _};

            pub(super) fn keypair() -> (Vec<u8>, Vec<u8>) {
                let (pk, sk) = generate();
                (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
            }

            pub(super) fn sign(message: &[u8], secret_key: &[u8]) -> Option<Vec<u8>> {
                let sk = SecretKey::from_bytes(secret_key).ok()?;
                Some(detached_sign(message, &sk).as_bytes().to_vec())
            }

            pub(super) fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
                match (
                    PublicKey::from_bytes(public_key),
                    DetachedSignature::from_bytes(signature),
                ) {
                    (Ok(pk), Ok(sig)) => verify_detached_signature(&sig, message, &pk).is_ok(),
                    _ => false,
                }
            }
        }
    };
}

pqclean_scheme!(pqcrypto_mldsa::mldsa44);
pqclean_scheme!(pqcrypto_mldsa::mldsa65);
pqclean_scheme!(pqcrypto_mldsa::mldsa87);
pqclean_scheme!(pqcrypto_falcon::falcon512);
pqclean_scheme!(pqcrypto_falcon::falcon1024);

/// Oracle backed by the PQClean reference implementations.
#[derive(Debug, Clone, Copy)]
pub struct PqcleanOracle {
    algorithm: Algorithm,
}

impl PqcleanOracle {
    pub fn new(algorithm: Algorithm) -> Result<Self, ChainError> {
        if !Self::supports(algorithm) {
            return Err(ChainError::OracleUnavailable(algorithm.name().to_string()));
        }
        Ok(PqcleanOracle { algorithm })
    }

    pub fn supports(algorithm: Algorithm) -> bool {
        !matches!(algorithm, Algorithm::Hawk512 | Algorithm::Hawk1024)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn unavailable(&self) -> ChainError {
        ChainError::OracleUnavailable(self.algorithm.name().to_string())
    }
}

impl SignatureOracle for PqcleanOracle {
    fn keypair(&self) -> Result<(Vec<u8>, Vec<u8>), ChainError> {
        let pair = match self.algorithm {
            Algorithm::MlDsa44 => mldsa44::keypair(),
            Algorithm::MlDsa65 => mldsa65::keypair(),
            Algorithm::MlDsa87 => mldsa87::keypair(),
            Algorithm::Falcon512 => falcon512::keypair(),
            Algorithm::Falcon1024 => falcon1024::keypair(),
            Algorithm::Hawk512 | Algorithm::Hawk1024 => return Err(self.unavailable()),
        };
        Ok(pair)
    }

    fn sign(&self, message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>, ChainError> {
        let signature = match self.algorithm {
            Algorithm::MlDsa44 => mldsa44::sign(message, secret_key),
            Algorithm::MlDsa65 => mldsa65::sign(message, secret_key),
            Algorithm::MlDsa87 => mldsa87::sign(message, secret_key),
            Algorithm::Falcon512 => falcon512::sign(message, secret_key),
            Algorithm::Falcon1024 => falcon1024::sign(message, secret_key),
            Algorithm::Hawk512 | Algorithm::Hawk1024 => return Err(self.unavailable()),
        };
        signature.ok_or_else(|| {
            ChainError::OracleFailure(format!("{} rejected the secret key", self.algorithm))
        })
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        match self.algorithm {
            Algorithm::MlDsa44 => mldsa44::verify(message, signature, public_key),
            Algorithm::MlDsa65 => mldsa65::verify(message, signature, public_key),
            Algorithm::MlDsa87 => mldsa87::verify(message, signature, public_key),
            Algorithm::Falcon512 => falcon512::verify(message, signature, public_key),
            Algorithm::Falcon1024 => falcon1024::verify(message, signature, public_key),
            Algorithm::Hawk512 | Algorithm::Hawk1024 => false,
        }
    }
}
