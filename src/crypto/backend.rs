//! The signature capability set the ledger is written against.

use super::oracle::{PqcleanOracle, SignatureOracle};
use super::{AlgoFamily, Algorithm};
use crate::config::AlgoConfig;
use crate::error::ChainError;
use std::fmt;
use tracing::{debug, info};

/// Key generation, signing and verification for one (family, variant).
///
/// Holds no chain state. Length preconditions are enforced here so every
/// oracle sees the same rules:
/// - `sign` rejects a secret key of the wrong size with an error;
/// - `verify` answers `false` for a wrong-size public key, an empty or
///   oversized signature, or a short signature from a fixed-length family.
pub struct SignatureBackend {
    algorithm: Algorithm,
    oracle: Box<dyn SignatureOracle>,
}

impl SignatureBackend {
    /// Build a backend on the bundled oracle for `algorithm`.
    pub fn new(algorithm: Algorithm) -> Result<Self, ChainError> {
        let oracle = PqcleanOracle::new(algorithm)?;
        info!("Signature backend ready: {}", algorithm);
        Ok(Self::with_oracle(algorithm, Box::new(oracle)))
    }

    /// Build a backend from a configured (family, variant) selection.
    pub fn from_config(config: &AlgoConfig) -> Result<Self, ChainError> {
        Self::new(config.resolve()?)
    }

    /// Build a backend on a caller-provided oracle. This is how Hawk, which
    /// has no bundled binding, is plugged in.
    pub fn with_oracle(algorithm: Algorithm, oracle: Box<dyn SignatureOracle>) -> Self {
        SignatureBackend { algorithm, oracle }
    }

    pub fn generate_keypair(&self) -> Result<(Vec<u8>, Vec<u8>), ChainError> {
        let (public_key, secret_key) = self.oracle.keypair()?;

        let sizes_ok = public_key.len() == self.public_key_size()
            && secret_key.len() == self.secret_key_size();
        if !sizes_ok {
            return Err(ChainError::OracleFailure(format!(
                "{} keygen returned {}/{} byte keys, expected {}/{}",
                self.name(),
                public_key.len(),
                secret_key.len(),
                self.public_key_size(),
                self.secret_key_size()
            )));
        }
        Ok((public_key, secret_key))
    }

    pub fn sign(&self, message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>, ChainError> {
        if secret_key.len() != self.secret_key_size() {
            return Err(ChainError::SecretKeySize {
                algorithm: self.name().to_string(),
                expected: self.secret_key_size(),
                actual: secret_key.len(),
            });
        }

        let signature = self.oracle.sign(message, secret_key)?;

        if !self.signature_length_ok(signature.len()) {
            return Err(ChainError::OracleFailure(format!(
                "{} produced a {}-byte signature (maximum {})",
                self.name(),
                signature.len(),
                self.max_signature_size()
            )));
        }
        Ok(signature)
    }

    pub fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        if public_key.len() != self.public_key_size() {
            debug!(
                "{}: rejecting public key of {} bytes",
                self.name(),
                public_key.len()
            );
            return false;
        }
        if !self.signature_length_ok(signature.len()) {
            debug!(
                "{}: rejecting signature of {} bytes",
                self.name(),
                signature.len()
            );
            return false;
        }
        self.oracle.verify(message, signature, public_key)
    }

    fn signature_length_ok(&self, len: usize) -> bool {
        if self.algorithm.has_fixed_length_signatures() {
            len == self.max_signature_size()
        } else {
            len > 0 && len <= self.max_signature_size()
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn family(&self) -> AlgoFamily {
        self.algorithm.family()
    }

    pub fn variant(&self) -> &'static str {
        self.algorithm.variant()
    }

    pub fn public_key_size(&self) -> usize {
        self.algorithm.public_key_size()
    }

    pub fn secret_key_size(&self) -> usize {
        self.algorithm.secret_key_size()
    }

    pub fn max_signature_size(&self) -> usize {
        self.algorithm.max_signature_size()
    }
}

impl fmt::Debug for SignatureBackend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SignatureBackend")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Oracle that returns whatever it was built with, for exercising the
    /// backend's own length rules.
    struct FixedOracle {
        keypair: (Vec<u8>, Vec<u8>),
        signature: Vec<u8>,
    }

    impl SignatureOracle for FixedOracle {
        fn keypair(&self) -> Result<(Vec<u8>, Vec<u8>), ChainError> {
            Ok(self.keypair.clone())
        }

        fn sign(&self, _message: &[u8], _secret_key: &[u8]) -> Result<Vec<u8>, ChainError> {
            Ok(self.signature.clone())
        }

        fn verify(&self, _message: &[u8], signature: &[u8], _public_key: &[u8]) -> bool {
            signature == self.signature.as_slice()
        }
    }

    fn hawk_backend(signature_len: usize) -> SignatureBackend {
        let algorithm = Algorithm::Hawk512;
        SignatureBackend::with_oracle(
            algorithm,
            Box::new(FixedOracle {
                keypair: (
                    vec![1u8; algorithm.public_key_size()],
                    vec![2u8; algorithm.secret_key_size()],
                ),
                signature: vec![3u8; signature_len],
            }),
        )
    }

    #[test]
    fn test_metadata_is_constant() {
        let backend = SignatureBackend::new(Algorithm::MlDsa65).unwrap();
        assert_eq!(backend.name(), "ML-DSA-65");
        assert_eq!(backend.family(), AlgoFamily::MlDsa);
        assert_eq!(backend.family().name(), "ML-DSA");
        assert_eq!(backend.variant(), "65");
        assert_eq!(backend.public_key_size(), 1952);
        assert_eq!(backend.secret_key_size(), 4032);
        assert_eq!(backend.max_signature_size(), 3309);
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let backend = SignatureBackend::new(Algorithm::Falcon512).unwrap();
        let (pk, sk) = backend.generate_keypair().unwrap();
        assert_eq!(pk.len(), backend.public_key_size());
        assert_eq!(sk.len(), backend.secret_key_size());

        let signature = backend.sign(b"hello", &sk).unwrap();
        assert!(!signature.is_empty());
        assert!(signature.len() <= backend.max_signature_size());
        assert!(backend.verify(b"hello", &signature, &pk));
        assert!(!backend.verify(b"hellO", &signature, &pk));
    }

    #[test]
    fn test_every_bit_flip_in_signature_rejected() {
        let backend = SignatureBackend::new(Algorithm::MlDsa44).unwrap();
        let (pk, sk) = backend.generate_keypair().unwrap();
        let signature = backend.sign(b"flip me", &sk).unwrap();

        for byte in [0, signature.len() / 2, signature.len() - 1] {
            for bit in 0..8 {
                let mut tampered = signature.clone();
                tampered[byte] ^= 1 << bit;
                assert!(!backend.verify(b"flip me", &tampered, &pk));
            }
        }
    }

    #[test]
    fn test_wrong_secret_key_size_is_precondition_error() {
        let backend = SignatureBackend::new(Algorithm::MlDsa44).unwrap();
        let err = backend.sign(b"msg", &[0u8; 10]).unwrap_err();
        match err {
            ChainError::SecretKeySize { expected, actual, .. } => {
                assert_eq!(expected, 2560);
                assert_eq!(actual, 10);
            }
            other => panic!("Expected SecretKeySize, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_public_key_size_verifies_false() {
        let backend = SignatureBackend::new(Algorithm::Falcon1024).unwrap();
        let (pk, sk) = backend.generate_keypair().unwrap();
        let signature = backend.sign(b"msg", &sk).unwrap();

        let mut long_pk = pk.clone();
        long_pk.push(0);
        assert!(!backend.verify(b"msg", &signature, &long_pk));
        assert!(!backend.verify(b"msg", &signature, &pk[..pk.len() - 1]));
    }

    #[test]
    fn test_keys_from_another_algorithm_are_rejected() {
        let falcon = SignatureBackend::new(Algorithm::Falcon512).unwrap();
        let mldsa = SignatureBackend::new(Algorithm::MlDsa44).unwrap();
        let (pk, sk) = falcon.generate_keypair().unwrap();
        let signature = falcon.sign(b"msg", &sk).unwrap();

        assert!(mldsa.sign(b"msg", &sk).is_err());
        assert!(!mldsa.verify(b"msg", &signature, &pk));
    }

    #[test]
    fn test_fixed_length_family_requires_exact_signature_size() {
        let backend = hawk_backend(555);
        let (pk, sk) = backend.generate_keypair().unwrap();
        let signature = backend.sign(b"msg", &sk).unwrap();
        assert!(backend.verify(b"msg", &signature, &pk));
        assert!(!backend.verify(b"msg", &signature[..554], &pk));
        assert!(!backend.verify(b"msg", &[], &pk));
    }

    #[test]
    fn test_misbehaving_oracle_is_surfaced() {
        let backend = hawk_backend(100);
        let (_, sk) = backend.generate_keypair().unwrap();
        let err = backend.sign(b"msg", &sk).unwrap_err();
        assert!(matches!(err, ChainError::OracleFailure(_)));

        let short_keys = SignatureBackend::with_oracle(
            Algorithm::Hawk1024,
            Box::new(FixedOracle {
                keypair: (Vec::new(), Vec::new()),
                signature: Vec::new(),
            }),
        );
        assert!(matches!(
            short_keys.generate_keypair(),
            Err(ChainError::OracleFailure(_))
        ));
    }

    #[test]
    fn test_from_config_fails_fast() {
        let config = AlgoConfig {
            family: "falcon".to_string(),
            variant: "2048".to_string(),
        };
        let err = SignatureBackend::from_config(&config).unwrap_err();
        assert!(err.is_configuration());

        let config = AlgoConfig {
            family: "hawk".to_string(),
            variant: "1024".to_string(),
        };
        assert!(matches!(
            SignatureBackend::from_config(&config),
            Err(ChainError::OracleUnavailable(_))
        ));
    }
}
