//! Cryptographic primitives for PQChain
//!
//! The digest function lives here; the signature side is split into the
//! closed algorithm set ([`algorithm`]), the external oracle seam
//! ([`oracle`]) and the capability type the ledger talks to ([`backend`]).

pub mod algorithm;
pub mod backend;
pub mod oracle;

pub use algorithm::{AlgoFamily, Algorithm};
pub use backend::SignatureBackend;
pub use oracle::{PqcleanOracle, SignatureOracle};

use sha3::{Digest, Sha3_256};

/// Size in bytes of every digest produced by [`digest`].
pub const DIGEST_SIZE: usize = 32;

/// Content address of a block or transaction.
pub type Hash32 = [u8; DIGEST_SIZE];

/// The all-zero digest used as the genesis block's predecessor.
pub const ZERO_DIGEST: Hash32 = [0u8; DIGEST_SIZE];

/// SHA3-256 over arbitrary bytes. Empty input is valid.
pub fn digest(data: &[u8]) -> Hash32 {
    Sha3_256::digest(data).into()
}

/// Convert a digest to a hex string for display.
pub fn digest_to_hex(digest: &Hash32) -> String {
    hex::encode(digest)
}
