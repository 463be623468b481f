//! PQChain - a minimal ledger authorized by post-quantum signatures
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Blocks, the chain and block validation
//! - [`transaction`] - Transfer records and signature checks
//! - [`wallet`] - Keypair holder that signs transfers
//! - [`encoding`] - Canonical byte encoding of transactions and blocks
//!
//! ## Cryptography
//! - [`crypto`] - SHA3-256 digests and the ML-DSA / Falcon / Hawk signature backend
//!
//! ## Configuration & Utilities
//! - [`config`] - TOML configuration and algorithm selection
//! - [`error`] - Error types
//! - [`report`] - Block and transaction summaries
//! - [`bench`] - Benchmark harness used by the binaries

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod encoding;
pub mod transaction;
pub mod wallet;

// ============================================================================
// Cryptography
// ============================================================================
pub mod crypto;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod bench;
pub mod config;
pub mod error;
pub mod report;

pub use blockchain::{Block, BlockRejection, Blockchain};
pub use crypto::{Algorithm, SignatureBackend};
pub use error::{ChainError, Result};
pub use transaction::Transaction;
pub use wallet::Wallet;
