// Thin re-export module: implementation is in `blockchain/core.rs`, split into
// the block entity, chain management and block validation.

pub mod core;
pub use core::*;
