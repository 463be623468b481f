/// Signature checks for transactions, kept apart from the type definitions
use crate::crypto::SignatureBackend;
use crate::transaction::types::Transaction;

impl Transaction {
    /// Verify the signature over the canonical body against the sender key.
    /// Malformed or missing signatures simply fail.
    pub fn verify_signature(&self, backend: &SignatureBackend) -> bool {
        if !self.is_signed() {
            return false;
        }
        backend.verify(
            &self.signable_message(),
            &self.signature,
            &self.sender_public_key,
        )
    }
}
