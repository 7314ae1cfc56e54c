//! Attachment hashing using Blake3

use crate::types::{AccountId, AttachmentDigest, PurchaseAttachment, TransactionId};
use blake3::Hasher as Blake3Hasher;

/// Content hashing for purchase attachments
///
/// Hashes the bincode-canonical bytes of an attachment with Blake3. The
/// digest is deterministic across platforms and executions, which makes it
/// usable as an idempotency key and as the basis for transaction ids.
#[derive(Debug, Clone)]
pub struct AttachmentHasher {
    // Blake3 is stateless, a fresh hasher is created per digest
}

impl AttachmentHasher {
    pub fn new() -> Self {
        Self {}
    }

    /// Compute the digest of an attachment
    ///
    /// # Panics
    /// Panics if attachment serialization fails, which cannot happen for
    /// the plain-data attachment type.
    pub fn hash(&self, attachment: &PurchaseAttachment) -> AttachmentDigest {
        let serialized =
            bincode::serialize(attachment).expect("attachment serialization should never fail");

        let mut hasher = Blake3Hasher::new();
        hasher.update(&serialized);
        AttachmentDigest(*hasher.finalize().as_bytes())
    }

    /// Derive a transaction id from an attachment and its participants
    ///
    /// Two submissions of the same attachment between the same accounts
    /// yield the same id; any field difference yields a different one.
    pub fn transaction_id(
        &self,
        attachment: &PurchaseAttachment,
        sender: AccountId,
        recipient: AccountId,
    ) -> TransactionId {
        let digest = self.hash(attachment);

        let mut hasher = Blake3Hasher::new();
        hasher.update(&digest.0);
        hasher.update(&sender.0.to_le_bytes());
        hasher.update(&recipient.0.to_le_bytes());
        TransactionId(*hasher.finalize().as_bytes())
    }

    /// Collapse a sequence of digests into a single chain digest
    ///
    /// Order-sensitive: the same digests in a different order produce a
    /// different chain. Used to fingerprint a submission sequence in audits.
    pub fn digest_chain(&self, digests: &[AttachmentDigest]) -> AttachmentDigest {
        let mut hasher = Blake3Hasher::new();
        for digest in digests {
            hasher.update(&digest.0);
        }
        AttachmentDigest(*hasher.finalize().as_bytes())
    }

    /// Extend an existing chain digest with one more entry
    pub fn extend_chain(
        &self,
        previous_chain: &AttachmentDigest,
        next: &AttachmentDigest,
    ) -> AttachmentDigest {
        let mut hasher = Blake3Hasher::new();
        hasher.update(&previous_chain.0);
        hasher.update(&next.0);
        AttachmentDigest(*hasher.finalize().as_bytes())
    }
}

impl Default for AttachmentHasher {
    fn default() -> Self {
        Self::new()
    }
}
