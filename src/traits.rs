//! Collaborator seams of the purchase flow
//!
//! The validator and handler are generic over these four traits. Production
//! wiring binds them to the catalog, account and transaction services;
//! tests bind them to the deterministic implementations in [`crate::context`].

use crate::error::InfrastructureError;
use crate::types::{
    Account, AccountId, EpochTime, GoodsId, GoodsListing, PurchaseAttachment, PurchaseRequest,
    SubmittedTransaction,
};

/// Read access to the goods catalog
pub trait GoodsResolver: Send + Sync {
    /// Resolve a goods identifier to a listing snapshot
    ///
    /// An identifier with no known listing resolves to
    /// [`GoodsListing::absent`], never to an error: not-found and delisted
    /// are the same outcome for a purchase.
    fn goods(&self, id: GoodsId) -> Result<GoodsListing, InfrastructureError>;
}

/// Resolution of account identifiers to account handles
pub trait AccountResolver: Send + Sync {
    fn account(&self, id: AccountId) -> Result<Account, InfrastructureError>;
}

/// Source of the ledger's current epoch time
pub trait TimeOracle: Send + Sync {
    fn epoch_time(&self) -> EpochTime;
}

/// Downstream transaction pipeline accepting a constructed purchase
///
/// Admission, signing and broadcast happen behind this seam. The purchase
/// flow only hands over the validated inputs and the attachment.
pub trait TransactionGateway: Send + Sync {
    fn create_transaction(
        &self,
        request: &PurchaseRequest,
        sender: &Account,
        recipient: &Account,
        amount_nqt: i64,
        attachment: PurchaseAttachment,
    ) -> Result<SubmittedTransaction, InfrastructureError>;
}
