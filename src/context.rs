//! Deterministic collaborator implementations
//!
//! In-memory, snapshot-exact implementations of the four collaborator
//! seams. They back the test suites and any embedded use where catalog and
//! time state is held locally; production wiring substitutes service-backed
//! implementations of the same traits.

use crate::digest::AttachmentHasher;
use crate::error::InfrastructureError;
use crate::traits::{AccountResolver, GoodsResolver, TimeOracle, TransactionGateway};
use crate::types::{
    Account, AccountId, EpochTime, GoodsId, GoodsListing, PurchaseAttachment, PurchaseRequest,
    SubmittedTransaction,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Time oracle frozen at a fixed epoch time
///
/// Validation compares deadlines against a single read of the clock, so a
/// frozen value makes every decision reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeOracle {
    current: EpochTime,
}

impl FixedTimeOracle {
    /// Create an oracle frozen at the given epoch time
    pub fn new(current: EpochTime) -> Self {
        Self { current }
    }

    /// Create an oracle frozen at a wall-clock instant
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self {
            current: EpochTime::from_utc(instant),
        }
    }

    /// A copy of this oracle frozen at a different time
    pub fn with_time(&self, current: EpochTime) -> Self {
        Self { current }
    }
}

impl TimeOracle for FixedTimeOracle {
    fn epoch_time(&self) -> EpochTime {
        self.current
    }
}

/// In-memory goods catalog
///
/// Unknown identifiers resolve to [`GoodsListing::absent`], preserving the
/// convention that not-found and delisted are one outcome.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGoodsCatalog {
    listings: HashMap<GoodsId, GoodsListing>,
}

impl InMemoryGoodsCatalog {
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
        }
    }

    /// Add or replace a listing
    pub fn list(&mut self, listing: GoodsListing) {
        self.listings.insert(listing.id, listing);
    }

    /// Mark a listing as delisted, if present
    pub fn delist(&mut self, id: GoodsId) {
        if let Some(listing) = self.listings.get_mut(&id) {
            listing.is_delisted = true;
        }
    }

    /// Update a listing's available stock, if present
    pub fn set_quantity(&mut self, id: GoodsId, quantity: i64) {
        if let Some(listing) = self.listings.get_mut(&id) {
            listing.quantity = quantity;
        }
    }

    /// Update a listing's unit price, if present
    pub fn set_price(&mut self, id: GoodsId, price_nqt: i64) {
        if let Some(listing) = self.listings.get_mut(&id) {
            listing.price_nqt = price_nqt;
        }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl GoodsResolver for InMemoryGoodsCatalog {
    fn goods(&self, id: GoodsId) -> Result<GoodsListing, InfrastructureError> {
        Ok(self
            .listings
            .get(&id)
            .cloned()
            .unwrap_or_else(|| GoodsListing::absent(id)))
    }
}

/// Account resolver that derives handles directly from identifiers
///
/// Account existence is the ledger's concern, not the purchase flow's: the
/// flow only needs opaque handles for the buyer and the seller.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryAccountResolver;

impl DirectoryAccountResolver {
    pub fn new() -> Self {
        Self
    }
}

impl AccountResolver for DirectoryAccountResolver {
    fn account(&self, id: AccountId) -> Result<Account, InfrastructureError> {
        Ok(Account::new(id))
    }
}

/// Gateway that records submissions in memory
///
/// Transaction ids derive from the attachment digest and the participant
/// accounts, so recording is as deterministic as validation itself.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    submitted: Mutex<Vec<SubmittedTransaction>>,
    hasher: AttachmentHasher,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            hasher: AttachmentHasher::new(),
        }
    }

    /// All transactions accepted so far, in submission order
    pub fn submitted(&self) -> Vec<SubmittedTransaction> {
        self.submitted
            .lock()
            .expect("gateway record lock poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.submitted
            .lock()
            .expect("gateway record lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.submitted
            .lock()
            .expect("gateway record lock poisoned")
            .clear();
    }
}

impl TransactionGateway for RecordingGateway {
    fn create_transaction(
        &self,
        _request: &PurchaseRequest,
        sender: &Account,
        recipient: &Account,
        amount_nqt: i64,
        attachment: PurchaseAttachment,
    ) -> Result<SubmittedTransaction, InfrastructureError> {
        let transaction = SubmittedTransaction {
            id: self
                .hasher
                .transaction_id(&attachment, sender.id, recipient.id),
            sender: sender.id,
            recipient: recipient.id,
            amount_nqt,
            attachment,
        };

        self.submitted
            .lock()
            .expect("gateway record lock poisoned")
            .push(transaction.clone());
        Ok(transaction)
    }
}
