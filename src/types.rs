//! Core data types for the digital goods purchase flow

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a goods listing in the marketplace catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GoodsId(pub u64);

impl fmt::Display for GoodsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a ledger account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ledger epoch time in seconds since the genesis instant
///
/// The ledger counts time from its own genesis instant rather than the Unix
/// epoch. All deadline comparisons in the purchase flow happen in this unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EpochTime(pub i64);

impl EpochTime {
    /// Unix timestamp of the ledger genesis instant (2018-01-01T00:00:00Z)
    pub const GENESIS_UNIX_SECONDS: i64 = 1_514_764_800;

    /// Create an epoch time from raw seconds
    pub fn new(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Convert a wall-clock instant to ledger epoch time
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self(instant.timestamp() - Self::GENESIS_UNIX_SECONDS)
    }

    /// Convert this epoch time back to a wall-clock instant
    ///
    /// Returns `None` if the value falls outside the representable range.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.0 + Self::GENESIS_UNIX_SECONDS, 0).single()
    }

    /// Get the raw seconds value
    pub fn seconds(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EpochTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inbound purchase request, as handed over by the request layer
///
/// `quantity` and `price_nqt` arrive already parsed by the parameter layer.
/// The delivery deadline is carried as the raw request parameter because its
/// presence and parseability are individual steps of the validation cascade.
/// `buyer_id` is the authenticated caller identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub goods_id: GoodsId,
    pub buyer_id: AccountId,
    pub quantity: i64,
    pub price_nqt: i64,
    pub delivery_deadline_timestamp: Option<String>,
}

impl PurchaseRequest {
    /// Create a request with no delivery deadline parameter
    pub fn new(goods_id: GoodsId, buyer_id: AccountId, quantity: i64, price_nqt: i64) -> Self {
        Self {
            goods_id,
            buyer_id,
            quantity,
            price_nqt,
            delivery_deadline_timestamp: None,
        }
    }

    /// Attach the raw delivery deadline parameter
    pub fn with_delivery_deadline(mut self, raw: impl Into<String>) -> Self {
        self.delivery_deadline_timestamp = Some(raw.into());
        self
    }

    /// Get the delivery deadline parameter, treating an empty value as absent
    pub fn delivery_deadline_param(&self) -> Option<&str> {
        self.delivery_deadline_timestamp
            .as_deref()
            .filter(|raw| !raw.is_empty())
    }
}

/// Snapshot of a goods listing as read from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsListing {
    pub id: GoodsId,
    pub seller_id: AccountId,
    pub is_delisted: bool,
    pub quantity: i64,
    pub price_nqt: i64,
}

impl GoodsListing {
    /// The snapshot returned for an identifier with no known listing
    ///
    /// Absent and delisted listings are deliberately indistinguishable to the
    /// purchase flow: both reject with the same outcome.
    pub fn absent(id: GoodsId) -> Self {
        Self {
            id,
            seller_id: AccountId(0),
            is_delisted: true,
            quantity: 0,
            price_nqt: 0,
        }
    }
}

/// Opaque handle to a resolved ledger account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
}

impl Account {
    pub fn new(id: AccountId) -> Self {
        Self { id }
    }
}

/// A purchase request that passed the full validation cascade
///
/// Carries the parsed field values together with the listing snapshot they
/// were validated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedPurchase {
    pub quantity: i64,
    pub price_nqt: i64,
    pub delivery_deadline_timestamp: EpochTime,
    pub listing: GoodsListing,
}

/// The purchase transaction's type-specific payload
///
/// Field names on the wire follow the ledger API convention. The goods note
/// is an opaque encrypted payload whose layout is owned by the note layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseAttachment {
    #[serde(rename = "goods")]
    pub goods_id: GoodsId,
    pub quantity: i64,
    #[serde(rename = "priceNQT")]
    pub price_nqt: i64,
    #[serde(rename = "deliveryDeadlineTimestamp")]
    pub delivery_deadline_timestamp: EpochTime,
    #[serde(rename = "seller")]
    pub seller_id: AccountId,
    #[serde(rename = "goodsNote")]
    pub goods_note: Option<Vec<u8>>,
}

/// Identifier of a transaction accepted by the submission gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub [u8; 32]);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Blake3 digest of an attachment's canonical bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentDigest(pub [u8; 32]);

impl fmt::Display for AttachmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Handle to a transaction accepted by the submission gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedTransaction {
    pub id: TransactionId,
    pub sender: AccountId,
    pub recipient: AccountId,
    pub amount_nqt: i64,
    pub attachment: PurchaseAttachment,
}
