//! Error types for the purchase flow

use crate::types::GoodsId;
use thiserror::Error;

/// Terminal validation outcomes of the purchase cascade
///
/// Each variant is a request rejection returned to the caller, not a fault.
/// A request is rejected with exactly one of these, the first check that
/// failed in cascade order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseRejection {
    /// Listing absent or delisted
    #[error("unknown goods: {goods_id}")]
    UnknownGoods { goods_id: GoodsId },

    /// Requested quantity exceeds available stock
    #[error("incorrect purchase quantity: requested {requested}, available {available}")]
    IncorrectPurchaseQuantity { requested: i64, available: i64 },

    /// Submitted price does not exactly match the listed unit price
    #[error("incorrect purchase price: offered {offered}, listed {listed}")]
    IncorrectPurchasePrice { offered: i64, listed: i64 },

    /// Required delivery deadline parameter is absent
    #[error("missing delivery deadline timestamp")]
    MissingDeliveryDeadlineTimestamp,

    /// Delivery deadline present but unparseable, or not strictly in the future
    #[error("incorrect delivery deadline timestamp: {value}")]
    IncorrectDeliveryDeadlineTimestamp { value: String },
}

/// Unexpected collaborator failures
///
/// These are not part of the validation cascade: they represent the
/// catalog, account directory, or submission pipeline being unreachable,
/// not a verdict on the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfrastructureError {
    #[error("{collaborator} unavailable: {reason}")]
    CollaboratorUnavailable { collaborator: String, reason: String },

    #[error("transaction submission failed: {reason}")]
    SubmissionFailed { reason: String },
}

/// Outcome of a purchase operation that did not produce a transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("purchase rejected: {0}")]
    Rejected(#[from] PurchaseRejection),

    #[error("infrastructure failure: {0}")]
    Infrastructure(#[from] InfrastructureError),
}

impl PurchaseError {
    /// The rejection carried by this error, if it is one
    pub fn rejection(&self) -> Option<&PurchaseRejection> {
        match self {
            PurchaseError::Rejected(rejection) => Some(rejection),
            PurchaseError::Infrastructure(_) => None,
        }
    }
}

/// Attachment encoding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("decoding failed: {reason}")]
    DecodingFailed { reason: String },
}
