//! Construction of the purchase transaction payload

use crate::types::{PurchaseAttachment, ValidatedPurchase};

/// Builder for the immutable purchase attachment
///
/// Assumes its inputs already passed the validation cascade: no checks
/// happen here, and nothing outside the returned value is touched. The
/// seller identity comes from the listing snapshot the request was
/// validated against, never from the request itself.
pub struct PurchaseAttachmentBuilder {
    purchase: ValidatedPurchase,
    goods_note: Option<Vec<u8>>,
}

impl PurchaseAttachmentBuilder {
    /// Start a builder from a validated purchase
    pub fn from_validated(purchase: ValidatedPurchase) -> Self {
        Self {
            purchase,
            goods_note: None,
        }
    }

    /// Attach an opaque encrypted goods note
    pub fn goods_note(mut self, note: Vec<u8>) -> Self {
        self.goods_note = Some(note);
        self
    }

    /// Produce the attachment payload
    pub fn build(self) -> PurchaseAttachment {
        PurchaseAttachment {
            goods_id: self.purchase.listing.id,
            quantity: self.purchase.quantity,
            price_nqt: self.purchase.price_nqt,
            delivery_deadline_timestamp: self.purchase.delivery_deadline_timestamp,
            seller_id: self.purchase.listing.seller_id,
            goods_note: self.goods_note,
        }
    }
}
