//! The ordered validation cascade for purchase requests
//!
//! The check order is part of the observable contract: a request failing
//! several checks is rejected with the error of the first one in this
//! sequence. The cascade is therefore kept as an explicit ordered list of
//! named check objects rather than a chain of conditionals, so the order
//! can be inspected and tested on its own.

use crate::error::PurchaseRejection;
use crate::traits::TimeOracle;
use crate::types::{GoodsListing, PurchaseRequest};

/// Inputs available to every check in the cascade
pub struct CheckContext<'a> {
    pub request: &'a PurchaseRequest,
    pub listing: &'a GoodsListing,
    pub clock: &'a dyn TimeOracle,
}

/// A single named check in the validation cascade
pub trait PurchaseCheck: Send + Sync {
    /// Stable name of this check, used in audits and order tests
    fn name(&self) -> &'static str;

    /// Evaluate the check, returning the rejection it guards against
    fn evaluate(&self, cx: &CheckContext<'_>) -> Result<(), PurchaseRejection>;
}

/// The listing must exist and not be delisted
///
/// Absent listings arrive as delisted snapshots, so this single check
/// covers both cases. It runs first: every later check reads listing
/// fields that are meaningless for an unknown item.
pub struct ListingActive;

impl PurchaseCheck for ListingActive {
    fn name(&self) -> &'static str {
        "listing-active"
    }

    fn evaluate(&self, cx: &CheckContext<'_>) -> Result<(), PurchaseRejection> {
        if cx.listing.is_delisted {
            return Err(PurchaseRejection::UnknownGoods {
                goods_id: cx.listing.id,
            });
        }
        Ok(())
    }
}

/// The requested quantity must not exceed available stock
pub struct QuantityAvailable;

impl PurchaseCheck for QuantityAvailable {
    fn name(&self) -> &'static str {
        "quantity-available"
    }

    fn evaluate(&self, cx: &CheckContext<'_>) -> Result<(), PurchaseRejection> {
        if cx.request.quantity > cx.listing.quantity {
            return Err(PurchaseRejection::IncorrectPurchaseQuantity {
                requested: cx.request.quantity,
                available: cx.listing.quantity,
            });
        }
        Ok(())
    }
}

/// The offered price must match the listed unit price exactly
pub struct PriceMatchesListing;

impl PurchaseCheck for PriceMatchesListing {
    fn name(&self) -> &'static str {
        "price-matches-listing"
    }

    fn evaluate(&self, cx: &CheckContext<'_>) -> Result<(), PurchaseRejection> {
        if cx.request.price_nqt != cx.listing.price_nqt {
            return Err(PurchaseRejection::IncorrectPurchasePrice {
                offered: cx.request.price_nqt,
                listed: cx.listing.price_nqt,
            });
        }
        Ok(())
    }
}

/// The delivery deadline parameter must be present
///
/// Distinct from the two deadline-value checks below so the caller can
/// tell a forgotten field apart from a bad value.
pub struct DeadlinePresent;

impl PurchaseCheck for DeadlinePresent {
    fn name(&self) -> &'static str {
        "deadline-present"
    }

    fn evaluate(&self, cx: &CheckContext<'_>) -> Result<(), PurchaseRejection> {
        if cx.request.delivery_deadline_param().is_none() {
            return Err(PurchaseRejection::MissingDeliveryDeadlineTimestamp);
        }
        Ok(())
    }
}

/// The delivery deadline parameter must parse as an integer
pub struct DeadlineParses;

impl PurchaseCheck for DeadlineParses {
    fn name(&self) -> &'static str {
        "deadline-parses"
    }

    fn evaluate(&self, cx: &CheckContext<'_>) -> Result<(), PurchaseRejection> {
        if let Some(raw) = cx.request.delivery_deadline_param() {
            if raw.parse::<i64>().is_err() {
                return Err(PurchaseRejection::IncorrectDeliveryDeadlineTimestamp {
                    value: raw.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// The delivery deadline must be strictly after the current epoch time
///
/// This is the only check that consults the time oracle, and it does so
/// lazily: requests rejected earlier in the cascade never read the clock.
pub struct DeadlineInFuture;

impl PurchaseCheck for DeadlineInFuture {
    fn name(&self) -> &'static str {
        "deadline-in-future"
    }

    fn evaluate(&self, cx: &CheckContext<'_>) -> Result<(), PurchaseRejection> {
        if let Some(raw) = cx.request.delivery_deadline_param() {
            if let Ok(deadline) = raw.parse::<i64>() {
                if deadline <= cx.clock.epoch_time().seconds() {
                    return Err(PurchaseRejection::IncorrectDeliveryDeadlineTimestamp {
                        value: raw.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The purchase validation cascade, evaluated strictly in insertion order
pub struct PurchaseRuleSet {
    checks: Vec<Box<dyn PurchaseCheck>>,
}

impl PurchaseRuleSet {
    /// The standard cascade: listing state, quantity, price, then the three
    /// deadline checks
    pub fn standard() -> Self {
        Self {
            checks: vec![
                Box::new(ListingActive),
                Box::new(QuantityAvailable),
                Box::new(PriceMatchesListing),
                Box::new(DeadlinePresent),
                Box::new(DeadlineParses),
                Box::new(DeadlineInFuture),
            ],
        }
    }

    /// Build a cascade from an explicit check sequence
    pub fn from_checks(checks: Vec<Box<dyn PurchaseCheck>>) -> Self {
        Self { checks }
    }

    /// Run the cascade, short-circuiting on the first failing check
    pub fn evaluate(&self, cx: &CheckContext<'_>) -> Result<(), PurchaseRejection> {
        for check in &self.checks {
            check.evaluate(cx)?;
        }
        Ok(())
    }

    /// Names of the checks in evaluation order
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.name()).collect()
    }

    /// Number of checks in the cascade
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether the cascade contains no checks
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for PurchaseRuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
