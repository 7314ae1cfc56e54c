//! The purchase validator

use crate::error::{PurchaseError, PurchaseRejection};
use crate::rules::{CheckContext, PurchaseRuleSet};
use crate::traits::{GoodsResolver, TimeOracle};
use crate::types::{EpochTime, PurchaseRequest, ValidatedPurchase};

/// Deterministically accepts or rejects purchase requests
///
/// Validation is a pure decision over the request, a listing snapshot and
/// the current epoch time. The validator holds no mutable state; a shared
/// instance can validate any number of requests concurrently, each against
/// its own snapshot.
pub struct PurchaseValidator {
    rules: PurchaseRuleSet,
}

impl PurchaseValidator {
    /// Create a validator running the standard cascade
    pub fn new() -> Self {
        Self {
            rules: PurchaseRuleSet::standard(),
        }
    }

    /// Create a validator with an explicit rule set
    pub fn with_rules(rules: PurchaseRuleSet) -> Self {
        Self { rules }
    }

    /// The cascade this validator evaluates
    pub fn rules(&self) -> &PurchaseRuleSet {
        &self.rules
    }

    /// Validate a request against current catalog and time state
    ///
    /// Resolves the goods snapshot, runs the cascade in order, and returns
    /// either the first rejection or the validated purchase carrying the
    /// parsed deadline and the listing snapshot.
    pub fn validate<G, C>(
        &self,
        request: &PurchaseRequest,
        goods: &G,
        clock: &C,
    ) -> Result<ValidatedPurchase, PurchaseError>
    where
        G: GoodsResolver + ?Sized,
        C: TimeOracle,
    {
        let listing = goods.goods(request.goods_id)?;

        let cx = CheckContext {
            request,
            listing: &listing,
            clock,
        };
        self.rules.evaluate(&cx)?;

        // The standard cascade guarantees a parseable deadline at this
        // point; custom rule sets may not, so extraction still fails safe.
        let delivery_deadline_timestamp = match request.delivery_deadline_param() {
            Some(raw) => raw
                .parse::<i64>()
                .map(EpochTime::new)
                .map_err(|_| PurchaseRejection::IncorrectDeliveryDeadlineTimestamp {
                    value: raw.to_string(),
                })?,
            None => return Err(PurchaseRejection::MissingDeliveryDeadlineTimestamp.into()),
        };

        Ok(ValidatedPurchase {
            quantity: request.quantity,
            price_nqt: request.price_nqt,
            delivery_deadline_timestamp,
            listing,
        })
    }
}

impl Default for PurchaseValidator {
    fn default() -> Self {
        Self::new()
    }
}
