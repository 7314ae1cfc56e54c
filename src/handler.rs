//! The purchase operation's composition root

use crate::attachment::PurchaseAttachmentBuilder;
use crate::audit::{DecisionEntry, DecisionLevel, DecisionLog};
use crate::error::PurchaseError;
use crate::traits::{AccountResolver, GoodsResolver, TimeOracle, TransactionGateway};
use crate::types::{PurchaseRequest, SubmittedTransaction, ValidatedPurchase};
use crate::validator::PurchaseValidator;
use rayon::prelude::*;

/// Runs the full purchase operation against a set of collaborators
///
/// One call to [`PurchaseHandler::process`] is one inbound purchase:
/// validate the request, resolve the buyer and seller accounts, construct
/// the attachment, hand everything to the submission gateway, and record
/// the decision in the audit log. Validation failures and infrastructure
/// failures both short-circuit before the gateway is touched.
pub struct PurchaseHandler<G, A, C, X> {
    goods: G,
    accounts: A,
    clock: C,
    gateway: X,
    validator: PurchaseValidator,
    log: DecisionLog,
}

impl<G, A, C, X> PurchaseHandler<G, A, C, X>
where
    G: GoodsResolver,
    A: AccountResolver,
    C: TimeOracle,
    X: TransactionGateway,
{
    /// Create a handler with the standard validator and an info-level log
    pub fn new(goods: G, accounts: A, clock: C, gateway: X) -> Self {
        Self {
            goods,
            accounts,
            clock,
            gateway,
            validator: PurchaseValidator::new(),
            log: DecisionLog::with_info_level(),
        }
    }

    /// Replace the validator, e.g. to run a custom cascade
    pub fn with_validator(mut self, validator: PurchaseValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Replace the audit log, e.g. to capture debug entries
    pub fn with_log(mut self, log: DecisionLog) -> Self {
        self.log = log;
        self
    }

    /// Process one purchase request end to end
    ///
    /// Returns the submitted transaction handle on success, or the first
    /// rejection or infrastructure failure encountered. Either way the
    /// decision is recorded in the audit log.
    pub fn process(&mut self, request: &PurchaseRequest) -> Result<SubmittedTransaction, PurchaseError> {
        match self.submit(request) {
            Ok(transaction) => {
                let entry = DecisionEntry::new(
                    DecisionLevel::Info,
                    self.clock.epoch_time(),
                    format!(
                        "purchase accepted: {} x goods {} at {} NQT",
                        request.quantity, request.goods_id, request.price_nqt
                    ),
                )
                .with_goods(request.goods_id)
                .with_buyer(request.buyer_id)
                .with_metadata("transaction_id".to_string(), transaction.id.to_string())
                .with_metadata("seller".to_string(), transaction.recipient.to_string());
                self.log.record(entry);
                Ok(transaction)
            }
            Err(error) => {
                let level = match &error {
                    PurchaseError::Rejected(_) => DecisionLevel::Warn,
                    PurchaseError::Infrastructure(_) => DecisionLevel::Error,
                };
                let entry = DecisionEntry::new(level, self.clock.epoch_time(), error.to_string())
                    .with_goods(request.goods_id)
                    .with_buyer(request.buyer_id);
                self.log.record(entry);
                Err(error)
            }
        }
    }

    fn submit(&self, request: &PurchaseRequest) -> Result<SubmittedTransaction, PurchaseError> {
        let validated = self.validator.validate(request, &self.goods, &self.clock)?;

        let seller = self.accounts.account(validated.listing.seller_id)?;
        let buyer = self.accounts.account(request.buyer_id)?;

        let attachment = PurchaseAttachmentBuilder::from_validated(validated).build();

        // The purchase transaction moves no funds at admission; the price
        // travels in the attachment and is settled by the delivery flow.
        let transaction = self
            .gateway
            .create_transaction(request, &buyer, &seller, 0, attachment)?;
        Ok(transaction)
    }

    /// Validate a batch of independent requests in parallel
    ///
    /// Validation only: nothing is submitted and the audit log is not
    /// touched. Each request is checked against its own snapshot reads, so
    /// outcomes are position-wise identical to sequential validation.
    pub fn validate_batch(
        &self,
        requests: &[PurchaseRequest],
    ) -> Vec<Result<ValidatedPurchase, PurchaseError>> {
        requests
            .par_iter()
            .map(|request| self.validator.validate(request, &self.goods, &self.clock))
            .collect()
    }

    /// The validator in use
    pub fn validator(&self) -> &PurchaseValidator {
        &self.validator
    }

    /// The audit log of decisions made so far
    pub fn decision_log(&self) -> &DecisionLog {
        &self.log
    }

    /// The goods resolver
    pub fn goods(&self) -> &G {
        &self.goods
    }

    /// The account resolver
    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    /// The time oracle
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The submission gateway
    pub fn gateway(&self) -> &X {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{
        DirectoryAccountResolver, FixedTimeOracle, InMemoryGoodsCatalog, RecordingGateway,
    };
    use crate::types::{AccountId, EpochTime, GoodsId, GoodsListing};

    fn handler_with_listing() -> PurchaseHandler<
        InMemoryGoodsCatalog,
        DirectoryAccountResolver,
        FixedTimeOracle,
        RecordingGateway,
    > {
        let mut catalog = InMemoryGoodsCatalog::new();
        catalog.list(GoodsListing {
            id: GoodsId(1),
            seller_id: AccountId(123),
            is_delisted: false,
            quantity: 10,
            price_nqt: 10,
        });

        PurchaseHandler::new(
            catalog,
            DirectoryAccountResolver::new(),
            FixedTimeOracle::new(EpochTime::new(10)),
            RecordingGateway::new(),
        )
    }

    #[test]
    fn accepted_purchase_is_logged_at_info() {
        let mut handler = handler_with_listing();
        let request = PurchaseRequest::new(GoodsId(1), AccountId(55), 5, 10)
            .with_delivery_deadline("100");

        handler.process(&request).unwrap();

        let infos = handler.decision_log().filter_by_level(DecisionLevel::Info);
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].goods_id, Some(GoodsId(1)));
        assert_eq!(infos[0].buyer_id, Some(AccountId(55)));
    }

    #[test]
    fn rejected_purchase_is_logged_at_warn_and_not_submitted() {
        let mut handler = handler_with_listing();
        let request = PurchaseRequest::new(GoodsId(1), AccountId(55), 11, 10)
            .with_delivery_deadline("100");

        assert!(handler.process(&request).is_err());
        assert!(handler.gateway().is_empty());
        assert_eq!(
            handler.decision_log().filter_by_level(DecisionLevel::Warn).len(),
            1
        );
    }
}
