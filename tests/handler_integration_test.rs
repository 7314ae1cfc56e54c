//! End-to-end tests for the purchase handler with in-memory collaborators

use dgse::{
    Account, AccountId, DecisionLevel, DirectoryAccountResolver, EpochTime, FixedTimeOracle,
    GoodsId, GoodsListing, GoodsResolver, InMemoryGoodsCatalog, InfrastructureError,
    PurchaseAttachment, PurchaseError, PurchaseHandler, PurchaseRequest, RecordingGateway,
    SubmittedTransaction, TransactionGateway,
};

const GOODS: GoodsId = GoodsId(1);
const BUYER: AccountId = AccountId(55);
const SELLER: AccountId = AccountId(123);

fn listed_goods() -> GoodsListing {
    GoodsListing {
        id: GOODS,
        seller_id: SELLER,
        is_delisted: false,
        quantity: 10,
        price_nqt: 10,
    }
}

fn handler_with_listing() -> PurchaseHandler<
    InMemoryGoodsCatalog,
    DirectoryAccountResolver,
    FixedTimeOracle,
    RecordingGateway,
> {
    let mut catalog = InMemoryGoodsCatalog::new();
    catalog.list(listed_goods());

    PurchaseHandler::new(
        catalog,
        DirectoryAccountResolver::new(),
        FixedTimeOracle::new(EpochTime::new(10)),
        RecordingGateway::new(),
    )
}

fn valid_request() -> PurchaseRequest {
    PurchaseRequest::new(GOODS, BUYER, 5, 10).with_delivery_deadline("100")
}

#[test]
fn accepted_purchase_reaches_the_gateway_once() {
    let mut handler = handler_with_listing();

    let transaction = handler.process(&valid_request()).unwrap();

    let submitted = handler.gateway().submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0], transaction);
    assert_eq!(submitted[0].recipient, SELLER);
    assert_eq!(submitted[0].amount_nqt, 0);
}

#[test]
fn seller_is_resolved_from_the_listing_not_the_request() {
    let mut handler = handler_with_listing();

    let transaction = handler.process(&valid_request()).unwrap();

    // The request never names the seller; only the catalog snapshot does.
    assert_eq!(transaction.recipient, SELLER);
    assert_eq!(transaction.attachment.seller_id, SELLER);
}

#[test]
fn rejected_purchase_never_reaches_the_gateway() {
    let mut handler = handler_with_listing();
    let request = PurchaseRequest::new(GOODS, BUYER, 11, 10).with_delivery_deadline("100");

    assert!(handler.process(&request).is_err());
    assert!(handler.gateway().is_empty());
}

#[test]
fn reprocessing_an_identical_request_yields_an_identical_transaction() {
    let mut handler = handler_with_listing();

    let first = handler.process(&valid_request()).unwrap();
    let second = handler.process(&valid_request()).unwrap();

    assert_eq!(first, second);
    assert_eq!(handler.gateway().len(), 2);
}

#[test]
fn decision_log_records_one_entry_per_request() {
    let mut handler = handler_with_listing();

    handler.process(&valid_request()).unwrap();
    let rejected = PurchaseRequest::new(GOODS, BUYER, 11, 10).with_delivery_deadline("100");
    let _ = handler.process(&rejected);

    let log = handler.decision_log();
    assert_eq!(log.len(), 2);
    assert_eq!(log.filter_by_level(DecisionLevel::Info).len(), 1);
    assert_eq!(log.filter_by_level(DecisionLevel::Warn).len(), 1);
    assert_eq!(log.filter_by_goods(GOODS).len(), 2);
}

#[test]
fn batch_validation_matches_sequential_outcomes() {
    let handler = handler_with_listing();

    let requests = vec![
        valid_request(),
        PurchaseRequest::new(GOODS, BUYER, 11, 10).with_delivery_deadline("100"),
        PurchaseRequest::new(GOODS, BUYER, 5, 9).with_delivery_deadline("100"),
        PurchaseRequest::new(GoodsId(404), BUYER, 5, 10).with_delivery_deadline("100"),
        valid_request(),
    ];

    let parallel = handler.validate_batch(&requests);
    let sequential: Vec<_> = requests
        .iter()
        .map(|request| {
            handler
                .validator()
                .validate(request, handler.goods(), handler.clock())
        })
        .collect();

    assert_eq!(parallel, sequential);
    assert!(parallel[0].is_ok());
    assert!(parallel[1].is_err());
    assert!(parallel[2].is_err());
    assert!(parallel[3].is_err());
    assert!(parallel[4].is_ok());

    // Batch validation never submits.
    assert!(handler.gateway().is_empty());
}

#[test]
fn catalog_changes_between_requests_change_the_outcome() {
    let mut catalog = InMemoryGoodsCatalog::new();
    catalog.list(listed_goods());
    catalog.set_quantity(GOODS, 4);

    let mut handler = PurchaseHandler::new(
        catalog,
        DirectoryAccountResolver::new(),
        FixedTimeOracle::new(EpochTime::new(10)),
        RecordingGateway::new(),
    );

    assert!(handler.process(&valid_request()).is_err());
}

// Resolver whose backing service is down.
struct UnavailableCatalog;

impl GoodsResolver for UnavailableCatalog {
    fn goods(&self, _id: GoodsId) -> Result<GoodsListing, InfrastructureError> {
        Err(InfrastructureError::CollaboratorUnavailable {
            collaborator: "goods catalog".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

#[test]
fn collaborator_failure_surfaces_as_infrastructure_error() {
    let mut handler = PurchaseHandler::new(
        UnavailableCatalog,
        DirectoryAccountResolver::new(),
        FixedTimeOracle::new(EpochTime::new(10)),
        RecordingGateway::new(),
    );

    let error = handler.process(&valid_request()).unwrap_err();
    assert!(matches!(error, PurchaseError::Infrastructure(_)));
    assert_eq!(error.rejection(), None);
    assert_eq!(
        handler
            .decision_log()
            .filter_by_level(DecisionLevel::Error)
            .len(),
        1
    );
}

// Gateway that refuses everything, for the submission failure path.
struct RefusingGateway;

impl TransactionGateway for RefusingGateway {
    fn create_transaction(
        &self,
        _request: &PurchaseRequest,
        _sender: &Account,
        _recipient: &Account,
        _amount_nqt: i64,
        _attachment: PurchaseAttachment,
    ) -> Result<SubmittedTransaction, InfrastructureError> {
        Err(InfrastructureError::SubmissionFailed {
            reason: "mempool full".to_string(),
        })
    }
}

#[test]
fn submission_failure_is_infrastructure_not_rejection() {
    let mut catalog = InMemoryGoodsCatalog::new();
    catalog.list(listed_goods());

    let mut handler = PurchaseHandler::new(
        catalog,
        DirectoryAccountResolver::new(),
        FixedTimeOracle::new(EpochTime::new(10)),
        RefusingGateway,
    );

    let error = handler.process(&valid_request()).unwrap_err();
    assert_eq!(
        error,
        PurchaseError::Infrastructure(InfrastructureError::SubmissionFailed {
            reason: "mempool full".to_string(),
        })
    );
}
