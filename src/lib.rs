//! Digital Goods Store Engine (DGSE)
//!
//! Request validation and transaction construction for digital goods
//! purchases in a ledger-backed marketplace.

pub mod attachment;
pub mod audit;
pub mod context;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod handler;
pub mod rules;
pub mod traits;
pub mod types;
pub mod validator;

// Re-export core types and traits
pub use attachment::PurchaseAttachmentBuilder;
pub use audit::{DecisionEntry, DecisionLevel, DecisionLog};
pub use context::{
    DirectoryAccountResolver, FixedTimeOracle, InMemoryGoodsCatalog, RecordingGateway,
};
pub use digest::AttachmentHasher;
pub use encoding::{AttachmentEncoder, BincodeEncoder, JsonEncoder};
pub use error::{EncodingError, InfrastructureError, PurchaseError, PurchaseRejection};
pub use handler::PurchaseHandler;
pub use rules::{CheckContext, PurchaseCheck, PurchaseRuleSet};
pub use traits::{AccountResolver, GoodsResolver, TimeOracle, TransactionGateway};
pub use types::{
    Account, AccountId, AttachmentDigest, EpochTime, GoodsId, GoodsListing, PurchaseAttachment,
    PurchaseRequest, SubmittedTransaction, TransactionId, ValidatedPurchase,
};
pub use validator::PurchaseValidator;
