//! Pluggable wire encoding for purchase attachments

use crate::error::EncodingError;
use crate::types::PurchaseAttachment;

/// Trait for attachment encoding backends
///
/// The attachment travels in two forms: canonical bytes inside the
/// transaction envelope and JSON on the API surface. Both are backends of
/// this trait so callers can stay agnostic of the form in flight.
pub trait AttachmentEncoder: Send + Sync {
    /// Encode an attachment to bytes
    fn encode(&self, attachment: &PurchaseAttachment) -> Result<Vec<u8>, EncodingError>;

    /// Decode an attachment from bytes
    fn decode(&self, bytes: &[u8]) -> Result<PurchaseAttachment, EncodingError>;

    /// Name of this encoding
    fn name(&self) -> &str;
}

/// Canonical bytes form used inside the transaction envelope
#[derive(Debug, Clone)]
pub struct BincodeEncoder;

impl BincodeEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BincodeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachmentEncoder for BincodeEncoder {
    fn encode(&self, attachment: &PurchaseAttachment) -> Result<Vec<u8>, EncodingError> {
        bincode::serialize(attachment).map_err(|e| EncodingError::EncodingFailed {
            reason: format!("bincode encoding failed: {}", e),
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<PurchaseAttachment, EncodingError> {
        bincode::deserialize(bytes).map_err(|e| EncodingError::DecodingFailed {
            reason: format!("bincode decoding failed: {}", e),
        })
    }

    fn name(&self) -> &str {
        "bincode"
    }
}

/// API form carrying the ledger wire field names
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    pretty: bool,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// JSON with indentation, for logs and tooling
    pub fn new_pretty() -> Self {
        Self { pretty: true }
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachmentEncoder for JsonEncoder {
    fn encode(&self, attachment: &PurchaseAttachment) -> Result<Vec<u8>, EncodingError> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(attachment)
        } else {
            serde_json::to_vec(attachment)
        };

        result.map_err(|e| EncodingError::EncodingFailed {
            reason: format!("JSON encoding failed: {}", e),
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<PurchaseAttachment, EncodingError> {
        serde_json::from_slice(bytes).map_err(|e| EncodingError::DecodingFailed {
            reason: format!("JSON decoding failed: {}", e),
        })
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, EpochTime, GoodsId};

    fn attachment() -> PurchaseAttachment {
        PurchaseAttachment {
            goods_id: GoodsId(7),
            quantity: 5,
            price_nqt: 10,
            delivery_deadline_timestamp: EpochTime::new(100),
            seller_id: AccountId(123),
            goods_note: Some(vec![1, 2, 3]),
        }
    }

    #[test]
    fn bincode_round_trip() {
        let encoder = BincodeEncoder::new();
        let bytes = encoder.encode(&attachment()).unwrap();
        assert_eq!(encoder.decode(&bytes).unwrap(), attachment());
    }

    #[test]
    fn json_round_trip() {
        let encoder = JsonEncoder::new();
        let bytes = encoder.encode(&attachment()).unwrap();
        assert_eq!(encoder.decode(&bytes).unwrap(), attachment());
    }

    #[test]
    fn json_carries_wire_field_names() {
        let encoder = JsonEncoder::new();
        let bytes = encoder.encode(&attachment()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("\"goods\""));
        assert!(text.contains("\"priceNQT\""));
        assert!(text.contains("\"deliveryDeadlineTimestamp\""));
        assert!(text.contains("\"seller\""));
    }

    #[test]
    fn pretty_json_is_indented() {
        let encoder = JsonEncoder::new_pretty();
        let bytes = encoder.encode(&attachment()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('\n'));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let encoder = BincodeEncoder::new();
        assert!(matches!(
            encoder.decode(&[0xFF; 3]),
            Err(EncodingError::DecodingFailed { .. })
        ));
    }

    #[test]
    fn encoder_names() {
        assert_eq!(BincodeEncoder::new().name(), "bincode");
        assert_eq!(JsonEncoder::new().name(), "json");
    }
}
