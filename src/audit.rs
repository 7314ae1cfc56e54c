//! Deterministic audit log for purchase decisions
//!
//! The log is an in-memory, serde-serializable record of validation
//! outcomes. It performs no I/O and never influences a decision; timestamps
//! come from the time oracle the handler already consulted, so two runs
//! over the same inputs produce the same log.

use crate::types::{AccountId, EpochTime, GoodsId};
use serde::{Deserialize, Serialize};

/// Severity of a decision log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionLevel {
    Debug,
    /// Accepted purchases
    Info,
    /// Rejected requests
    Warn,
    /// Infrastructure failures
    Error,
}

/// One recorded purchase decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionEntry {
    pub level: DecisionLevel,
    pub epoch_time: EpochTime,
    pub goods_id: Option<GoodsId>,
    pub buyer_id: Option<AccountId>,
    pub message: String,
    pub metadata: Vec<(String, String)>,
}

impl DecisionEntry {
    pub fn new(level: DecisionLevel, epoch_time: EpochTime, message: String) -> Self {
        Self {
            level,
            epoch_time,
            goods_id: None,
            buyer_id: None,
            message,
            metadata: Vec::new(),
        }
    }

    /// Add the goods the decision was about
    pub fn with_goods(mut self, goods_id: GoodsId) -> Self {
        self.goods_id = Some(goods_id);
        self
    }

    /// Add the buyer the decision was about
    pub fn with_buyer(mut self, buyer_id: AccountId) -> Self {
        self.buyer_id = Some(buyer_id);
        self
    }

    /// Add a metadata key-value pair
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.push((key, value));
        self
    }
}

/// Collector of decision entries with a minimum-level filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionLog {
    entries: Vec<DecisionEntry>,
    min_level: DecisionLevel,
}

impl DecisionLog {
    pub fn new(min_level: DecisionLevel) -> Self {
        Self {
            entries: Vec::new(),
            min_level,
        }
    }

    /// A log that records every level
    pub fn all() -> Self {
        Self::new(DecisionLevel::Debug)
    }

    /// A log that records info and above
    pub fn with_info_level() -> Self {
        Self::new(DecisionLevel::Info)
    }

    /// Record an entry if it meets the minimum level
    pub fn record(&mut self, entry: DecisionEntry) {
        if self.should_record(entry.level) {
            self.entries.push(entry);
        }
    }

    fn should_record(&self, level: DecisionLevel) -> bool {
        level as u8 >= self.min_level as u8
    }

    pub fn entries(&self) -> &[DecisionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries at exactly the given level
    pub fn filter_by_level(&self, level: DecisionLevel) -> Vec<&DecisionEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    /// Entries about a specific goods listing
    pub fn filter_by_goods(&self, goods_id: GoodsId) -> Vec<&DecisionEntry> {
        self.entries
            .iter()
            .filter(|e| e.goods_id == Some(goods_id))
            .collect()
    }
}

impl Default for DecisionLog {
    fn default() -> Self {
        Self::with_info_level()
    }
}
