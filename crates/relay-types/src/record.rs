//! Transaction log record.
//!
//! A [`TransactionRecord`] is created once per forwarding operation and
//! lives at a fixed position in the append-only log. Only two fields ever
//! change after creation: `external_ref` (set at most once) and `settled`
//! (flips false → true at most once).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, ExternalRef, LedgerHeight};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Optional external reference, set exactly once via tagging.
    pub external_ref: Option<ExternalRef>,
    pub sender: Address,
    pub receiver: Address,
    /// Always strictly positive.
    pub amount: Decimal,
    pub height: LedgerHeight,
    pub timestamp: DateTime<Utc>,
    /// Whether settlement has reconciled this record.
    pub settled: bool,
}

impl TransactionRecord {
    /// Whether the record still awaits settlement for `wallet`.
    #[must_use]
    pub fn is_unsettled_for(&self, wallet: &Address) -> bool {
        !self.settled && self.receiver == *wallet
    }

    #[must_use]
    pub fn is_tagged(&self) -> bool {
        self.external_ref.is_some()
    }
}
