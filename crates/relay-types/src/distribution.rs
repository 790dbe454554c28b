//! Per-recipient distribution record.
//!
//! One [`Distribution`] exists per recipient once anything has been
//! attributed to it. Records are never deleted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LedgerHeight;

/// Aggregate bookkeeping for a single recipient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Distribution {
    /// Cumulative value attributed through forwarding.
    pub total_received: Decimal,
    /// Cumulative value paid out through settlement (or forward-and-settle).
    pub total_paid: Decimal,
    /// Value awaiting settlement. Never negative.
    pub pending_amount: Decimal,
    /// Height of the most recent payment touching this recipient.
    pub last_payment_height: LedgerHeight,
    /// Number of forwarding operations attributed to this recipient.
    pub transaction_count: u64,
}

impl Distribution {
    /// Whether nothing has ever been attributed to this recipient.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_received.is_zero()
            && self.total_paid.is_zero()
            && self.pending_amount.is_zero()
            && self.transaction_count == 0
    }
}
