//! Externally observable notifications.
//!
//! Every committed mutating operation produces one or more [`Notification`]s.
//! They are only published if the triggering operation fully commits.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, ExternalRef, LedgerHeight, OperationId};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayEvent {
    /// A forward (tracked or settle-immediately) moved value to `receiver`.
    TransferCompleted {
        sender: Address,
        receiver: Address,
        amount: Decimal,
        height: LedgerHeight,
        timestamp: DateTime<Utc>,
    },
    /// A log record received its external reference.
    ReferenceTagged {
        reference: ExternalRef,
        sender: Address,
        receiver: Address,
        amount: Decimal,
    },
    /// A wallet's distribution changed.
    DistributionUpdated {
        wallet: Address,
        total_received: Decimal,
        pending_amount: Decimal,
    },
    /// A settlement batch committed.
    BatchSettled {
        wallets: Vec<Address>,
        amounts: Vec<Decimal>,
        total: Decimal,
    },
    /// Value arrived outside the forwarding paths.
    RawValueReceived { sender: Address, amount: Decimal },
    /// The admin withdrew funds outside the accounting model.
    EmergencyRecovered { to: Address, amount: Decimal },
    /// Forwarding and settlement were paused or resumed.
    PauseChanged { paused: bool },
}

impl RelayEvent {
    /// Stable upper-case name, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TransferCompleted { .. } => "TRANSFER_COMPLETED",
            Self::ReferenceTagged { .. } => "REFERENCE_TAGGED",
            Self::DistributionUpdated { .. } => "DISTRIBUTION_UPDATED",
            Self::BatchSettled { .. } => "BATCH_SETTLED",
            Self::RawValueReceived { .. } => "RAW_VALUE_RECEIVED",
            Self::EmergencyRecovered { .. } => "EMERGENCY_RECOVERED",
            Self::PauseChanged { .. } => "PAUSE_CHANGED",
        }
    }
}

impl std::fmt::Display for RelayEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

/// A committed event with its position in the notification stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Zero-based position in the stream.
    pub sequence: u64,
    /// The operation that produced this notification.
    pub operation_id: OperationId,
    pub event: RelayEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_display() {
        let ev = RelayEvent::RawValueReceived {
            sender: Address::from_low_u64(1),
            amount: Decimal::ONE,
        };
        assert_eq!(format!("{ev}"), "RAW_VALUE_RECEIVED");
        assert_eq!(
            RelayEvent::PauseChanged { paused: true }.kind(),
            "PAUSE_CHANGED"
        );
    }

    #[test]
    fn notification_serde_roundtrip() {
        let n = Notification {
            sequence: 4,
            operation_id: OperationId::new(),
            event: RelayEvent::BatchSettled {
                wallets: vec![Address::from_low_u64(1), Address::from_low_u64(2)],
                amounts: vec![Decimal::new(10, 0), Decimal::new(20, 0)],
                total: Decimal::new(30, 0),
            },
        };
        let json = serde_json::to_string(&n).unwrap();
        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(n, back);
    }
}
