//! Error types for the OpenRelay ledger.
//!
//! All errors use the `RL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Input validation errors
//! - 2xx: Funds / transfer errors
//! - 3xx: Transaction log errors
//! - 4xx: Settlement errors
//! - 5xx: Access and execution control errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Address, ExternalRef};

/// Central error enum for all OpenRelay operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    // =================================================================
    // Input Validation (1xx)
    // =================================================================
    /// The recipient is the null address.
    #[error("RL_ERR_100: Invalid receiver: null address")]
    InvalidReceiver,

    /// Amount is zero, negative, or exceeds what is available.
    #[error("RL_ERR_101: Insufficient amount: requested {requested}, limit {limit}")]
    InsufficientAmount { requested: Decimal, limit: Decimal },

    /// An address string could not be parsed.
    #[error("RL_ERR_102: Invalid address: {0}")]
    InvalidAddress(String),

    /// Adding `adding` to a running total would exceed `Decimal::MAX`.
    #[error("RL_ERR_103: Amount overflow: {current} + {adding}")]
    AmountOverflow { current: Decimal, adding: Decimal },

    // =================================================================
    // Funds / Transfer (2xx)
    // =================================================================
    /// The value transfer to the recipient could not complete.
    #[error("RL_ERR_200: Transfer to {to} of {amount} failed: {reason}")]
    TransferFailed {
        to: Address,
        amount: Decimal,
        reason: String,
    },

    /// A settlement batch asks for more than the relay currently holds.
    #[error("RL_ERR_201: Insufficient contract balance: need {needed}, have {available}")]
    InsufficientContractBalance { needed: Decimal, available: Decimal },

    // =================================================================
    // Transaction Log (3xx)
    // =================================================================
    /// The log position does not exist.
    #[error("RL_ERR_300: Record {position} out of range (log length {len})")]
    RecordOutOfRange { position: usize, len: usize },

    /// The record already carries an external reference.
    #[error("RL_ERR_301: Record {position} already tagged with {existing}")]
    ReferenceAlreadySet {
        position: usize,
        existing: ExternalRef,
    },

    /// The external reference already tags another record. This goes
    /// beyond the already-tagged check on a single record: it keeps the
    /// reference → position index one-to-one.
    #[error("RL_ERR_302: Reference {reference} already indexed at record {position}")]
    ReferenceAlreadyIndexed {
        reference: ExternalRef,
        position: usize,
    },

    // =================================================================
    // Settlement (4xx)
    // =================================================================
    /// `wallets` and `amounts` differ in length, or are empty.
    #[error("RL_ERR_400: Invalid array length: {wallets} wallets, {amounts} amounts")]
    InvalidArrayLength { wallets: usize, amounts: usize },

    /// Settling would drive a wallet's pending amount below zero.
    #[error("RL_ERR_401: Pending underflow for {wallet}: pending {pending}, settling {amount}")]
    PendingUnderflow {
        wallet: Address,
        pending: Decimal,
        amount: Decimal,
    },

    /// The batch holds more entries than the configured maximum.
    #[error("RL_ERR_402: Batch too large: {len} entries, max {max}")]
    BatchTooLarge { len: usize, max: usize },

    /// Global pending total no longer equals the per-wallet sum.
    #[error("RL_ERR_403: Pending invariant violation: {reason}")]
    PendingInvariantViolation { reason: String },

    /// Available funds no longer equal inflows minus outflows.
    #[error("RL_ERR_404: Funds invariant violation: {reason}")]
    FundsInvariantViolation { reason: String },

    // =================================================================
    // Access / Execution Control (5xx)
    // =================================================================
    /// Caller does not hold the administrative capability.
    #[error("RL_ERR_500: Access denied for {caller}")]
    AccessDenied { caller: Address },

    /// Forwarding and settlement are paused.
    #[error("RL_ERR_501: Relay is paused")]
    Paused,

    /// An operation was entered while another was mid-transfer.
    #[error("RL_ERR_502: Re-entrant call rejected")]
    ReentrantCall,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("RL_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("RL_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config, missing fields, etc.).
    #[error("RL_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, RelayError>;

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let msg = format!("{}", RelayError::InvalidReceiver);
        assert!(msg.starts_with("RL_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn insufficient_balance_display() {
        let err = RelayError::InsufficientContractBalance {
            needed: Decimal::new(100, 0),
            available: Decimal::new(50, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("RL_ERR_201"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn all_errors_have_rl_err_prefix() {
        let errors = vec![
            RelayError::Paused,
            RelayError::ReentrantCall,
            RelayError::InvalidArrayLength {
                wallets: 2,
                amounts: 1,
            },
            RelayError::RecordOutOfRange { position: 3, len: 1 },
            RelayError::AccessDenied {
                caller: Address::ZERO,
            },
            RelayError::Internal("test".into()),
            RelayError::AmountOverflow {
                current: Decimal::MAX,
                adding: Decimal::ONE,
            },
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("RL_ERR_"),
                "Error missing RL_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn serde_json_error_converts() {
        let err: RelayError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, RelayError::Serialization(_)));
    }
}
