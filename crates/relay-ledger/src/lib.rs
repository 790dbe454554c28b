//! # relay-ledger
//!
//! **Bookkeeping plane**: who received how much, how much of it is still
//! pending, and the ordered audit log of every forward.
//!
//! Nothing in this crate moves value. The settlement crate drives it:
//! 1. [`DistributionLedger`]: per-recipient received / paid / pending
//! 2. [`TransactionLog`]: append-only records, once-only external references,
//!    reverse reference index
//! 3. [`PendingConservation`]: the global-pending invariant check

pub mod distribution_ledger;
pub mod pending_conservation;
pub mod transaction_log;

pub use distribution_ledger::DistributionLedger;
pub use pending_conservation::PendingConservation;
pub use transaction_log::TransactionLog;
