//! # relay-settlement
//!
//! **Value plane**: forwarding, batch settlement, record matching, and the
//! atomic commit that ties them to the bookkeeping plane.
//!
//! ## Architecture
//!
//! A [`Relay`] owns the [`relay_ledger`] state plus the relay's funds and a
//! [`ValueTransfer`] backend. Each entry point:
//! 1. Checks the [`AdminCapability`] where the operation is admin-only
//! 2. Stages the operation on a clone of the state
//! 3. Moves value through the staged backend (abort on any failed transfer)
//! 4. Verifies pending and funds conservation on the staged state
//! 5. Commits state and publishes the staged notifications together
//!
//! [`RelayHandle`] puts the relay behind the global execution lock and
//! rejects re-entrant calls.
//!
//! ## Settlement matching
//!
//! Payouts are reconciled against a wallet's unsettled records newest
//! first, skipping any record larger than what is left (see [`matching`]).

pub mod capability;
pub mod forwarder;
pub mod funds_conservation;
pub mod handle;
pub mod matching;
pub mod pause;
pub mod relay;
pub mod settlement;
mod state;
pub mod stream;
pub mod transfer;

pub use capability::AdminCapability;
pub use forwarder::{ForwardMode, ForwardReceipt};
pub use funds_conservation::FundsConservation;
pub use handle::RelayHandle;
pub use matching::{MatchOutcome, match_unsettled};
pub use pause::PauseSwitch;
pub use relay::Relay;
pub use settlement::SettlementReport;
pub use stream::NotificationStream;
pub use transfer::{AccountBook, ValueTransfer};
