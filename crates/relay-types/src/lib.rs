//! # relay-types
//!
//! Shared types, errors, and configuration for the **OpenRelay** ledger.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`Address`], [`ExternalRef`], [`LedgerHeight`], [`OperationId`]
//! - **Ledger model**: [`Distribution`], [`TransactionRecord`]
//! - **Notifications**: [`RelayEvent`], [`Notification`]
//! - **Execution context**: [`CallContext`]
//! - **Configuration**: [`RelayConfig`]
//! - **Errors**: [`RelayError`] with `RL_ERR_` prefix codes
//! - **Amounts**: overflow-checked [`checked_add`] and [`checked_sum`]
//! - **Constants**: system-wide limits and defaults

pub mod amount;
pub mod config;
pub mod constants;
pub mod context;
pub mod distribution;
pub mod error;
pub mod ids;
pub mod notification;
pub mod record;

pub use amount::{checked_add, checked_sum};
pub use config::*;
pub use context::*;
pub use distribution::*;
pub use error::*;
pub use ids::*;
pub use notification::*;
pub use record::*;

// Constants are accessed via `relay_types::constants::FOO`.
