//! Host execution context passed into every operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, LedgerHeight};

/// The host environment's view of the current call: who is calling, at
/// what ledger height, and at what wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: Address,
    pub height: LedgerHeight,
    pub timestamp: DateTime<Utc>,
}

impl CallContext {
    #[must_use]
    pub fn new(caller: Address, height: LedgerHeight) -> Self {
        Self {
            caller,
            height,
            timestamp: Utc::now(),
        }
    }

    /// Same caller one height later.
    #[must_use]
    pub fn advance(&self) -> Self {
        Self {
            caller: self.caller,
            height: self.height.next(),
            timestamp: Utc::now(),
        }
    }

    /// Same height, different caller.
    #[must_use]
    pub fn as_caller(&self, caller: Address) -> Self {
        Self { caller, ..*self }
    }
}
