//! Identifiers used throughout OpenRelay.
//!
//! Account identities are raw 20-byte addresses, external references are
//! 32-byte tags (typically a receipt hash), and committed operations are
//! stamped with a UUIDv7 for log correlation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::RelayError;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account identity. [`Address::ZERO`] is the null address and is
/// never a valid recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The null address.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Address whose low 8 bytes hold `n` big-endian. Handy for fixtures.
    #[must_use]
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random::<[u8; 20]>())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits).map_err(|e| RelayError::InvalidAddress(format!("{s}: {e}")))?;
        let bytes: [u8; 20] = raw
            .try_into()
            .map_err(|_| RelayError::InvalidAddress(format!("{s}: expected 20 bytes")))?;
        Ok(Self(bytes))
    }
}

// ---------------------------------------------------------------------------
// ExternalRef
// ---------------------------------------------------------------------------

/// Identifier from outside the relay (e.g. a receipt hash) attached to a
/// logged transfer exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ExternalRef(pub [u8; 32]);

impl ExternalRef {
    /// Derive a reference by hashing arbitrary bytes with SHA-256.
    #[must_use]
    pub fn digest(data: impl AsRef<[u8]>) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"openrelay:external_ref:v1:");
        hasher.update(data.as_ref());
        Self(hasher.finalize().into())
    }
}

impl fmt::Display for ExternalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ref:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// LedgerHeight
// ---------------------------------------------------------------------------

/// Monotonically increasing logical time recorded with each record and
/// payment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct LedgerHeight(pub u64);

impl LedgerHeight {
    pub const GENESIS: Self = Self(0);

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for LedgerHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// OperationId
// ---------------------------------------------------------------------------

/// Correlation id stamped on a committed operation and its notifications.
/// Uses UUIDv7 so ids sort in commit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OperationId(pub Uuid);

impl OperationId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
