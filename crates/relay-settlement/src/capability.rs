//! Administrative capability.
//!
//! Admin operations take an [`AdminCapability`] argument instead of
//! inspecting the caller. The token can only be minted by
//! [`crate::Relay::admin_capability`], and every admin operation checks it
//! against the relay's current admin again before doing anything.

use relay_types::{Address, RelayError, Result};

/// Proof that the holder passed the admin check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminCapability {
    holder: Address,
}

impl AdminCapability {
    /// Mint a capability if `caller` is `admin`.
    pub(crate) fn grant(caller: Address, admin: Address) -> Result<Self> {
        if caller.is_zero() || caller != admin {
            tracing::warn!(caller = %caller, "Admin capability denied");
            return Err(RelayError::AccessDenied { caller });
        }
        Ok(Self { holder: caller })
    }

    /// Re-validate against the current admin.
    pub(crate) fn check(&self, admin: Address) -> Result<()> {
        if self.holder == admin {
            Ok(())
        } else {
            tracing::warn!(holder = %self.holder, "Stale or foreign admin capability rejected");
            Err(RelayError::AccessDenied {
                caller: self.holder,
            })
        }
    }

    #[must_use]
    pub fn holder(&self) -> Address {
        self.holder
    }
}
