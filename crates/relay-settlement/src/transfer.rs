//! Value transfer seam.
//!
//! The relay never owns recipients' balances; it hands value to a
//! [`ValueTransfer`] backend. Backends are `Clone` because every operation
//! runs against a staged copy of the backend that is only committed if the
//! whole operation succeeds, so a failure halfway through a settlement batch
//! also undoes the transfers that already went out.

use std::collections::{HashMap, HashSet};

use relay_types::{Address, RelayError, Result, checked_add};
use rust_decimal::Decimal;

/// Moves value out of the relay to a recipient.
pub trait ValueTransfer: Clone {
    /// Transfer `amount` to `to`.
    ///
    /// # Errors
    /// Returns [`RelayError::TransferFailed`] if the recipient cannot accept
    /// the value. The relay aborts the enclosing operation.
    fn transfer(&mut self, to: Address, amount: Decimal) -> Result<()>;
}

/// In-memory external account balances.
///
/// Recipients registered via [`AccountBook::reject_transfers_to`] refuse
/// every incoming transfer, modelling a recipient that reverts.
#[derive(Debug, Clone, Default)]
pub struct AccountBook {
    balances: HashMap<Address, Decimal>,
    rejecting: HashSet<Address>,
}

impl AccountBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future transfer to `recipient` fail.
    pub fn reject_transfers_to(&mut self, recipient: Address) {
        self.rejecting.insert(recipient);
    }

    /// Accept transfers to `recipient` again.
    pub fn accept_transfers_to(&mut self, recipient: &Address) {
        self.rejecting.remove(recipient);
    }

    /// Value received so far by `account`.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Decimal {
        self.balances.get(account).copied().unwrap_or(Decimal::ZERO)
    }

    /// Total value handed out across all accounts.
    #[must_use]
    pub fn total_delivered(&self) -> Decimal {
        self.balances.values().copied().sum()
    }
}

impl ValueTransfer for AccountBook {
    fn transfer(&mut self, to: Address, amount: Decimal) -> Result<()> {
        if self.rejecting.contains(&to) {
            return Err(RelayError::TransferFailed {
                to,
                amount,
                reason: "recipient rejected transfer".into(),
            });
        }
        let balance = checked_add(self.balance_of(&to), amount)?;
        self.balances.insert(to, balance);
        Ok(())
    }
}
