//! Distribution ledger: per-recipient received / paid / pending accounting.
//!
//! The ledger also carries the global pending total. After every committed
//! operation that total equals the sum of all recipients' pending amounts
//! (checked by [`crate::PendingConservation`]).
//!
//! Every increment is overflow-checked and computed before anything is
//! written, so a rejected call leaves the ledger as it was.

use std::collections::HashMap;

use relay_types::{Address, Distribution, LedgerHeight, RelayError, Result, checked_add};
use rust_decimal::Decimal;

/// Source of truth for per-recipient distribution state.
#[derive(Debug, Clone, Default)]
pub struct DistributionLedger {
    /// One record per recipient, created on first write.
    entries: HashMap<Address, Distribution>,
    /// Global pending-settlement total.
    total_pending: Decimal,
}

impl DistributionLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute a tracked forward to `receiver`: the amount becomes
    /// pending settlement.
    ///
    /// # Errors
    /// Returns `AmountOverflow` if any running total would overflow.
    pub fn record_forward(
        &mut self,
        receiver: Address,
        amount: Decimal,
        height: LedgerHeight,
    ) -> Result<&Distribution> {
        let current = self.distribution(&receiver);
        let total_received = checked_add(current.total_received, amount)?;
        let pending_amount = checked_add(current.pending_amount, amount)?;
        let total_pending = checked_add(self.total_pending, amount)?;

        let entry = self.entries.entry(receiver).or_default();
        entry.total_received = total_received;
        entry.pending_amount = pending_amount;
        entry.transaction_count += 1;
        entry.last_payment_height = height;
        self.total_pending = total_pending;
        Ok(entry)
    }

    /// Attribute a forward-and-settle to `receiver`: the amount counts as
    /// paid immediately and pending is left alone.
    ///
    /// # Errors
    /// Returns `AmountOverflow` if any running total would overflow.
    pub fn record_forward_settled(
        &mut self,
        receiver: Address,
        amount: Decimal,
        height: LedgerHeight,
    ) -> Result<&Distribution> {
        let current = self.distribution(&receiver);
        let total_received = checked_add(current.total_received, amount)?;
        let total_paid = checked_add(current.total_paid, amount)?;

        let entry = self.entries.entry(receiver).or_default();
        entry.total_received = total_received;
        entry.total_paid = total_paid;
        entry.transaction_count += 1;
        entry.last_payment_height = height;
        Ok(entry)
    }

    /// Register an obligation not backed by a forward. Touches neither
    /// `total_received` nor the transaction count.
    ///
    /// # Errors
    /// Returns `AmountOverflow` if the wallet or global pending total would
    /// overflow.
    pub fn add_pending(&mut self, wallet: Address, amount: Decimal) -> Result<&Distribution> {
        let pending_amount = checked_add(self.pending_of(&wallet), amount)?;
        let total_pending = checked_add(self.total_pending, amount)?;

        let entry = self.entries.entry(wallet).or_default();
        entry.pending_amount = pending_amount;
        self.total_pending = total_pending;
        Ok(entry)
    }

    /// Book a settlement payment against `wallet`.
    ///
    /// The global pending total is NOT adjusted here; the settlement engine
    /// releases the batch total in one step via [`Self::release_pending`].
    ///
    /// # Errors
    /// Returns `PendingUnderflow` if `amount` exceeds the wallet's pending
    /// amount, `AmountOverflow` if total paid would overflow. The entry is
    /// left unchanged in either case.
    pub fn apply_payment(
        &mut self,
        wallet: Address,
        amount: Decimal,
        height: LedgerHeight,
    ) -> Result<&Distribution> {
        let current = self.distribution(&wallet);
        if current.pending_amount < amount {
            return Err(RelayError::PendingUnderflow {
                wallet,
                pending: current.pending_amount,
                amount,
            });
        }
        let total_paid = checked_add(current.total_paid, amount)?;

        let entry = self.entries.entry(wallet).or_default();
        entry.total_paid = total_paid;
        entry.pending_amount -= amount;
        entry.last_payment_height = height;
        Ok(entry)
    }

    /// Decrease the global pending total once a batch has been booked.
    ///
    /// # Errors
    /// Returns `PendingInvariantViolation` if the total would go negative.
    pub fn release_pending(&mut self, total: Decimal) -> Result<()> {
        if self.total_pending < total {
            return Err(RelayError::PendingInvariantViolation {
                reason: format!(
                    "releasing {total} from global pending {}",
                    self.total_pending
                ),
            });
        }
        self.total_pending -= total;
        Ok(())
    }

    /// Distribution for a wallet, if one exists.
    #[must_use]
    pub fn get(&self, wallet: &Address) -> Option<&Distribution> {
        self.entries.get(wallet)
    }

    /// Distribution for a wallet, or an empty record.
    #[must_use]
    pub fn distribution(&self, wallet: &Address) -> Distribution {
        self.entries.get(wallet).cloned().unwrap_or_default()
    }

    /// Pending amount for a wallet (zero if unknown).
    #[must_use]
    pub fn pending_of(&self, wallet: &Address) -> Decimal {
        self.entries
            .get(wallet)
            .map_or(Decimal::ZERO, |d| d.pending_amount)
    }

    /// Global pending-settlement total.
    #[must_use]
    pub fn total_pending(&self) -> Decimal {
        self.total_pending
    }

    /// Sum of every wallet's pending amount, recomputed from scratch.
    #[must_use]
    pub fn sum_of_pending(&self) -> Decimal {
        self.entries.values().map(|d| d.pending_amount).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Distribution)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
