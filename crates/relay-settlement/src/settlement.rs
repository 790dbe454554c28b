//! Batch settlement engine.
//!
//! Pays a list of `(wallet, amount)` instructions out of the relay's funds
//! in one atomic step:
//! 1. Validate shape (equal, non-empty, within the size cap) and amounts
//! 2. Refuse while paused, or if the batch total exceeds available funds
//! 3. Per pair with `amount > 0`, in input order: book the payment on the
//!    wallet's distribution, transfer the value, match the payout against
//!    the wallet's unsettled records, stage a distribution-updated event
//! 4. Release the batch total from the global pending total and stage the
//!    batch-settled event
//!
//! Any failure aborts the batch; the relay discards the staged state, so no
//! partial settlement persists.

use relay_types::{Address, CallContext, RelayError, RelayEvent, Result, checked_sum};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::matching::{MatchOutcome, match_unsettled};
use crate::state::{RelayState, ensure_non_negative, ensure_receiver};
use crate::transfer::ValueTransfer;

/// Summary of a committed settlement batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Sum of all amounts in the batch.
    pub total: Decimal,
    /// One entry per pair with a positive amount, in input order.
    pub matches: Vec<MatchOutcome>,
}

impl SettlementReport {
    /// Outcomes for one wallet (a wallet may appear more than once).
    pub fn outcomes_for<'a>(
        &'a self,
        wallet: &'a Address,
    ) -> impl Iterator<Item = &'a MatchOutcome> + 'a {
        self.matches.iter().filter(move |m| m.wallet == *wallet)
    }

    /// Total paid out but not reconciled to any log record.
    #[must_use]
    pub fn unallocated(&self) -> Decimal {
        self.matches.iter().map(|m| m.unallocated).sum()
    }
}

impl<T: ValueTransfer> RelayState<T> {
    pub(crate) fn settle_batch(
        &mut self,
        ctx: &CallContext,
        wallets: &[Address],
        amounts: &[Decimal],
        max_batch_size: usize,
    ) -> Result<SettlementReport> {
        if wallets.is_empty() || wallets.len() != amounts.len() {
            return Err(RelayError::InvalidArrayLength {
                wallets: wallets.len(),
                amounts: amounts.len(),
            });
        }
        if wallets.len() > max_batch_size {
            return Err(RelayError::BatchTooLarge {
                len: wallets.len(),
                max: max_batch_size,
            });
        }
        for (&wallet, &amount) in wallets.iter().zip(amounts) {
            ensure_receiver(wallet)?;
            ensure_non_negative(amount)?;
        }
        self.pause.check_running()?;

        let total = checked_sum(amounts)?;
        if total > self.funds {
            return Err(RelayError::InsufficientContractBalance {
                needed: total,
                available: self.funds,
            });
        }

        let mut matches = Vec::with_capacity(wallets.len());
        for (&wallet, &amount) in wallets.iter().zip(amounts) {
            if amount.is_zero() {
                continue;
            }

            let distribution = self
                .ledger
                .apply_payment(wallet, amount, ctx.height)?
                .clone();
            self.pay_out(wallet, amount)?;
            let outcome = match_unsettled(&mut self.log, wallet, amount)?;

            if !outcome.is_exact() {
                tracing::warn!(
                    wallet = %wallet,
                    paid = %amount,
                    unallocated = %outcome.unallocated,
                    "Settlement not fully reconciled to log records"
                );
            }

            self.emit(RelayEvent::DistributionUpdated {
                wallet,
                total_received: distribution.total_received,
                pending_amount: distribution.pending_amount,
            });
            matches.push(outcome);
        }

        self.ledger.release_pending(total)?;
        self.emit(RelayEvent::BatchSettled {
            wallets: wallets.to_vec(),
            amounts: amounts.to_vec(),
            total,
        });

        Ok(SettlementReport { total, matches })
    }
}
