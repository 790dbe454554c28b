//! Pending-settlement conservation invariant.
//!
//! ```text
//! total_pending == Σ(wallet.pending_amount)   and   ∀ wallet: pending_amount ≥ 0
//! ```
//!
//! Checked after every committed operation. A violation means the ledger
//! was mutated outside the forward / register / settle paths.

use relay_types::{RelayError, Result};
use rust_decimal::Decimal;

use crate::DistributionLedger;

/// Stateless checker over a [`DistributionLedger`].
pub struct PendingConservation;

impl PendingConservation {
    /// Verify the global total against a from-scratch recomputation.
    ///
    /// # Errors
    /// Returns [`RelayError::PendingInvariantViolation`] on any mismatch or
    /// negative pending amount.
    pub fn verify(ledger: &DistributionLedger) -> Result<()> {
        if let Some((wallet, d)) = ledger
            .iter()
            .find(|(_, d)| d.pending_amount < Decimal::ZERO)
        {
            return Err(RelayError::PendingInvariantViolation {
                reason: format!("wallet {wallet} has negative pending {}", d.pending_amount),
            });
        }

        let expected = ledger.sum_of_pending();
        let actual = ledger.total_pending();
        if actual != expected {
            return Err(RelayError::PendingInvariantViolation {
                reason: format!(
                    "global pending {actual} != sum of wallet pending {expected} \
                     across {} wallets",
                    ledger.len()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use relay_types::{Address, LedgerHeight};

    use super::*;

    #[test]
    fn empty_ledger_conserves() {
        assert!(PendingConservation::verify(&DistributionLedger::new()).is_ok());
    }

    #[test]
    fn forwards_and_registrations_conserve() {
        let mut ledger = DistributionLedger::new();
        let x = Address::random();
        let y = Address::random();
        ledger.record_forward(x, Decimal::new(100, 0), LedgerHeight(1)).unwrap();
        ledger.add_pending(y, Decimal::new(50, 0)).unwrap();
        ledger.record_forward_settled(y, Decimal::new(7, 0), LedgerHeight(2)).unwrap();
        assert!(PendingConservation::verify(&ledger).is_ok());
    }

    #[test]
    fn payment_without_release_is_detected() {
        let mut ledger = DistributionLedger::new();
        let x = Address::random();
        ledger.record_forward(x, Decimal::new(100, 0), LedgerHeight(1)).unwrap();
        ledger
            .apply_payment(x, Decimal::new(30, 0), LedgerHeight(2))
            .unwrap();

        let err = PendingConservation::verify(&ledger).unwrap_err();
        assert!(matches!(err, RelayError::PendingInvariantViolation { .. }));

        ledger.release_pending(Decimal::new(30, 0)).unwrap();
        assert!(PendingConservation::verify(&ledger).is_ok());
    }
}
