//! Funds conservation invariant.
//!
//! ```text
//! available_funds == Σ(inflows) - Σ(outflows)
//! ```
//!
//! Inflows are value supplied with forwards plus raw receipts; outflows are
//! every transfer out (forwards, settlement payouts, emergency recovery).
//! The counters are kept apart from the balance field so a bookkeeping slip
//! on either side shows up as a mismatch.

use relay_types::{RelayError, Result, checked_add};
use rust_decimal::Decimal;

/// Running inflow / outflow totals for the relay's own funds.
#[derive(Debug, Clone, Default)]
pub struct FundsConservation {
    inflows: Decimal,
    outflows: Decimal,
}

impl FundsConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns `AmountOverflow` if lifetime inflows would overflow.
    pub fn record_inflow(&mut self, amount: Decimal) -> Result<()> {
        self.inflows = checked_add(self.inflows, amount)?;
        Ok(())
    }

    /// # Errors
    /// Returns `AmountOverflow` if lifetime outflows would overflow.
    pub fn record_outflow(&mut self, amount: Decimal) -> Result<()> {
        self.outflows = checked_add(self.outflows, amount)?;
        Ok(())
    }

    /// Funds the relay should hold: inflows - outflows.
    #[must_use]
    pub fn expected_funds(&self) -> Decimal {
        self.inflows - self.outflows
    }

    #[must_use]
    pub fn total_inflows(&self) -> Decimal {
        self.inflows
    }

    #[must_use]
    pub fn total_outflows(&self) -> Decimal {
        self.outflows
    }

    /// Verify the relay's balance against the counters.
    ///
    /// # Errors
    /// Returns [`RelayError::FundsInvariantViolation`] if they disagree or
    /// the balance is negative.
    pub fn verify(&self, available: Decimal) -> Result<()> {
        let expected = self.expected_funds();
        if available != expected || available < Decimal::ZERO {
            return Err(RelayError::FundsInvariantViolation {
                reason: format!(
                    "available {available} != expected {expected} \
                     (inflows={}, outflows={})",
                    self.inflows, self.outflows
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        let fc = FundsConservation::new();
        assert_eq!(fc.expected_funds(), Decimal::ZERO);
        assert!(fc.verify(Decimal::ZERO).is_ok());
    }

    #[test]
    fn inflows_minus_outflows() {
        let mut fc = FundsConservation::new();
        fc.record_inflow(Decimal::new(1000, 0)).unwrap();
        fc.record_outflow(Decimal::new(300, 0)).unwrap();
        assert_eq!(fc.expected_funds(), Decimal::new(700, 0));
        assert_eq!(fc.total_inflows(), Decimal::new(1000, 0));
        assert_eq!(fc.total_outflows(), Decimal::new(300, 0));
        assert!(fc.verify(Decimal::new(700, 0)).is_ok());
    }

    #[test]
    fn mismatch_detected() {
        let mut fc = FundsConservation::new();
        fc.record_inflow(Decimal::new(10, 0)).unwrap();
        let err = fc.verify(Decimal::new(11, 0)).unwrap_err();
        assert!(matches!(err, RelayError::FundsInvariantViolation { .. }));
    }

    #[test]
    fn forward_passthrough_nets_to_zero() {
        // A forward brings value in and sends it straight back out.
        let mut fc = FundsConservation::new();
        fc.record_inflow(Decimal::new(100, 0)).unwrap();
        fc.record_outflow(Decimal::new(100, 0)).unwrap();
        assert!(fc.verify(Decimal::ZERO).is_ok());
    }

    #[test]
    fn inflow_overflow_is_rejected() {
        let mut fc = FundsConservation::new();
        fc.record_inflow(Decimal::MAX).unwrap();
        let err = fc.record_inflow(Decimal::ONE).unwrap_err();
        assert!(matches!(err, RelayError::AmountOverflow { .. }));
        assert_eq!(fc.total_inflows(), Decimal::MAX);
    }
}
