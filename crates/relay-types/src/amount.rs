//! Overflow-checked arithmetic for running totals.
//!
//! Callers may supply any positive amount, so every accumulator in the
//! ledger goes through [`checked_add`] instead of `+=`.

use rust_decimal::Decimal;

use crate::{RelayError, Result};

/// `current + adding`, or `AmountOverflow` if the sum exceeds `Decimal::MAX`.
pub fn checked_add(current: Decimal, adding: Decimal) -> Result<Decimal> {
    current
        .checked_add(adding)
        .ok_or(RelayError::AmountOverflow { current, adding })
}

/// Sum of `amounts`, failing on the first overflow.
pub fn checked_sum<'a>(amounts: impl IntoIterator<Item = &'a Decimal>) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, &a| checked_add(acc, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_within_range() {
        let sum = checked_add(Decimal::new(2, 0), Decimal::new(3, 0)).unwrap();
        assert_eq!(sum, Decimal::new(5, 0));
    }

    #[test]
    fn overflow_is_an_error() {
        let err = checked_add(Decimal::MAX, Decimal::MAX).unwrap_err();
        assert!(matches!(err, RelayError::AmountOverflow { .. }));
    }

    #[test]
    fn sum_stops_at_overflow() {
        let amounts = [Decimal::ONE, Decimal::MAX, Decimal::ONE];
        assert!(checked_sum(&amounts).is_err());
        assert_eq!(checked_sum(&amounts[..1]).unwrap(), Decimal::ONE);
    }
}
