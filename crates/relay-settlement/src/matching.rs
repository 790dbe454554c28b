//! Settlement matching: reconcile a payout against a wallet's unsettled
//! log records.
//!
//! ## Policy
//!
//! Walk the wallet's records **newest first**. A record that is unsettled
//! and whose amount fits in what is still unallocated gets marked settled
//! and its amount is subtracted. A record that does not fit is skipped
//! whole (never partially settled) and the walk continues with older
//! records. The walk stops once nothing is unallocated or the wallet's
//! history is exhausted.
//!
//! This is neither FIFO nor exact: an older, small record can stay
//! unsettled forever if newer records keep consuming the budget and no
//! combination of what is left ever matches the remainder exactly. The
//! behaviour is kept as-is; see DESIGN.md.

use relay_types::{Address, Result};
use relay_ledger::TransactionLog;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of matching one wallet's payout against its log records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub wallet: Address,
    /// Amount paid to the wallet in this step.
    pub budget: Decimal,
    /// Positions newly marked settled, in the order they were matched
    /// (newest first).
    pub settled: Vec<usize>,
    /// Sum of the newly settled records. Always `<= budget`.
    pub matched: Decimal,
    /// `budget - matched`: paid out but not reconciled to any record.
    pub unallocated: Decimal,
}

impl MatchOutcome {
    /// Whether the payout was reconciled to the last unit.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.unallocated.is_zero()
    }
}

/// Mark `wallet`'s records settled against `budget` using the newest-first,
/// skip-if-too-large policy.
///
/// # Errors
/// Only propagates log errors, which indicate a corrupted index.
pub fn match_unsettled(
    log: &mut TransactionLog,
    wallet: Address,
    budget: Decimal,
) -> Result<MatchOutcome> {
    // Snapshot candidates first: nothing but this loop flips `settled`, and
    // the loop never revisits a position.
    let candidates: Vec<(usize, Decimal)> = log
        .positions_for(&wallet)
        .iter()
        .rev()
        .filter_map(|&position| {
            log.get(position)
                .ok()
                .filter(|record| record.is_unsettled_for(&wallet))
                .map(|record| (position, record.amount))
        })
        .collect();

    let mut remaining = budget;
    let mut settled = Vec::new();

    for (position, amount) in candidates {
        if remaining <= Decimal::ZERO {
            break;
        }
        if amount > remaining {
            tracing::debug!(
                wallet = %wallet,
                position,
                amount = %amount,
                remaining = %remaining,
                "Record larger than remaining budget, skipped"
            );
            continue;
        }

        log.mark_settled(position)?;
        remaining -= amount;
        settled.push(position);

        tracing::debug!(
            wallet = %wallet,
            position,
            amount = %amount,
            remaining = %remaining,
            "Record settled"
        );
    }

    Ok(MatchOutcome {
        wallet,
        budget,
        settled,
        matched: budget - remaining,
        unallocated: remaining,
    })
}
