//! Append-only transaction log with once-only external reference tagging.
//!
//! Records are addressed by position. Positions never change and records are
//! never removed. Besides the ordered `Vec`, the log keeps two indexes:
//! - receiver → positions (ascending), so settlement can walk one wallet's
//!   history newest-first without touching anyone else's records
//! - external reference → position, the reverse lookup for tagging

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use relay_types::{Address, ExternalRef, LedgerHeight, RelayError, Result, TransactionRecord};
use rust_decimal::Decimal;

/// Ordered log of every forwarding operation.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
    /// Positions per receiver, in append order.
    by_receiver: HashMap<Address, Vec<usize>>,
    /// Reverse index: external reference → position.
    by_reference: HashMap<ExternalRef, usize>,
}

impl TransactionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its position.
    ///
    /// `settled` is true only for the forward-and-settle path.
    pub fn append(
        &mut self,
        sender: Address,
        receiver: Address,
        amount: Decimal,
        height: LedgerHeight,
        timestamp: DateTime<Utc>,
        settled: bool,
    ) -> usize {
        let position = self.records.len();
        self.records.push(TransactionRecord {
            external_ref: None,
            sender,
            receiver,
            amount,
            height,
            timestamp,
            settled,
        });
        self.by_receiver.entry(receiver).or_default().push(position);
        position
    }

    /// Record at `position`.
    ///
    /// # Errors
    /// Returns `RecordOutOfRange` if `position` is not a valid index.
    pub fn get(&self, position: usize) -> Result<&TransactionRecord> {
        self.records
            .get(position)
            .ok_or(RelayError::RecordOutOfRange {
                position,
                len: self.records.len(),
            })
    }

    /// Attach `reference` to the record at `position`. Exactly once per
    /// record, and a reference can only ever point at one record.
    ///
    /// # Errors
    /// - `RecordOutOfRange` for a bad position
    /// - `ReferenceAlreadySet` if the record is already tagged
    /// - `ReferenceAlreadyIndexed` if `reference` tags another record
    pub fn tag(&mut self, position: usize, reference: ExternalRef) -> Result<&TransactionRecord> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(position)
            .ok_or(RelayError::RecordOutOfRange { position, len })?;

        if let Some(existing) = record.external_ref {
            return Err(RelayError::ReferenceAlreadySet { position, existing });
        }
        if let Some(&other) = self.by_reference.get(&reference) {
            return Err(RelayError::ReferenceAlreadyIndexed {
                reference,
                position: other,
            });
        }

        record.external_ref = Some(reference);
        self.by_reference.insert(reference, position);
        tracing::debug!(position, reference = %reference, "Record tagged");
        Ok(record)
    }

    /// Flip a record to settled. Only the settlement matcher calls this.
    ///
    /// # Errors
    /// - `RecordOutOfRange` for a bad position
    /// - `Internal` if the record was already settled
    pub fn mark_settled(&mut self, position: usize) -> Result<()> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(position)
            .ok_or(RelayError::RecordOutOfRange { position, len })?;
        if record.settled {
            return Err(RelayError::Internal(format!(
                "record {position} settled twice"
            )));
        }
        record.settled = true;
        Ok(())
    }

    /// Position tagged with `reference`, if any.
    #[must_use]
    pub fn position_of(&self, reference: &ExternalRef) -> Option<usize> {
        self.by_reference.get(reference).copied()
    }

    /// Positions of `wallet`'s records, oldest first.
    #[must_use]
    pub fn positions_for(&self, wallet: &Address) -> &[usize] {
        self.by_receiver.get(wallet).map_or(&[], Vec::as_slice)
    }

    /// `wallet`'s records with their positions, oldest first.
    pub fn records_for<'a>(
        &'a self,
        wallet: &'a Address,
    ) -> impl Iterator<Item = (usize, &'a TransactionRecord)> + 'a {
        self.positions_for(wallet)
            .iter()
            .map(move |&p| (p, &self.records[p]))
    }

    /// `wallet`'s records that still await settlement, oldest first.
    pub fn unsettled_for<'a>(
        &'a self,
        wallet: &'a Address,
    ) -> impl Iterator<Item = (usize, &'a TransactionRecord)> + 'a {
        self.records_for(wallet)
            .filter(move |(_, r)| r.is_unsettled_for(wallet))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
