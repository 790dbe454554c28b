//! Committed notification stream.
//!
//! Operations stage their events; the relay publishes them here only after
//! the operation commits, so the stream has exactly the ordering and
//! atomicity of the state it describes. Each notification extends a running
//! SHA-256 chain, so two streams holding the same notifications in the same
//! order agree on [`NotificationStream::digest`].

use relay_types::{Notification, OperationId, RelayEvent, Result, constants};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct NotificationStream {
    entries: Vec<Notification>,
    digest: [u8; 32],
}

impl NotificationStream {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            digest: [0u8; 32],
        }
    }

    /// Append the events of one committed operation.
    ///
    /// The digest chain is computed in full before anything is appended, so
    /// an encoding failure leaves the stream untouched.
    pub fn publish(&mut self, operation_id: OperationId, events: Vec<RelayEvent>) -> Result<()> {
        let base = self.entries.len() as u64;
        let staged: Vec<Notification> = events
            .into_iter()
            .enumerate()
            .map(|(i, event)| Notification {
                sequence: base + i as u64,
                operation_id,
                event,
            })
            .collect();

        let mut digest = self.digest;
        for notification in &staged {
            digest = Self::chain(&digest, notification)?;
        }

        self.entries.extend(staged);
        self.digest = digest;
        Ok(())
    }

    fn chain(prev: &[u8; 32], notification: &Notification) -> Result<[u8; 32]> {
        let encoded = serde_json::to_vec(notification)?;
        let mut hasher = Sha256::new();
        hasher.update(constants::STREAM_DIGEST_DOMAIN);
        hasher.update(prev);
        hasher.update(&encoded);
        Ok(hasher.finalize().into())
    }

    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hex digest of the whole stream so far.
    #[must_use]
    pub fn digest(&self) -> String {
        hex::encode(self.digest)
    }
}

impl Default for NotificationStream {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use relay_types::Address;
    use rust_decimal::Decimal;

    use super::*;

    fn raw(n: i64) -> RelayEvent {
        RelayEvent::RawValueReceived {
            sender: Address::from_low_u64(1),
            amount: Decimal::new(n, 0),
        }
    }

    #[test]
    fn sequences_are_contiguous() {
        let mut stream = NotificationStream::new();
        stream.publish(OperationId::new(), vec![raw(1), raw(2)]).unwrap();
        stream.publish(OperationId::new(), vec![raw(3)]).unwrap();
        let seqs: Vec<u64> = stream.entries().iter().map(|n| n.sequence).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
    }

    #[test]
    fn digest_changes_with_each_publish() {
        let mut stream = NotificationStream::new();
        let empty = stream.digest();
        stream.publish(OperationId::new(), vec![raw(1)]).unwrap();
        assert_ne!(stream.digest(), empty);
    }

    #[test]
    fn same_history_same_digest() {
        let op = OperationId::new();
        let mut a = NotificationStream::new();
        let mut b = NotificationStream::new();
        a.publish(op, vec![raw(1), raw(2)]).unwrap();
        b.publish(op, vec![raw(1), raw(2)]).unwrap();
        assert_eq!(a.digest(), b.digest());

        let mut c = NotificationStream::new();
        c.publish(op, vec![raw(2), raw(1)]).unwrap();
        assert_ne!(a.digest(), c.digest());
    }
}
