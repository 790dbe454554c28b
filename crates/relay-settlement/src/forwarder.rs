//! Transfer forwarder.
//!
//! A forward takes value supplied by the caller, hands all of it to the
//! receiver, then logs the transfer and updates the receiver's distribution:
//! 1. Validate receiver (not null) and amount (> 0)
//! 2. Refuse while paused
//! 3. Credit the supplied value, transfer it out (abort on failure)
//! 4. Append the log record (settled only on the settle-immediately path)
//! 5. Book the distribution: pending on the tracked path, paid otherwise

use relay_types::{Address, CallContext, Distribution, RelayEvent, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::state::{RelayState, ensure_positive, ensure_receiver};
use crate::transfer::ValueTransfer;

/// Which bookkeeping path a forward takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForwardMode {
    /// Amount becomes pending settlement; record starts unsettled.
    Tracked,
    /// Amount counts as paid at once; record starts settled.
    SettleImmediately,
}

/// What a committed forward produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardReceipt {
    /// Position of the new log record.
    pub position: usize,
    /// Receiver's distribution after the forward.
    pub distribution: Distribution,
}

impl<T: ValueTransfer> RelayState<T> {
    pub(crate) fn forward(
        &mut self,
        ctx: &CallContext,
        receiver: Address,
        amount: Decimal,
        mode: ForwardMode,
    ) -> Result<ForwardReceipt> {
        ensure_receiver(receiver)?;
        ensure_positive(amount)?;
        self.pause.check_running()?;

        self.credit(amount)?;
        self.pay_out(receiver, amount)?;

        let position = self.log.append(
            ctx.caller,
            receiver,
            amount,
            ctx.height,
            ctx.timestamp,
            mode == ForwardMode::SettleImmediately,
        );
        let distribution = match mode {
            ForwardMode::Tracked => self.ledger.record_forward(receiver, amount, ctx.height)?,
            ForwardMode::SettleImmediately => {
                self.ledger
                    .record_forward_settled(receiver, amount, ctx.height)?
            }
        }
        .clone();

        self.emit(RelayEvent::TransferCompleted {
            sender: ctx.caller,
            receiver,
            amount,
            height: ctx.height,
            timestamp: ctx.timestamp,
        });

        tracing::debug!(
            sender = %ctx.caller,
            receiver = %receiver,
            amount = %amount,
            position,
            ?mode,
            "Value forwarded"
        );

        Ok(ForwardReceipt {
            position,
            distribution,
        })
    }
}
