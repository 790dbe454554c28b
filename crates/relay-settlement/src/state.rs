//! Mutable relay state and the small operations that don't warrant their
//! own module.
//!
//! [`RelayState`] is cloned at the start of every operation. The operation
//! runs against the clone, and the relay swaps it in only if the operation
//! succeeds and both conservation invariants hold. A failure anywhere drops
//! the clone, which undoes ledger, log, funds, transfer backend and staged
//! notifications together.

use relay_ledger::{DistributionLedger, PendingConservation, TransactionLog};
use relay_types::{
    Address, CallContext, Distribution, ExternalRef, RelayError, RelayEvent, Result, checked_add,
};
use rust_decimal::Decimal;

use crate::funds_conservation::FundsConservation;
use crate::pause::PauseSwitch;
use crate::transfer::ValueTransfer;

#[derive(Debug, Clone)]
pub(crate) struct RelayState<T> {
    pub(crate) ledger: DistributionLedger,
    pub(crate) log: TransactionLog,
    /// Value currently held by the relay.
    pub(crate) funds: Decimal,
    pub(crate) conservation: FundsConservation,
    pub(crate) pause: PauseSwitch,
    pub(crate) backend: T,
    /// Events staged by the running operation.
    pub(crate) outbox: Vec<RelayEvent>,
}

impl<T: ValueTransfer> RelayState<T> {
    pub(crate) fn new(backend: T, paused: bool) -> Self {
        Self {
            ledger: DistributionLedger::new(),
            log: TransactionLog::new(),
            funds: Decimal::ZERO,
            conservation: FundsConservation::new(),
            pause: PauseSwitch::new(paused),
            backend,
            outbox: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, event: RelayEvent) {
        self.outbox.push(event);
    }

    /// Value arriving at the relay.
    pub(crate) fn credit(&mut self, amount: Decimal) -> Result<()> {
        let funds = checked_add(self.funds, amount)?;
        self.conservation.record_inflow(amount)?;
        self.funds = funds;
        Ok(())
    }

    /// Value leaving the relay through the transfer backend.
    pub(crate) fn pay_out(&mut self, to: Address, amount: Decimal) -> Result<()> {
        if amount > self.funds {
            return Err(RelayError::InsufficientContractBalance {
                needed: amount,
                available: self.funds,
            });
        }
        self.backend.transfer(to, amount)?;
        self.conservation.record_outflow(amount)?;
        self.funds -= amount;
        Ok(())
    }

    /// Both conservation invariants.
    pub(crate) fn verify(&self) -> Result<()> {
        PendingConservation::verify(&self.ledger)?;
        self.conservation.verify(self.funds)
    }

    /// Value that arrived without going through a forward.
    pub(crate) fn receive(&mut self, ctx: &CallContext, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        self.credit(amount)?;
        self.emit(RelayEvent::RawValueReceived {
            sender: ctx.caller,
            amount,
        });
        Ok(())
    }

    pub(crate) fn tag_reference(&mut self, position: usize, reference: ExternalRef) -> Result<()> {
        let record = self.log.tag(position, reference)?;
        let event = RelayEvent::ReferenceTagged {
            reference,
            sender: record.sender,
            receiver: record.receiver,
            amount: record.amount,
        };
        self.emit(event);
        Ok(())
    }

    pub(crate) fn register_pending(
        &mut self,
        wallet: Address,
        amount: Decimal,
    ) -> Result<Distribution> {
        ensure_receiver(wallet)?;
        ensure_non_negative(amount)?;
        let distribution = self.ledger.add_pending(wallet, amount)?.clone();
        self.emit(RelayEvent::DistributionUpdated {
            wallet,
            total_received: distribution.total_received,
            pending_amount: distribution.pending_amount,
        });
        Ok(distribution)
    }

    /// Raw withdrawal to `to`. Does not touch the ledger or the log.
    pub(crate) fn emergency_recover(&mut self, to: Address, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO || amount > self.funds {
            return Err(RelayError::InsufficientAmount {
                requested: amount,
                limit: self.funds,
            });
        }
        self.pay_out(to, amount)?;
        self.emit(RelayEvent::EmergencyRecovered { to, amount });
        Ok(())
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        if self.pause.set(paused) {
            self.emit(RelayEvent::PauseChanged { paused });
        }
    }
}

// ---------------------------------------------------------------------------
// Input checks
// ---------------------------------------------------------------------------

pub(crate) fn ensure_receiver(receiver: Address) -> Result<()> {
    if receiver.is_zero() {
        return Err(RelayError::InvalidReceiver);
    }
    Ok(())
}

pub(crate) fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(RelayError::InsufficientAmount {
            requested: amount,
            limit: Decimal::ZERO,
        });
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(RelayError::InsufficientAmount {
            requested: amount,
            limit: Decimal::ZERO,
        });
    }
    Ok(())
}
