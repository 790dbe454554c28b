//! The relay: public entry points, atomic commit, and queries.
//!
//! Every mutating entry point funnels through [`Relay::execute`], which
//! stages the operation on a clone of the state, checks both conservation
//! invariants, and only then commits state and notifications together.

use relay_types::{
    Address, CallContext, Distribution, ExternalRef, LedgerHeight, Notification, OperationId,
    RelayConfig, Result, TransactionRecord, constants,
};
use rust_decimal::Decimal;

use crate::capability::AdminCapability;
use crate::forwarder::{ForwardMode, ForwardReceipt};
use crate::settlement::SettlementReport;
use crate::state::RelayState;
use crate::stream::NotificationStream;
use crate::transfer::{AccountBook, ValueTransfer};

/// A value-relay ledger instance.
#[derive(Debug)]
pub struct Relay<T = AccountBook> {
    config: RelayConfig,
    state: RelayState<T>,
    stream: NotificationStream,
    /// Height of the most recent committed operation.
    height: LedgerHeight,
}

impl<T: ValueTransfer> Relay<T> {
    /// Create a relay that moves value through `backend`.
    pub fn new(config: RelayConfig, backend: T) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            admin = %config.admin,
            max_batch_size = config.max_batch_size,
            paused = config.start_paused,
            "Relay created"
        );
        Ok(Self {
            state: RelayState::new(backend, config.start_paused),
            config,
            stream: NotificationStream::new(),
            height: LedgerHeight::GENESIS,
        })
    }

    /// Mint the administrative capability for `caller`.
    ///
    /// # Errors
    /// Returns `AccessDenied` unless `caller` is the configured admin.
    pub fn admin_capability(&self, caller: Address) -> Result<AdminCapability> {
        AdminCapability::grant(caller, self.config.admin)
    }

    /// Run `op` against a staged copy of the state; commit on success.
    fn execute<R>(
        &mut self,
        name: &'static str,
        ctx: &CallContext,
        op: impl FnOnce(&mut RelayState<T>) -> Result<R>,
    ) -> Result<R> {
        let mut staged = self.state.clone();
        let result = op(&mut staged).and_then(|value| {
            staged.verify()?;
            Ok(value)
        });

        let value = match result {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    op = name,
                    caller = %ctx.caller,
                    height = ctx.height.0,
                    error = %err,
                    "Operation rejected"
                );
                return Err(err);
            }
        };

        let operation_id = OperationId::new();
        let events = std::mem::take(&mut staged.outbox);
        let notifications = events.len();
        self.stream.publish(operation_id, events)?;
        self.state = staged;
        self.height = self.height.max(ctx.height);

        tracing::info!(
            op = name,
            operation_id = %operation_id,
            caller = %ctx.caller,
            height = ctx.height.0,
            notifications,
            "Operation committed"
        );
        Ok(value)
    }

    // -----------------------------------------------------------------
    // Open entry points
    // -----------------------------------------------------------------

    /// Tracked forward: the caller supplies `amount`, all of it goes to
    /// `receiver`, and it becomes pending settlement.
    pub fn forward(
        &mut self,
        ctx: &CallContext,
        receiver: Address,
        amount: Decimal,
    ) -> Result<ForwardReceipt> {
        self.execute("forward", ctx, |s| {
            s.forward(ctx, receiver, amount, ForwardMode::Tracked)
        })
    }

    /// Forward that counts as paid at once; the log record starts settled.
    pub fn forward_and_settle(
        &mut self,
        ctx: &CallContext,
        receiver: Address,
        amount: Decimal,
    ) -> Result<ForwardReceipt> {
        self.execute("forward_and_settle", ctx, |s| {
            s.forward(ctx, receiver, amount, ForwardMode::SettleImmediately)
        })
    }

    /// Value sent to the relay outside the forwarding paths.
    pub fn receive(&mut self, ctx: &CallContext, amount: Decimal) -> Result<()> {
        self.execute("receive", ctx, |s| s.receive(ctx, amount))
    }

    // -----------------------------------------------------------------
    // Admin entry points
    // -----------------------------------------------------------------

    /// Attach `reference` to the record at `position`, once.
    pub fn tag_reference(
        &mut self,
        cap: &AdminCapability,
        ctx: &CallContext,
        position: usize,
        reference: ExternalRef,
    ) -> Result<()> {
        cap.check(self.config.admin)?;
        self.execute("tag_reference", ctx, |s| s.tag_reference(position, reference))
    }

    /// Register an obligation for `wallet` that no forward backs.
    pub fn register_pending(
        &mut self,
        cap: &AdminCapability,
        ctx: &CallContext,
        wallet: Address,
        amount: Decimal,
    ) -> Result<Distribution> {
        cap.check(self.config.admin)?;
        self.execute("register_pending", ctx, |s| s.register_pending(wallet, amount))
    }

    /// Pay out a batch and reconcile it against the log.
    pub fn settle_batch(
        &mut self,
        cap: &AdminCapability,
        ctx: &CallContext,
        wallets: &[Address],
        amounts: &[Decimal],
    ) -> Result<SettlementReport> {
        cap.check(self.config.admin)?;
        let max = self.config.max_batch_size;
        self.execute("settle_batch", ctx, |s| {
            s.settle_batch(ctx, wallets, amounts, max)
        })
    }

    /// Withdraw `amount` to the capability holder, bypassing the ledger.
    pub fn emergency_recover(
        &mut self,
        cap: &AdminCapability,
        ctx: &CallContext,
        amount: Decimal,
    ) -> Result<()> {
        cap.check(self.config.admin)?;
        let to = cap.holder();
        self.execute("emergency_recover", ctx, |s| s.emergency_recover(to, amount))
    }

    pub fn pause(&mut self, cap: &AdminCapability, ctx: &CallContext) -> Result<()> {
        cap.check(self.config.admin)?;
        self.execute("pause", ctx, |s| {
            s.set_paused(true);
            Ok(())
        })
    }

    pub fn resume(&mut self, cap: &AdminCapability, ctx: &CallContext) -> Result<()> {
        cap.check(self.config.admin)?;
        self.execute("resume", ctx, |s| {
            s.set_paused(false);
            Ok(())
        })
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Value currently held by the relay.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.state.funds
    }

    /// Distribution for `wallet` (empty if nothing was ever attributed).
    #[must_use]
    pub fn distribution(&self, wallet: &Address) -> Distribution {
        self.state.ledger.distribution(wallet)
    }

    pub fn distributions(&self) -> impl Iterator<Item = (&Address, &Distribution)> {
        self.state.ledger.iter()
    }

    /// Record at `position`.
    ///
    /// # Errors
    /// Returns `RecordOutOfRange` for a bad position.
    pub fn record(&self, position: usize) -> Result<&TransactionRecord> {
        self.state.log.get(position)
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.state.log.len()
    }

    /// Reverse lookup by external reference.
    #[must_use]
    pub fn record_by_reference(
        &self,
        reference: &ExternalRef,
    ) -> Option<(usize, &TransactionRecord)> {
        let position = self.state.log.position_of(reference)?;
        self.state.log.get(position).ok().map(|r| (position, r))
    }

    /// `wallet`'s records with their positions, oldest first.
    #[must_use]
    pub fn records_for(&self, wallet: &Address) -> Vec<(usize, TransactionRecord)> {
        self.state
            .log
            .records_for(wallet)
            .map(|(p, r)| (p, r.clone()))
            .collect()
    }

    /// `wallet`'s records still awaiting settlement, oldest first.
    #[must_use]
    pub fn unsettled_records(&self, wallet: &Address) -> Vec<(usize, TransactionRecord)> {
        self.state
            .log
            .unsettled_for(wallet)
            .map(|(p, r)| (p, r.clone()))
            .collect()
    }

    #[must_use]
    pub fn pending_of(&self, wallet: &Address) -> Decimal {
        self.state.ledger.pending_of(wallet)
    }

    #[must_use]
    pub fn total_pending_settlements(&self) -> Decimal {
        self.state.ledger.total_pending()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.pause.is_paused()
    }

    #[must_use]
    pub fn height(&self) -> LedgerHeight {
        self.height
    }

    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Committed notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.stream.entries()
    }

    /// Hex digest over the committed notification stream.
    #[must_use]
    pub fn stream_digest(&self) -> String {
        self.stream.digest()
    }

    /// The committed transfer backend.
    #[must_use]
    pub fn backend(&self) -> &T {
        &self.state.backend
    }

    /// Mutable access to the committed backend, for host-side setup.
    pub fn backend_mut(&mut self) -> &mut T {
        &mut self.state.backend
    }

    /// Re-check both conservation invariants on committed state.
    pub fn verify_invariants(&self) -> Result<()> {
        self.state.verify()
    }
}
