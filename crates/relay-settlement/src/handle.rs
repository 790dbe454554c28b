//! Shared, lock-guarded access to a [`Relay`].
//!
//! The mutex is the global execution lock: one operation runs at a time to
//! completion. The handle also remembers which thread holds the lock, so a
//! call that comes back in on that same thread (a recipient calling into the
//! relay from inside a transfer) fails fast with `ReentrantCall` instead of
//! deadlocking. Calls from other threads simply wait their turn.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use relay_types::{RelayError, Result};

use crate::relay::Relay;
use crate::transfer::{AccountBook, ValueTransfer};

/// Cloneable handle to a relay behind the global lock.
pub struct RelayHandle<T = AccountBook> {
    inner: Arc<Mutex<Relay<T>>>,
    owner: Arc<Mutex<Option<ThreadId>>>,
}

impl<T> Clone for RelayHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            owner: Arc::clone(&self.owner),
        }
    }
}

/// Lock held for the duration of one call. Clears the owner on drop.
struct Entered<'a, T> {
    relay: MutexGuard<'a, Relay<T>>,
    owner: &'a Mutex<Option<ThreadId>>,
}

impl<T> Drop for Entered<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut owner) = self.owner.lock() {
            *owner = None;
        }
    }
}

fn poisoned<G>(_: PoisonError<G>) -> RelayError {
    RelayError::Internal("relay lock poisoned".into())
}

impl<T: ValueTransfer> RelayHandle<T> {
    #[must_use]
    pub fn new(relay: Relay<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(relay)),
            owner: Arc::new(Mutex::new(None)),
        }
    }

    fn enter(&self) -> Result<Entered<'_, T>> {
        let me = thread::current().id();
        if *self.owner.lock().map_err(poisoned)? == Some(me) {
            tracing::warn!("Re-entrant relay call rejected");
            return Err(RelayError::ReentrantCall);
        }
        let relay = self.inner.lock().map_err(poisoned)?;
        *self.owner.lock().map_err(poisoned)? = Some(me);
        Ok(Entered {
            relay,
            owner: &self.owner,
        })
    }

    /// Run a mutating call under the global lock.
    ///
    /// # Errors
    /// `ReentrantCall` if this thread is already inside a call, otherwise
    /// whatever `f` returns.
    pub fn execute<R>(&self, f: impl FnOnce(&mut Relay<T>) -> Result<R>) -> Result<R> {
        let mut entered = self.enter()?;
        f(&mut *entered.relay)
    }

    /// Run a read-only call under the global lock.
    pub fn query<R>(&self, f: impl FnOnce(&Relay<T>) -> R) -> Result<R> {
        let entered = self.enter()?;
        Ok(f(&*entered.relay))
    }
}
