use std::sync::Arc;

use tracing::debug;

use crate::cell::{PairCell, Snapshot};
use crate::error::{ObservedError, SubscribeError};
use crate::subscriber::{IntoSubscriber, ListenerGuard, SubscriberSet};

/// A single-value cell with an error slot and an ordered set of subscribers.
///
/// Mutations go through [`set`](Observable::set), [`fail`](Observable::fail),
/// and [`clear_error`](Observable::clear_error); each has a `_silent` variant
/// that updates state without a notification pass. Subscribers receive the
/// current [`Snapshot`] synchronously, in subscription order.
///
/// Clones share the same storage and subscriber registry.
///
/// # Example
/// ```
/// use statecell::{Observable, Snapshot};
///
/// let progress = Observable::new(0u8);
/// let sub = progress.subscribe(|pair: Snapshot<u8>| {
///     println!("{}%", pair.value);
/// }).unwrap();
///
/// progress.set(50); // prints "50%"
/// drop(sub);
/// progress.set(100); // no longer printed
/// ```
pub struct Observable<T> {
    state: PairCell<T>,
    subscribers: SubscriberSet<T>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self { Self { state: self.state.clone(), subscribers: self.subscribers.clone() } }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self { Self::new(T::default()) }
}

impl<T> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable").field("subscribers", &self.subscribers.len()).finish()
    }
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self { Self { state: PairCell::new(initial), subscribers: SubscriberSet::new() } }

    /// Calls `f` with a borrow of the current pair.
    pub fn with<R>(&self, f: impl FnOnce(&Snapshot<T>) -> R) -> R { self.state.with(f) }

    /// The current error slot, if a failure has been recorded since the last
    /// value store.
    pub fn error(&self) -> Option<ObservedError> { self.state.with(|pair| pair.error.clone()) }

    /// Registers `subscriber` for future notifications and returns the guard
    /// that releases the registration.
    ///
    /// Fails with [`SubscribeError::AlreadySubscribed`] if the same callback
    /// handle is already registered; the existing registration stays active.
    pub fn subscribe<S>(&self, subscriber: S) -> Result<SubscriptionGuard, SubscribeError>
    where
        S: IntoSubscriber<T>,
        T: 'static,
    {
        let guard = self.subscribers.subscribe(subscriber.into_subscriber())?;
        Ok(SubscriptionGuard::new(guard))
    }
}

impl<T: Clone> Observable<T> {
    /// Returns a clone of the current value.
    pub fn value(&self) -> T { self.state.with(|pair| pair.value.clone()) }

    /// Returns the current pair.
    pub fn snapshot(&self) -> Snapshot<T> { self.state.snapshot() }

    /// Stores `value`, clears the error slot, and notifies subscribers.
    pub fn set(&self, value: T) {
        self.state.set_value(value);
        self.notify();
    }

    /// Stores `value` and clears the error slot without notifying.
    pub fn set_silent(&self, value: T) { self.state.set_value(value); }

    /// Records `error` without touching the value, then notifies.
    pub fn fail<E>(&self, error: E)
    where E: std::error::Error + Send + Sync + 'static {
        self.fail_silent(error);
        self.notify();
    }

    /// Records `error` without notifying.
    pub fn fail_silent<E>(&self, error: E)
    where E: std::error::Error + Send + Sync + 'static {
        debug!(%error, "failure recorded");
        self.state.set_error(Some(Arc::new(error)));
    }

    /// Clears the error slot and notifies.
    pub fn clear_error(&self) {
        self.state.set_error(None);
        self.notify();
    }

    /// Clears the error slot without notifying.
    pub fn clear_error_silent(&self) { self.state.set_error(None); }

    /// Invokes every subscriber in subscription order with the current pair.
    ///
    /// The pass iterates over the registrations present when it started:
    /// subscribers added from inside a callback are first invoked on the next
    /// pass, while ones removed mid-pass still receive this one. Each
    /// delivery reads the pair fresh, so a mid-pass `set` is visible to the
    /// remaining subscribers.
    pub fn notify(&self) { self.subscribers.notify_with(|| self.state.snapshot()); }
}

/// Cleanup handle returned by [`Observable::subscribe`]. The registration is
/// released when the guard drops.
pub struct SubscriptionGuard {
    _listener: Box<dyn std::any::Any + Send + Sync>,
}

impl std::fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionGuard").finish_non_exhaustive()
    }
}

impl SubscriptionGuard {
    pub(crate) fn new<T: 'static>(guard: ListenerGuard<T>) -> Self { Self { _listener: Box::new(guard) } }

    /// Releases the subscription now. Dropping the guard does the same; this
    /// just makes the release visible at the call site.
    pub fn unsubscribe(self) {}
}
