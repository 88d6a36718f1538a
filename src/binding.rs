use std::sync::{Arc, RwLock};

use crate::cell::Snapshot;
use crate::error::ObservedError;
use crate::observable::{Observable, SubscriptionGuard};

/// A scoped observation of an [`Observable`]: seeds local state from the
/// current pair, replaces it on every notification, and releases the
/// subscription when dropped.
///
/// This is the contract a host binding layer implements - acquire when an
/// observation scope opens, release when it ends - without assuming anything
/// about what the host is.
pub struct Binding<T> {
    current: Arc<RwLock<Snapshot<T>>>,
    _subscription: Option<SubscriptionGuard>,
}

impl<T: Clone + Send + Sync + 'static> Binding<T> {
    pub fn new(observable: &Observable<T>) -> Self {
        let current = Arc::new(RwLock::new(observable.snapshot()));
        let cell = current.clone();
        let subscription = observable
            .subscribe(move |pair: Snapshot<T>| {
                *cell.write().expect("binding state lock poisoned") = pair;
            })
            .expect("fresh callback is never already subscribed");
        Self { current, _subscription: Some(subscription) }
    }

    /// Observes `observable` when present; otherwise holds `fallback` with no
    /// subscription.
    pub fn or(observable: Option<&Observable<T>>, fallback: T) -> Self {
        match observable {
            Some(observable) => Self::new(observable),
            None => Self {
                current: Arc::new(RwLock::new(Snapshot { value: fallback, error: None })),
                _subscription: None,
            },
        }
    }

    /// The most recently observed pair.
    pub fn get(&self) -> Snapshot<T> { self.current.read().expect("binding state lock poisoned").clone() }

    pub fn value(&self) -> T { self.get().value }

    pub fn error(&self) -> Option<ObservedError> {
        self.current.read().expect("binding state lock poisoned").error.clone()
    }
}
