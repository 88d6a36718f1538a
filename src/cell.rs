use std::sync::{Arc, RwLock};

use crate::error::ObservedError;

/// The pair delivered to subscribers: the current value alongside the current
/// error slot. Both may be populated at once - an observable can hold a stale
/// value next to a fresh failure.
#[derive(Clone)]
pub struct Snapshot<T> {
    pub value: T,
    pub error: Option<ObservedError>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot").field("value", &self.value).field("error", &self.error).finish()
    }
}

/// Shared storage for an observable's pair. One lock guards both fields so a
/// value store and its error clear happen in the same critical section.
pub(crate) struct PairCell<T>(Arc<RwLock<Snapshot<T>>>);

impl<T> Clone for PairCell<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> PairCell<T> {
    pub fn new(value: T) -> Self { Self(Arc::new(RwLock::new(Snapshot { value, error: None }))) }

    pub fn with<R>(&self, f: impl FnOnce(&Snapshot<T>) -> R) -> R {
        let guard = self.0.read().unwrap();
        f(&*guard)
    }

    /// Stores `value` and clears the error slot.
    pub fn set_value(&self, value: T) {
        let mut current = self.0.write().unwrap();
        current.value = value;
        current.error = None;
    }

    pub fn set_error(&self, error: Option<ObservedError>) {
        let mut current = self.0.write().unwrap();
        current.error = error;
    }
}

impl<T: Clone> PairCell<T> {
    pub fn snapshot(&self) -> Snapshot<T> { self.0.read().unwrap().clone() }
}
