use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use tracing::trace;

use crate::cell::Snapshot;
use crate::error::SubscribeError;

/// A registered callback. The `Arc` pointer is the callback's identity:
/// subscribing the same handle twice without releasing it first is rejected.
pub type SubscribeFn<T> = Arc<dyn Fn(Snapshot<T>) + Send + Sync + 'static>;

/// Trait for types that can be converted into subscriber callbacks.
pub trait IntoSubscriber<T> {
    fn into_subscriber(self) -> SubscribeFn<T>;
}

impl<F, T> IntoSubscriber<T> for F
where F: Fn(Snapshot<T>) + Send + Sync + 'static
{
    fn into_subscriber(self) -> SubscribeFn<T> { Arc::new(self) }
}

impl<T> IntoSubscriber<T> for SubscribeFn<T> {
    fn into_subscriber(self) -> SubscribeFn<T> { self }
}

impl<T: Send + 'static> IntoSubscriber<T> for std::sync::mpsc::Sender<Snapshot<T>> {
    fn into_subscriber(self) -> SubscribeFn<T> {
        Arc::new(move |pair| {
            let _ = self.send(pair); // Ignore send errors
        })
    }
}

#[cfg(feature = "tokio")]
impl<T: Send + 'static> IntoSubscriber<T> for tokio::sync::mpsc::UnboundedSender<Snapshot<T>> {
    fn into_subscriber(self) -> SubscribeFn<T> {
        Arc::new(move |pair| {
            let _ = self.send(pair); // Ignore send errors
        })
    }
}

/// Identifies one registration in a subscriber set. Ids come from a monotonic
/// counter and the registry iterates in id order, so notification order is
/// subscription order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub(crate) struct SubscriberSet<T>(Arc<Inner<T>>);

struct Inner<T> {
    entries: RwLock<BTreeMap<SubscriptionId, SubscribeFn<T>>>,
    next_id: AtomicU64,
}

impl<T> Clone for SubscriberSet<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> SubscriberSet<T> {
    pub fn new() -> Self { Self(Arc::new(Inner { entries: RwLock::new(BTreeMap::new()), next_id: AtomicU64::new(0) })) }

    /// Registers `subscriber`, rejecting a handle that is already present.
    pub fn subscribe(&self, subscriber: SubscribeFn<T>) -> Result<ListenerGuard<T>, SubscribeError> {
        let mut entries = self.0.entries.write().expect("subscriber set lock poisoned");
        if entries.values().any(|existing| Arc::ptr_eq(existing, &subscriber)) {
            return Err(SubscribeError::AlreadySubscribed);
        }
        let id = SubscriptionId(self.0.next_id.fetch_add(1, Ordering::Relaxed));
        entries.insert(id, subscriber);
        trace!(id = id.0, total = entries.len(), "subscriber added");
        Ok(ListenerGuard { inner: Arc::downgrade(&self.0), id })
    }

    /// Calls every registered subscriber in id order. The registrations are
    /// cloned up front and no lock is held while a callback runs, so a
    /// callback may freely subscribe, unsubscribe, or mutate the cell.
    /// `pair` is invoked once per delivery, after the previous callback
    /// returned.
    pub fn notify_with(&self, mut pair: impl FnMut() -> Snapshot<T>) {
        let subscribers = {
            let entries = self.0.entries.read().expect("subscriber set lock poisoned");
            entries.values().cloned().collect::<Vec<_>>()
        };
        for subscriber in subscribers {
            subscriber(pair());
        }
    }

    pub fn len(&self) -> usize { self.0.entries.read().expect("subscriber set lock poisoned").len() }
}

/// A registration handle. Dropping it removes the callback from the set; if
/// the set is already gone this is a no-op.
pub struct ListenerGuard<T> {
    inner: Weak<Inner<T>>,
    id: SubscriptionId,
}

impl<T> ListenerGuard<T> {
    pub fn id(&self) -> SubscriptionId { self.id }
}

impl<T> std::fmt::Debug for ListenerGuard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

impl<T> Drop for ListenerGuard<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.entries.write().expect("subscriber set lock poisoned").remove(&self.id);
            trace!(id = self.id.0, "subscriber removed");
        }
    }
}
