use crate::cell::Snapshot;
use crate::observable::Observable;

/// Helper trait for [`Observable::wait_for`] to allow flexible predicate
/// return types.
///
/// ## Semantics
/// - `result()` returns `Some(output)` to stop waiting and return `output`
/// - `result()` returns `None` to continue waiting for the next notification
pub trait WaitResult {
    type Output;
    /// Returns Some(output) if we should stop waiting, None if we should continue
    fn result(self) -> Option<Self::Output>;
}

// Blanket impl for bool: true = stop with (), false = continue waiting
impl WaitResult for bool {
    type Output = ();
    fn result(self) -> Option<Self::Output> { if self { Some(()) } else { None } }
}

// Blanket impl for Option<T>: Some(value) = stop with value, None = continue waiting
impl<T> WaitResult for Option<T> {
    type Output = T;
    fn result(self) -> Option<Self::Output> { self }
}

impl<T> Observable<T>
where T: Clone + Send + Sync + 'static
{
    /// Waits until the stored value equals `target`. Returns immediately if
    /// it already does.
    pub async fn wait_value(&self, target: T)
    where T: PartialEq {
        self.wait_for(move |pair: &Snapshot<T>| pair.value == target).await
    }

    /// Waits until `predicate` yields a result for a notified pair, checking
    /// the current pair first.
    pub async fn wait_for<F, R>(&self, predicate: F) -> R::Output
    where
        F: Fn(&Snapshot<T>) -> R + Send + Sync + 'static,
        R: WaitResult,
    {
        if let Some(result) = self.with(|pair| predicate(pair).result()) {
            return result;
        }

        // Bridge the synchronous fan-out into a channel we can await
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _subscription = self.subscribe(tx).expect("fresh channel sender is never already subscribed");

        loop {
            match rx.recv().await {
                Some(pair) => {
                    if let Some(result) = predicate(&pair).result() {
                        return result;
                    }
                }
                // Cannot happen while we hold &self, which keeps the sender registered
                None => unreachable!("subscription channel closed unexpectedly"),
            }
        }
    }
}
