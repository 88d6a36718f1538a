use std::sync::Arc;

use thiserror::Error;

/// Shared application failure held in an observable's error slot.
///
/// Failures are data, not control flow: they are stored and delivered to
/// subscribers inside a [`Snapshot`](crate::Snapshot), never raised. The
/// `Arc` lets snapshots clone the handle without cloning the error itself.
pub type ObservedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeError {
    /// The same callback handle is already registered.
    #[error("subscription already exists")]
    AlreadySubscribed,
}
