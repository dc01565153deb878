//! Change notification for note data.
//!
//! # Responsibility
//! - Keep the set of refresh hooks interested in note changes.
//! - Fan out a payload-free "notes changed" signal after mutations.
//!
//! # Invariants
//! - Observers are called outside the registry lock, so a callback may
//!   subscribe, unsubscribe or re-query the store.
//! - Weak subscriptions end when their observer is dropped; dead entries are
//!   pruned on the next count or notification.
//! - A panicking observer is logged and skipped; later observers still run.

use log::{debug, error};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Refresh hook invoked after every store mutation.
///
/// Implementors re-fetch whatever they display; the signal carries no diff.
pub trait ChangeObserver: Send + Sync {
    fn on_notes_changed(&self);
}

impl<F> ChangeObserver for F
where
    F: Fn() + Send + Sync,
{
    fn on_notes_changed(&self) {
        self()
    }
}

enum Subscription {
    /// Kept alive by the registry until unsubscribed.
    Owned(Arc<dyn ChangeObserver>),
    /// Ends when the observer's last `Arc` is dropped.
    Weak(Weak<dyn ChangeObserver>),
}

impl Subscription {
    fn upgrade(&self) -> Option<Arc<dyn ChangeObserver>> {
        match self {
            Self::Owned(observer) => Some(Arc::clone(observer)),
            Self::Weak(observer) => observer.upgrade(),
        }
    }

    fn is_live(&self) -> bool {
        match self {
            Self::Owned(_) => true,
            Self::Weak(observer) => observer.strong_count() > 0,
        }
    }
}

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: AtomicU64,
    observers: Mutex<Vec<(ObserverId, Subscription)>>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&self, observer: Arc<dyn ChangeObserver>) -> ObserverId {
        self.insert(Subscription::Owned(observer))
    }

    pub(crate) fn subscribe_weak(&self, observer: Weak<dyn ChangeObserver>) -> ObserverId {
        self.insert(Subscription::Weak(observer))
    }

    fn insert(&self, subscription: Subscription) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, subscription));
        id
    }

    /// Returns whether `id` was registered.
    pub(crate) fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(current, _)| *current != id);
        observers.len() != before
    }

    /// Number of live subscriptions.
    pub(crate) fn len(&self) -> usize {
        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        observers.retain(|(_, subscription)| subscription.is_live());
        observers.len()
    }

    pub(crate) fn notify_all(&self) {
        let snapshot: Vec<Arc<dyn ChangeObserver>> = {
            let mut observers = self
                .observers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let mut live = Vec::with_capacity(observers.len());
            observers.retain(|(_, subscription)| match subscription.upgrade() {
                Some(observer) => {
                    live.push(observer);
                    true
                }
                None => false,
            });
            live
        };

        debug!(
            "event=notes_changed module=observer status=ok observers={}",
            snapshot.len()
        );
        for observer in snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer.on_notes_changed()));
            if outcome.is_err() {
                error!(
                    "event=notes_changed module=observer status=error error_code=observer_panicked"
                );
            }
        }
    }
}
