//! Home-screen widget feed.
//!
//! # Responsibility
//! - Cache the first few note summaries a widget displays.
//! - Go stale on every store change and refresh on demand.
//!
//! # Invariants
//! - Items follow the default listing order and never exceed `limit`.
//! - The stale flag is cleared before re-querying, so a change that lands
//!   during a refresh leaves the feed stale again.

use crate::model::note::{NoteId, NoteSummary};
use crate::observer::{ChangeObserver, ObserverId};
use crate::repo::note_repo::NoteQuery;
use crate::service::note_store::{NoteStore, StoreResult};
use crate::uri::NoteUri;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, Weak};

/// Number of notes a widget shows by default.
pub const WIDGET_ITEM_LIMIT: u32 = 10;

pub struct WidgetFeed {
    limit: u32,
    items: RwLock<Vec<NoteSummary>>,
    stale: AtomicBool,
    subscription: OnceLock<ObserverId>,
}

impl WidgetFeed {
    /// Creates an empty, stale feed that is not yet subscribed anywhere.
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            items: RwLock::new(Vec::new()),
            stale: AtomicBool::new(true),
            subscription: OnceLock::new(),
        }
    }

    /// Creates a feed, subscribes it to `store` and loads it once.
    ///
    /// The store holds the feed weakly; dropping the last `Arc` ends the
    /// subscription.
    pub fn attach(store: &NoteStore, limit: u32) -> StoreResult<Arc<Self>> {
        let feed = Arc::new(Self::new(limit));
        let id = store.subscribe_weak(Arc::downgrade(&feed) as Weak<dyn ChangeObserver>);
        let _ = feed.subscription.set(id);
        feed.refresh(store)?;
        Ok(feed)
    }

    /// Unsubscribes a feed created by [`Self::attach`].
    pub fn detach(&self, store: &NoteStore) -> bool {
        self.subscription
            .get()
            .is_some_and(|id| store.unsubscribe(*id))
    }

    /// Reloads the items unconditionally.
    pub fn refresh(&self, store: &NoteStore) -> StoreResult<()> {
        self.stale.store(false, Ordering::SeqCst);
        let query = NoteQuery::default().limit(self.limit);
        match store.query_summaries(&query) {
            Ok(cursor) => {
                *self.items.write().unwrap_or_else(PoisonError::into_inner) = cursor.collect();
                Ok(())
            }
            Err(err) => {
                self.stale.store(true, Ordering::SeqCst);
                Err(err)
            }
        }
    }

    /// Reloads only after a change notification. Returns whether it reloaded.
    pub fn refresh_if_stale(&self, store: &NoteStore) -> StoreResult<bool> {
        if !self.is_stale() {
            return Ok(false);
        }
        self.refresh(store)?;
        Ok(true)
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    pub fn items(&self) -> Vec<NoteSummary> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stable id of the item at `position`.
    pub fn item_id(&self, position: usize) -> Option<NoteId> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(position)
            .map(|item| item.id)
    }

    /// Deep link opened when the item at `position` is clicked.
    pub fn click_target(&self, position: usize) -> Option<NoteUri> {
        self.item_id(position).map(NoteUri::with_appended_id)
    }
}

impl Default for WidgetFeed {
    fn default() -> Self {
        Self::new(WIDGET_ITEM_LIMIT)
    }
}

impl ChangeObserver for WidgetFeed {
    fn on_notes_changed(&self) {
        self.stale.store(true, Ordering::SeqCst);
    }
}
