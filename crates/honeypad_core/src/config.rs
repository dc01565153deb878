//! Store configuration.

use crate::collation::{Collator, FoldingCollator};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Options applied to every connection a [`crate::NoteStore`] opens.
#[derive(Clone)]
pub struct StoreOptions {
    /// Comparator backing the `LOCALIZED` title collation.
    pub collator: Arc<dyn Collator>,
    /// How long SQLite waits on a lock held by another process.
    pub busy_timeout: Duration,
}

impl StoreOptions {
    /// Replaces the title collator.
    pub fn with_collator(mut self, collator: impl Collator + 'static) -> Self {
        self.collator = Arc::new(collator);
        self
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            collator: Arc::new(FoldingCollator),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl Debug for StoreOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreOptions")
            .field("busy_timeout", &self.busy_timeout)
            .finish_non_exhaustive()
    }
}
