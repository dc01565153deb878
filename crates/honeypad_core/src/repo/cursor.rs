//! Materialized query results.

use std::vec::IntoIter;

/// Finite snapshot of rows produced by one query.
///
/// The rows are fully read before the cursor is handed out, so later writes
/// never change what a cursor yields. Run the query again for fresh data.
#[derive(Debug, Clone)]
pub struct NoteCursor<T> {
    rows: IntoIter<T>,
}

impl<T> NoteCursor<T> {
    pub(crate) fn new(rows: Vec<T>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }

    /// Remaining rows not yet yielded.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.len() == 0
    }
}

impl<T> Iterator for NoteCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<T> ExactSizeIterator for NoteCursor<T> {}
