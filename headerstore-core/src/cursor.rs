//! Resumable, read-only traversal of value lists and tables.
//!
//! A cursor borrows the structure it walks, so nothing can add or delete headers (or grow a value
//! list) while the cursor is alive. Both cursors can be rewound with `reset` and replay the same
//! sequence as long as the structure was not mutated in between. Both are also plain iterators.

use crate::{Entry, HeaderTable, Payload, ValueList};

/// Position in a [`ValueList`].
#[derive(Debug)]
pub struct ListCursor<'a, H> {
    list: &'a ValueList<H>,
    index: usize,
}

impl<H> Clone for ListCursor<'_, H> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            index: self.index,
        }
    }
}

impl<'a, H> ListCursor<'a, H> {
    pub fn new(list: &'a ValueList<H>) -> Self {
        Self { list, index: 0 }
    }

    /// Rewinds to the first value.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn has_more(&self) -> bool {
        self.index < self.list.len()
    }

    /// The value under the cursor, without advancing.
    pub fn fetch(&self) -> Option<&'a Payload<H>> {
        self.list.get(self.index)
    }

    pub fn advance(&mut self) {
        if self.has_more() {
            self.index += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.index
    }
}

impl<'a, H> Iterator for ListCursor<'a, H> {
    type Item = &'a Payload<H>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.fetch()?;
        self.advance();
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

/// Position in a [`HeaderTable`]: entries come out bucket by bucket, and in insertion order
/// within a bucket. Empty buckets are skipped.
#[derive(Debug)]
pub struct TableCursor<'a, H> {
    table: &'a HeaderTable<H>,
    bucket: usize,
    index: usize,
}

impl<H> Clone for TableCursor<'_, H> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            bucket: self.bucket,
            index: self.index,
        }
    }
}

impl<'a, H> TableCursor<'a, H> {
    pub fn new(table: &'a HeaderTable<H>) -> Self {
        let mut out = Self {
            table,
            bucket: 0,
            index: 0,
        };
        out.reset();
        out
    }

    /// Rewinds to the first entry of the first non-empty bucket.
    pub fn reset(&mut self) {
        self.bucket = 0;
        self.index = 0;
        self.skip_exhausted();
    }

    pub fn has_more(&self) -> bool {
        self.bucket < self.table.buckets().len()
    }

    /// The entry under the cursor, without advancing.
    pub fn fetch(&self) -> Option<&'a Entry<H>> {
        self.table.buckets().get(self.bucket)?.get(self.index)
    }

    pub fn advance(&mut self) {
        if !self.has_more() {
            return;
        }
        self.index += 1;
        self.skip_exhausted();
    }

    // moves forward until the position names a live entry, or past the last bucket
    fn skip_exhausted(&mut self) {
        let buckets = self.table.buckets();
        while self.bucket < buckets.len() && self.index >= buckets[self.bucket].len() {
            self.bucket += 1;
            self.index = 0;
        }
    }
}

impl<'a, H> Iterator for TableCursor<'a, H> {
    type Item = &'a Entry<H>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.fetch()?;
        self.advance();
        Some(out)
    }
}
