use std::{fmt, io, mem, sync::Arc};

use log::trace;

use crate::{
    header_order, AllocObserver, CanonicalName, Config, Error, Payload, Result, TableCursor,
    ValueList,
};

/// One header of a [`HeaderTable`]: its canonical name, the raw name it was first added under,
/// and its values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<H> {
    name: CanonicalName,
    raw_name: String,
    values: ValueList<H>,
}

impl<H> Entry<H> {
    pub fn name(&self) -> &CanonicalName {
        &self.name
    }

    /// The name as spelled by the first `add` for this header.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn values(&self) -> &ValueList<H> {
        &self.values
    }

    fn footprint(&self) -> usize {
        mem::size_of::<Self>() + self.name.len() + self.raw_name.len() + self.values.buffer_bytes()
    }
}

/// A multimap from header name to an ordered list of values.
///
/// Names are canonicalized before every operation (see
/// [`canonicalize`](crate::canonicalize)), so `content-type`, `Content-Type` and `CONTENT_TYPE`
/// all address the same entry. Entries live in a fixed number of buckets chosen by the hash of
/// the canonical name; within a bucket, entries keep the order in which they were first added.
/// The table never rehashes.
///
/// `len` counts distinct headers, not values.
///
/// Cloning copies every entry and value list; payload handles are cloned by value, so both tables
/// can be mutated independently while still sharing whatever the handles point at.
///
/// # Examples
///
/// ```
/// # use headerstore_core::{HeaderTable, Payload};
/// let mut table = HeaderTable::<()>::new();
/// table.add("content-type", Payload::from("text/plain")).unwrap();
/// table.add("Content-Type", Payload::from("charset=utf-8")).unwrap();
///
/// assert_eq!(table.len(), 1);
/// let values = table.get("CONTENT_TYPE").unwrap();
/// assert_eq!(values.strings().collect::<Vec<_>>(), vec!["text/plain", "charset=utf-8"]);
/// ```
pub struct HeaderTable<H> {
    buckets: Box<[Vec<Entry<H>>]>,
    len: usize,
    config: Config,
    observer: Option<Arc<dyn AllocObserver>>,
}

impl<H> Default for HeaderTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HeaderTable<H> {
    /// Create an empty table with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let config = config.normalized();
        Self {
            buckets: (0..config.buckets).map(|_| Vec::new()).collect(),
            len: 0,
            config,
            observer: None,
        }
    }

    /// Report allocations of this table (and of its clones) to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn AllocObserver>) -> Self {
        for entry in self.buckets.iter().flatten() {
            observer.allocated(entry.footprint());
        }
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Changes how subsequent lookups treat `_`. Existing entries keep their names.
    pub fn set_translate_underscore(&mut self, translate_underscore: bool) {
        self.config.translate_underscore = translate_underscore;
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of distinct headers.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn buckets(&self) -> &[Vec<Entry<H>>] {
        &self.buckets
    }

    fn canonical(&self, raw_name: &str) -> Option<CanonicalName> {
        CanonicalName::new(raw_name, self.config.translate_underscore)
    }

    fn bucket_of(&self, name: &CanonicalName) -> usize {
        name.hash_key() as usize % self.buckets.len()
    }

    // bucket of `name`, and its index in that bucket's chain if present
    fn locate(&self, name: &CanonicalName) -> (usize, Option<usize>) {
        let bucket = self.bucket_of(name);
        let index = self.buckets[bucket]
            .iter()
            .position(|entry| entry.name.as_str().as_bytes() == name.as_str().as_bytes());
        (bucket, index)
    }

    /// Finds the entry for `raw_name`. Returns `None` if the name is empty or absent.
    pub fn lookup(&self, raw_name: &str) -> Option<&Entry<H>> {
        let name = self.canonical(raw_name)?;
        let (bucket, index) = self.locate(&name);
        trace!("lookup [{raw_name}] as [{name}] in bucket {bucket} -> {index:?}");
        self.buckets[bucket].get(index?)
    }

    /// Values of `raw_name`, or `None` if the table has no such header.
    pub fn get(&self, raw_name: &str) -> Option<&ValueList<H>> {
        self.lookup(raw_name).map(Entry::values)
    }

    pub fn contains(&self, raw_name: &str) -> bool {
        self.lookup(raw_name).is_some()
    }

    /// Appends `payload` to the values of `raw_name`, creating the header if needed.
    ///
    /// Fails with [`Error::InvalidName`] on an empty name and with [`Error::Exhausted`] if memory
    /// could not be reserved; in both cases the table is unchanged.
    pub fn add(&mut self, raw_name: &str, payload: Payload<H>) -> Result<&ValueList<H>> {
        let name = self.canonical(raw_name).ok_or(Error::InvalidName)?;
        let (bucket, index) = self.locate(&name);

        let index = match index {
            Some(index) => {
                let values = &mut self.buckets[bucket][index].values;
                let before = values.buffer_bytes();
                values.add(payload)?;
                let after = values.buffer_bytes();
                if after != before {
                    self.notify_allocated(after);
                    self.notify_released(before);
                }
                index
            }
            None => {
                let mut values = ValueList::with_initial_capacity(self.config.value_capacity);
                values.add(payload)?;
                self.buckets[bucket].try_reserve(1)?;
                let entry = Entry {
                    name,
                    raw_name: raw_name.to_string(),
                    values,
                };
                trace!("insert [{}] in bucket {bucket}", entry.name);
                self.notify_allocated(entry.footprint());
                self.buckets[bucket].push(entry);
                self.len += 1;
                self.buckets[bucket].len() - 1
            }
        };
        Ok(&self.buckets[bucket][index].values)
    }

    /// Replaces every value of `raw_name` with `values`, creating the header if needed, and hands
    /// back the previous values. An empty `values` removes the header.
    ///
    /// Fails with [`Error::InvalidName`] on an empty name and with [`Error::Exhausted`] if the
    /// chain could not grow; in both cases the table is unchanged.
    pub fn replace(
        &mut self,
        raw_name: &str,
        values: ValueList<H>,
    ) -> Result<Option<ValueList<H>>> {
        let name = self.canonical(raw_name).ok_or(Error::InvalidName)?;
        if values.is_empty() {
            return Ok(self.delete(raw_name));
        }
        let (bucket, index) = self.locate(&name);

        match index {
            Some(index) => {
                let old = mem::replace(&mut self.buckets[bucket][index].values, values);
                let new_bytes = self.buckets[bucket][index].values.buffer_bytes();
                trace!("replace [{name}] in bucket {bucket}");
                self.notify_allocated(new_bytes);
                self.notify_released(old.buffer_bytes());
                Ok(Some(old))
            }
            None => {
                self.buckets[bucket].try_reserve(1)?;
                let entry = Entry {
                    name,
                    raw_name: raw_name.to_string(),
                    values,
                };
                trace!("insert [{}] in bucket {bucket}", entry.name);
                self.notify_allocated(entry.footprint());
                self.buckets[bucket].push(entry);
                self.len += 1;
                Ok(None)
            }
        }
    }

    /// Removes `raw_name` and hands back its values. Does nothing if the header is absent.
    pub fn delete(&mut self, raw_name: &str) -> Option<ValueList<H>> {
        let name = self.canonical(raw_name)?;
        let (bucket, index) = self.locate(&name);
        let Some(index) = index else {
            trace!("delete [{raw_name}]: not found");
            return None;
        };
        let entry = self.buckets[bucket].remove(index);
        self.len -= 1;
        self.notify_released(entry.footprint());
        trace!("delete [{}] from bucket {bucket}", entry.name);
        Some(entry.values)
    }

    /// Removes every header, leaving the table as [`HeaderTable::with_config`] built it.
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            for entry in mem::take(chain) {
                if let Some(observer) = &self.observer {
                    observer.released(entry.footprint());
                }
            }
        }
        self.len = 0;
    }

    /// Copies the table into one with `buckets` buckets. Every entry is rehashed into the new
    /// bucket array; relative order of entries landing in the same bucket is preserved.
    pub fn clone_with_buckets(&self, buckets: usize) -> Self
    where
        H: Clone,
    {
        let mut out = Self::with_config(self.config.with_buckets(buckets));
        out.observer = self.observer.clone();
        for entry in self.iter() {
            let bucket = out.bucket_of(&entry.name);
            let entry = entry.clone();
            out.notify_allocated(entry.footprint());
            out.buckets[bucket].push(entry);
            out.len += 1;
        }
        out
    }

    /// Cursor over every entry, bucket by bucket.
    pub fn cursor(&self) -> TableCursor<'_, H> {
        TableCursor::new(self)
    }

    pub fn iter(&self) -> TableCursor<'_, H> {
        self.cursor()
    }

    /// Entries ordered the way headers are conventionally sent: general, request, response and
    /// entity headers in registry order, then every other header by name.
    pub fn sorted(&self) -> Vec<&Entry<H>> {
        let mut out = self.iter().collect::<Vec<_>>();
        out.sort_by(|a, b| {
            (header_order(a.name.as_str()), a.name.as_str())
                .cmp(&(header_order(b.name.as_str()), b.name.as_str()))
        });
        out
    }

    /// Writes a human-readable listing of every entry and its values.
    pub fn dump(&self, mut out: impl io::Write) -> io::Result<()>
    where
        H: fmt::Debug,
    {
        writeln!(
            out,
            "HeaderTable: {} headers in {} buckets",
            self.len,
            self.buckets.len()
        )?;
        for entry in self.iter() {
            writeln!(
                out,
                "> Name: {} ({}) [{} values]",
                entry.name.display_name(),
                entry.raw_name,
                entry.values.len()
            )?;
            for (i, value) in entry.values.iter().enumerate() {
                match value {
                    Payload::Str(value) => writeln!(out, ">  {:3}: [{value}]", i + 1)?,
                    Payload::Handle(handle) => writeln!(out, ">  {:3}: {handle:?}", i + 1)?,
                }
            }
        }
        out.flush()
    }

    fn notify_allocated(&self, bytes: usize) {
        if let Some(observer) = &self.observer {
            observer.allocated(bytes);
        }
    }

    fn notify_released(&self, bytes: usize) {
        if let Some(observer) = &self.observer {
            observer.released(bytes);
        }
    }
}

impl<H: Clone> Clone for HeaderTable<H> {
    fn clone(&self) -> Self {
        self.clone_with_buckets(self.buckets.len())
    }
}

impl<H> Drop for HeaderTable<H> {
    fn drop(&mut self) {
        if self.observer.is_some() {
            self.clear();
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for HeaderTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|entry| (entry.name.as_str(), entry.values.as_slice())),
            )
            .finish()
    }
}

impl<'a, H> IntoIterator for &'a HeaderTable<H> {
    type Item = &'a Entry<H>;

    type IntoIter = TableCursor<'a, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
