use std::sync::atomic::{AtomicU64, Ordering};

/// Receives the memory a [`HeaderTable`](crate::HeaderTable) takes and gives back.
///
/// Byte counts are estimates of the table's own structures (entries, names, value slots); payload
/// referents are never counted. A growing value list reports its new buffer as allocated and its
/// old buffer as released.
pub trait AllocObserver: Send + Sync {
    fn allocated(&self, bytes: usize);

    fn released(&self, bytes: usize);
}

/// An [`AllocObserver`] that keeps running totals.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use headerstore_core::{AllocCounter, HeaderTable, Payload};
/// let counter = Arc::new(AllocCounter::default());
/// let mut table = HeaderTable::<()>::new().with_observer(counter.clone());
/// table.add("host", Payload::from("example.com")).unwrap();
/// assert!(counter.outstanding() > 0);
///
/// drop(table);
/// assert!(counter.is_balanced());
/// ```
#[derive(Debug, Default)]
pub struct AllocCounter {
    allocated: AtomicU64,
    released: AtomicU64,
}

impl AllocCounter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn total_allocated(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }

    pub fn total_released(&self) -> u64 {
        self.released.load(Ordering::Relaxed)
    }

    /// Bytes allocated and not yet released.
    pub fn outstanding(&self) -> i64 {
        self.total_allocated() as i64 - self.total_released() as i64
    }

    pub fn is_balanced(&self) -> bool {
        self.outstanding() == 0
    }
}

impl AllocObserver for AllocCounter {
    fn allocated(&self, bytes: usize) {
        self.allocated.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    fn released(&self, bytes: usize) {
        self.released.fetch_add(bytes as u64, Ordering::Relaxed);
    }
}
