use std::mem;

use crate::{ListCursor, Payload, Result, DEFAULT_VALUE_CAPACITY};

/// The ordered values of one header.
///
/// Values are kept in insertion order. The backing buffer is allocated on the first `add` with
/// the list's initial capacity and doubles every time it fills up; it never shrinks. There is no
/// way to remove a single value: a list goes away as a whole when its header is deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueList<H> {
    slots: Vec<Payload<H>>,
    initial_capacity: usize,
}

impl<H> Default for ValueList<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ValueList<H> {
    /// Create an empty list. Does not allocate.
    pub fn new() -> Self {
        Self::with_initial_capacity(DEFAULT_VALUE_CAPACITY)
    }

    /// Create an empty list whose first allocation holds `initial_capacity` values.
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            initial_capacity: initial_capacity.max(1),
        }
    }

    /// Appends `payload`, doubling the buffer first if it is full.
    ///
    /// On allocation failure the list is left untouched and `payload` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use headerstore_core::{Payload, ValueList};
    /// let mut list = ValueList::<()>::new();
    /// list.add(Payload::from("gzip")).unwrap();
    /// list.add(Payload::from("br")).unwrap();
    ///
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.capacity(), 16);
    /// assert_eq!(list.first().and_then(Payload::as_str), Some("gzip"));
    /// ```
    pub fn add(&mut self, payload: Payload<H>) -> Result<()> {
        self.reserve_one()?;
        self.slots.push(payload);
        Ok(())
    }

    fn reserve_one(&mut self) -> Result<()> {
        let capacity = self.slots.capacity();
        if self.slots.len() < capacity {
            return Ok(());
        }
        let target = if capacity == 0 {
            self.initial_capacity
        } else {
            capacity.saturating_mul(2)
        };
        self.slots.try_reserve_exact(target - self.slots.len())?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of values the list holds before its next growth.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&Payload<H>> {
        self.slots.get(index)
    }

    pub fn first(&self) -> Option<&Payload<H>> {
        self.slots.first()
    }

    pub fn as_slice(&self) -> &[Payload<H>] {
        &self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Payload<H>> {
        self.slots.iter()
    }

    /// String values only, in order.
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(Payload::as_str)
    }

    pub fn cursor(&self) -> ListCursor<'_, H> {
        ListCursor::new(self)
    }

    // size of the backing buffer, as reported to an AllocObserver
    pub(crate) fn buffer_bytes(&self) -> usize {
        self.slots.capacity() * mem::size_of::<Payload<H>>()
    }
}

impl<H> IntoIterator for ValueList<H> {
    type Item = Payload<H>;

    type IntoIter = std::vec::IntoIter<Payload<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl<'a, H> IntoIterator for &'a ValueList<H> {
    type Item = &'a Payload<H>;

    type IntoIter = std::slice::Iter<'a, Payload<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_by_doubling() {
        let mut list = ValueList::<u32>::new();
        assert_eq!(list.capacity(), 0);

        for i in 0..16 {
            list.add(Payload::Handle(i)).unwrap();
        }
        assert_eq!(list.capacity(), 16);

        list.add(Payload::Handle(16)).unwrap();
        assert_eq!(list.capacity(), 32);

        for i in 17..33 {
            list.add(Payload::Handle(i)).unwrap();
        }
        assert_eq!(list.len(), 33);
        assert_eq!(list.capacity(), 64);
        assert!(list
            .iter()
            .enumerate()
            .all(|(i, payload)| payload == &Payload::Handle(i as u32)));
    }

    #[test]
    fn custom_initial_capacity() {
        let mut list = ValueList::<u32>::with_initial_capacity(2);
        list.add(Payload::Handle(1)).unwrap();
        assert_eq!(list.capacity(), 2);
        list.add(Payload::Handle(2)).unwrap();
        list.add(Payload::Handle(3)).unwrap();
        assert_eq!(list.capacity(), 4);

        assert_eq!(ValueList::<u32>::with_initial_capacity(0).initial_capacity, 1);
    }

    #[test]
    fn failed_growth_leaves_list_untouched() {
        let mut list = ValueList::<u32>::with_initial_capacity(usize::MAX);
        assert!(matches!(list.add(Payload::Handle(1)), Err(crate::Error::Exhausted(_))));
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 0);
    }

    #[test]
    fn clone_is_independent() {
        let mut list = ValueList::<u32>::new();
        list.add(Payload::from("a")).unwrap();
        list.add(Payload::Handle(7)).unwrap();

        let mut copy = list.clone();
        assert_eq!(copy, list);
        copy.add(Payload::from("b")).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(copy.len(), 3);
        assert_eq!(list.strings().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(copy.strings().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
