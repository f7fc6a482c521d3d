use std::{any::Any, io, sync::Arc};

use headerstore_core::{is_entity, Config, HeaderTable, Payload, ValueList};
use smallvec::SmallVec;

use super::TypedHeader;
use crate::Result;

/// A value stored alongside strings: any shared object. Cloning a [`Headers`] clones the `Arc`,
/// so both containers keep the object alive.
pub type Object = Arc<dyn Any + Send + Sync>;

/// One header value: a string or an [`Object`].
pub type Value = Payload<Object>;

/// This is a multimap representing HTTP headers.
///
/// Names are canonicalized on every call, so `content-type`, `Content-Type` and `CONTENT_TYPE`
/// are the same header. Values of one header keep their insertion order. Iteration goes by hash
/// bucket; use [`Headers::grouped`] for the conventional header order.
///
/// Cloning produces an independent container: adding to or removing from the clone never shows
/// up in the original.
#[derive(Default, Clone, Debug)]
pub struct Headers {
    table: HeaderTable<Object>,
}

#[cfg(feature = "otel")]
impl opentelemetry_api::propagation::Extractor for Headers {
    /// Get the first string value for a key.
    fn get(&self, key: &str) -> Option<&str> {
        Headers::get(self, key)
    }

    /// Collect all the keys from the Headers.
    fn keys(&self) -> Vec<&str> {
        self.header_names()
    }
}

#[cfg(feature = "otel")]
impl opentelemetry_api::propagation::Injector for Headers {
    fn set(&mut self, key: &str, value: String) {
        if let Err(e) = self.insert(key, value) {
            log::warn!("failed to inject header '{key}': {e}");
        }
    }
}

impl Headers {
    /// Create an empty `Headers` with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// # use headerstore::Headers;
    /// let headers = Headers::new();
    ///
    /// assert!(headers.is_empty());
    /// ```
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            table: HeaderTable::with_config(config),
        }
    }

    /// The underlying table.
    pub fn table(&self) -> &HeaderTable<Object> {
        &self.table
    }

    pub fn config(&self) -> &Config {
        self.table.config()
    }

    /// Clears the container, removing every header.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns true if the container holds no header.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of distinct headers.
    ///
    /// A header with several values counts once. See [`Headers::value_count`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use headerstore::Headers;
    /// let mut headers = Headers::new();
    /// headers.append("accept", "text/plain").unwrap();
    /// headers.append("accept", "text/html").unwrap();
    /// headers.append("host", "localhost").unwrap();
    ///
    /// assert_eq!(2, headers.len());
    /// assert_eq!(3, headers.value_count());
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns the number of values across all headers.
    pub fn value_count(&self) -> usize {
        self.table.iter().map(|entry| entry.values().len()).sum()
    }

    /// Appends a string value to a header, creating the header if needed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use headerstore::Headers;
    /// let mut headers = Headers::new();
    /// headers.append("host", "world").unwrap();
    /// headers.append("HOST", "earth").unwrap();
    ///
    /// let values = headers.get_all("host").filter_map(|x| x.as_str()).collect::<Vec<_>>();
    /// assert_eq!(values, vec!["world", "earth"]);
    /// ```
    pub fn append(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Result<()> {
        self.table.add(name.as_ref(), Payload::Str(value.into()))?;
        Ok(())
    }

    /// Appends an object value to a header.
    pub fn append_object<T: Any + Send + Sync>(
        &mut self,
        name: impl AsRef<str>,
        object: T,
    ) -> Result<()> {
        self.append_shared(name, Arc::new(object))
    }

    /// Appends an already shared object value to a header.
    pub fn append_shared(&mut self, name: impl AsRef<str>, object: Object) -> Result<()> {
        self.table.add(name.as_ref(), Payload::Handle(object))?;
        Ok(())
    }

    /// Appends a typed header.
    pub fn append_typed<H: TypedHeader>(&mut self, header: &H) -> Result<()> {
        header.encode(self)
    }

    /// Replaces every value of a header with `value`, returning the previous values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use headerstore::Headers;
    /// let mut headers = Headers::new();
    /// assert!(headers.insert("host", "world").unwrap().is_none());
    ///
    /// let prev = headers.insert("host", "earth").unwrap().unwrap();
    /// assert_eq!(prev.first().and_then(|x| x.as_str()), Some("world"));
    /// assert_eq!(headers.get("host"), Some("earth"));
    /// ```
    pub fn insert(
        &mut self,
        name: impl AsRef<str>,
        value: impl Into<String>,
    ) -> Result<Option<ValueList<Object>>> {
        let mut values = self.new_values();
        values.add(Payload::Str(value.into()))?;
        Ok(self.table.replace(name.as_ref(), values)?)
    }

    /// Replaces a typed header.
    ///
    /// Note that if the header encodes to multiple values, all of them are kept.
    pub fn insert_typed<H: TypedHeader>(
        &mut self,
        header: &H,
    ) -> Result<Option<ValueList<Object>>> {
        let mut encoded = Headers::with_config(*self.config());
        header.encode(&mut encoded)?;
        let values = encoded.table.delete(H::name()).unwrap_or_default();
        Ok(self.table.replace(H::name(), values)?)
    }

    /// Replaces every value of a header with `values`. An empty `values` removes the header.
    ///
    /// On error the header keeps its previous values.
    pub fn set<V: Into<String>>(
        &mut self,
        name: impl AsRef<str>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<()> {
        let mut list = self.new_values();
        for value in values {
            list.add(Payload::Str(value.into()))?;
        }
        self.table.replace(name.as_ref(), list)?;
        Ok(())
    }

    // an empty list sized like the ones the table creates
    fn new_values(&self) -> ValueList<Object> {
        ValueList::with_initial_capacity(self.config().value_capacity)
    }

    /// Returns true if the container has the header.
    pub fn contains_key(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    /// Returns the first string value of a header.
    ///
    /// Object values are skipped. Use `get_all` to get all values associated with a given
    /// header.
    ///
    /// # Examples
    ///
    /// ```
    /// # use headerstore::Headers;
    /// let mut headers = Headers::new();
    /// assert!(headers.get("host").is_none());
    ///
    /// headers.append("host", "hello").unwrap();
    /// headers.append("host", "world").unwrap();
    /// assert_eq!(headers.get("Host"), Some("hello"));
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.table.get(name)?.strings().next()
    }

    /// Returns the string values of a header joined by `", "`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use headerstore::Headers;
    /// let mut headers = Headers::new();
    /// headers.append("accept-encoding", "gzip").unwrap();
    /// headers.append("accept_encoding", "br").unwrap();
    ///
    /// assert_eq!(headers.get_joined("Accept-Encoding").as_deref(), Some("gzip, br"));
    /// ```
    pub fn get_joined(&self, name: &str) -> Option<String> {
        let values = self.table.get(name)?;
        Some(values.strings().collect::<Vec<_>>().join(", "))
    }

    /// Returns every value of a header, in insertion order.
    pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Value> {
        self.table.get(name).into_iter().flat_map(|values| values.iter())
    }

    /// Returns the first object value of a header that is a `T`.
    pub fn get_object<T: Any + Send + Sync>(&self, name: &str) -> Option<&T> {
        self.get_all(name)
            .filter_map(Payload::as_handle)
            .find_map(|object| object.downcast_ref::<T>())
    }

    /// Decodes a typed header from its string values.
    ///
    /// If the header is absent or malformed, `None` is returned.
    pub fn get_typed<H: TypedHeader>(&self) -> Option<H> {
        let values = self.table.get(H::name())?;
        H::decode(values.strings()).ok()
    }

    /// Removes a header, returning its values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use headerstore::Headers;
    /// let mut headers = Headers::new();
    /// headers.append("host", "hello.world").unwrap();
    ///
    /// let prev = headers.remove("host").unwrap();
    /// assert_eq!(prev.len(), 1);
    ///
    /// assert!(headers.remove("host").is_none());
    /// ```
    pub fn remove(&mut self, name: impl AsRef<str>) -> Option<ValueList<Object>> {
        self.table.delete(name.as_ref())
    }

    /// Moves every entity header (`Content-*`, `Expires`, `Last-Modified`, `Allow`) into a new
    /// container with the same configuration.
    ///
    /// On error nothing is removed.
    pub fn remove_content_headers(&mut self) -> Result<Headers> {
        let mut out = Headers::with_config(*self.config());
        let mut moved = vec![];
        for entry in self.table.iter() {
            if !is_entity(entry.name().as_str()) {
                continue;
            }
            out.table.replace(entry.raw_name(), entry.values().clone())?;
            moved.push(entry.name().as_str().to_string());
        }
        for name in moved {
            self.table.delete(&name);
        }
        Ok(out)
    }

    /// Header names in iteration order, without literal markers.
    ///
    /// A literal name and a folded one can display the same (`:Foo` and `foo` both show as
    /// `Foo`), so the result may hold duplicates.
    pub fn header_names(&self) -> Vec<&str> {
        self.table
            .iter()
            .map(|entry| entry.name().display_name())
            .collect()
    }

    /// An iterator visiting all name-value pairs.
    ///
    /// The values of one header come out together, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.table.iter().flat_map(|entry| {
            let name = entry.name().display_name();
            entry.values().iter().map(move |value| (name, value))
        })
    }

    /// String values grouped per header, in conventional header order: general, request,
    /// response and entity headers first, then the others by name.
    ///
    /// Names are display names, as in [`Headers::header_names`].
    pub fn grouped(&self) -> Vec<(&str, SmallVec<[&str; 2]>)> {
        self.table
            .sorted()
            .into_iter()
            .map(|entry| (entry.name().display_name(), entry.values().strings().collect()))
            .collect()
    }

    /// Writes a human-readable listing of the container.
    pub fn dump(&self, out: impl io::Write) -> io::Result<()> {
        self.table.dump(out)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Headers {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        // keyed by canonical name, so literal names keep their marker and never collide
        let entries = self.table.sorted();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for entry in entries {
            let values: SmallVec<[&str; 2]> = entry.values().strings().collect();
            map.serialize_entry(entry.name().as_str(), values.as_slice())?;
        }
        map.end()
    }
}

/// Wraps a table built directly with the storage engine.
impl From<HeaderTable<Object>> for Headers {
    fn from(table: HeaderTable<Object>) -> Self {
        Self { table }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut out = Self::default();
        for (name, value) in iter {
            if let Err(e) = out.append(name.as_ref(), value) {
                log::debug!("skipping header '{}': {e}", name.as_ref());
            }
        }
        out
    }
}
