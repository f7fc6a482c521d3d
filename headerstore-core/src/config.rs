/// Bucket count of a table created with the default configuration.
pub const DEFAULT_BUCKETS: usize = 97;

/// Capacity of a value list's first allocation. Later growth doubles it.
pub const DEFAULT_VALUE_CAPACITY: usize = 16;

/// Configuration of a [`HeaderTable`](crate::HeaderTable).
///
/// # Examples
///
/// ```
/// # use headerstore_core::Config;
/// let config = Config::default().with_translate_underscore(false).with_buckets(31);
///
/// assert!(!config.translate_underscore);
/// assert_eq!(config.buckets, 31);
/// assert_eq!(config.value_capacity, 16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Rewrite `_` to `-` when canonicalizing names, so `CONTENT_TYPE` and `Content-Type` are the
    /// same header.
    pub translate_underscore: bool,
    /// Number of hash buckets. Never changes for the life of a table.
    pub buckets: usize,
    /// First allocation size of each value list.
    pub value_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translate_underscore: true,
            buckets: DEFAULT_BUCKETS,
            value_capacity: DEFAULT_VALUE_CAPACITY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_translate_underscore(mut self, translate_underscore: bool) -> Self {
        self.translate_underscore = translate_underscore;
        self
    }

    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn with_value_capacity(mut self, value_capacity: usize) -> Self {
        self.value_capacity = value_capacity;
        self
    }

    // zero sizes (e.g. from a deserialized config) are bumped to one
    pub(crate) fn normalized(mut self) -> Self {
        self.buckets = self.buckets.max(1);
        self.value_capacity = self.value_capacity.max(1);
        self
    }
}
