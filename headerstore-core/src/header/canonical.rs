use std::fmt;

/// A name starting with this character is taken literally: it is stored and compared exactly as
/// written, without case folding or underscore translation.
pub const LITERAL_MARKER: char = ':';

// Folded spellings that HTTP capitalizes differently.
const EXCEPTIONS: [(&str, &str); 4] = [
    ("Te", "TE"),
    ("Etag", "ETag"),
    ("Www-Authenticate", "WWW-Authenticate"),
    ("Content-Md5", "Content-MD5"),
];

/// The normalized spelling of a header name, used as the equality key of a
/// [`HeaderTable`](crate::HeaderTable).
///
/// Two raw names refer to the same header iff their canonical names are byte-identical.
///
/// # Examples
///
/// ```
/// # use headerstore_core::CanonicalName;
/// let name = CanonicalName::new("content_type", true).unwrap();
/// assert_eq!(name.as_str(), "Content-Type");
///
/// let name = CanonicalName::new("www-authenticate", true).unwrap();
/// assert_eq!(name.as_str(), "WWW-Authenticate");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalName {
    name: Box<str>,
    hash: u32,
}

impl CanonicalName {
    /// Canonicalizes `raw`. Returns `None` if `raw` is empty.
    pub fn new(raw: &str, translate_underscore: bool) -> Option<Self> {
        let name = canonicalize(raw, translate_underscore)?;
        let hash = hash_name(name.as_bytes());
        Some(Self {
            name: name.into_boxed_str(),
            hash,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The name without its literal marker, if any.
    pub fn display_name(&self) -> &str {
        let name: &str = &self.name;
        name.strip_prefix(LITERAL_MARKER).unwrap_or(name)
    }

    pub fn is_literal(&self) -> bool {
        self.name.starts_with(LITERAL_MARKER)
    }

    /// Hash of the canonical bytes, used to pick a bucket.
    pub fn hash_key(&self) -> u32 {
        self.hash
    }

    pub fn len(&self) -> usize {
        self.name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Folds a raw header name into its canonical spelling.
///
/// The first character of every run of ASCII alphanumerics is uppercased and the rest of the run
/// lowercased. Other characters are kept, except `_` which becomes `-` when
/// `translate_underscore` is set. Names starting with [`LITERAL_MARKER`] are copied verbatim.
/// A few names are then rewritten to their conventional spelling (`TE`, `ETag`,
/// `WWW-Authenticate`, `Content-MD5`).
///
/// Returns `None` for an empty name.
pub fn canonicalize(raw: &str, translate_underscore: bool) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with(LITERAL_MARKER) {
        return Some(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(if in_word {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            });
            in_word = true;
        } else {
            out.push(if translate_underscore && c == '_' { '-' } else { c });
            in_word = false;
        }
    }

    if let Some((folded, standard)) = EXCEPTIONS.iter().find(|(folded, _)| *folded == out) {
        log::debug!("header name exception: [{folded}] => [{standard}]");
        out.clear();
        out.push_str(standard);
    }
    Some(out)
}

/// djb2 over `bytes`.
pub fn hash_name(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(5381u32, |hash, b| hash.wrapping_mul(33).wrapping_add(*b as u32))
}
