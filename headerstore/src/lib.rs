//! HTTP header container: a canonicalizing multimap of string and object values.
//!
//! ```
//! # use headerstore::Headers;
//! let mut headers = Headers::new();
//! headers.append("content-type", "text/plain").unwrap();
//! headers.append("Content_Type", "charset=utf-8").unwrap();
//!
//! assert_eq!(headers.len(), 1);
//! assert_eq!(headers.get_joined("CONTENT-TYPE").as_deref(), Some("text/plain, charset=utf-8"));
//! ```

mod convert;
mod error;
pub mod header;

pub use error::*;
pub use header::{Headers, Object, TypedHeader, Value};

/// re-export the storage engine
pub use headerstore_core as store;
pub use headerstore_core::{Config, Payload, ValueList};

pub use headers as typed_headers;
pub use http;
