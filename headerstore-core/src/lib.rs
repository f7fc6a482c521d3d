//! Storage engine for HTTP header containers.
//!
//! [`HeaderTable`] maps canonicalized header names to ordered [`ValueList`]s of opaque
//! [`Payload`]s. The table is single-threaded state with no internal locking; share it across
//! threads only behind the caller's own synchronization.

mod alloc;
mod config;
mod cursor;
mod error;
pub mod header;
mod list;
mod payload;
mod table;

pub use alloc::{AllocCounter, AllocObserver};
pub use config::*;
pub use cursor::{ListCursor, TableCursor};
pub use error::{Error, Result};
pub use header::*;
pub use list::ValueList;
pub use payload::Payload;
pub use table::{Entry, HeaderTable};
