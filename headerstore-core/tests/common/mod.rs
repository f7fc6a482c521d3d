#![allow(dead_code)]

use headerstore_core::{HeaderTable, Payload};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Payloads are plain ids, so tests can check that handles survive clones untouched.
pub type Table = HeaderTable<u64>;

pub fn handles(table: &Table, name: &str) -> Vec<u64> {
    table
        .get(name)
        .map(|values| values.iter().filter_map(Payload::as_handle).copied().collect())
        .unwrap_or_default()
}

pub fn strings(table: &Table, name: &str) -> Vec<String> {
    table
        .get(name)
        .map(|values| values.strings().map(str::to_string).collect())
        .unwrap_or_default()
}
