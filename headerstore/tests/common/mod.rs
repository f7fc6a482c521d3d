#![allow(dead_code)]

use headerstore::Headers;

lazy_static::lazy_static! {
    pub static ref SAMPLE: Vec<(&'static str, &'static str)> = vec![
        ("host", "example.com"),
        ("accept", "text/html"),
        ("accept", "application/json"),
        ("content-type", "text/plain"),
        ("content-length", "12"),
        ("x-request-id", "abc123"),
    ];
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sample() -> Headers {
    SAMPLE.iter().copied().collect()
}
