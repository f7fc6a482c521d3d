use std::sync::Arc;

use headerstore::store::{Error, HeaderTable};
use headerstore::{Config, Headers, HeadersError, Object, Payload, ValueList};

mod common;
use common::*;

#[test]
fn scenario_same_name_two_values() {
    init_logger();
    let mut headers = Headers::new();
    headers.append("content-type", "text/plain").unwrap();
    headers.append("Content-Type", "charset=utf-8").unwrap();

    assert_eq!(headers.len(), 1);
    let values = headers
        .get_all("CONTENT_TYPE")
        .filter_map(|x| x.as_str())
        .collect::<Vec<_>>();
    assert_eq!(values, vec!["text/plain", "charset=utf-8"]);
}

#[test]
fn scenario_clone_then_delete() {
    init_logger();
    let mut headers = Headers::new();
    headers.append("x-custom", "v1").unwrap();
    let copy = headers.clone();
    headers.remove("x-custom");

    assert!(headers.get("x-custom").is_none());
    assert_eq!(copy.get("x-custom"), Some("v1"));
}

#[test]
fn empty_name_is_an_error() {
    let mut headers = Headers::new();
    assert!(headers.append("", "value").is_err());
    assert!(headers.is_empty());
}

#[test]
fn insert_replaces() {
    let mut headers = sample();
    let previous = headers.insert("ACCEPT", "*/*").unwrap().unwrap();
    assert_eq!(previous.len(), 2);
    assert_eq!(headers.get_joined("accept").as_deref(), Some("*/*"));
    assert_eq!(headers.len(), 5);
}

#[test]
fn set_with_no_values_removes() {
    let mut headers = sample();
    headers.set("accept", ["a", "b", "c"]).unwrap();
    assert_eq!(headers.get_joined("accept").as_deref(), Some("a, b, c"));

    headers.set("accept", Vec::<String>::new()).unwrap();
    assert!(!headers.contains_key("accept"));
}

#[test]
fn failed_replacement_keeps_previous_values() {
    init_logger();
    let mut table =
        HeaderTable::<Object>::with_config(Config::default().with_value_capacity(usize::MAX));
    let mut accept = ValueList::new();
    accept.add(Payload::from("text/html")).unwrap();
    table.replace("accept", accept).unwrap();
    let mut headers = Headers::from(table);

    assert!(matches!(
        headers.set("accept", ["a", "b"]),
        Err(HeadersError::Store(Error::Exhausted(_)))
    ));
    assert_eq!(headers.get_joined("accept").as_deref(), Some("text/html"));

    assert!(headers.insert("accept", "*/*").is_err());
    assert_eq!(headers.get_joined("accept").as_deref(), Some("text/html"));

    assert!(headers.set("", ["a"]).is_err());
    assert_eq!(headers.len(), 1);
}

#[test]
fn moved_content_headers_keep_raw_names() {
    let mut headers = Headers::new();
    headers.append("content-type", "text/plain").unwrap();
    headers.append("host", "example.com").unwrap();

    let content = headers.remove_content_headers().unwrap();
    assert_eq!(content.header_names(), vec!["Content-Type"]);
    assert_eq!(content.table().lookup("content-type").unwrap().raw_name(), "content-type");
    assert_eq!(headers.header_names(), vec!["Host"]);
}

#[test]
fn from_iter_skips_invalid_names() {
    init_logger();
    let headers = vec![("", "dropped"), ("host", "example.com"), ("HOST", "other")]
        .into_iter()
        .collect::<Headers>();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.value_count(), 2);
    assert_eq!(headers.get_joined("host").as_deref(), Some("example.com, other"));
}

#[test]
fn objects_are_shared_by_clones() {
    init_logger();
    #[derive(Debug, PartialEq)]
    struct Cookie(&'static str);

    let mut headers = Headers::new();
    headers.append("set-cookie", "plain=1").unwrap();
    headers.append_object("set-cookie", Cookie("session")).unwrap();

    assert_eq!(headers.get("set-cookie"), Some("plain=1"));
    assert_eq!(headers.get_object::<Cookie>("Set-Cookie"), Some(&Cookie("session")));
    assert!(headers.get_object::<String>("set-cookie").is_none());

    let copy = headers.clone();
    let original = headers.get_all("set-cookie").nth(1).unwrap().as_handle().unwrap();
    let cloned = copy.get_all("set-cookie").nth(1).unwrap().as_handle().unwrap();
    assert!(Arc::ptr_eq(original, cloned));
    assert_eq!(Arc::strong_count(original), 2);
}

#[test]
fn content_headers_move_out() {
    init_logger();
    let mut headers = sample();
    headers.append("content-disposition", "inline").unwrap();
    headers.append("expires", "0").unwrap();

    let content = headers.remove_content_headers().unwrap();
    let mut moved = content.header_names();
    moved.sort();
    assert_eq!(
        moved,
        vec!["Content-Disposition", "Content-Length", "Content-Type", "Expires"]
    );
    assert_eq!(content.get("content-length"), Some("12"));

    let mut left = headers.header_names();
    left.sort();
    assert_eq!(left, vec!["Accept", "Host", "X-Request-Id"]);
}

#[test]
fn grouped_is_in_conventional_order() {
    let headers = sample();
    let grouped = headers.grouped();
    let names = grouped.iter().map(|x| x.0).collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["Accept", "Host", "Content-Length", "Content-Type", "X-Request-Id"]
    );
    assert_eq!(grouped[0].1.as_slice(), &["text/html", "application/json"]);
}

#[test]
fn iter_yields_every_value() {
    let headers = sample();
    assert_eq!(headers.iter().count(), 6);
    assert_eq!(headers.value_count(), 6);
    let accept = headers
        .iter()
        .filter(|(name, _)| *name == "Accept")
        .filter_map(|(_, value)| value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(accept, vec!["text/html", "application/json"]);
}

#[test]
fn config_is_kept() {
    let mut headers = Headers::with_config(Config::default().with_translate_underscore(false));
    headers.append("x_a", "1").unwrap();
    headers.append("x-a", "2").unwrap();
    assert_eq!(headers.len(), 2);
    assert!(!headers.clone().config().translate_underscore);
}

#[test]
fn literal_names_display_without_marker() {
    let mut headers = Headers::new();
    headers.append(":x_Raw", "1").unwrap();
    assert_eq!(headers.header_names(), vec!["x_Raw"]);
    assert_eq!(headers.get(":x_Raw"), Some("1"));
}

#[test]
fn dump() {
    let headers = sample();
    let mut out = vec![];
    headers.dump(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains(
        "> Name: Accept (accept) [2 values]\n>    1: [text/html]\n>    2: [application/json]\n"
    ));
}

#[cfg(feature = "serde")]
#[test]
fn serializes_grouped() {
    let mut headers = sample();
    headers.append_object("x-object", 5u32).unwrap();
    let json = serde_json::to_string(&headers).unwrap();
    assert_eq!(
        json,
        r#"{"Accept":["text/html","application/json"],"Host":["example.com"],"Content-Length":["12"],"Content-Type":["text/plain"],"X-Object":[],"X-Request-Id":["abc123"]}"#
    );
}

#[cfg(feature = "serde")]
#[test]
fn literal_and_folded_names_serialize_apart() {
    let mut headers = Headers::new();
    headers.append(":Foo", "literal").unwrap();
    headers.append("foo", "folded").unwrap();
    assert_eq!(headers.len(), 2);

    let json = serde_json::to_string(&headers).unwrap();
    assert_eq!(json, r#"{":Foo":["literal"],"Foo":["folded"]}"#);
}
