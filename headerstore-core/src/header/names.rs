use std::collections::HashMap;

use lazy_static::lazy_static;

/// Order assigned to names outside the standard registry, so they sort after every standard
/// header.
pub const NON_STANDARD_ORDER: u16 = 999;

/// The RFC 2616 category a standard header belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum HeaderClass {
    General,
    Request,
    Response,
    Entity,
}

impl HeaderClass {
    fn from_order(order: u16) -> Option<Self> {
        match order / 100 {
            1 => Some(HeaderClass::General),
            2 => Some(HeaderClass::Request),
            3 => Some(HeaderClass::Response),
            4 => Some(HeaderClass::Entity),
            _ => None,
        }
    }
}

/// A header from the standard registry, with its conventional spelling and sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StandardHeader {
    pub order: u16,
    pub name: &'static str,
}

static STANDARD_HEADERS: [StandardHeader; 47] = [
    StandardHeader::new(100, "Cache-Control"),
    StandardHeader::new(101, "Connection"),
    StandardHeader::new(102, "Date"),
    StandardHeader::new(103, "Pragma"),
    StandardHeader::new(104, "Trailer"),
    StandardHeader::new(105, "Transfer-Encoding"),
    StandardHeader::new(106, "Upgrade"),
    StandardHeader::new(107, "Via"),
    StandardHeader::new(108, "Warning"),
    StandardHeader::new(200, "Accept"),
    StandardHeader::new(201, "Accept-Charset"),
    StandardHeader::new(202, "Accept-Encoding"),
    StandardHeader::new(203, "Accept-Language"),
    StandardHeader::new(204, "Authorization"),
    StandardHeader::new(205, "Expect"),
    StandardHeader::new(206, "From"),
    StandardHeader::new(207, "Host"),
    StandardHeader::new(208, "If-Match"),
    StandardHeader::new(209, "If-Modified-Since"),
    StandardHeader::new(210, "If-None-Match"),
    StandardHeader::new(211, "If-Range"),
    StandardHeader::new(212, "If-Unmodified-Since"),
    StandardHeader::new(213, "Max-Forwards"),
    StandardHeader::new(214, "Proxy-Authorization"),
    StandardHeader::new(215, "Range"),
    StandardHeader::new(216, "Referer"),
    StandardHeader::new(217, "TE"),
    StandardHeader::new(218, "User-Agent"),
    StandardHeader::new(300, "Accept-Ranges"),
    StandardHeader::new(301, "Age"),
    StandardHeader::new(302, "ETag"),
    StandardHeader::new(303, "Location"),
    StandardHeader::new(304, "Proxy-Authenticate"),
    StandardHeader::new(305, "Retry-After"),
    StandardHeader::new(306, "Server"),
    StandardHeader::new(307, "Vary"),
    StandardHeader::new(308, "WWW-Authenticate"),
    StandardHeader::new(400, "Allow"),
    StandardHeader::new(401, "Content-Encoding"),
    StandardHeader::new(402, "Content-Language"),
    StandardHeader::new(403, "Content-Length"),
    StandardHeader::new(404, "Content-Location"),
    StandardHeader::new(405, "Content-MD5"),
    StandardHeader::new(406, "Content-Range"),
    StandardHeader::new(407, "Content-Type"),
    StandardHeader::new(408, "Expires"),
    StandardHeader::new(409, "Last-Modified"),
];

lazy_static! {
    static ref BY_KEY: HashMap<String, &'static StandardHeader> = STANDARD_HEADERS
        .iter()
        .map(|header| (lookup_key(header.name), header))
        .collect();
}

// lowercase, with '_' and '-' equivalent
fn lookup_key(name: &str) -> String {
    name.chars()
        .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
        .collect()
}

impl StandardHeader {
    const fn new(order: u16, name: &'static str) -> Self {
        Self { order, name }
    }

    /// Finds `name` in the registry, ignoring case and treating `_` like `-`.
    pub fn lookup(name: &str) -> Option<&'static StandardHeader> {
        BY_KEY.get(&lookup_key(name)).copied()
    }

    pub fn all() -> &'static [StandardHeader] {
        &STANDARD_HEADERS
    }

    pub fn class(&self) -> HeaderClass {
        HeaderClass::from_order(self.order).unwrap_or(HeaderClass::General)
    }
}

/// Sort order of `name`: its registry order, or [`NON_STANDARD_ORDER`].
pub fn header_order(name: &str) -> u16 {
    StandardHeader::lookup(name)
        .map(|header| header.order)
        .unwrap_or(NON_STANDARD_ORDER)
}

/// Class of `name`, if it is a standard header.
pub fn header_class(name: &str) -> Option<HeaderClass> {
    StandardHeader::lookup(name).map(StandardHeader::class)
}

/// Whether `name` describes the entity body: a standard entity header, or any non-standard
/// `Content-*` header.
pub fn is_entity(name: &str) -> bool {
    match header_class(name) {
        Some(class) => class == HeaderClass::Entity,
        None => name
            .get(..8)
            .map(|prefix| prefix.eq_ignore_ascii_case("content-"))
            .unwrap_or(false),
    }
}
