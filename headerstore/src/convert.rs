use http::{HeaderName, HeaderValue};

use crate::{Headers, HeadersError};

impl TryFrom<http::HeaderMap> for Headers {
    type Error = HeadersError;

    fn try_from(value: http::HeaderMap) -> Result<Self, Self::Error> {
        let mut out = Self::new();
        let mut last_header_name = None::<HeaderName>;
        for (name, value) in value.into_iter() {
            if let Some(name) = name {
                last_header_name = Some(name);
            }
            // the first item of a HeaderMap always carries its name
            let Some(name) = &last_header_name else {
                continue;
            };
            out.append(name.as_str(), value.to_str()?)?;
        }
        Ok(out)
    }
}

/// String values become http header values; object values have no wire form and are skipped.
///
/// Literal names lose their marker, so `:Foo` and `foo` end up as values of the same http header.
impl TryFrom<&Headers> for http::HeaderMap {
    type Error = HeadersError;

    fn try_from(value: &Headers) -> Result<Self, Self::Error> {
        let mut out = http::HeaderMap::with_capacity(value.len());
        for (name, value) in value.iter() {
            let Some(value) = value.as_str() else {
                continue;
            };
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HeadersError::InvalidName(name.to_string()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| HeadersError::InvalidValue(name.to_string()))?;
            out.append(header_name, header_value);
        }
        Ok(out)
    }
}

impl TryFrom<Headers> for http::HeaderMap {
    type Error = HeadersError;

    fn try_from(value: Headers) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}
