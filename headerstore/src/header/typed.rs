use headers::HeaderValue;

use crate::typed_headers::Header as HttpHeader;
use crate::{HeadersError, Result};

use super::Headers;

pub trait TypedHeader {
    fn name() -> &'static str;

    fn encode(&self, headers: &mut Headers) -> Result<()>;

    fn encode_to_string(&self) -> Result<Vec<String>> {
        let mut out = Headers::default();
        self.encode(&mut out)?;
        Ok(out
            .iter()
            .filter_map(|(_, value)| value.as_str().map(str::to_string))
            .collect())
    }

    fn decode<'a>(
        values: impl Iterator<Item = &'a str>,
    ) -> Result<Self, crate::typed_headers::Error>
    where
        Self: Sized;
}

impl<H: HttpHeader> TypedHeader for H {
    fn name() -> &'static str {
        <Self as HttpHeader>::name().as_str()
    }

    fn encode(&self, headers: &mut Headers) -> Result<()> {
        let mut values: Vec<HeaderValue> = vec![];
        <Self as HttpHeader>::encode(self, &mut values);
        for value in values {
            let value = value.to_str().map_err(HeadersError::Utf8)?;
            headers.append(<Self as TypedHeader>::name(), value)?;
        }
        Ok(())
    }

    fn decode<'a>(
        values: impl Iterator<Item = &'a str>,
    ) -> Result<Self, crate::typed_headers::Error> {
        // values that are not valid header values cannot decode to anything
        let values = values
            .filter_map(|value| HeaderValue::from_str(value).ok())
            .collect::<Vec<_>>();
        <Self as HttpHeader>::decode(&mut values.iter())
    }
}
