use http::header::ToStrError;
use thiserror::Error;

pub type Result<T, E = HeadersError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum HeadersError {
    #[error("{0}")]
    Store(#[from] headerstore_core::Error),
    #[error("header value not utf8: '{0}'")]
    Utf8(#[from] ToStrError),
    #[error("invalid http header name: '{0}'")]
    InvalidName(String),
    #[error("invalid http header value for '{0}'")]
    InvalidValue(String),
}
