//! Crate-wide error type.
//!
//! Mirrors the loosely-typed error style used throughout the protocol
//! engine: most call sites just want to bail out with a message, so
//! `err_msg`/`format_err!` exist alongside the structured variants that
//! callers actually need to match on.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed status line")]
    HeaderMissing,

    #[error("framing error: {0}")]
    Framing(String),

    #[error("TLS error: {0}")]
    Tls(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Message(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Message(s)
    }
}

pub fn err_msg(s: impl Into<String>) -> Error {
    Error::Message(s.into())
}

/// A `format_err!`-style constructor, mirroring the ergonomics of the
/// teacher workspace's `common::errors::format_err!`.
#[macro_export]
macro_rules! format_err {
    ($($arg:tt)*) => {
        $crate::error::Error::Message(format!($($arg)*))
    };
}
