//! A minimal URI model: scheme, authority (host/port), path, query.
//! Trimmed from full RFC 3986 resolution (relative-reference
//! resolution is out of scope), since the core only ever needs to pull
//! a host/port/path triple out of an absolute `http(s)://` URL and
//! percent-encode the host/resource for the wire.

use crate::error::{err_msg, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Uri {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub query: Option<String>,
}

impl Uri {
    /// The origin-form target used on the request line: `/path?query`.
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    pub fn authority(&self) -> String {
        if self.port == self.scheme.default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl std::str::FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (scheme_str, rest) = s.split_once("://").ok_or_else(|| err_msg("missing scheme"))?;
        let scheme = match scheme_str.to_ascii_lowercase().as_str() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(err_msg(format!("unsupported scheme '{}'", other))),
        };

        let path_start = rest.find('/').unwrap_or(rest.len());
        let authority = &rest[..path_start];
        let mut path_and_query = &rest[path_start..];
        if path_and_query.is_empty() {
            path_and_query = "/";
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) if !h.is_empty() => (
                h.to_string(),
                p.parse::<u16>().map_err(|_| err_msg("invalid port"))?,
            ),
            _ => (authority.to_string(), scheme.default_port()),
        };
        if host.is_empty() {
            return Err(err_msg("missing host"));
        }

        let (path, query) = match path_and_query.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (path_and_query.to_string(), None),
        };

        Ok(Uri {
            scheme,
            host,
            port,
            path,
            query,
        })
    }
}

/// Percent-encodes bytes outside the unreserved + sub-delims + `:/?#[]@`
/// set, matching the conservative escaping the source's IRI utilities
/// perform on host and resource components.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b'/' | b':' | b'?' | b'#' | b'[' | b']' | b'@' | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' | b'%') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_plain_http_uri() {
        let uri = Uri::from_str("http://example.com/a/b?c=1").unwrap();
        assert_eq!(uri.scheme, Scheme::Http);
        assert_eq!(uri.host, "example.com");
        assert_eq!(uri.port, 80);
        assert_eq!(uri.path, "/a/b");
        assert_eq!(uri.query.as_deref(), Some("c=1"));
    }

    #[test]
    fn parses_explicit_port() {
        let uri = Uri::from_str("https://example.com:8443/x").unwrap();
        assert_eq!(uri.port, 8443);
        assert_eq!(uri.authority(), "example.com:8443");
    }

    #[test]
    fn default_port_omitted_from_authority() {
        let uri = Uri::from_str("http://example.com/x").unwrap();
        assert_eq!(uri.authority(), "example.com");
    }

    #[test]
    fn empty_path_defaults_to_slash() {
        let uri = Uri::from_str("http://example.com").unwrap();
        assert_eq!(uri.path, "/");
    }

    #[test]
    fn rejects_unsupported_scheme() {
        assert!(Uri::from_str("ftp://example.com/").is_err());
    }

    #[test]
    fn percent_encode_escapes_space() {
        assert_eq!(percent_encode("a b"), "a%20b");
    }
}
