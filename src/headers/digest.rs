//! RFC 3230 `Digest: digest-algorithm "=" <encoded digest output>`

use crate::common_parser::{parse_ows, parse_quoted_string, parse_token};

#[derive(Debug, Clone)]
pub struct DigestHeader {
    pub algorithm: String,
    pub encoded_digest: String,
}

pub fn parse(s: &str) -> DigestHeader {
    let s = parse_ows(s);
    let (rest, algorithm) = parse_token(s);
    let rest = parse_ows(rest);

    let encoded_digest = if let Some(stripped) = rest.strip_prefix('=') {
        let stripped = parse_ows(stripped);
        if stripped.starts_with('"') {
            parse_quoted_string(stripped).1.unwrap_or("").to_string()
        } else {
            let end = stripped
                .as_bytes()
                .iter()
                .position(|&b| b == b' ' || b == b'\t' || b == b',' || b == b';')
                .unwrap_or(stripped.len());
            stripped[..end].to_string()
        }
    } else {
        String::new()
    };

    DigestHeader {
        algorithm: algorithm.to_string(),
        encoded_digest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unquoted_digest() {
        let d = parse("SHA-256=abcdef");
        assert_eq!(d.algorithm, "SHA-256");
        assert_eq!(d.encoded_digest, "abcdef");
    }

    #[test]
    fn parses_quoted_digest() {
        let d = parse("md5=\"YWJj\"");
        assert_eq!(d.algorithm, "md5");
        assert_eq!(d.encoded_digest, "YWJj");
    }
}
