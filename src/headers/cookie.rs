//! RFC 6265 `Set-Cookie: name "=" value *( ";" cookie-av )`

use chrono::{DateTime, Duration, Utc};

use crate::common_parser::parse_token;
use crate::headers::date::parse_http_date;

#[derive(Debug, Clone, Default)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub maxage: Option<DateTime<Utc>>,
    pub domain: Option<String>,
    pub domain_dot: bool,
    pub path: Option<String>,
    pub secure_only: bool,
    pub http_only: bool,
}

impl Cookie {
    /// RFC 6265 precedence: `Max-Age` wins over `Expires` when both are
    /// present (Open Question, resolved — the source stores both
    /// independently without adjudicating).
    pub fn effective_expiry(&self) -> Option<DateTime<Utc>> {
        self.maxage.or(self.expires)
    }
}

fn is_cookie_octet(b: u8) -> bool {
    b > 32 && b <= 126 && b != b'\\' && b != b',' && b != b';' && b != b'"'
}

fn take_while_cookie_octet(s: &str) -> (&str, &str) {
    let end = s
        .as_bytes()
        .iter()
        .position(|&b| !is_cookie_octet(b))
        .unwrap_or(s.len());
    (&s[end..], &s[..end])
}

/// `now` is injected by the caller (the header parser doesn't own a
/// clock); this keeps the parser itself deterministic and testable.
pub fn parse(s: &str, now: DateTime<Utc>) -> Option<Cookie> {
    let s = s.trim_start();
    let (rest, name) = parse_token(s);
    let rest = rest.trim_start();

    if name.is_empty() || !rest.starts_with('=') {
        return None;
    }

    let mut cookie = Cookie {
        name: name.to_string(),
        ..Default::default()
    };

    let mut rest = rest[1..].trim_start();
    if let Some(stripped) = rest.strip_prefix('"') {
        rest = stripped;
    }
    let (rest_after_value, value) = take_while_cookie_octet(rest);
    cookie.value = value.to_string();
    let mut rest = rest_after_value;

    loop {
        let semi = match rest.find(';') {
            Some(idx) => idx,
            None => break,
        };
        rest = rest[semi + 1..].trim_start();

        let (after_name, av_name) = parse_token(rest);
        if av_name.is_empty() {
            continue;
        }

        let after_name_trimmed = after_name;
        if let Some(stripped) = after_name_trimmed.strip_prefix('=') {
            let (tail, av_value) = take_while_cookie_octet(stripped);
            rest = tail;

            if av_name.eq_ignore_ascii_case("expires") {
                cookie.expires = parse_http_date(av_value);
            } else if av_name.eq_ignore_ascii_case("max-age") {
                if let Ok(offset) = av_value.parse::<i64>() {
                    cookie.maxage = if offset > 0 {
                        Some(now + Duration::seconds(offset))
                    } else {
                        Some(now - Duration::seconds(1))
                    };
                }
            } else if av_name.eq_ignore_ascii_case("domain") {
                if !av_value.is_empty() {
                    let stripped = av_value.trim_start_matches('.');
                    cookie.domain_dot = stripped.len() != av_value.len();
                    cookie.domain = Some(stripped.to_string());
                }
            } else if av_name.eq_ignore_ascii_case("path") {
                cookie.path = Some(av_value.to_string());
            }
        } else if av_name.eq_ignore_ascii_case("secure") {
            cookie.secure_only = true;
            rest = after_name_trimmed;
        } else if av_name.eq_ignore_ascii_case("httponly") {
            cookie.http_only = true;
            rest = after_name_trimmed;
        } else {
            log::debug!("Unsupported cookie-av '{}'", av_name);
            rest = after_name_trimmed;
        }
    }

    Some(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn parses_attributes() {
        let cookie = parse(
            "sid=abc; Domain=.example.com; Path=/; Max-Age=60; Secure; HttpOnly",
            now(),
        )
        .unwrap();
        assert_eq!(cookie.name, "sid");
        assert_eq!(cookie.value, "abc");
        assert_eq!(cookie.domain.as_deref(), Some("example.com"));
        assert!(cookie.domain_dot);
        assert_eq!(cookie.path.as_deref(), Some("/"));
        assert_eq!(cookie.maxage, Some(now() + Duration::seconds(60)));
        assert!(cookie.secure_only);
        assert!(cookie.http_only);
    }

    #[test]
    fn no_name_or_assignment_is_none() {
        assert!(parse("  ", now()).is_none());
        assert!(parse("justname", now()).is_none());
    }

    #[test]
    fn max_age_wins_over_expires() {
        let cookie = parse(
            "sid=abc; Expires=Wed, 09 Jun 2021 10:18:14 GMT; Max-Age=60",
            now(),
        )
        .unwrap();
        assert_eq!(cookie.effective_expiry(), cookie.maxage);
        assert_ne!(cookie.effective_expiry(), cookie.expires);
    }

    #[test]
    fn domain_without_leading_dot() {
        let cookie = parse("sid=abc; Domain=example.com", now()).unwrap();
        assert_eq!(cookie.domain.as_deref(), Some("example.com"));
        assert!(!cookie.domain_dot);
    }
}
