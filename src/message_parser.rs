//! Drives the header-value parsers (§4.2) over a complete header block
//! to build a `Response` (§4.3).

use chrono::Utc;

use crate::common_parser::parse_name;
use crate::error::{err_msg, Result};
use crate::headers;
use crate::response::Response;

/// Splits off the status line and the following logical header lines
/// (joining folded continuations), parses each, and returns a
/// populated `Response`. `buf` must contain the full header block
/// (no trailing `\r\n\r\n` required).
pub fn parse_response(buf: &str) -> Result<Response> {
    let mut lines = buf.split('\n');
    let status_line = lines.next().ok_or_else(err_missing)?;
    let mut resp = parse_status_line(status_line)?;

    for line in join_folded_lines(lines) {
        apply_header_line(&mut resp, &line);
    }

    // Workaround for broken server configurations that mislabel an
    // already-gzipped file as gzip-encoded `application/x-gzip`.
    if resp.content_encoding == headers::ContentEncoding::Gzip
        && resp.content_type.as_deref() == Some("application/x-gzip")
    {
        log::debug!("Broken server configuration gzip workaround triggered");
        resp.content_encoding = headers::ContentEncoding::Identity;
    }

    Ok(resp)
}

fn err_missing() -> crate::error::Error {
    crate::error::Error::HeaderMissing
}

/// Joins a multi-line header-value whose continuation lines start with
/// whitespace into a single logical line, replacing the fold with a
/// single space (the source overwrites the CR/LF of the fold with
/// spaces in place; here a fresh owned `String` is built instead).
pub fn join_folded_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in lines {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if raw.is_empty() {
            continue;
        }
        if (raw.starts_with(' ') || raw.starts_with('\t')) && !out.is_empty() {
            let last = out.last_mut().unwrap();
            last.push(' ');
            last.push_str(raw.trim_start());
            continue;
        }
        out.push(raw.to_string());
    }
    out
}

fn parse_status_line(line: &str) -> Result<Response> {
    let line = line.trim_start();
    let rest = line.strip_prefix("HTTP/").ok_or_else(err_missing)?;
    let (version, rest) = rest.split_once(' ').ok_or_else(err_missing)?;
    let (major_s, minor_s) = version.split_once('.').ok_or_else(err_missing)?;
    let major: u16 = major_s.parse().map_err(|_| err_missing())?;
    let minor: u16 = minor_s.parse().map_err(|_| err_missing())?;

    let rest = rest.trim_start();
    let (code_s, reason) = match rest.split_once(' ') {
        Some((c, r)) => (c, r),
        None => (rest, ""),
    };
    let code: u16 = code_s.parse().map_err(|_| err_missing())?;
    let reason: String = reason.chars().take(31).collect();

    Ok(Response {
        major,
        minor,
        code,
        reason,
        ..Default::default()
    })
}

fn apply_header_line(resp: &mut Response, line: &str) {
    let (value, name) = parse_name(line);
    let name = name.chars().take(31).collect::<String>();

    if name.eq_ignore_ascii_case("Location") && resp.is_redirect() {
        resp.location = Some(value.trim_start().split_whitespace().next().unwrap_or("").to_string());
    } else if name.eq_ignore_ascii_case("Link") && resp.is_redirect() {
        if let Some(link) = headers::link::parse(value) {
            resp.links.push(link);
        }
    } else if name.eq_ignore_ascii_case("Digest") {
        resp.digests.push(headers::digest::parse(value));
    } else if name.eq_ignore_ascii_case("Transfer-Encoding") {
        resp.transfer_encoding = headers::transfer_encoding::parse(value);
    } else if name.eq_ignore_ascii_case("Content-Encoding") {
        resp.content_encoding = headers::content_encoding::parse(value);
    } else if name.eq_ignore_ascii_case("Content-Type") {
        let ct = headers::content_type::parse(value);
        resp.content_type = Some(ct.content_type);
        resp.content_type_charset = ct.charset;
    } else if name.eq_ignore_ascii_case("Content-Length") {
        if let Ok(len) = value.trim().parse::<usize>() {
            resp.content_length = len;
            resp.content_length_valid = true;
        }
    } else if name.eq_ignore_ascii_case("Connection") {
        resp.keep_alive = headers::connection::parse_keep_alive(value);
    } else if name.eq_ignore_ascii_case("Last-Modified") {
        resp.last_modified = headers::date::parse_http_date(value.trim());
    } else if name.eq_ignore_ascii_case("Set-Cookie") {
        if let Some(cookie) = headers::cookie::parse(value, Utc::now()) {
            resp.cookies.push(cookie);
        }
    } else if name.eq_ignore_ascii_case("WWW-Authenticate") || name.eq_ignore_ascii_case("Proxy-Authenticate") {
        resp.challenges.push(headers::challenge::parse(value));
    } else {
        log::debug!("Ignoring unrecognized header '{}'", name);
    }
}

/// Returns the trimmed name for testing/reuse outside the response
/// parser (e.g. by a future trailer-header consumer).
pub fn header_name(line: &str) -> &str {
    parse_name(line).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_status_line_and_headers() {
        let resp = parse_response("HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: keep-alive\r\n").unwrap();
        assert_eq!(resp.code, 200);
        assert_eq!(resp.major, 1);
        assert_eq!(resp.minor, 1);
        assert_eq!(resp.content_length, 5);
        assert!(resp.content_length_valid);
        assert!(resp.keep_alive);
    }

    #[test]
    fn redirect_with_location_and_link() {
        let resp = parse_response(
            "HTTP/1.1 302 Found\r\nLocation: /next\r\nLink: <http://a/b>; rel=duplicate; pri=2\r\n",
        )
        .unwrap();
        assert_eq!(resp.location.as_deref(), Some("/next"));
        assert_eq!(resp.links.len(), 1);
        assert_eq!(resp.links[0].uri, "http://a/b");
        assert_eq!(resp.links[0].pri, Some(2));
    }

    #[test]
    fn folded_header_line_joins_with_space() {
        let joined = join_folded_lines("X-Foo: a\r\n b c\r\n".split('\n'));
        assert_eq!(joined, vec!["X-Foo: a  b c".to_string()]);
        let (value, name) = parse_name(&joined[0]);
        assert_eq!(name, "X-Foo");
        assert_eq!(value.trim(), "a  b c");
    }

    #[test]
    fn malformed_status_line_is_error() {
        assert!(parse_response("not a status line\r\n").is_err());
    }

    #[test]
    fn gzip_mislabeled_as_x_gzip_reverts_to_identity() {
        let resp = parse_response(
            "HTTP/1.1 200 OK\r\nContent-Encoding: gzip\r\nContent-Type: application/x-gzip\r\n",
        )
        .unwrap();
        assert_eq!(resp.content_encoding, headers::ContentEncoding::Identity);
    }
}
