//! Small relaxed-scanning primitives shared by every structured header
//! parser. Each parser takes the remaining input and returns `(rest,
//! value)`, mirroring the teacher's `common_parser.rs`/`header_syntax.rs`
//! split, but the scanning itself stays close to the tolerant,
//! state-machine style of a hand-rolled C parser rather than a
//! parser-combinator grammar: real servers send header values too sloppy
//! for a strict grammar to accept.

use crate::ascii::{is_htab, is_sp, is_tchar};

pub fn parse_ows(s: &str) -> &str {
    s.trim_start_matches(|c| c == ' ' || c == '\t')
}

pub fn parse_rws(s: &str) -> Option<&str> {
    let trimmed = s.trim_start_matches(|c| c == ' ' || c == '\t');
    if trimmed.len() == s.len() {
        None
    } else {
        Some(trimmed)
    }
}

/// `token = 1*tchar`
pub fn parse_token(s: &str) -> (&str, &str) {
    let end = s
        .as_bytes()
        .iter()
        .position(|&b| !is_tchar(b))
        .unwrap_or(s.len());
    (&s[end..], &s[..end])
}

/// Relaxed quoted-string scan matching the source's `http_parse_quoted_string`:
/// honors `\X` as a literal `X`, tolerates an unterminated string by
/// running to end-of-input.
pub fn parse_quoted_string(s: &str) -> (&str, Option<&str>) {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'"') {
        return (s, None);
    }
    let start = 1;
    let mut i = start;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            break;
        } else if bytes[i] == b'\\' && i + 1 < bytes.len() {
            i += 2;
        } else {
            i += 1;
        }
    }
    let value = &s[start..i];
    let rest = if i < bytes.len() && bytes[i] == b'"' {
        &s[i + 1..]
    } else {
        &s[i..]
    };
    (rest, Some(value))
}

/// `generic-param = token [ "=" ( token / quoted-string ) ]`, with an
/// optional leading `;`. Returns `(rest, name, value)`.
pub fn parse_param(s: &str) -> (&str, Option<&str>, Option<&str>) {
    let mut s = parse_ows(s);
    if let Some(stripped) = s.strip_prefix(';') {
        s = parse_ows(stripped);
    }

    let (rest, name) = parse_token(s);
    if name.is_empty() {
        return (rest, None, None);
    }
    let rest = parse_ows(rest);

    if let Some(stripped) = rest.strip_prefix('=') {
        let stripped = parse_ows(stripped);
        if stripped.starts_with('"') {
            let (rest, value) = parse_quoted_string(stripped);
            (rest, Some(name), value)
        } else {
            let (rest, value) = parse_token(stripped);
            (rest, Some(name), Some(value))
        }
    } else {
        (rest, Some(name), None)
    }
}

/// `field-name ":"`, skipping leading blanks and returning the slice
/// after the colon (or end-of-string if none was found).
pub fn parse_name(s: &str) -> (&str, &str) {
    let s = parse_ows(s);
    let (rest, name) = parse_token(s);
    match rest.find(':') {
        Some(idx) => (&rest[idx + 1..], name),
        None => (rest, name),
    }
}

/// Splits a `;`-separated parameter list, yielding `(name, value)` pairs
/// in order, tolerating repeated empty items the way
/// `comma_delimited`/`http_parse_param` loops do.
pub fn parse_params_list(mut s: &str) -> Vec<(String, Option<String>)> {
    let mut out = Vec::new();
    while !s.is_empty() {
        let (rest, name, value) = parse_param(s);
        if rest.len() == s.len() {
            break;
        }
        if let Some(name) = name {
            out.push((name.to_string(), value.map(|v| v.to_string())));
        }
        s = rest;
    }
    out
}

pub fn is_ws_only(s: &str) -> bool {
    s.bytes().all(|b| is_sp(b) || is_htab(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_stops_at_separator() {
        let (rest, tok) = parse_token("keep-alive; foo");
        assert_eq!(tok, "keep-alive");
        assert_eq!(rest, "; foo");
    }

    #[test]
    fn quoted_string_honors_escapes() {
        let (rest, val) = parse_quoted_string("\"a\\\"b\" tail");
        assert_eq!(val, Some("a\\\"b"));
        assert_eq!(rest, " tail");
    }

    #[test]
    fn quoted_string_tolerates_missing_close() {
        let (rest, val) = parse_quoted_string("\"abc");
        assert_eq!(val, Some("abc"));
        assert_eq!(rest, "");
    }

    #[test]
    fn param_with_quoted_value() {
        let (rest, name, value) = parse_param(" ; realm=\"foo bar\"");
        assert_eq!(name, Some("realm"));
        assert_eq!(value, Some("foo bar"));
        assert_eq!(rest, "");
    }

    #[test]
    fn param_without_value() {
        let (_, name, value) = parse_param("secure");
        assert_eq!(name, Some("secure"));
        assert_eq!(value, None);
    }

    #[test]
    fn name_splits_at_colon() {
        let (rest, name) = parse_name("  X-Foo: bar");
        assert_eq!(name, "X-Foo");
        assert_eq!(rest, " bar");
    }

    #[test]
    fn params_list_collects_all_pairs() {
        // An unquoted token value stops at '/' like the rest of the
        // HTTP separator set, matching the source's `http_istoken`; a
        // media type containing '/' must be quoted to survive intact.
        let pairs = parse_params_list("; rel=duplicate; pri=2; type=\"text/html\"");
        assert_eq!(
            pairs,
            vec![
                ("rel".to_string(), Some("duplicate".to_string())),
                ("pri".to_string(), Some("2".to_string())),
                ("type".to_string(), Some("text/html".to_string())),
            ]
        );
    }
}
