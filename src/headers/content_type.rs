//! `Content-Type: type "/" subtype *( ";" parameter )`
//!
//! Example: `Content-Type: text/html; charset=ISO-8859-4`

use crate::common_parser::{parse_ows, parse_params_list};

pub struct ContentType {
    pub content_type: String,
    pub charset: Option<String>,
}

pub fn parse(s: &str) -> ContentType {
    let s = parse_ows(s);
    let end = s
        .as_bytes()
        .iter()
        .position(|&b| !(crate::ascii::is_tchar(b) || b == b'/'))
        .unwrap_or(s.len());
    let content_type = s[..end].to_string();

    let mut charset = None;
    for (name, value) in parse_params_list(&s[end..]) {
        if name.eq_ignore_ascii_case("charset") {
            charset = value;
            break;
        }
    }

    ContentType {
        content_type,
        charset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_and_charset() {
        let ct = parse("text/html; charset=ISO-8859-4");
        assert_eq!(ct.content_type, "text/html");
        assert_eq!(ct.charset.as_deref(), Some("ISO-8859-4"));
    }

    #[test]
    fn charset_absent_is_none() {
        let ct = parse("application/json");
        assert_eq!(ct.content_type, "application/json");
        assert_eq!(ct.charset, None);
    }
}
