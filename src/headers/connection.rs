//! `Connection: keep-alive`
use crate::common_parser::parse_ows;

pub fn parse_keep_alive(s: &str) -> bool {
    let s = parse_ows(s);
    let (_, token) = crate::common_parser::parse_token(s);
    token.eq_ignore_ascii_case("keep-alive")
}
