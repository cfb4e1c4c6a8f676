//! RFC 2617 `challenge = auth-scheme 1*SP 1#auth-param`

use crate::common_parser::{parse_ows, parse_param, parse_token};
use crate::header::ParamMap;

#[derive(Debug, Clone)]
pub struct Challenge {
    pub auth_scheme: String,
    pub params: ParamMap,
}

pub fn parse(s: &str) -> Challenge {
    let s = parse_ows(s);
    let (mut rest, auth_scheme) = parse_token(s);
    let mut params = ParamMap::new();

    loop {
        let (next, name, value) = parse_param(rest);
        if next.len() == rest.len() && name.is_none() {
            break;
        }
        rest = next;
        if let Some(name) = name {
            params.insert(name, value.unwrap_or(""));
        }

        rest = parse_ows(rest);
        match rest.strip_prefix(',') {
            Some(stripped) => rest = stripped,
            None => break,
        }
        if rest.is_empty() {
            break;
        }
    }

    Challenge {
        auth_scheme: auth_scheme.to_string(),
        params,
    }
}
