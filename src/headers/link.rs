//! `Link: "<" URI-Reference ">" *( ";" link-param )` (RFC 5988/8288)

use crate::common_parser::parse_ows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkRel {
    #[default]
    Unset,
    DescribedBy,
    Duplicate,
}

#[derive(Debug, Clone, Default)]
pub struct Link {
    pub uri: String,
    pub rel: LinkRel,
    pub pri: Option<i64>,
    pub media_type: Option<String>,
}

pub fn parse(s: &str) -> Option<Link> {
    let s = parse_ows(s);
    let s = s.strip_prefix('<')?;
    let end = s.find('>')?;
    let uri = s[..end].to_string();
    let mut rest = parse_ows(&s[end + 1..]);

    let mut link = Link {
        uri,
        ..Default::default()
    };

    while rest.starts_with(';') {
        let (next, name, value) = crate::common_parser::parse_param(rest);
        if next.len() == rest.len() {
            break;
        }
        rest = next;
        if let (Some(name), Some(value)) = (name, value) {
            if name.eq_ignore_ascii_case("rel") {
                if value.eq_ignore_ascii_case("describedby") {
                    link.rel = LinkRel::DescribedBy;
                } else if value.eq_ignore_ascii_case("duplicate") {
                    link.rel = LinkRel::Duplicate;
                }
            } else if name.eq_ignore_ascii_case("pri") {
                link.pri = value.parse().ok();
            } else if name.eq_ignore_ascii_case("type") {
                link.media_type = Some(value.to_string());
            }
        }
        rest = parse_ows(rest);
    }

    Some(link)
}
