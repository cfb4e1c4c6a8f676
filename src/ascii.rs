//! Byte-class predicates used by the token/quoted-string parsers.
//!
//! https://httpwg.org/specs/rfc9110.html#rfc.section.5.6.2

pub fn is_tchar(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

pub fn is_separator(c: u8) -> bool {
    matches!(
        c,
        b'(' | b')'
            | b'<'
            | b'>'
            | b'@'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'"'
            | b'/'
            | b'['
            | b']'
            | b'?'
            | b'='
            | b'{'
            | b'}'
            | b' '
            | b'\t'
    )
}

/// VCHAR: any visible (printing) ASCII character.
pub fn is_vchar(c: u8) -> bool {
    (0x21..=0x7e).contains(&c)
}

pub fn is_sp(c: u8) -> bool {
    c == b' '
}

pub fn is_htab(c: u8) -> bool {
    c == b'\t'
}

pub fn is_ws(c: u8) -> bool {
    is_sp(c) || is_htab(c)
}

/// obs-text: extended ASCII bytes permitted inside quoted-strings and
/// comments by RFC 9110's backward-compatible grammar.
pub fn is_obs_text(c: u8) -> bool {
    c >= 0x80
}

pub fn is_qdtext(c: u8) -> bool {
    c == b'\t' || c == b' ' || c == 0x21 || (0x23..=0x5b).contains(&c) || (0x5d..=0x7e).contains(&c) || is_obs_text(c)
}
