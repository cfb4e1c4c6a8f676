//! `Content-Encoding: 1#content-coding`

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentEncoding {
    #[default]
    Identity,
    Gzip,
    Deflate,
}

pub fn parse(s: &str) -> ContentEncoding {
    let s = s.trim();
    if s.eq_ignore_ascii_case("gzip") || s.eq_ignore_ascii_case("x-gzip") {
        ContentEncoding::Gzip
    } else if s.eq_ignore_ascii_case("deflate") {
        ContentEncoding::Deflate
    } else {
        ContentEncoding::Identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_gzip_variants() {
        assert_eq!(parse("gzip"), ContentEncoding::Gzip);
        assert_eq!(parse("x-gzip"), ContentEncoding::Gzip);
    }

    #[test]
    fn recognizes_deflate() {
        assert_eq!(parse("deflate"), ContentEncoding::Deflate);
    }

    #[test]
    fn unknown_coding_is_identity() {
        assert_eq!(parse("br"), ContentEncoding::Identity);
    }
}
