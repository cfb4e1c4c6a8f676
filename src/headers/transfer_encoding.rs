//! `Transfer-Encoding: 1#transfer-coding`
//!
//! Resolved per the byte-compatibility Open Question: the *entire*
//! value is compared case-insensitively to `identity`; anything else
//! (including a coincidental `gzip, chunked`) is treated as chunked.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferEncoding {
    #[default]
    Identity,
    Chunked,
}

pub fn parse(s: &str) -> TransferEncoding {
    let s = s.trim();
    if s.eq_ignore_ascii_case("identity") {
        TransferEncoding::Identity
    } else {
        TransferEncoding::Chunked
    }
}
