use chrono::{DateTime, Utc};

use crate::buffer::ByteBuffer;
use crate::headers::{Challenge, ContentEncoding, Cookie, DigestHeader, Link, TransferEncoding};

#[derive(Debug, Clone, Default)]
pub struct Response {
    pub major: u16,
    pub minor: u16,
    pub code: u16,
    pub reason: String,

    pub transfer_encoding: TransferEncoding,
    pub content_encoding: ContentEncoding,
    pub content_length: usize,
    pub content_length_valid: bool,
    pub keep_alive: bool,
    pub last_modified: Option<DateTime<Utc>>,
    pub content_type: Option<String>,
    pub content_type_charset: Option<String>,
    pub location: Option<String>,

    pub cookies: Vec<Cookie>,
    pub links: Vec<Link>,
    pub digests: Vec<DigestHeader>,
    pub challenges: Vec<Challenge>,

    pub header: Option<ByteBuffer>,
    pub body: Option<ByteBuffer>,
}

impl Response {
    pub fn is_redirect(&self) -> bool {
        self.code / 100 == 3
    }
}
