//! Streaming decompressors for `Content-Encoding` (§4.13 in the source's
//! terms: the body-reading loop feeds raw bytes through one of these as
//! they arrive, rather than buffering the whole body first).

use std::io::Write;

use flate2::write::{DeflateDecoder, GzDecoder};

use crate::error::{Error, Result};
use crate::headers::ContentEncoding;

/// A push-style decompressor: bytes arrive via `feed` as they're read
/// off the wire, and decoded output accumulates in `sink`.
pub trait Decompressor {
    fn feed(&mut self, chunk: &[u8]) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

pub struct Identity<'a> {
    sink: &'a mut Vec<u8>,
}

impl<'a> Identity<'a> {
    pub fn new(sink: &'a mut Vec<u8>) -> Self {
        Identity { sink }
    }
}

impl<'a> Decompressor for Identity<'a> {
    fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        self.sink.extend_from_slice(chunk);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct Gzip<'a> {
    decoder: GzDecoder<&'a mut Vec<u8>>,
}

impl<'a> Gzip<'a> {
    pub fn new(sink: &'a mut Vec<u8>) -> Self {
        Gzip {
            decoder: GzDecoder::new(sink),
        }
    }
}

impl<'a> Decompressor for Gzip<'a> {
    fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        self.decoder
            .write_all(chunk)
            .map_err(|e| Error::Framing(format!("gzip decode failed: {}", e)))
    }

    fn finish(&mut self) -> Result<()> {
        self.decoder
            .try_finish()
            .map_err(|e| Error::Framing(format!("gzip stream did not finish cleanly: {}", e)))
    }
}

pub struct Deflate<'a> {
    decoder: DeflateDecoder<&'a mut Vec<u8>>,
}

impl<'a> Deflate<'a> {
    pub fn new(sink: &'a mut Vec<u8>) -> Self {
        Deflate {
            decoder: DeflateDecoder::new(sink),
        }
    }
}

impl<'a> Decompressor for Deflate<'a> {
    fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        self.decoder
            .write_all(chunk)
            .map_err(|e| Error::Framing(format!("deflate decode failed: {}", e)))
    }

    fn finish(&mut self) -> Result<()> {
        self.decoder
            .try_finish()
            .map_err(|e| Error::Framing(format!("deflate stream did not finish cleanly: {}", e)))
    }
}

/// Builds the right decompressor for `encoding`, writing into `sink`.
pub fn for_encoding<'a>(encoding: ContentEncoding, sink: &'a mut Vec<u8>) -> Box<dyn Decompressor + 'a> {
    match encoding {
        ContentEncoding::Identity => Box::new(Identity::new(sink)),
        ContentEncoding::Gzip => Box::new(Gzip::new(sink)),
        ContentEncoding::Deflate => Box::new(Deflate::new(sink)),
    }
}
