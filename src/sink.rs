//! Body destinations (§4.13), grounded in the source's `_get_body`
//! (append to an in-memory buffer) and `_get_file` (stream to an open
//! `FILE*`) callbacks passed into `http_get_response_cb`.

use std::io::{self, Write};

use crate::error::Result;

/// Receives decoded body bytes as they become available.
pub trait Sink {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()>;
}

/// Accumulates the whole body in memory, for callers that need to
/// inspect it afterwards (e.g. to scan the recursion scheduler's
/// `Link` headers) rather than stream it straight to disk.
#[derive(Debug, Default)]
pub struct BufferSink {
    pub buf: Vec<u8>,
}

impl Sink for BufferSink {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(chunk);
        Ok(())
    }
}

/// Streams chunks straight into any `Write` implementor (an open file,
/// stdout, ...) without retaining them.
pub struct WriteSink<W: Write> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        WriteSink { inner }
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.inner.write_all(chunk).map_err(|e: io::Error| e.into())
    }
}
