//! Drives header/body reading off a connected stream (§4.3/§4.13),
//! grounded in the source's `http_get_response_cb` state machine: grow
//! a scratch buffer 1KiB at a time while scanning for the blank line
//! that ends the header block, then dispatch to chunked, known-length,
//! or read-to-close body framing depending on what the headers said.

use std::io::Read;

use crate::decompress::{self, Decompressor};
use crate::chunked::ChunkedDecoder;
use crate::error::{Error, Result};
use crate::message_parser::parse_response;
use crate::method::Method;
use crate::response::Response;
use crate::sink::Sink;
use crate::status_code::StatusCode;

const GROW_STEP: usize = 1024;
const MAX_HEADER_BYTES: usize = 1 << 20;

/// Reads the status line + header block, then the body (if any, given
/// `method` and the parsed status code), streaming decoded body bytes
/// into `sink`. Returns the populated `Response` (without `body` set;
/// callers that need the raw bytes use a `BufferSink` and inspect it
/// separately). `scratch` is the connection's reusable header-search
/// buffer: it is cleared on entry and its capacity carries over to the
/// next call on the same (keep-alive) connection.
pub fn get_response<R: Read>(stream: &mut R, method: Method, sink: &mut dyn Sink, scratch: &mut Vec<u8>) -> Result<Response> {
    let (mut resp, header_bytes, mut leftover) = read_headers(stream, scratch)?;
    let mut header_buf = crate::buffer::ByteBuffer::new();
    header_buf.append_bytes(&header_bytes);
    resp.header = Some(header_buf);

    let status = StatusCode::from_u16(resp.code);
    let has_no_body = method.never_has_response_body()
        || status.map(|s| s.never_has_body()).unwrap_or(false)
        || (resp.transfer_encoding == crate::headers::TransferEncoding::Identity
            && resp.content_length_valid
            && resp.content_length == 0);

    if has_no_body {
        return Ok(resp);
    }

    let mut decoded = Vec::new();
    {
        let mut decompressor = decompress::for_encoding(resp.content_encoding, &mut decoded);

        if resp.transfer_encoding == crate::headers::TransferEncoding::Chunked {
            read_chunked_body(stream, &mut leftover, decompressor.as_mut())?;
        } else if resp.content_length_valid {
            resp.content_length =
                read_known_length_body(stream, &mut leftover, resp.content_length, decompressor.as_mut())?;
        } else {
            resp.content_length = read_to_close_body(stream, &mut leftover, decompressor.as_mut())?;
        }

        decompressor.finish()?;
    }

    sink.write_chunk(&decoded)?;
    Ok(resp)
}

/// Reads bytes from `stream` into `buf` until the header-terminating
/// blank line is found, growing the buffer 1KiB at a time. Returns the
/// parsed response, the raw header bytes, and whatever body bytes were
/// read past the header terminator in the same read.
fn read_headers<R: Read>(stream: &mut R, buf: &mut Vec<u8>) -> Result<(Response, Vec<u8>, Vec<u8>)> {
    buf.clear();
    let mut searched_up_to = 0usize;

    loop {
        let start = buf.len();
        buf.resize(start + GROW_STEP, 0);
        let n = stream.read(&mut buf[start..])?;
        buf.truncate(start + n);
        if n == 0 {
            return Err(Error::Framing("connection closed before headers completed".into()));
        }
        if buf.len() > MAX_HEADER_BYTES {
            return Err(Error::Framing("response headers exceeded size limit".into()));
        }

        let scan_from = searched_up_to.saturating_sub(3);
        if let Some(rel) = find_subslice(&buf[scan_from..], b"\r\n\r\n") {
            let header_end = scan_from + rel;
            let header_bytes = buf[..header_end].to_vec();
            let leftover = buf[header_end + 4..].to_vec();
            let header_str = String::from_utf8_lossy(&header_bytes);
            let resp = parse_response(&header_str)?;
            return Ok((resp, header_bytes, leftover));
        }
        searched_up_to = buf.len();
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn read_chunked_body<R: Read>(stream: &mut R, leftover: &mut Vec<u8>, decompressor: &mut dyn Decompressor) -> Result<()> {
    let mut decoder = ChunkedDecoder::new();
    let mut pending = std::mem::take(leftover);
    let mut out = Vec::new();

    loop {
        let (consumed, done) = decoder.feed(&pending, &mut out)?;
        if !out.is_empty() {
            decompressor.feed(&out)?;
            out.clear();
        }
        pending.drain(..consumed);
        if done {
            return Ok(());
        }

        let start = pending.len();
        pending.resize(start + GROW_STEP, 0);
        let n = stream.read(&mut pending[start..])?;
        pending.truncate(start + n);
        if n == 0 {
            return Err(Error::Framing("connection closed mid-chunk".into()));
        }
    }
}

/// Reads exactly `content_length` body bytes (already-buffered `leftover`
/// first, then off `stream`), feeding each as it arrives. Returns the byte
/// count actually received, which is `content_length` unless the peer
/// closed early.
fn read_known_length_body<R: Read>(
    stream: &mut R,
    leftover: &mut Vec<u8>,
    content_length: usize,
    decompressor: &mut dyn Decompressor,
) -> Result<usize> {
    let take = leftover.len().min(content_length);
    decompressor.feed(&leftover[..take])?;
    let mut received = take;
    let mut remaining = content_length - take;
    leftover.drain(..take);

    let mut buf = [0u8; GROW_STEP];
    while remaining > 0 {
        let want = remaining.min(buf.len());
        let n = stream.read(&mut buf[..want])?;
        if n == 0 {
            log::warn!(
                "connection closed with {} bytes remaining of a declared Content-Length body",
                remaining
            );
            return Ok(received);
        }
        decompressor.feed(&buf[..n])?;
        received += n;
        remaining -= n;
    }
    Ok(received)
}

/// Reads body bytes until the peer closes the connection. Returns the
/// total byte count fed to `decompressor`.
fn read_to_close_body<R: Read>(stream: &mut R, leftover: &mut Vec<u8>, decompressor: &mut dyn Decompressor) -> Result<usize> {
    let mut received = leftover.len();
    if !leftover.is_empty() {
        decompressor.feed(leftover)?;
        leftover.clear();
    }
    let mut buf = [0u8; GROW_STEP];
    loop {
        let n = stream.read(&mut buf)?;
        if n == 0 {
            return Ok(received);
        }
        decompressor.feed(&buf[..n])?;
        received += n;
    }
}
