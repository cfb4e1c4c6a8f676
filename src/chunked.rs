//! Chunked transfer-coding decoder (RFC 7230 §4.1), grounded in the
//! source's chunked loop inside `http_get_response_cb`.
//!
//! Unlike the source (which tolerates a bare `\n` after a chunk size
//! when the read straddles a buffer boundary), this decoder requires a
//! strict `\r\n` after both the chunk-size line and each chunk's data
//! (§11 Open Question: resolved toward strictness). It still handles
//! the chunk header or trailing CRLF arriving split across two reads,
//! by returning `Need::MoreData` instead of erroring on a short input.

use crate::error::{Error, Result};

#[derive(Debug, PartialEq, Eq)]
pub enum Need {
    /// Not enough bytes buffered yet to make progress; caller should
    /// read more from the connection and call `feed` again with the
    /// grown buffer.
    MoreData,
    /// The final `0`-size chunk and trailer block were consumed;
    /// `consumed` bytes at the front of the input were the whole
    /// encoded body including the terminating CRLF after trailers.
    Done { consumed: usize },
}

/// Decoder state across calls to `feed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ChunkHeader,
    ChunkData { remaining: usize },
    ChunkTrailerCrlf,
    TrailerLines,
}

pub struct ChunkedDecoder {
    state: State,
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        ChunkedDecoder {
            state: State::ChunkHeader,
        }
    }
}

impl ChunkedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes as much of `input` as forms complete chunked framing,
    /// appending decoded payload bytes to `out`. Returns how many bytes
    /// of `input` were consumed and whether decoding is finished.
    pub fn feed(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(usize, bool)> {
        let mut pos = 0;
        loop {
            match self.state {
                State::ChunkHeader => {
                    match find_crlf(&input[pos..]) {
                        None => return Ok((pos, false)),
                        Some(line_len) => {
                            let line = &input[pos..pos + line_len];
                            let size = parse_chunk_size(line)?;
                            pos += line_len + 2;
                            self.state = if size == 0 {
                                State::TrailerLines
                            } else {
                                State::ChunkData { remaining: size }
                            };
                        }
                    }
                }
                State::ChunkData { remaining } => {
                    let available = input.len() - pos;
                    if available == 0 {
                        return Ok((pos, false));
                    }
                    let take = remaining.min(available);
                    out.extend_from_slice(&input[pos..pos + take]);
                    pos += take;
                    let remaining = remaining - take;
                    if remaining > 0 {
                        self.state = State::ChunkData { remaining };
                        return Ok((pos, false));
                    }
                    self.state = State::ChunkTrailerCrlf;
                }
                State::ChunkTrailerCrlf => {
                    if input.len() - pos < 2 {
                        return Ok((pos, false));
                    }
                    if &input[pos..pos + 2] != b"\r\n" {
                        return Err(Error::Framing("missing CRLF after chunk data".into()));
                    }
                    pos += 2;
                    self.state = State::ChunkHeader;
                }
                State::TrailerLines => match find_crlf(&input[pos..]) {
                    None => return Ok((pos, false)),
                    Some(0) => {
                        pos += 2;
                        return Ok((pos, true));
                    }
                    Some(line_len) => {
                        pos += line_len + 2;
                    }
                },
            }
        }
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

fn parse_chunk_size(line: &[u8]) -> Result<usize> {
    let hex_end = line
        .iter()
        .position(|&b| b == b';')
        .unwrap_or(line.len());
    let hex = std::str::from_utf8(&line[..hex_end])
        .map_err(|_| Error::Framing("chunk size is not valid UTF-8".into()))?
        .trim();
    if hex.is_empty() {
        return Err(Error::Framing("empty chunk size".into()));
    }
    usize::from_str_radix(hex, 16).map_err(|_| Error::Framing(format!("invalid chunk size '{}'", hex)))
}
