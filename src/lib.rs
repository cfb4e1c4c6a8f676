//! HTTP/1.1 client engine: wire-level parsing and rendering, body
//! framing, authentication, and the scaffolding (worker pool, recursion
//! scheduler, filesystem sink) that turns the engine into a recursive
//! downloader. See `cli`/`main` for the command-line front end.

pub mod ascii;
pub mod auth;
pub mod body_reader;
pub mod buffer;
pub mod chunked;
pub mod cli;
pub mod common_parser;
pub mod connection;
pub mod decompress;
pub mod error;
pub mod fswriter;
pub mod header;
pub mod headers;
pub mod message_parser;
pub mod method;
pub mod proxy;
pub mod recursion;
pub mod request;
pub mod response;
pub mod sink;
pub mod status_code;
pub mod uri;
pub mod worker_pool;
