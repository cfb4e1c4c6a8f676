//! A single HTTP(S) connection, grounded in the source's
//! `http_open`/`http_send_request`/`http_get_response_cb`/`http_close`
//! quartet: one `Connection` wraps one socket and is reused across
//! requests while the server keeps it alive (§5 concurrency model:
//! each worker thread owns exactly one `Connection` at a time).

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};

use crate::body_reader;
use crate::buffer::ByteBuffer;
use crate::error::{err_msg, Error, Result};
use crate::method::Method;
use crate::proxy::{self, ProxyConfig};
use crate::request::Request;
use crate::response::Response;
use crate::sink::Sink;
use crate::uri::{Scheme, Uri};

enum Stream {
    Plain(TcpStream),
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Stream::Plain(s) => s.read(buf),
            Stream::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Stream::Plain(s) => s.write(buf),
            Stream::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Stream::Plain(s) => s.flush(),
            Stream::Tls(s) => s.flush(),
        }
    }
}

const SCRATCH_CAPACITY: usize = 100 * 1024;

pub struct Connection {
    stream: Stream,
    use_proxy: bool,
    pub keep_alive: bool,
    /// Reused across `get_response` calls on this connection so a
    /// keep-alive sequence of requests doesn't reallocate its
    /// header-search buffer every time.
    scratch: Vec<u8>,
}

fn tls_config() -> Arc<ClientConfig> {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(webpki_roots::TLS_SERVER_ROOTS.iter().map(|ta| {
        rustls::OwnedTrustAnchor::from_subject_spki_name_constraints(ta.subject, ta.spki, ta.name_constraints)
    }));
    Arc::new(
        ClientConfig::builder()
            .with_safe_defaults()
            .with_root_certificates(roots)
            .with_no_client_auth(),
    )
}

impl Connection {
    /// Opens a TCP (and, for `https`, TLS) connection to `target`,
    /// transparently routing through the process-wide proxy
    /// configuration unless `target`'s host is in the `no_proxy` list.
    pub fn open(target: &Uri) -> Result<Self> {
        let cfg = proxy::current();
        Self::open_with_proxy(target, &cfg)
    }

    pub fn open_with_proxy(target: &Uri, cfg: &ProxyConfig) -> Result<Self> {
        let proxied = cfg.proxy_for(target).cloned();
        let (connect_host, connect_port) = match &proxied {
            Some(p) => (p.host.clone(), p.port),
            None => (target.host.clone(), target.port),
        };

        let mut tcp = TcpStream::connect((connect_host.as_str(), connect_port))?;

        let is_https = matches!(target.scheme, Scheme::Https);
        let tunneled_through_proxy = proxied.is_some() && is_https;
        if tunneled_through_proxy {
            tunnel_connect(&mut tcp, &target.host, target.port)?;
        }

        let stream = if is_https {
            let server_name = target
                .host
                .clone()
                .try_into()
                .map_err(|_| Error::Tls(format!("invalid DNS name '{}'", target.host)))?;
            let conn = ClientConnection::new(tls_config(), server_name)
                .map_err(|e| Error::Tls(e.to_string()))?;
            Stream::Tls(Box::new(StreamOwned::new(conn, tcp)))
        } else {
            Stream::Plain(tcp)
        };

        Ok(Connection {
            stream,
            // An HTTPS request tunneled via CONNECT sends a normal
            // origin-form request once the tunnel is up; only a plain
            // proxied HTTP request uses absolute-form + Proxy-Connection.
            use_proxy: proxied.is_some() && !tunneled_through_proxy,
            keep_alive: true,
            scratch: Vec::with_capacity(SCRATCH_CAPACITY),
        })
    }

    pub fn send_request(&mut self, request: &Request) -> Result<()> {
        let mut buf = ByteBuffer::new();
        request.render(&mut buf, self.use_proxy);
        self.stream.write_all(buf.as_bytes())?;
        self.stream.flush()?;
        Ok(())
    }

    pub fn get_response(&mut self, method: Method, sink: &mut dyn Sink) -> Result<Response> {
        let resp = body_reader::get_response(&mut self.stream, method, sink, &mut self.scratch)?;
        self.keep_alive = resp.keep_alive && resp.minor >= 1;
        Ok(resp)
    }

    pub fn close(self) {
        // `Stream`'s `Drop` (via `TcpStream`/`StreamOwned`) closes the
        // socket; nothing else is owned by a `Connection`.
    }
}

/// Issues a `CONNECT host:port` request over `tcp` and blocks until the
/// proxy's status line confirms the tunnel is up, per RFC 7231 §4.3.6.
fn tunnel_connect(tcp: &mut TcpStream, host: &str, port: u16) -> Result<()> {
    let authority = format!("{}:{}", host, port);
    write!(
        tcp,
        "CONNECT {authority} HTTP/1.1\r\nHost: {authority}\r\nProxy-Connection: keep-alive\r\n\r\n"
    )?;
    tcp.flush()?;

    let mut buf = [0u8; 512];
    let n = tcp.read(&mut buf)?;
    let status_line = String::from_utf8_lossy(&buf[..n]);
    let status_line = status_line.lines().next().unwrap_or("");
    if !status_line.contains(" 200 ") {
        return Err(Error::Tls(format!("proxy refused CONNECT tunnel: {}", status_line)));
    }
    Ok(())
}

/// Convenience one-shot request: opens a connection, sends `request`,
/// reads the response body into `sink`, and closes. Callers that want
/// keep-alive reuse across redirects should drive `Connection`
/// directly instead.
pub fn fetch(target: &Uri, request: &Request, method: Method, sink: &mut dyn Sink) -> Result<Response> {
    let mut conn = Connection::open(target)?;
    conn.send_request(request)?;
    let resp = conn.get_response(method, sink)?;
    if resp.code >= 400 {
        return Err(err_msg(format!("server returned status {}", resp.code)));
    }
    Ok(resp)
}
