//! Request builder (§4.4): renders a request line, a synthetic `Host`
//! header, and caller-supplied header lines into a `ByteBuffer`.

use crate::buffer::{Arg, ByteBuffer};
use crate::method::Method;
use crate::uri::{percent_encode, Scheme, Uri};

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub scheme: Scheme,
    pub escaped_host: String,
    pub escaped_resource: String,
    pub header_lines: Vec<String>,
}

impl Request {
    pub fn new(method: Method, uri: &Uri) -> Self {
        Request {
            method,
            scheme: uri.scheme,
            escaped_host: percent_encode(&uri.authority()),
            escaped_resource: percent_encode(&uri.path_and_query().trim_start_matches('/').to_string()),
            header_lines: Vec::new(),
        }
    }

    pub fn add_header_line(&mut self, line: impl Into<String>) {
        self.header_lines.push(line.into());
    }

    pub fn add_header(&mut self, name: &str, value: &str) {
        self.header_lines.push(format!("{}: {}", name, value));
    }

    pub fn add_header_printf(&mut self, fmt: &str, args: &[Arg]) {
        let mut buf = ByteBuffer::new();
        buf.printf_append(fmt, args);
        self.header_lines.push(buf.as_str().to_string());
    }

    /// Renders the request into `buf`, per §4.4: method, target (origin-
    /// or absolute-form depending on `use_proxy`), synthetic `Host`,
    /// caller headers (CRLF-terminated if not already), an optional
    /// `Proxy-Connection` line, then the terminating blank line.
    pub fn render(&self, buf: &mut ByteBuffer, use_proxy: bool) {
        buf.append_str(self.method.as_str());
        buf.append_str(" ");

        if use_proxy {
            buf.append_str(self.scheme.as_str());
            buf.append_str("://");
            buf.append_str(&self.escaped_host);
        }
        buf.append_str("/");
        buf.append_str(&self.escaped_resource);
        buf.append_str(" HTTP/1.1\r\n");

        buf.append_str("Host: ");
        buf.append_str(&self.escaped_host);
        buf.append_str("\r\n");

        for line in &self.header_lines {
            buf.append_str(line);
            if !line.ends_with('\n') {
                buf.append_str("\r\n");
            }
        }

        if use_proxy {
            buf.append_str("Proxy-Connection: keep-alive\r\n");
        }

        buf.append_str("\r\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn uri() -> Uri {
        Uri::from_str("http://example.com/a/b?c=1").unwrap()
    }

    #[test]
    fn renders_origin_form_with_single_host_line() {
        let req = Request::new(Method::Get, &uri());
        let mut buf = ByteBuffer::new();
        req.render(&mut buf, false);
        let rendered = buf.as_str().to_string();

        assert!(rendered.starts_with("GET /a/b?c=1 HTTP/1.1\r\n"));
        assert_eq!(rendered.matches("Host:").count(), 1);
        assert!(rendered.ends_with("\r\n\r\n"));
    }

    #[test]
    fn renders_absolute_form_and_proxy_connection_when_proxied() {
        let req = Request::new(Method::Get, &uri());
        let mut buf = ByteBuffer::new();
        req.render(&mut buf, true);
        let rendered = buf.as_str().to_string();

        assert!(rendered.starts_with("GET http://example.com/a/b?c=1 HTTP/1.1\r\n"));
        assert!(rendered.contains("Proxy-Connection: keep-alive\r\n"));
    }

    #[test]
    fn header_line_without_trailing_newline_gets_crlf_appended() {
        let mut req = Request::new(Method::Get, &uri());
        req.add_header_line("X-Foo: bar");
        let mut buf = ByteBuffer::new();
        req.render(&mut buf, false);
        assert!(buf.as_str().contains("X-Foo: bar\r\n"));
    }
}
