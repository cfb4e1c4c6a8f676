//! Process-wide proxy configuration (§4.7), grounded in the source's
//! `http_set_http_proxy`/`http_set_https_proxy`, which stash a parsed
//! proxy URI in process globals that every later `http_open` call
//! consults. Rust has no mutable globals without synchronization, so
//! this uses a `OnceLock<RwLock<..>>` instead; `Connection::open` reads
//! a snapshot via `current()` rather than taking the lock for the
//! lifetime of the connection.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

use crate::uri::Uri;

#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    pub http_proxy: Option<Uri>,
    pub https_proxy: Option<Uri>,
    pub no_proxy: HashSet<String>,
}

impl ProxyConfig {
    /// The proxy to use for a request to `target`, or `None` for a
    /// direct connection, honoring `no_proxy` host-suffix matches.
    pub fn proxy_for(&self, target: &Uri) -> Option<&Uri> {
        if self.no_proxy.iter().any(|suffix| host_matches(&target.host, suffix)) {
            return None;
        }
        match target.scheme {
            crate::uri::Scheme::Http => self.http_proxy.as_ref(),
            crate::uri::Scheme::Https => self.https_proxy.as_ref(),
        }
    }
}

fn host_matches(host: &str, suffix: &str) -> bool {
    host.eq_ignore_ascii_case(suffix) || host.to_ascii_lowercase().ends_with(&format!(".{}", suffix.to_ascii_lowercase()))
}

fn global() -> &'static RwLock<ProxyConfig> {
    static CONFIG: OnceLock<RwLock<ProxyConfig>> = OnceLock::new();
    CONFIG.get_or_init(|| RwLock::new(ProxyConfig::default()))
}

pub fn set_http_proxy(uri: &str) -> crate::error::Result<()> {
    let uri = Uri::from_str(uri)?;
    global().write().unwrap().http_proxy = Some(uri);
    Ok(())
}

pub fn set_https_proxy(uri: &str) -> crate::error::Result<()> {
    let uri = Uri::from_str(uri)?;
    global().write().unwrap().https_proxy = Some(uri);
    Ok(())
}

pub fn set_no_proxy(hosts: impl IntoIterator<Item = String>) {
    global().write().unwrap().no_proxy = hosts.into_iter().collect();
}

/// A snapshot of the current process-wide configuration, safe to hold
/// for the lifetime of a single connection attempt.
pub fn current() -> ProxyConfig {
    global().read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn proxy_for_respects_scheme() {
        let mut cfg = ProxyConfig::default();
        cfg.http_proxy = Some(Uri::from_str("http://proxy:3128/").unwrap());
        let target = Uri::from_str("http://example.com/").unwrap();
        assert_eq!(cfg.proxy_for(&target).unwrap().host, "proxy");

        let https_target = Uri::from_str("https://example.com/").unwrap();
        assert!(cfg.proxy_for(&https_target).is_none());
    }

    #[test]
    fn no_proxy_suffix_match_skips_proxying() {
        let mut cfg = ProxyConfig::default();
        cfg.http_proxy = Some(Uri::from_str("http://proxy:3128/").unwrap());
        cfg.no_proxy.insert("internal.example".to_string());
        let target = Uri::from_str("http://host.internal.example/").unwrap();
        assert!(cfg.proxy_for(&target).is_none());
    }
}
