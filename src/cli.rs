//! Command-line surface (§4.8), grounded in the source CLI tool's
//! option set but reworked onto `clap`'s derive API rather than hand
//! parsing `argv`.

use clap::Parser;

use crate::error::{err_msg, Result};

#[derive(Parser, Debug)]
#[command(name = "wfetch", about = "Recursive HTTP/1.1 downloader")]
pub struct Config {
    /// One or more URLs to fetch.
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Follow `Link` headers to additional URLs.
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Maximum recursion depth (only meaningful with --recursive).
    #[arg(short = 'l', long, default_value_t = 5)]
    pub level: u32,

    /// Write the single fetched document here instead of deriving a
    /// path from the URL (`-` means stdout).
    #[arg(short = 'O', long = "output-document")]
    pub output_document: Option<String>,

    /// Directory under which fetched files are written.
    #[arg(short = 'P', long = "directory-prefix", default_value = ".")]
    pub directory_prefix: String,

    #[arg(long = "http-proxy")]
    pub http_proxy: Option<String>,

    #[arg(long = "https-proxy")]
    pub https_proxy: Option<String>,

    /// Comma-separated list of host suffixes to never proxy.
    #[arg(long = "no-proxy")]
    pub no_proxy: Option<String>,

    #[arg(long)]
    pub user: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Extra request headers, e.g. `--header 'X-Foo: bar'`.
    #[arg(long = "header")]
    pub headers: Vec<String>,

    /// Maximum HTTP redirects to follow for a single URL.
    #[arg(long = "max-redirect", default_value_t = 20)]
    pub max_redirect: u32,

    /// Worker thread count.
    #[arg(short = 't', long, default_value_t = 4)]
    pub threads: usize,

    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Parses `--header 'Name: value'` entries into `(name, value)`
    /// pairs, dropping anything missing a colon rather than failing the
    /// whole run over one bad flag.
    pub fn extra_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .filter_map(|h| h.split_once(':'))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect()
    }

    pub fn no_proxy_hosts(&self) -> Vec<String> {
        match &self.no_proxy {
            Some(list) => list.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
            None => Vec::new(),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Error
        } else {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                _ => log::LevelFilter::Debug,
            }
        }
    }

    /// Cross-checks flag combinations that parse fine individually but
    /// are mutually exclusive.
    pub fn validate(&self) -> Result<()> {
        if self.output_document.is_some() && self.urls.len() > 1 {
            return Err(err_msg("--output-document names a single file; it can't be used with multiple URLs"));
        }
        if self.no_proxy.is_some() && self.http_proxy.is_some() {
            return Err(err_msg("--no-proxy and --http-proxy are mutually exclusive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_headers_splits_name_and_value() {
        let cfg = Config::parse_from(["wfetch", "http://a", "--header", "X-Foo: bar"]);
        assert_eq!(cfg.extra_headers(), vec![("X-Foo".to_string(), "bar".to_string())]);
    }

    #[test]
    fn malformed_header_flag_is_dropped() {
        let cfg = Config::parse_from(["wfetch", "http://a", "--header", "not-a-header"]);
        assert!(cfg.extra_headers().is_empty());
    }

    #[test]
    fn no_proxy_hosts_splits_on_comma() {
        let cfg = Config::parse_from(["wfetch", "http://a", "--no-proxy", "a.com, b.com"]);
        assert_eq!(cfg.no_proxy_hosts(), vec!["a.com".to_string(), "b.com".to_string()]);
    }

    #[test]
    fn quiet_flag_forces_error_level() {
        let cfg = Config::parse_from(["wfetch", "http://a", "-q", "-v", "-v"]);
        assert_eq!(cfg.log_level(), log::LevelFilter::Error);
    }

    #[test]
    fn verbosity_count_raises_log_level() {
        let cfg = Config::parse_from(["wfetch", "http://a", "-v"]);
        assert_eq!(cfg.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn output_document_with_multiple_urls_fails_validation() {
        let cfg = Config::parse_from(["wfetch", "http://a", "http://b", "-O", "out.html"]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn output_document_with_single_url_passes_validation() {
        let cfg = Config::parse_from(["wfetch", "http://a", "-O", "out.html"]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn no_proxy_with_http_proxy_fails_validation() {
        let cfg = Config::parse_from(["wfetch", "http://a", "--no-proxy", "x.com", "--http-proxy", "http://p:8080"]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn plain_config_passes_validation() {
        let cfg = Config::parse_from(["wfetch", "http://a"]);
        assert!(cfg.validate().is_ok());
    }
}
