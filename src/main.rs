//! Command-line front end: parses `Config`, wires up proxy
//! configuration, a worker pool, and a recursion scheduler, then drains
//! the seed URL list (plus anything discovered from `Link` headers)
//! until every queued job has been fetched.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context};

use wfetch::cli::Config;
use wfetch::connection::Connection;
use wfetch::method::Method;
use wfetch::recursion::{Scheduler, Work};
use wfetch::request::Request;
use wfetch::sink::{BufferSink, Sink};
use wfetch::uri::Uri;
use wfetch::worker_pool::{Handle, WorkerPool};
use wfetch::{fswriter, proxy};

struct FetchCtx {
    scheduler: Scheduler,
    directory_prefix: std::path::PathBuf,
    extra_headers: Vec<(String, String)>,
    output_document: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let config: Config = clap::Parser::parse();
    config.validate().map_err(|e| anyhow!("{}", e))?;
    env_logger::Builder::new().filter_level(config.log_level()).init();

    if let Some(p) = &config.http_proxy {
        proxy::set_http_proxy(p).context("invalid --http-proxy URL")?;
    }
    if let Some(p) = &config.https_proxy {
        proxy::set_https_proxy(p).context("invalid --https-proxy URL")?;
    }
    proxy::set_no_proxy(config.no_proxy_hosts());

    let scheduler = Scheduler::new(config.recursive, config.level, config.max_redirect);
    for url in &config.urls {
        scheduler.seed(url);
    }

    let ctx = Arc::new(FetchCtx {
        scheduler,
        directory_prefix: std::path::PathBuf::from(&config.directory_prefix),
        extra_headers: config.extra_headers(),
        output_document: config.output_document.clone(),
    });

    let pool = WorkerPool::new(config.threads, {
        let ctx = Arc::clone(&ctx);
        move |work: Work, handle: &Handle<Work>| {
            if let Err(e) = fetch_one(&work, &ctx, handle) {
                log::error!("failed to fetch {}: {:#}", work.url, e);
            }
        }
    });

    for url in &config.urls {
        pool.submit(Work { url: url.clone(), depth: 0 });
    }
    pool.shutdown();

    Ok(())
}

fn fetch_one(work: &Work, ctx: &FetchCtx, handle: &Handle<Work>) -> anyhow::Result<()> {
    let mut current_url = work.url.clone();
    let mut redirects = 0;

    loop {
        let uri = Uri::from_str(&current_url).map_err(|e| anyhow!("{}", e))?;
        let mut request = Request::new(Method::Get, &uri);
        for (name, value) in &ctx.extra_headers {
            request.add_header(name, value);
        }

        let mut conn = Connection::open(&uri)?;
        conn.send_request(&request)?;

        let mut body = BufferSink::default();
        let resp = conn.get_response(Method::Get, &mut body)?;
        log::info!("{} {} -> {}", Method::Get, current_url, resp.code);

        if resp.is_redirect() {
            redirects += 1;
            if redirects > ctx.scheduler.max_redirects() {
                return Err(anyhow!("too many redirects fetching {}", work.url));
            }
            let location = resp
                .location
                .clone()
                .ok_or_else(|| anyhow!("redirect response missing Location header"))?;
            current_url = resolve_redirect(&uri, &location);
            continue;
        }

        let mut sink = fswriter::open_sink(&ctx.directory_prefix, &uri, ctx.output_document.as_deref())?;
        sink.write_chunk(&body.buf)?;

        for job in ctx.scheduler.schedule(&resp.links, work.depth) {
            handle.submit(job);
        }
        return Ok(());
    }
}

/// Resolves a `Location` value against the URL it redirected from.
/// Absolute locations pass through unchanged; anything else is treated
/// as an origin-relative path, matching how the connection facade's
/// minimal URI model handles references (no full RFC 3986 resolution).
fn resolve_redirect(from: &Uri, location: &str) -> String {
    if location.contains("://") {
        location.to_string()
    } else {
        format!("{}://{}{}", from.scheme.as_str(), from.authority(), location)
    }
}
