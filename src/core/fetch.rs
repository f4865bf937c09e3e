//! Page sources for the price scraper.

use crate::config::{FetcherKind, SilverConfig};
use crate::core::price::{Cascade, strip_markup};
use crate::core::process::run_checked;
use crate::errors::AppResult;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Content ready for extraction, tagged with the cascade that suits it.
#[derive(Debug, Clone)]
pub struct Page {
    pub content: String,
    pub cascade: Cascade,
}

pub trait Fetcher {
    fn name(&self) -> &'static str;
    fn fetch(&self, url: &str) -> AppResult<Page>;
}

/// reqwest blocking client; markup is stripped before extraction.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    fn fetch(&self, url: &str) -> AppResult<Page> {
        tracing::debug!(url, "GET");
        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        Ok(Page {
            content: strip_markup(&body)?,
            cascade: Cascade::Page,
        })
    }
}

/// Shells out to `curl`; the raw HTML is searched as-is.
pub struct CurlFetcher {
    user_agent: String,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            timeout,
        }
    }
}

impl Fetcher for CurlFetcher {
    fn name(&self) -> &'static str {
        "curl"
    }

    fn fetch(&self, url: &str) -> AppResult<Page> {
        let header = format!("User-Agent: {}", self.user_agent);
        let max_time = self.timeout.as_secs().to_string();
        let out = run_checked(
            "curl",
            ["-s", "-L", "--max-time", max_time.as_str(), "-H", header.as_str(), url],
            None,
        )?;
        Ok(Page {
            content: out.stdout,
            cascade: Cascade::Page,
        })
    }
}

/// Previously saved page text; the URL is ignored.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Fetcher for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn fetch(&self, _url: &str) -> AppResult<Page> {
        Ok(Page {
            content: fs::read_to_string(&self.path)?,
            cascade: Cascade::Text,
        })
    }
}

/// Pick the page source: a saved file wins over the configured fetcher.
pub fn build_fetcher(
    cfg: &SilverConfig,
    kind: FetcherKind,
    source: Option<PathBuf>,
) -> AppResult<Box<dyn Fetcher>> {
    if let Some(path) = source {
        return Ok(Box::new(FileSource::new(path)));
    }

    let timeout = Duration::from_secs(cfg.timeout_secs);
    Ok(match kind {
        FetcherKind::Http => Box::new(HttpFetcher::new(&cfg.user_agent, timeout)?),
        FetcherKind::Curl => Box::new(CurlFetcher::new(&cfg.user_agent, timeout)),
    })
}
