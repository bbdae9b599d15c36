// src/fetch/mod.rs
//! Fetch-and-parse of the recession reference table.
//!
//! [`TableSource`] is the seam: the pipeline asks for "the first table with this
//! class at this URL" and gets a [`RawTable`] back. [`HttpTableSource`] does the
//! real GET; [`FixtureTableSource`] serves saved HTML for tests and offline runs.

pub mod table;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::{fs, path::Path, time::Duration};
use tracing::{debug, info, instrument};
use url::Url;

use crate::process::raw_table::RawTable;

pub use table::parse_table;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Given a page URL and a table class, return the parsed table.
pub trait TableSource {
    fn fetch_table(&self, url: &Url, class: &str) -> Result<RawTable>;
}

/// Single blocking GET, no retry.
pub struct HttpTableSource {
    client: Client,
}

impl HttpTableSource {
    /// `timeout: None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }

    fn get_text(&self, url: &Url) -> Result<String> {
        debug!("Fetching text from {}", url);
        self.client
            .get(url.clone())
            .send()
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .with_context(|| format!("Reading text from {}", url))
    }
}

impl TableSource for HttpTableSource {
    #[instrument(level = "info", skip(self, url), fields(url = %url))]
    fn fetch_table(&self, url: &Url, class: &str) -> Result<RawTable> {
        let html = self.get_text(url)?;
        info!(bytes = html.len(), "fetched page");
        parse_table(&html, class).with_context(|| format!("parsing table from {}", url))
    }
}

/// Serves a saved page regardless of the URL asked for.
pub struct FixtureTableSource {
    html: String,
}

impl FixtureTableSource {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let html = fs::read_to_string(path)
            .with_context(|| format!("reading saved page {}", path.display()))?;
        Ok(Self { html })
    }
}

impl TableSource for FixtureTableSource {
    fn fetch_table(&self, url: &Url, class: &str) -> Result<RawTable> {
        debug!(%url, "serving table from fixture");
        parse_table(&self.html, class).with_context(|| format!("parsing fixture for {}", url))
    }
}
