//! CSV sources for the project spreadsheet.
//!
//! The spreadsheet normally arrives over HTTP from the publishing service.
//! A local file can stand in for it, which is how offline runs and the
//! binary tests work. Both sit behind [`CsvSource`] so ingestion does not
//! care where the text came from.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use crate::config::Config;

/// Something that can produce the raw CSV text of the project spreadsheet.
#[async_trait]
pub trait CsvSource: Send + Sync {
    /// Short label for log lines, e.g. the URL or file path.
    fn describe(&self) -> String;

    /// Retrieves the full CSV document.
    async fn fetch(&self) -> Result<String>;
}

/// Published spreadsheet fetched with a plain `GET`.
pub struct HttpCsvSource {
    url: String,
    client: reqwest::Client,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CsvSource for HttpCsvSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{} returned HTTP {}", self.url, status);
        }

        response
            .text()
            .await
            .with_context(|| format!("failed to read body from {}", self.url))
    }
}

/// CSV file on local disk.
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for FileCsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read CSV file: {}", self.path.display()))
    }
}

/// Picks the source named by `[source]`; a file path takes precedence.
pub fn source_from_config(config: &Config) -> Result<Box<dyn CsvSource>> {
    match (&config.source.csv_path, &config.source.csv_url) {
        (Some(path), _) => Ok(Box::new(FileCsvSource::new(path.clone()))),
        (None, Some(url)) => Ok(Box::new(HttpCsvSource::new(url.clone()))),
        (None, None) => bail!("no CSV source configured"),
    }
}
