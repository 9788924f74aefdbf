// src/importer/fetcher.rs

//! Document fetching.
//!
//! The fetch contract is deliberately strict: one GET per URL, no retries,
//! no redirect babysitting. A network failure or non-success status aborts
//! the whole import run.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::ImporterConfig;

/// Source of raw documents, keyed by absolute URL.
///
/// The pipeline only ever reads text documents through this trait, which
/// keeps the HTTP client out of parser and merge code and lets tests run
/// against canned fixtures.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the raw text of the document at `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP-backed document source.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &ImporterConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Canned document source for tests.
#[cfg(test)]
pub struct FixtureSource {
    pages: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl FixtureSource {
    pub fn new() -> Self {
        Self {
            pages: std::collections::HashMap::new(),
        }
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }
}

#[cfg(test)]
#[async_trait]
impl DocumentSource for FixtureSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::fetch(url, 404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_fetcher() {
        let config = ImporterConfig::default();
        assert!(HttpFetcher::new(&config).is_ok());
    }

    #[tokio::test]
    async fn fixture_source_serves_known_pages() {
        let source = FixtureSource::new().with_page("https://example.com/a", "<p>hi</p>");
        let body = source.fetch("https://example.com/a").await.unwrap();
        assert_eq!(body, "<p>hi</p>");
    }

    #[tokio::test]
    async fn fixture_source_fails_unknown_pages() {
        let source = FixtureSource::new();
        let err = source.fetch("https://example.com/missing").await.unwrap_err();
        assert!(matches!(err, AppError::Fetch { status: 404, .. }));
    }
}
