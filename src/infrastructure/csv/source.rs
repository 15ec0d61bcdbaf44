// ============================================================
// DATA SOURCES
// ============================================================
// Source identifiers and the fetchers that turn them into bytes

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::domain::error::{AppError, Result};

/// Where a dataset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(Url),
}

impl DataSource {
    /// Interpret an identifier as an http(s)/file URL, or else a local path
    pub fn parse(identifier: &str) -> Result<Self> {
        if identifier.trim().is_empty() {
            return Err(AppError::ParseError(
                "Source identifier is empty".to_string(),
            ));
        }

        match Url::parse(identifier) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(DataSource::Url(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(DataSource::File)
                .map_err(|_| AppError::ParseError(format!("Invalid file URL: {}", identifier))),
            _ => Ok(DataSource::File(PathBuf::from(identifier))),
        }
    }
}

impl FromStr for DataSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch the complete contents of `source`
    async fn fetch(&self, source: &DataSource) -> Result<Vec<u8>>;
}

/// Reads files with tokio and URLs with reqwest
pub struct DefaultFetcher {
    client: reqwest::Client,
}

impl DefaultFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for DefaultFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceFetcher for DefaultFetcher {
    async fn fetch(&self, source: &DataSource) -> Result<Vec<u8>> {
        match source {
            DataSource::File(path) => {
                debug!(path = %path.display(), "Reading source file");
                tokio::fs::read(path).await.map_err(|e| {
                    AppError::ParseError(format!("Failed to read {}: {}", path.display(), e))
                })
            }
            DataSource::Url(url) => {
                debug!(url = %url, "Downloading source");
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()?;
                let bytes = response.bytes().await?;
                Ok(bytes.to_vec())
            }
        }
    }
}
