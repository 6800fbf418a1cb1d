use crate::config::ProjectPaths;
use crate::domain::Manifest;
use crate::error::{GameError, Result};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Where the renderer reads the manifest from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    Url(String),
    File(PathBuf),
}

impl ManifestSource {
    pub fn parse(location: &str, paths: &ProjectPaths) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            ManifestSource::Url(location.to_string())
        } else {
            ManifestSource::File(paths.resolve(location))
        }
    }
}

pub struct ManifestClient {
    client: Client,
}

impl ManifestClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("game-grid/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Reads the manifest fresh every time; nothing is cached.
    pub async fn load(&self, source: &ManifestSource) -> Result<Manifest> {
        match source {
            ManifestSource::Url(url) => self.fetch(url).await,
            ManifestSource::File(path) => {
                info!("Reading manifest from {:?}", path);
                let content = tokio::fs::read_to_string(path).await?;
                Ok(serde_json::from_str(&content)?)
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Manifest> {
        info!("Fetching manifest from {}", url);
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            error!("Manifest fetch error: Status {}", response.status());
            return Err(GameError::ManifestFetch {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
