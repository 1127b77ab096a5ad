//! HTTP client for the Expo site

use async_trait::async_trait;
use expo_common::{ExpoError, Result};
use expo_config::{ScrapeConfig, SiteConfig};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::source::PageSource;

/// Connection settings for [`SiteClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site origin, e.g. `https://www.expo2025.or.jp`
    pub origin: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header value
    pub user_agent: String,
    /// Connection pool max idle connections per host (default: 2)
    pub max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: expo_config::settings::DEFAULT_ORIGIN.to_string(),
            timeout_secs: 30,
            user_agent: format!("expo-attendance/{}", env!("CARGO_PKG_VERSION")),
            max_idle_per_host: 2,
        }
    }
}

impl ClientConfig {
    /// Build from the loaded application settings
    pub fn from_settings(site: &SiteConfig, scrape: &ScrapeConfig) -> Self {
        Self {
            origin: site.origin.clone(),
            timeout_secs: scrape.timeout_seconds,
            user_agent: scrape.user_agent.clone(),
            ..Default::default()
        }
    }
}

/// Plain GET client for the search page and article pages.
///
/// Bodies are always decoded as UTF-8, whatever the response headers claim.
/// No retries: a failed request is reported once.
#[derive(Debug, Clone)]
pub struct SiteClient {
    client: Client,
    config: ClientConfig,
}

impl SiteClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ExpoError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// `<origin>/?s=<percent-encoded keyword>`
    pub fn search_url(&self, keyword: &str) -> String {
        format!(
            "{}/?s={}",
            self.config.origin.trim_end_matches('/'),
            urlencoding::encode(keyword)
        )
    }

    #[instrument(skip(self))]
    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ExpoError::network_with_status(
                format!("HTTP {} for {}", status, url),
                status.as_u16(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExpoError::network_with_source("Failed to read response body", e))?;
        debug!(bytes = bytes.len(), "Fetched page");

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[async_trait]
impl PageSource for SiteClient {
    async fn search_page(&self, keyword: &str) -> Result<String> {
        let url = self.search_url(keyword);
        self.get_text(&url).await
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.get_text(url).await
    }
}
