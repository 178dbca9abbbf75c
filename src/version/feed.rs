//! Latest-versions feed client
//!
//! The feed is a JSON object mapping each release channel to its latest
//! version, e.g. `{"stable": "2.1.0", "edge": "24.1.1"}`.

use std::collections::HashMap;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use tracing::{debug, warn};

use crate::version::channels::ChannelSet;
use crate::version::error::FeedError;

/// Source of the latest version for each release channel
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionFeed: Send + Sync {
    /// Fetches the latest versions
    ///
    /// # Arguments
    /// * `current_version` - Version of the caller, reported to the feed
    /// * `uuid` - Identifier of the installation making the request
    /// * `source` - Component making the request (e.g. "cli")
    async fn latest_versions(
        &self,
        current_version: &str,
        uuid: &str,
        source: &str,
    ) -> Result<ChannelSet, FeedError>;
}

/// Fetches the feed over HTTP with a single GET per call
pub struct HttpVersionFeed {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVersionFeed {
    /// Creates a feed client; every request is bounded by `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("channel-check/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

/// Builds `<base>?version=<current>&uuid=<uuid>&source=<source>` with every
/// parameter URL-encoded.
pub fn version_check_url(
    base_url: &str,
    current_version: &str,
    uuid: &str,
    source: &str,
) -> Result<reqwest::Url, FeedError> {
    reqwest::Url::parse_with_params(
        base_url,
        &[
            ("version", current_version),
            ("uuid", uuid),
            ("source", source),
        ],
    )
    .map_err(|e| FeedError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait::async_trait]
impl VersionFeed for HttpVersionFeed {
    async fn latest_versions(
        &self,
        current_version: &str,
        uuid: &str,
        source: &str,
    ) -> Result<ChannelSet, FeedError> {
        let url = version_check_url(&self.base_url, current_version, uuid, source)?;
        debug!("Fetching latest versions from {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("versioncheck returned status {}: {}", status, url);
            return Err(FeedError::UnexpectedStatus(status));
        }

        let body = response.text().await?;
        let versions: HashMap<String, String> = serde_json::from_str(&body)
            .inspect_err(|e| warn!("Failed to parse versioncheck response: {}", e))?;

        let channels = ChannelSet::from_map(versions);
        debug!("Latest versions: {}", channels);

        Ok(channels)
    }
}
