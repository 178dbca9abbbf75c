//! Server version query and client/server version check

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::health::error::HealthError;
use crate::version::matcher::match_versions;

/// Path of the version endpoint, relative to the server base URL
const VERSION_PATH: &str = "/api/v1/version";

/// A server that reports the release version it is running
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionApi: Send + Sync {
    /// Returns the server's release version as a plain string
    async fn release_version(&self) -> Result<String, HealthError>;
}

/// Response from the server's version endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionInfo {
    release_version: String,
}

/// Queries `GET <base>/api/v1/version`
pub struct HttpVersionApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVersionApi {
    pub fn new(base_url: &str) -> Result<Self, HealthError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("channel-check/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl VersionApi for HttpVersionApi {
    async fn release_version(&self) -> Result<String, HealthError> {
        let url = format!("{}{}", self.base_url, VERSION_PATH);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Version endpoint returned status {}: {}", status, url);
            return Err(HealthError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let info: VersionInfo = response.json().await.map_err(|e| {
            warn!("Failed to parse version response: {}", e);
            HealthError::InvalidResponse(e.to_string())
        })?;

        Ok(info.release_version)
    }
}

/// Returns the server's release version, giving up after `timeout`
pub async fn get_server_version(
    api: &dyn VersionApi,
    timeout: Duration,
) -> Result<String, HealthError> {
    let version = tokio::time::timeout(timeout, api.release_version())
        .await
        .map_err(|_| HealthError::Timeout(timeout))??;

    debug!("Server is running version {}", version);
    Ok(version)
}

/// Checks that the server runs `expected_version`
pub async fn check_server_version(
    api: &dyn VersionApi,
    expected_version: &str,
    timeout: Duration,
) -> Result<(), HealthError> {
    let release_version = get_server_version(api, timeout).await?;
    match_versions(expected_version, &release_version)?;
    Ok(())
}
