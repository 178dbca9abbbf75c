//! Server version test utilities

use std::time::Duration;

use async_trait::async_trait;

use channel_check::health::error::HealthError;
use channel_check::health::version::VersionApi;

/// Mock server reporting a fixed release version
pub struct MockServerApi {
    release_version: Option<String>,
    delay: Duration,
}

impl MockServerApi {
    pub fn new(release_version: &str) -> Self {
        Self {
            release_version: Some(release_version.to_string()),
            delay: Duration::ZERO,
        }
    }

    /// A server whose version endpoint always fails
    pub fn unavailable() -> Self {
        Self {
            release_version: None,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl VersionApi for MockServerApi {
    async fn release_version(&self) -> Result<String, HealthError> {
        tokio::time::sleep(self.delay).await;
        self.release_version
            .clone()
            .ok_or_else(|| HealthError::InvalidResponse("server unavailable".to_string()))
    }
}
