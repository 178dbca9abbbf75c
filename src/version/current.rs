//! Version of the running binary

use std::fmt;

use tracing::debug;

use crate::config::VERSION_OVERRIDE_ENV;
use crate::version::channel::ChannelVersion;
use crate::version::error::MismatchError;
use crate::version::matcher::match_versions;

pub const UNDEFINED_CHANNEL: &str = "dev";
pub const UNDEFINED_VERSION: &str = "undefined";
/// Reported when no version was bound at build time or through the environment
pub const UNDEFINED_CHANNEL_VERSION: &str = "dev-undefined";

/// Version bound at build time through `CHANNEL_CHECK_BUILD_VERSION`
const BUILD_VERSION: Option<&str> = option_env!("CHANNEL_CHECK_BUILD_VERSION");

/// The `<channel>-<version>` string this process reports as its own version.
///
/// Passed explicitly to whatever needs it; there is no process-wide version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningVersion(String);

impl RunningVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Resolves the version from the build and the process environment.
    pub fn detect() -> Self {
        Self::resolve(BUILD_VERSION, std::env::var(VERSION_OVERRIDE_ENV).ok())
    }

    /// The override only applies when no version was bound at build time.
    pub fn resolve(build_version: Option<&str>, override_version: Option<String>) -> Self {
        if let Some(version) =
            build_version.filter(|v| !v.is_empty() && *v != UNDEFINED_CHANNEL_VERSION)
        {
            return Self::new(version);
        }

        match override_version.filter(|v| !v.is_empty()) {
            Some(version) => {
                debug!("Using version {} from {}", version, VERSION_OVERRIDE_ENV);
                Self(version)
            }
            None => Self::new(UNDEFINED_CHANNEL_VERSION),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed form, if the version is a `<channel>-<version>` composite
    pub fn channel_version(&self) -> Option<ChannelVersion> {
        ChannelVersion::parse(&self.0).ok()
    }

    /// Checks this version against the version a server expects its clients
    /// to run.
    pub fn check_client_version(&self, expected: &str) -> Result<(), MismatchError> {
        match_versions(expected, &self.0)
    }
}

impl Default for RunningVersion {
    fn default() -> Self {
        Self::new(UNDEFINED_CHANNEL_VERSION)
    }
}

impl fmt::Display for RunningVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;

    #[rstest]
    #[case(Some("stable-2.1.0"), None, "stable-2.1.0")]
    #[case(Some("stable-2.1.0"), Some("edge-24.1.1"), "stable-2.1.0")]
    #[case(None, Some("edge-24.1.1"), "edge-24.1.1")]
    #[case(Some(""), Some("edge-24.1.1"), "edge-24.1.1")]
    #[case(Some("dev-undefined"), Some("edge-24.1.1"), "edge-24.1.1")]
    #[case(None, Some(""), "dev-undefined")]
    #[case(None, None, "dev-undefined")]
    fn resolve_prefers_build_version_over_override(
        #[case] build: Option<&str>,
        #[case] override_version: Option<&str>,
        #[case] expected: &str,
    ) {
        let version = RunningVersion::resolve(build, override_version.map(str::to_string));
        assert_eq!(version.as_str(), expected);
    }

    #[test]
    #[serial]
    fn detect_reads_override_from_environment() {
        // SAFETY: serialized with every other test touching the environment
        unsafe { std::env::set_var(VERSION_OVERRIDE_ENV, "edge-24.1.1") };

        let version = RunningVersion::detect();

        unsafe { std::env::remove_var(VERSION_OVERRIDE_ENV) };

        let expected = BUILD_VERSION
            .filter(|v| !v.is_empty() && *v != UNDEFINED_CHANNEL_VERSION)
            .unwrap_or("edge-24.1.1");
        assert_eq!(version.as_str(), expected);
    }

    #[test]
    fn check_client_version_passes_when_versions_match() {
        let version = RunningVersion::default();
        assert_eq!(version.check_client_version(UNDEFINED_CHANNEL_VERSION), Ok(()));
    }

    #[test]
    fn check_client_version_fails_when_versions_differ() {
        let version = RunningVersion::default();
        let latest = ChannelVersion::new(UNDEFINED_CHANNEL, "latest");

        let err = version
            .check_client_version(&latest.to_string())
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "is running version {} but the latest {} version is {}",
                UNDEFINED_VERSION, UNDEFINED_CHANNEL, latest.version
            )
        );
    }

    #[rstest]
    #[case("stable-2.1.0", Some(ChannelVersion::new("stable", "2.1.0")))]
    #[case("1.2.3", None)]
    fn channel_version_parses_composite_versions(
        #[case] raw: &str,
        #[case] expected: Option<ChannelVersion>,
    ) {
        assert_eq!(RunningVersion::new(raw).channel_version(), expected);
    }
}
