use std::fmt;

use thiserror::Error;

use crate::version::channel::ChannelVersion;

/// A version string that is not in `<channel>-<version>` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported version format: {raw}")]
pub struct ParseError {
    pub raw: String,
}

impl ParseError {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
        }
    }
}

/// Which side of a comparison a version string came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Expected => "expected",
            Side::Actual => "actual",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons two versions are not considered compatible.
///
/// The `Display` output of each variant is what operators see, so the
/// message formats are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MismatchError {
    #[error("{0} version is empty")]
    EmptyVersion(Side),

    #[error("failed to parse {side} version: {source}")]
    ParseFailure {
        side: Side,
        #[source]
        source: ParseError,
    },

    #[error("mismatched channels: running {actual} but retrieved {expected}")]
    ChannelMismatch {
        actual: ChannelVersion,
        expected: ChannelVersion,
    },

    #[error("is running version {actual_version} but the latest {channel} version is {expected_version}")]
    VersionMismatch {
        channel: String,
        actual_version: String,
        expected_version: String,
    },

    #[error("unsupported version channel: {0}")]
    UnsupportedChannel(String),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected versioncheck response: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Invalid versioncheck response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid versioncheck URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
