//! `<channel>-<version>` identifiers

use std::fmt;
use std::str::FromStr;

use crate::version::error::ParseError;

/// A release version scoped to the channel it was published on.
///
/// The textual form is `<channel>-<version>`. The channel never contains a
/// hyphen; the version is an opaque token and may.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelVersion {
    pub channel: String,
    pub version: String,
}

impl ChannelVersion {
    pub fn new(channel: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            version: version.into(),
        }
    }

    /// Splits `raw` at its first hyphen.
    ///
    /// Everything after that hyphen is kept verbatim as the version, including
    /// further hyphens or an empty remainder.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.split_once('-') {
            Some((channel, version)) => Ok(Self::new(channel, version)),
            None => Err(ParseError::new(raw)),
        }
    }
}

impl FromStr for ChannelVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChannelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.channel, self.version)
    }
}
