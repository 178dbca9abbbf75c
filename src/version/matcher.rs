//! Channel-aware comparison of two version strings

use crate::version::channel::ChannelVersion;
use crate::version::error::{MismatchError, Side};

/// Compare an expected version to the actual one
///
/// Identical strings always match without being parsed, so versions that are
/// not `<channel>-<version>` composites can still be compared verbatim. Any
/// other pair is reported as a mismatch: a channel mismatch when the channels
/// differ, a version mismatch otherwise.
pub fn match_versions(expected: &str, actual: &str) -> Result<(), MismatchError> {
    if expected.is_empty() {
        return Err(MismatchError::EmptyVersion(Side::Expected));
    }
    if actual.is_empty() {
        return Err(MismatchError::EmptyVersion(Side::Actual));
    }
    if expected == actual {
        return Ok(());
    }

    let actual = parse_side(actual, Side::Actual)?;
    let expected = parse_side(expected, Side::Expected)?;

    if actual.channel != expected.channel {
        return Err(MismatchError::ChannelMismatch { actual, expected });
    }

    Err(MismatchError::VersionMismatch {
        channel: actual.channel,
        actual_version: actual.version,
        expected_version: expected.version,
    })
}

pub(crate) fn parse_side(raw: &str, side: Side) -> Result<ChannelVersion, MismatchError> {
    ChannelVersion::parse(raw).map_err(|source| MismatchError::ParseFailure { side, source })
}
