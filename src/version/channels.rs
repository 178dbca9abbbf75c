//! Latest known version per release channel

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::version::channel::ChannelVersion;
use crate::version::error::{MismatchError, ParseError, Side};
use crate::version::matcher::{match_versions, parse_side};

/// Ordered collection of channel versions, one entry per channel.
///
/// Entries are always sorted by channel name, with the empty channel first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSet {
    entries: Vec<ChannelVersion>,
}

impl ChannelSet {
    /// Builds a set from `<channel>-<version>` strings.
    ///
    /// Fails with the first entry that cannot be parsed.
    pub fn parse_list<I, S>(channels: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = channels
            .into_iter()
            .map(|raw| ChannelVersion::parse(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::sorted(entries))
    }

    /// Builds a set from a channel to version mapping, as served by the
    /// version feed.
    ///
    /// Values are stored as the version token without further parsing: the
    /// pair `"stable" => "2.1.0"` becomes `stable-2.1.0`, and
    /// `"foo" => "bar-1.2.3"` becomes channel `foo` with version `bar-1.2.3`.
    pub fn from_map(versions: HashMap<String, String>) -> Self {
        let entries = versions
            .into_iter()
            .map(|(channel, version)| ChannelVersion::new(channel, version))
            .collect();

        Self::sorted(entries)
    }

    fn sorted(mut entries: Vec<ChannelVersion>) -> Self {
        entries.sort_by(|a, b| channel_order(&a.channel, &b.channel));
        Self { entries }
    }

    /// Finds the entry for `channel`
    pub fn get(&self, channel: &str) -> Option<&ChannelVersion> {
        self.entries.iter().find(|cv| cv.channel == channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelVersion> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks `actual` against the latest version of its own channel.
    ///
    /// The comparison goes through [`match_versions`] so the error messages
    /// are the same as for a direct comparison.
    pub fn matches(&self, actual: &str) -> Result<(), MismatchError> {
        if actual.is_empty() {
            return Err(MismatchError::EmptyVersion(Side::Actual));
        }

        let parsed = parse_side(actual, Side::Actual)?;

        match self.get(&parsed.channel) {
            Some(latest) => match_versions(&latest.to_string(), &parsed.to_string()),
            None => Err(MismatchError::UnsupportedChannel(actual.to_string())),
        }
    }
}

/// Empty channel first, then ascending by name.
fn channel_order(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

impl<'a> IntoIterator for &'a ChannelSet {
    type Item = &'a ChannelVersion;
    type IntoIter = std::slice::Iter<'a, ChannelVersion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.entries.iter().map(|cv| cv.to_string()).collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn channels(entries: &[(&str, &str)]) -> Vec<ChannelVersion> {
        entries
            .iter()
            .map(|(c, v)| ChannelVersion::new(*c, *v))
            .collect()
    }

    #[test]
    fn parse_list_parses_and_sorts_entries() {
        let set =
            ChannelSet::parse_list(["version-stable-2.1.0", "foo-foo-1.2.3", "dev-undefined"])
                .unwrap();

        assert_eq!(
            set.iter().cloned().collect::<Vec<_>>(),
            channels(&[
                ("dev", "undefined"),
                ("foo", "foo-1.2.3"),
                ("version", "stable-2.1.0"),
            ])
        );
    }

    #[test]
    fn parse_list_fails_on_first_unparsable_entry() {
        let err = ChannelSet::parse_list(["stable-2.1.0", "badformat", "alsobad"]).unwrap_err();
        assert_eq!(err, ParseError::new("badformat"));
    }

    #[test]
    fn parse_list_accepts_empty_input() {
        let set = ChannelSet::parse_list(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn from_map_stores_values_verbatim_in_channel_order() {
        let set = ChannelSet::from_map(HashMap::from([
            ("version".to_string(), "stable-2.1.0".to_string()),
            ("dev".to_string(), "undefined".to_string()),
            ("foo".to_string(), "foo-1.2.3".to_string()),
        ]));

        assert_eq!(
            set.iter().cloned().collect::<Vec<_>>(),
            channels(&[
                ("dev", "undefined"),
                ("foo", "foo-1.2.3"),
                ("version", "stable-2.1.0"),
            ])
        );
    }

    #[test]
    fn from_map_places_empty_channel_first() {
        let set = ChannelSet::from_map(HashMap::from([
            ("stable".to_string(), "2.1.0".to_string()),
            ("".to_string(), "unknown".to_string()),
            ("edge".to_string(), "24.1.1".to_string()),
        ]));

        let order: Vec<&str> = set.iter().map(|cv| cv.channel.as_str()).collect();
        assert_eq!(order, vec!["", "edge", "stable"]);
    }

    #[test]
    fn from_map_with_single_entry() {
        let set = ChannelSet::from_map(HashMap::from([(
            "stable".to_string(),
            "2.1.0".to_string(),
        )]));

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("stable"), Some(&ChannelVersion::new("stable", "2.1.0")));
    }

    #[rstest]
    #[case("dev-undefined", "dev-undefined", None)]
    #[case(
        "dev-latest",
        "dev-older",
        Some("is running version older but the latest dev version is latest")
    )]
    #[case(
        "dev-latest",
        "unsupported-version-channel",
        Some("unsupported version channel: unsupported-version-channel")
    )]
    #[case(
        "dev-latest",
        "badformat",
        Some("failed to parse actual version: unsupported version format: badformat")
    )]
    #[case("dev-latest", "", Some("actual version is empty"))]
    fn matches_checks_against_own_channel(
        #[case] latest_dev: &str,
        #[case] actual: &str,
        #[case] message: Option<&str>,
    ) {
        let set =
            ChannelSet::parse_list(["version-stable-2.1.0", "foo-foo-1.2.3", latest_dev]).unwrap();

        let result = set.matches(actual);

        assert_eq!(result.err().map(|e| e.to_string()).as_deref(), message);
    }

    #[test]
    fn matches_compares_map_entries_under_key_channel() {
        let set = ChannelSet::from_map(HashMap::from([(
            "foo".to_string(),
            "bar-1.2.3".to_string(),
        )]));

        assert_eq!(set.matches("foo-bar-1.2.3"), Ok(()));
        assert_eq!(
            set.matches("foo-1.2.3").unwrap_err().to_string(),
            "is running version 1.2.3 but the latest foo version is bar-1.2.3"
        );
        assert_eq!(
            set.matches("bar-1.2.3"),
            Err(MismatchError::UnsupportedChannel("bar-1.2.3".to_string()))
        );
    }

    #[test]
    fn matches_uses_first_entry_for_duplicate_channels() {
        let set = ChannelSet::parse_list(["stable-2.1.0", "stable-2.2.0"]).unwrap();

        assert_eq!(set.matches("stable-2.1.0"), Ok(()));
    }

    #[test]
    fn matches_on_empty_set_is_unsupported() {
        let set = ChannelSet::default();
        assert_eq!(
            set.matches("stable-2.1.0"),
            Err(MismatchError::UnsupportedChannel("stable-2.1.0".to_string()))
        );
    }

    #[test]
    fn display_lists_entries_in_order() {
        let set = ChannelSet::parse_list(["stable-2.1.0", "edge-24.1.1"]).unwrap();
        assert_eq!(set.to_string(), "[edge-24.1.1, stable-2.1.0]");
    }
}
