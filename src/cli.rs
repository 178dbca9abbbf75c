//! Command-line interface
//!
//! Every check prints one line per result: `√ <what passed>` on success or
//! `× <reason>` on failure. The reason is the error message verbatim.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::config::CheckConfig;
use crate::health::version::{HttpVersionApi, VersionApi, get_server_version};
use crate::version::channels::ChannelSet;
use crate::version::current::RunningVersion;
use crate::version::error::{FeedError, MismatchError, ParseError};
use crate::version::feed::{HttpVersionFeed, VersionFeed};
use crate::version::matcher::match_versions;

#[derive(Parser)]
#[command(name = "channel-check")]
#[command(version, about = "Check client and server versions against their release channel")]
pub struct Cli {
    /// Configuration file [default: <data dir>/channel-check/config.json]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the client and server versions
    Version {
        /// Print the client version only
        #[arg(long)]
        client: bool,

        /// Print the version numbers only
        #[arg(long)]
        short: bool,

        /// Base URL of the server to query
        #[arg(long, value_name = "URL")]
        server_url: Option<String>,
    },

    /// Check that the running version is up-to-date
    ///
    /// Compares against --expected if given, otherwise against the --channel
    /// list, otherwise against the latest versions published on the feed.
    Check {
        /// Version the running binary must match exactly
        #[arg(long, conflicts_with = "channels")]
        expected: Option<String>,

        /// Latest version of a channel, as <channel>-<version> (repeatable)
        #[arg(long = "channel", value_name = "CHANNEL-VERSION")]
        channels: Vec<String>,

        /// Latest-versions feed URL
        #[arg(long, value_name = "URL")]
        feed_url: Option<String>,

        /// Installation identifier reported to the feed
        #[arg(long)]
        uuid: Option<String>,

        /// Component name reported to the feed
        #[arg(long)]
        source: Option<String>,
    },

    /// Compare two versions
    Match {
        /// Version that is expected
        expected: String,
        /// Version that is actually running
        actual: String,
    },
}

/// Why a check did not pass
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Mismatch(#[from] MismatchError),

    #[error("invalid channel list: {0}")]
    Channels(#[from] ParseError),

    #[error("failed to fetch latest versions: {0}")]
    Feed(#[from] FeedError),
}

/// Runs `command` and writes its report to `out`.
///
/// Returns `false` when a check failed.
pub async fn run<W: Write>(
    command: Command,
    config: &CheckConfig,
    running: &RunningVersion,
    out: &mut W,
) -> anyhow::Result<bool> {
    match command {
        Command::Version {
            client,
            short,
            server_url,
        } => {
            let api = if client {
                None
            } else {
                match server_url.or_else(|| config.server.url.clone()) {
                    Some(url) => Some(HttpVersionApi::new(&url)?),
                    None => None,
                }
            };
            let api = api.as_ref().map(|api| api as &dyn VersionApi);
            print_versions(api, config, running, short, client, out).await
        }
        Command::Check {
            expected,
            channels,
            feed_url,
            uuid,
            source,
        } => {
            let result = if let Some(expected) = expected {
                running
                    .check_client_version(&expected)
                    .map_err(CheckError::from)
            } else if !channels.is_empty() {
                check_channels(&channels, running)
            } else {
                let url = feed_url.unwrap_or_else(|| config.feed.url.clone());
                let feed = HttpVersionFeed::new(&url, config.feed.timeout())?;
                let uuid = uuid.unwrap_or_else(|| config.feed.uuid.clone());
                let source = source.unwrap_or_else(|| config.feed.source.clone());
                check_latest(&feed, running, &uuid, &source).await
            };

            report(out, &format!("{} is up-to-date", running), result)
        }
        Command::Match { expected, actual } => report(
            out,
            &format!("{} matches {}", actual, expected),
            match_versions(&expected, &actual).map_err(CheckError::from),
        ),
    }
}

/// Checks the running version against a list of `<channel>-<version>` strings
pub fn check_channels(channels: &[String], running: &RunningVersion) -> Result<(), CheckError> {
    let channels = ChannelSet::parse_list(channels)?;
    channels.matches(running.as_str())?;
    Ok(())
}

/// Checks the running version against the latest published versions
pub async fn check_latest(
    feed: &dyn VersionFeed,
    running: &RunningVersion,
    uuid: &str,
    source: &str,
) -> Result<(), CheckError> {
    let channels = feed.latest_versions(running.as_str(), uuid, source).await?;
    info!("Retrieved latest versions {}", channels);
    channels.matches(running.as_str())?;
    Ok(())
}

async fn print_versions<W: Write>(
    api: Option<&dyn VersionApi>,
    config: &CheckConfig,
    running: &RunningVersion,
    short: bool,
    client_only: bool,
    out: &mut W,
) -> anyhow::Result<bool> {
    if short {
        writeln!(out, "{}", running)?;
    } else {
        writeln!(out, "Client version: {}", running)?;
    }

    if client_only {
        return Ok(true);
    }

    let server_version = match api {
        Some(api) => get_server_version(api, config.server.timeout())
            .await
            .inspect_err(|e| info!("Server version unavailable: {}", e))
            .ok(),
        None => None,
    };

    let Some(server_version) = server_version else {
        if short {
            writeln!(out, "unavailable")?;
        } else {
            writeln!(out, "Server version: unavailable")?;
        }
        return Ok(true);
    };

    if short {
        writeln!(out, "{}", server_version)?;
    } else {
        writeln!(out, "Server version: {}", server_version)?;
    }

    if let Err(e) = running.check_client_version(&server_version) {
        writeln!(out, "‼ client and server versions differ: {}", e)?;
    }

    Ok(true)
}

fn report<W: Write>(
    out: &mut W,
    success: &str,
    result: Result<(), CheckError>,
) -> anyhow::Result<bool> {
    match result {
        Ok(()) => {
            writeln!(out, "√ {}", success)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "× {}", e)?;
            Ok(false)
        }
    }
}
