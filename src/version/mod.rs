//! Release channel version model and matching
//!
//! Versions are `<channel>-<version>` strings such as `stable-2.1.0` or
//! `edge-24.1.1`. A version is only ever compared with versions of the same
//! channel.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Feed     │────▶│ ChannelSet  │────▶│   Matcher   │
//! │   (fetch)   │     │  (latest)   │     │  (compare)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────────────────────┐
//!                     │       ChannelVersion        │
//!                     │       (parse/format)        │
//!                     └─────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`channel`]: `ChannelVersion` parsing and formatting
//! - [`matcher`]: Comparison of an expected and an actual version
//! - [`channels`]: `ChannelSet`, the latest version of each channel
//! - [`current`]: Version of the running binary
//! - [`feed`]: HTTP client for the latest-versions feed
//! - [`error`]: Parse, mismatch and feed errors

pub mod channel;
pub mod channels;
pub mod current;
pub mod error;
pub mod feed;
pub mod matcher;

pub use channel::ChannelVersion;
pub use channels::ChannelSet;
pub use current::RunningVersion;
pub use error::{FeedError, MismatchError, ParseError, Side};
pub use matcher::match_versions;
