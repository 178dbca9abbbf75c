//! Release channel version checks
//!
//! Decides whether a running version is current for its release channel,
//! either against an expected version or against the latest versions
//! published on a feed, and explains the difference when it is not.
//!
//! ```
//! use channel_check::version::{ChannelSet, match_versions};
//!
//! assert!(match_versions("stable-2.1.0", "stable-2.1.0").is_ok());
//!
//! let latest = ChannelSet::parse_list(["stable-2.1.0", "edge-24.1.1"]).unwrap();
//! let err = latest.matches("stable-2.0.0").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "is running version 2.0.0 but the latest stable version is 2.1.0"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod health;
pub mod logging;
pub mod version;
