//! Client/server version health checks
//!
//! # Modules
//!
//! - [`version`]: Queries a server for its release version and compares it
//!   with the version the client expects
//! - [`error`]: Errors raised while querying the server

pub mod error;
pub mod version;
