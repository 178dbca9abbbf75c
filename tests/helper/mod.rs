//! Shared test utilities

#![allow(dead_code, unused_imports)]

pub mod feed;
pub mod server;

pub use feed::{create_feed, mock_feed};
pub use server::MockServerApi;
