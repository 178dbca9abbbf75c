//! Version feed test utilities

use mockito::{Matcher, Mock, Server};

use channel_check::config::DEFAULT_FETCH_TIMEOUT;
use channel_check::version::feed::HttpVersionFeed;

/// Serve `body` as the latest-versions feed for requests from `current_version`
pub async fn mock_feed(
    server: &mut Server,
    current_version: &str,
    status: usize,
    body: &str,
) -> Mock {
    server
        .mock("GET", "/version.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("version".into(), current_version.into()),
            Matcher::UrlEncoded("uuid".into(), "test-uuid".into()),
            Matcher::UrlEncoded("source".into(), "test".into()),
        ]))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Create a feed client pointing at the mock server
pub fn create_feed(server: &Server) -> HttpVersionFeed {
    HttpVersionFeed::new(&format!("{}/version.json", server.url()), DEFAULT_FETCH_TIMEOUT)
        .unwrap()
}
