//! Integration test: libcurl page fetch against a local HTTP server.

mod common;

use common::page_server::{self, Reply};
use tikgrab_core::config::FetchConfig;
use tikgrab_core::fetch_page::{fetch_page, fetch_page_blocking, FetchError};

#[test]
fn fetch_sends_browser_headers_and_reads_body() {
    let server = page_server::start(vec![("/page", Reply::ok("<html>hello</html>"))]);
    let page = fetch_page_blocking(&server.url("/page"), &FetchConfig::default()).unwrap();
    assert_eq!(page.as_str(), "<html>hello</html>");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let head = &requests[0];
    assert!(head.starts_with("GET /page HTTP/1.1"), "{head}");
    assert!(
        head.contains("User-Agent: Mozilla/5.0 (Windows NT 10.0; Win64; x64)\r\n"),
        "{head}"
    );
    assert!(head.contains("Accept-Language: en-US,en;q=0.9\r\n"), "{head}");
}

#[test]
fn fetch_uses_configured_headers() {
    let server = page_server::start(vec![("/page", Reply::ok("x"))]);
    let cfg = FetchConfig {
        user_agent: "custom-agent/1.0".to_string(),
        accept_language: "de-DE".to_string(),
        ..FetchConfig::default()
    };
    fetch_page_blocking(&server.url("/page"), &cfg).unwrap();
    let requests = server.requests();
    let head = &requests[0];
    assert!(head.contains("User-Agent: custom-agent/1.0\r\n"), "{head}");
    assert!(head.contains("Accept-Language: de-DE\r\n"), "{head}");
}

#[test]
fn non_success_status_is_status_error() {
    let server = page_server::start(vec![("/blocked", Reply::status(503))]);
    let err = fetch_page_blocking(&server.url("/blocked"), &FetchConfig::default()).unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 503 }), "{err:?}");
    assert!(err.is_upstream_failure());

    let err = fetch_page_blocking(&server.url("/missing"), &FetchConfig::default()).unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404 }), "{err:?}");
}

#[test]
fn redirects_are_followed() {
    let server = page_server::start(vec![
        (
            "/short",
            Reply::Redirect {
                location: "/@user/video/1".to_string(),
            },
        ),
        ("/@user/video/1", Reply::ok("final page")),
    ]);
    let page = fetch_page_blocking(&server.url("/short"), &FetchConfig::default()).unwrap();
    assert_eq!(page.as_str(), "final page");
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn truncated_body_is_interrupted() {
    let server = page_server::start(vec![(
        "/cut",
        Reply::Truncated {
            body: "<html>partial".to_string(),
            declared_len: 4096,
        },
    )]);
    let err = fetch_page_blocking(&server.url("/cut"), &FetchConfig::default()).unwrap_err();
    assert!(
        matches!(err, FetchError::Interrupted { status: 200, .. }),
        "{err:?}"
    );
}

#[test]
fn refused_connection_is_transport_error() {
    let err = fetch_page_blocking(&page_server::refused_url(), &FetchConfig::default()).unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    assert!(!err.is_upstream_failure());
}

#[tokio::test]
async fn async_fetch_runs_on_blocking_pool() {
    let server = page_server::start(vec![("/page", Reply::ok("async body"))]);
    let page = fetch_page(&server.url("/page"), &FetchConfig::default())
        .await
        .unwrap();
    assert_eq!(page.as_str(), "async body");
}
