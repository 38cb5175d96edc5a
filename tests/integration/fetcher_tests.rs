//! HTTP fetcher behaviour against a mock server

use crate::common::create_test_config;
use gazeta_scraper::crawler::{Fetcher, HttpFetcher};
use gazeta_scraper::FetchError;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_success() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let config = create_test_config(&server, &dir, 3);
    let fetcher = HttpFetcher::new(&config.site).unwrap();
    let page = fetcher
        .fetch(&format!("{}/news", server.uri()))
        .await
        .unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.body, "<html>ok</html>");
}

#[tokio::test]
async fn test_fetch_non_success_status_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = create_test_config(&server, &dir, 3);
    let fetcher = HttpFetcher::new(&config.site).unwrap();

    let result = fetcher.fetch(&format!("{}/missing", server.uri())).await;
    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));

    let result = fetcher.fetch(&format!("{}/broken", server.uri())).await;
    assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
}

#[tokio::test]
async fn test_fetch_sends_configured_headers() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/news"))
        .and(header("user-agent", "GazetaTest/1.0"))
        .and(header("accept-language", "ru-RU"))
        .respond_with(ResponseTemplate::new(200).set_body_string("with headers"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config(&server, &dir, 3);
    config
        .site
        .headers
        .insert("User-Agent".to_string(), "GazetaTest/1.0".to_string());
    config
        .site
        .headers
        .insert("Accept-Language".to_string(), "ru-RU".to_string());

    let fetcher = HttpFetcher::new(&config.site).unwrap();
    let page = fetcher
        .fetch(&format!("{}/news", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.body, "with headers");
}

#[tokio::test]
async fn test_fetch_decodes_configured_encoding() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // "Привет" in windows-1251
    let body = vec![0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
    Mock::given(method("GET"))
        .and(path("/cp1251"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(&server)
        .await;

    let mut config = create_test_config(&server, &dir, 3);
    config.site.encoding = "windows-1251".to_string();

    let fetcher = HttpFetcher::new(&config.site).unwrap();
    let page = fetcher
        .fetch(&format!("{}/cp1251", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.body, "Привет");
}

#[tokio::test]
async fn test_fetch_times_out() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = create_test_config(&server, &dir, 3);
    config.site.timeout = 1;

    let fetcher = HttpFetcher::new(&config.site).unwrap();
    let result = fetcher.fetch(&format!("{}/slow", server.uri())).await;
    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_fetch_unreachable_host_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 3);
    let fetcher = HttpFetcher::new(&config.site).unwrap();

    let result = fetcher.fetch("http://127.0.0.1:1/news").await;
    assert!(matches!(
        result,
        Err(FetchError::Connect { .. }) | Err(FetchError::Request { .. })
    ));
}
