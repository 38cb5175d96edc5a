//! Recursive discovery with a persisted crawl state

use crate::common::{article_page, assets_path, create_test_config, mount_page, state_path};
use gazeta_scraper::crawler::{run_scrape, ScrapeOptions};
use gazeta_scraper::storage::{open_state_file, StateStorage};
use gazeta_scraper::{CrawlState, FrontierStatus};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn recursive() -> ScrapeOptions {
    ScrapeOptions {
        recursive: true,
        ..ScrapeOptions::default()
    }
}

/// A three-level site: the start page links one article and `/rubric/a`,
/// which links another article and `/rubric/b`, which links a third.
async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        "/news",
        r#"<a href="/article/1">1</a><a href="/rubric/a">Rubric A</a>"#.to_string(),
    )
    .await;
    mount_page(
        server,
        "/rubric/a",
        r#"<a href="/article/2">2</a><a href="/rubric/b">Rubric B</a><a href="https://vk.com/x">VK</a>"#
            .to_string(),
    )
    .await;
    mount_page(
        server,
        "/rubric/b",
        r#"<a href="/article/3">3</a><a href="/article/1">1 again</a>"#.to_string(),
    )
    .await;

    for id in 1..=3 {
        mount_page(
            server,
            &format!("/article/{}", id),
            article_page(&format!("Article {}", id), &["text"]),
        )
        .await;
    }
}

#[tokio::test]
async fn test_recursive_scrape_walks_listing_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_site(&server).await;

    let config = create_test_config(&server, &dir, 3);
    let report = run_scrape(config, recursive()).await.unwrap();

    assert_eq!(report.frontier_status, Some(FrontierStatus::Done));
    assert_eq!(report.expansion_steps, 3);
    assert_eq!(report.written, 3);

    let state = open_state_file(&state_path(&dir)).load().unwrap();
    assert_eq!(
        state.discovered_urls,
        (1..=3)
            .map(|id| format!("{}/article/{}", server.uri(), id))
            .collect::<Vec<_>>()
    );

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(state_path(&dir)).unwrap()).unwrap();
    assert!(raw.get("num_visited_urls").is_some());
    assert!(raw.get("start_url").is_some());
    assert_eq!(raw["urls"].as_array().unwrap().len(), 3);
    assert_eq!(raw["visited_urls"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_step_limited_run_resumes() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_site(&server).await;

    let config = create_test_config(&server, &dir, 3);
    let first = run_scrape(
        config.clone(),
        ScrapeOptions {
            max_steps: Some(1),
            ..recursive()
        },
    )
    .await
    .unwrap();

    assert_eq!(first.frontier_status, Some(FrontierStatus::StepLimitReached));
    assert_eq!(first.discovered, 1);
    assert_eq!(first.written, 1);

    let second = run_scrape(config, recursive()).await.unwrap();

    assert_eq!(second.frontier_status, Some(FrontierStatus::Done));
    assert_eq!(second.expansion_steps, 2);
    assert_eq!(second.discovered, 3);
    assert!(assets_path(&dir).join("3_meta.json").exists());
}

#[tokio::test]
async fn test_resume_skips_processed_listing_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_page(&server, "/rubric/a", r#"<a href="/article/2">2</a>"#.to_string()).await;
    mount_page(&server, "/article/1", article_page("One", &["1"])).await;
    mount_page(&server, "/article/2", article_page("Two", &["2"])).await;

    let saved = CrawlState {
        cursor: 1,
        start_url: format!("{}/news", uri),
        discovered_urls: vec![format!("{}/article/1", uri)],
        visited_urls: vec![format!("{}/rubric/a", uri)],
    };
    open_state_file(&state_path(&dir)).save(&saved).unwrap();

    let config = create_test_config(&server, &dir, 2);
    let report = run_scrape(config, recursive()).await.unwrap();

    assert_eq!(report.frontier_status, Some(FrontierStatus::Done));
    assert_eq!(report.expansion_steps, 1);
    assert_eq!(report.written, 2);
}

#[tokio::test]
async fn test_fresh_ignores_saved_state() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_site(&server).await;

    let mut saved = CrawlState::new(format!("{}/news", server.uri()));
    saved.discovered_urls = vec![format!("{}/article/404", server.uri())];
    open_state_file(&state_path(&dir)).save(&saved).unwrap();

    let config = create_test_config(&server, &dir, 1);
    let report = run_scrape(
        config,
        ScrapeOptions {
            fresh: true,
            ..recursive()
        },
    )
    .await
    .unwrap();

    assert_eq!(report.written, 1);
    let state = open_state_file(&state_path(&dir)).load().unwrap();
    assert_eq!(
        state.discovered_urls,
        vec![format!("{}/article/1", server.uri())]
    );
}

#[tokio::test]
async fn test_corrupt_state_starts_over() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_site(&server).await;

    std::fs::write(state_path(&dir), "{ not json").unwrap();

    let config = create_test_config(&server, &dir, 2);
    let report = run_scrape(config, recursive()).await.unwrap();

    assert_eq!(report.frontier_status, Some(FrontierStatus::Done));
    assert_eq!(report.written, 2);
}

#[tokio::test]
async fn test_inconsistent_state_fails_loudly() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_site(&server).await;

    let saved = CrawlState {
        cursor: 5,
        start_url: format!("{}/news", server.uri()),
        discovered_urls: vec![],
        visited_urls: vec![format!("{}/rubric/a", server.uri())],
    };
    open_state_file(&state_path(&dir)).save(&saved).unwrap();

    let config = create_test_config(&server, &dir, 2);
    let result = run_scrape(config, recursive()).await;

    assert!(matches!(
        result,
        Err(gazeta_scraper::ScraperError::State(
            gazeta_scraper::StateError::CursorOutOfRange { cursor: 5, visited: 1 }
        ))
    ));
}
