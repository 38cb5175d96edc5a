//! End-to-end scrapes from the seed pages

use crate::common::{article_page, assets_path, create_test_config, mount_page, read_meta};
use gazeta_scraper::crawler::{run_scrape, ScrapeOptions};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seed_page(ids: &[usize]) -> String {
    let links: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<a class="article-news__title" href="/article/{}">Article {}</a>"#,
                id, id
            )
        })
        .collect();
    format!(
        r#"<html><body>{}<a href="/about">About</a></body></html>"#,
        links
    )
}

#[tokio::test]
async fn test_full_scrape_writes_article_files() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/news", seed_page(&[1, 2])).await;
    mount_page(
        &server,
        "/article/1",
        article_page("First", &["One", "Two"]),
    )
    .await;
    mount_page(&server, "/article/2", article_page("Second", &["Only"])).await;

    let config = create_test_config(&server, &dir, 2);
    let report = run_scrape(config, ScrapeOptions::default())
        .await
        .expect("Scrape failed");

    assert_eq!(report.discovered, 2);
    assert_eq!(report.written, 2);
    assert_eq!(report.failed(), 0);
    assert!(report.frontier_status.is_none());

    let assets = assets_path(&dir);
    let raw = std::fs::read_to_string(assets.join("1_raw.txt")).unwrap();
    assert_eq!(raw, "One. Two");

    let meta = read_meta(&assets, 1);
    assert_eq!(meta["id"], 1);
    assert_eq!(meta["url"], format!("{}/article/1", server.uri()));
    assert_eq!(meta["title"], "First");
    assert_eq!(meta["author"][0], "Ivan Petrov");
    assert_eq!(meta["date"], "2023-05-01 10:00:00");
    assert_eq!(meta["topics"][0], "Economy");
    assert!(meta.get("body").is_none());

    let meta = read_meta(&assets, 2);
    assert_eq!(meta["title"], "Second");
}

#[tokio::test]
async fn test_scrape_stops_at_target_count() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/news", seed_page(&[1, 2, 3, 4])).await;
    mount_page(&server, "/article/1", article_page("A", &["a"])).await;
    mount_page(&server, "/article/2", article_page("B", &["b"])).await;
    Mock::given(method("GET"))
        .and(path("/article/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server, &dir, 2);
    let report = run_scrape(config, ScrapeOptions::default()).await.unwrap();

    assert_eq!(report.discovered, 2);
    assert!(!assets_path(&dir).join("3_raw.txt").exists());
}

#[tokio::test]
async fn test_failed_articles_are_skipped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, "/news", seed_page(&[1, 2, 3])).await;
    mount_page(&server, "/article/1", article_page("A", &["a"])).await;
    // Article 2 is not mounted and answers 404
    mount_page(
        &server,
        "/article/3",
        r#"<html><body><h1 class="article__h1">No body</h1></body></html>"#.to_string(),
    )
    .await;

    let config = create_test_config(&server, &dir, 3);
    let report = run_scrape(config, ScrapeOptions::default()).await.unwrap();

    assert_eq!(report.discovered, 3);
    assert_eq!(report.written, 1);
    assert_eq!(report.failed(), 2);

    let assets = assets_path(&dir);
    assert!(assets.join("1_raw.txt").exists());
    assert!(!assets.join("2_raw.txt").exists());
    assert!(!assets.join("3_meta.json").exists());
}

#[tokio::test]
async fn test_assets_directory_is_recreated() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let assets = assets_path(&dir);
    std::fs::create_dir_all(&assets).unwrap();
    std::fs::write(assets.join("99_raw.txt"), "stale").unwrap();

    mount_page(&server, "/news", seed_page(&[1])).await;
    mount_page(&server, "/article/1", article_page("A", &["a"])).await;

    let config = create_test_config(&server, &dir, 1);
    run_scrape(config, ScrapeOptions::default()).await.unwrap();

    assert!(!assets.join("99_raw.txt").exists());
    assert!(assets.join("1_raw.txt").exists());
}

#[tokio::test]
async fn test_seed_failure_aborts_scrape() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = create_test_config(&server, &dir, 2);
    let result = run_scrape(config, ScrapeOptions::default()).await;

    assert!(matches!(
        result,
        Err(gazeta_scraper::ScraperError::Fetch(
            gazeta_scraper::FetchError::Status { status: 500, .. }
        ))
    ));
}
