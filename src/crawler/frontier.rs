//! Seed-page link discovery
//!
//! The non-recursive frontier: each seed listing page is fetched once and the
//! anchors carrying the site's article-link marker are collected, in document
//! order, until the target count is reached.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::extract_article_links;
use crate::url::LinkResolver;
use crate::FetchResult;
use scraper::Selector;

/// Collects up to `target` distinct article URLs from the seed pages
///
/// Seeds are scanned in order and scanning stops as soon as the cap is hit.
///
/// # Errors
///
/// A failed fetch of any seed is returned as-is; nothing is retried.
pub async fn discover<F: Fetcher>(
    fetcher: &F,
    resolver: &LinkResolver,
    article_link: &Selector,
    seed_urls: &[String],
    target: usize,
) -> FetchResult<Vec<String>> {
    let mut urls: Vec<String> = Vec::new();

    for seed in seed_urls {
        if urls.len() >= target {
            break;
        }

        let page = fetcher.fetch(seed).await?;
        let found = extract_article_links(&page.body, article_link, resolver);
        let before = urls.len();

        for url in found {
            if urls.len() >= target {
                break;
            }
            let url = url.to_string();
            if !urls.contains(&url) {
                urls.push(url);
            }
        }

        tracing::info!(
            seed = %seed,
            added = urls.len() - before,
            total = urls.len(),
            target,
            "Scanned seed page"
        );
    }

    Ok(urls)
}
