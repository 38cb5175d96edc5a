//! Scrape coordinator - run orchestration
//!
//! This module drives a run end to end:
//! - Discovering article URLs, from seed pages or with the recursive frontier
//! - Fetching and extracting articles with bounded concurrency
//! - Handing each record to the store
//! - Collecting a report of what was written and skipped

use crate::config::Config;
use crate::crawler::extractor::ArticleExtractor;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::frontier::discover;
use crate::crawler::parser::SiteSelectors;
use crate::crawler::recursive::RecursiveFrontier;
use crate::output::{ArticleStore, FileStore, ScrapeReport};
use crate::state::FrontierStatus;
use crate::storage::{open_state_file, StateStorage};
use crate::url::LinkResolver;
use crate::{ConfigError, ScraperError};
use futures::stream::{self, StreamExt};
use std::path::Path;

/// How a run discovers its articles
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    /// Use the recursive, resumable frontier instead of the seed pages alone
    pub recursive: bool,
    /// Discard any persisted crawl state before starting
    pub fresh: bool,
    /// Overrides `crawler.max-expansion-steps`
    pub max_steps: Option<usize>,
}

impl ScrapeOptions {
    /// Checks the step override against the same bound as `max-expansion-steps`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == Some(0) {
            return Err(ConfigError::Validation(
                "max_steps must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of the discovery phase
struct Discovery {
    urls: Vec<String>,
    status: Option<FrontierStatus>,
    steps: usize,
}

/// Main scrape coordinator
pub struct Coordinator<F = HttpFetcher, S = FileStore> {
    config: Config,
    options: ScrapeOptions,
    fetcher: F,
    store: S,
    resolver: LinkResolver,
    selectors: SiteSelectors,
    extractor: ArticleExtractor,
}

impl Coordinator<HttpFetcher, FileStore> {
    /// Creates a coordinator that fetches over HTTP and writes to the assets directory
    ///
    /// The assets directory is cleared and recreated.
    pub fn new(config: Config, options: ScrapeOptions) -> Result<Self, ScraperError> {
        options.validate()?;
        let fetcher = HttpFetcher::new(&config.site)?;
        let store = FileStore::prepare(Path::new(&config.output.assets_path))?;
        tracing::info!(path = %store.root().display(), "Writing articles to assets directory");
        Self::with_parts(config, options, fetcher, store)
    }
}

impl<F: Fetcher, S: ArticleStore> Coordinator<F, S> {
    /// Creates a coordinator around the given fetcher and store
    pub fn with_parts(
        config: Config,
        options: ScrapeOptions,
        fetcher: F,
        store: S,
    ) -> Result<Self, ScraperError> {
        options.validate()?;
        let resolver = LinkResolver::from_config(&config)?;
        let selectors = SiteSelectors::compile(&config.selectors)?;
        let extractor = ArticleExtractor::new(selectors.clone());

        Ok(Self {
            config,
            options,
            fetcher,
            store,
            resolver,
            selectors,
            extractor,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs discovery followed by extraction of every discovered article
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeReport)` - Discovery succeeded; per-article failures are in the report
    /// * `Err(ScraperError)` - Discovery, state persistence or a store write failed
    pub async fn run(&self) -> Result<ScrapeReport, ScraperError> {
        let start_time = std::time::Instant::now();

        let discovery = self.discover_urls().await?;
        tracing::info!(count = discovery.urls.len(), "Discovered article URLs");

        let mut report = self.process_articles(&discovery.urls).await?;
        report.frontier_status = discovery.status;
        report.expansion_steps = discovery.steps;

        tracing::info!(
            written = report.written,
            failed = report.failed(),
            elapsed = ?start_time.elapsed(),
            "Scrape completed"
        );

        Ok(report)
    }

    async fn discover_urls(&self) -> Result<Discovery, ScraperError> {
        let target = self.config.site.total_articles;

        if !self.options.recursive {
            let urls = discover(
                &self.fetcher,
                &self.resolver,
                &self.selectors.article_link,
                &self.config.site.seed_urls,
                target,
            )
            .await?;
            return Ok(Discovery {
                urls,
                status: None,
                steps: 0,
            });
        }

        let storage = open_state_file(Path::new(&self.config.crawler.state_path));
        if self.options.fresh {
            tracing::info!(path = %storage.path().display(), "Discarding persisted crawl state");
            storage.clear()?;
        }

        let start_url = self
            .config
            .site
            .seed_urls
            .first()
            .map(String::as_str)
            .unwrap_or_default();
        let max_steps = self
            .options
            .max_steps
            .unwrap_or(self.config.crawler.max_expansion_steps);

        let mut frontier = RecursiveFrontier::new(
            &self.fetcher,
            &self.resolver,
            &self.selectors,
            &storage,
            start_url,
            target,
            max_steps,
        )?;
        let status = frontier.expand().await?;
        let steps = frontier.steps();

        Ok(Discovery {
            urls: frontier.into_urls(),
            status: Some(status),
            steps,
        })
    }

    /// Fetches and extracts every URL, writing successes in id order
    ///
    /// Ids are 1-based positions in `urls`. Fetch and extraction failures are
    /// recorded and skipped; store failures abort.
    async fn process_articles(&self, urls: &[String]) -> Result<ScrapeReport, ScraperError> {
        let mut report = ScrapeReport::new(urls.len());
        let fetcher = &self.fetcher;
        let extractor = &self.extractor;

        let mut results = stream::iter(urls.iter().enumerate())
            .map(|(index, url)| async move {
                let id = index + 1;
                let outcome = match fetcher.fetch(url).await {
                    Ok(page) => {
                        if page.url != *url {
                            tracing::debug!(%url, final_url = %page.url, "Article page redirected");
                        }
                        extractor
                            .extract_html(url, id, &page.body)
                            .map_err(ScraperError::from)
                    }
                    Err(e) => Err(ScraperError::from(e)),
                };
                (url, outcome)
            })
            .buffered(self.config.crawler.concurrency.max(1));

        while let Some((url, outcome)) = results.next().await {
            match outcome {
                Ok(article) => {
                    self.store.write_raw(&article)?;
                    self.store.write_meta(&article)?;
                    report.record_written();
                    tracing::debug!(id = article.id, %url, title = %article.title, "Wrote article");
                }
                Err(e) => {
                    tracing::warn!(%url, error = %e, "Skipping article");
                    report.record_failure(url, e);
                }
            }
        }

        Ok(report)
    }
}

/// Runs a complete scrape with the HTTP fetcher and file store
///
/// # Example
///
/// ```no_run
/// use gazeta_scraper::config::load_config;
/// use gazeta_scraper::crawler::{run_scrape, ScrapeOptions};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("scraper.toml"))?;
/// let report = run_scrape(config, ScrapeOptions::default()).await?;
/// println!("wrote {} articles", report.written);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config, options: ScrapeOptions) -> Result<ScrapeReport, ScraperError> {
    let coordinator = Coordinator::new(config, options)?;
    coordinator.run().await
}
