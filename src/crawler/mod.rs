//! Crawler module for link discovery and article extraction
//!
//! This module contains the scraping logic, including:
//! - HTTP fetching
//! - Listing-page parsing and link classification
//! - Seed-page and recursive, resumable link discovery
//! - Article content extraction
//! - Overall run coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod parser;
mod recursive;

#[cfg(test)]
mod test_support;

pub use coordinator::{run_scrape, Coordinator, ScrapeOptions};
pub use extractor::{parse_article_date, ArticleExtractor};
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::discover;
pub use parser::{classify_links, extract_article_links, parse_html, SiteSelectors};
pub use recursive::{RecursiveFrontier, StepOutcome};
