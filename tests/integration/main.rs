//! Integration tests for the scraper
//!
//! These tests use wiremock to stand in for the news site and run the
//! fetcher and the full scrape pipeline against it.

mod fetcher_tests;
mod recursive_tests;
mod scrape_tests;
