//! Gazeta-Scraper: a resumable news article scraper
//!
//! This crate discovers article links on a news site, either directly from seed
//! listing pages or by walking outward across same-origin listing pages with a
//! persisted, resumable frontier, and extracts each article into a normalized
//! record written to disk.

pub mod article;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Gazeta-Scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Crawl state error: {0}")]
    State(#[from] StateError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Seed URL does not match the http(s):// pattern: {0}")]
    IncorrectSeedUrl(String),

    #[error("Total number of articles must be between 1 and {max}, got {got}")]
    NumberOfArticlesOutOfRange { got: usize, max: usize },

    #[error("Invalid request header: {0}")]
    IncorrectHeaders(String),

    #[error("Invalid encoding: {0}")]
    IncorrectEncoding(String),

    #[error("Timeout must be between {min} and {max} seconds, got {got}")]
    IncorrectTimeout { got: u64, min: u64, max: u64 },

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised by the Fetcher capability
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors raised while turning an article page into a record
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Required field '{field}' not found on {url}")]
    MissingRequiredField { url: String, field: &'static str },

    #[error("Unparseable publication date '{raw}': {message}")]
    DateFormat { raw: String, message: String },
}

/// Errors raised by the frontier state and its persistence
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to persist crawl state to {path}: {message}")]
    Persistence { path: String, message: String },

    #[error("Crawl state cursor {cursor} is past {visited} visited listing pages")]
    CursorOutOfRange { cursor: usize, visited: usize },

    #[error("Crawl state has no start URL and no seed URL was configured")]
    MissingStartUrl,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Gazeta-Scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for crawl state operations
pub type StateResult<T> = std::result::Result<T, StateError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use article::ArticleRecord;
pub use config::Config;
pub use state::{CrawlState, FrontierStatus};
pub use crate::url::{LinkKind, LinkResolver};
