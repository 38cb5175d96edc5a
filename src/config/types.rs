use serde::Deserialize;
use std::collections::BTreeMap;

/// Largest number of articles a single run may collect
pub const NUM_ARTICLES_UPPER_LIMIT: usize = 150;

/// Smallest accepted request timeout, in seconds
pub const TIMEOUT_LOWER_LIMIT: u64 = 0;

/// Largest accepted request timeout, in seconds
pub const TIMEOUT_UPPER_LIMIT: u64 = 60;

/// Main configuration structure for Gazeta-Scraper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl Config {
    /// Builds a configuration for `site` with every other section defaulted
    pub fn new(site: SiteConfig) -> Self {
        Self {
            site,
            crawler: CrawlerConfig::default(),
            output: OutputConfig::default(),
            selectors: SelectorConfig::default(),
        }
    }
}

/// Target site and request settings
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Listing pages to start discovery from
    #[serde(rename = "seed-urls")]
    pub seed_urls: Vec<String>,

    /// Number of article URLs to collect (1..=150)
    #[serde(rename = "total-articles")]
    pub total_articles: usize,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Charset used to decode responses that do not declare one
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Overall request timeout in seconds; 0 disables it
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether TLS certificates are verified
    #[serde(rename = "should-verify-certificate", default = "default_true")]
    pub should_verify_certificate: bool,

    /// Accepted for compatibility with existing config files; pages are never rendered
    #[serde(rename = "headless-mode", default)]
    pub headless_mode: bool,

    /// Origin that relative article links are resolved against
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

/// Link discovery behavior
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Hard bound on recursive expansion steps per run
    #[serde(rename = "max-expansion-steps", default = "default_max_expansion_steps")]
    pub max_expansion_steps: usize,

    /// Number of articles fetched and extracted at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Paths on the site that identify an article page
    #[serde(
        rename = "article-path-prefixes",
        default = "default_article_path_prefixes"
    )]
    pub article_path_prefixes: Vec<String>,

    /// Location of the persisted frontier state
    #[serde(rename = "state-path", default = "default_state_path")]
    pub state_path: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_expansion_steps: default_max_expansion_steps(),
            concurrency: default_concurrency(),
            article_path_prefixes: default_article_path_prefixes(),
            state_path: default_state_path(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `<id>_raw.txt` and `<id>_meta.json` files
    #[serde(rename = "assets-path", default = "default_assets_path")]
    pub assets_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            assets_path: default_assets_path(),
        }
    }
}

/// CSS selectors describing where article fields live on the site
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    #[serde(rename = "article-link")]
    pub article_link: String,
    pub title: String,
    pub body: String,
    pub paragraph: String,
    pub author: String,
    #[serde(rename = "author-attribute")]
    pub author_attribute: String,
    pub date: String,
    #[serde(rename = "date-attribute")]
    pub date_attribute: String,
    #[serde(rename = "topic-prefix")]
    pub topic_prefix: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            article_link: "a.article-news__title".to_string(),
            title: "h1.article__h1".to_string(),
            body: "div.articleBody".to_string(),
            paragraph: "p".to_string(),
            author: "div.article-copyright__author".to_string(),
            author_attribute: "content".to_string(),
            date: "time.article__date".to_string(),
            date_attribute: "datetime".to_string(),
            topic_prefix: "/category/".to_string(),
        }
    }
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://www.business-gazeta.ru/".to_string()
}

fn default_max_expansion_steps() -> usize {
    100
}

fn default_concurrency() -> usize {
    4
}

fn default_article_path_prefixes() -> Vec<String> {
    vec!["/article/".to_string(), "/news/".to_string()]
}

fn default_state_path() -> String {
    "crawler_data.json".to_string()
}

fn default_assets_path() -> String {
    "tmp/articles".to_string()
}
