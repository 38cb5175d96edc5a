//! HTML parsing for listing pages
//!
//! This module compiles the site's CSS selectors and scans listing pages for:
//! - Article links marked with the site's article-link class
//! - Every anchor, classified as article, listing or unrecognized

use crate::config::SelectorConfig;
use crate::url::{LinkKind, LinkResolver};
use crate::ConfigError;
use scraper::{Html, Selector};
use url::Url;

/// The site's selectors, compiled once per run
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    pub article_link: Selector,
    pub anchor: Selector,
    pub title: Selector,
    pub body: Selector,
    pub paragraph: Selector,
    pub author: Selector,
    pub author_attribute: String,
    pub date: Selector,
    pub date_attribute: String,
    pub topic_prefix: String,
}

impl SiteSelectors {
    /// Compiles every selector in `config`
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            article_link: compile(&config.article_link)?,
            anchor: compile("a[href]")?,
            title: compile(&config.title)?,
            body: compile(&config.body)?,
            paragraph: compile(&config.paragraph)?,
            author: compile(&config.author)?,
            author_attribute: config.author_attribute.clone(),
            date: compile(&config.date)?,
            date_attribute: config.date_attribute.clone(),
            topic_prefix: config.topic_prefix.clone(),
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Parses a page body into a queryable document
pub fn parse_html(body: &str) -> Html {
    Html::parse_document(body)
}

/// Resolves every anchor matching `selector`, in document order
///
/// Anchors without a usable href are skipped. Duplicates are kept; callers
/// dedupe against their own collections.
pub fn extract_article_links(body: &str, selector: &Selector, resolver: &LinkResolver) -> Vec<Url> {
    let document = parse_html(body);
    document
        .select(selector)
        .filter_map(|element| resolver.resolve(element))
        .collect()
}

/// Classifies every anchor with an href on the listing page `current`
pub fn classify_links(
    body: &str,
    current: &Url,
    selectors: &SiteSelectors,
    resolver: &LinkResolver,
) -> Vec<LinkKind> {
    let document = parse_html(body);
    document
        .select(&selectors.anchor)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| resolver.classify(href, current))
        .collect()
}
