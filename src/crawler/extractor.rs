//! Article content extraction
//!
//! Turns a fetched article page into an [`ArticleRecord`]. Title and body are
//! required; author, date and topics fall back to defaults when absent.
//!
//! # Field Rules
//!
//! | Field | Source | When missing |
//! |-------|--------|--------------|
//! | title | text of the title heading | `MissingRequiredField` |
//! | body | text of every paragraph in the body container, as-is, joined with `". "` | `MissingRequiredField` |
//! | author | attribute of the author node | `["NOT FOUND"]` |
//! | date | attribute of the date node | `None` |
//! | topics | `title` of anchors under the topic prefix | empty |

use crate::article::{ArticleRecord, AUTHOR_NOT_FOUND, DATE_FORMAT};
use crate::config::SelectorConfig;
use crate::crawler::parser::{parse_html, SiteSelectors};
use crate::{ConfigError, ExtractError, ExtractResult};
use chrono::NaiveDateTime;
use scraper::Html;

/// Separator placed between paragraphs of the body
const PARAGRAPH_SEPARATOR: &str = ". ";

/// Extracts article records from article pages
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    selectors: SiteSelectors,
}

impl ArticleExtractor {
    pub fn new(selectors: SiteSelectors) -> Self {
        Self { selectors }
    }

    /// Compiles the selectors and builds an extractor
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(SiteSelectors::compile(config)?))
    }

    /// Parses `body` and extracts the article it contains
    pub fn extract_html(&self, url: &str, id: usize, body: &str) -> ExtractResult<ArticleRecord> {
        self.extract(url, id, &parse_html(body))
    }

    /// Extracts the article from a parsed page
    ///
    /// # Errors
    ///
    /// * `MissingRequiredField` - the title or body container is absent
    /// * `DateFormat` - the date attribute is present but malformed
    pub fn extract(&self, url: &str, id: usize, document: &Html) -> ExtractResult<ArticleRecord> {
        let title = self.extract_title(url, document)?;
        let body = self.extract_body(url, document)?;
        let author = self.extract_author(document);
        let published_at = self.extract_date(document)?;
        let topics = self.extract_topics(document);

        tracing::debug!(
            %url,
            id,
            body_len = body.len(),
            topics = topics.len(),
            dated = published_at.is_some(),
            "Extracted article"
        );

        Ok(ArticleRecord {
            id,
            url: url.to_string(),
            title,
            body,
            author,
            published_at,
            topics,
        })
    }

    fn extract_title(&self, url: &str, document: &Html) -> ExtractResult<String> {
        document
            .select(&self.selectors.title)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .ok_or_else(|| ExtractError::MissingRequiredField {
                url: url.to_string(),
                field: "title",
            })
    }

    fn extract_body(&self, url: &str, document: &Html) -> ExtractResult<String> {
        let container = document.select(&self.selectors.body).next().ok_or_else(|| {
            ExtractError::MissingRequiredField {
                url: url.to_string(),
                field: "body",
            }
        })?;

        let paragraphs: Vec<String> = container
            .select(&self.selectors.paragraph)
            .map(|p| p.text().collect::<String>())
            .collect();

        Ok(paragraphs.join(PARAGRAPH_SEPARATOR))
    }

    fn extract_author(&self, document: &Html) -> Vec<String> {
        let author = document
            .select(&self.selectors.author)
            .next()
            .and_then(|element| element.value().attr(&self.selectors.author_attribute))
            .map(str::trim)
            .filter(|name| !name.is_empty());

        match author {
            Some(name) => vec![name.to_string()],
            None => vec![AUTHOR_NOT_FOUND.to_string()],
        }
    }

    fn extract_date(&self, document: &Html) -> ExtractResult<Option<NaiveDateTime>> {
        document
            .select(&self.selectors.date)
            .next()
            .and_then(|element| element.value().attr(&self.selectors.date_attribute))
            .map(parse_article_date)
            .transpose()
    }

    fn extract_topics(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.selectors.anchor)
            .filter(|element| {
                element
                    .value()
                    .attr("href")
                    .is_some_and(|href| href.starts_with(self.selectors.topic_prefix.as_str()))
            })
            .filter_map(|element| element.value().attr("title"))
            .filter(|title| !title.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Parses the site's `datetime` attribute
///
/// The trailing timezone marker (e.g. `MSK`) is stripped, a `T` date/time
/// separator becomes a space and `:00` seconds are appended before parsing with
/// `YYYY-MM-DD HH:MM:SS`.
///
/// # Examples
///
/// ```
/// use gazeta_scraper::crawler::parse_article_date;
///
/// let date = parse_article_date("2023-05-01T10:00MSK").unwrap();
/// assert_eq!(date.to_string(), "2023-05-01 10:00:00");
/// ```
pub fn parse_article_date(raw: &str) -> ExtractResult<NaiveDateTime> {
    let without_zone = raw
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .trim_end();
    let candidate = format!("{}:00", without_zone.replacen('T', " ", 1));

    NaiveDateTime::parse_from_str(&candidate, DATE_FORMAT).map_err(|e| ExtractError::DateFormat {
        raw: raw.to_string(),
        message: e.to_string(),
    })
}
