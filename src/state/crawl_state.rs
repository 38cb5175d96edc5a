use crate::{StateError, StateResult};
use serde::{Deserialize, Serialize};

/// The frontier of a recursive crawl, persisted between steps and runs
///
/// # Invariants
///
/// - `urls` holds no duplicates and never exceeds the target count it is
///   filled against
/// - `0 <= cursor <= visited_urls.len()`
///
/// The serialized field names are the on-disk format of the state file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlState {
    /// Index into `visited_urls` of the next listing page to process
    #[serde(rename = "num_visited_urls")]
    pub cursor: usize,

    /// Listing page processed when the cursor is 0
    pub start_url: String,

    /// Discovered article URLs, in first-seen order
    #[serde(rename = "urls")]
    pub discovered_urls: Vec<String>,

    /// Same-site listing pages found so far, in first-seen order
    #[serde(rename = "visited_urls")]
    pub visited_urls: Vec<String>,
}

impl CrawlState {
    /// Creates an empty state that starts from `start_url`
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            ..Self::default()
        }
    }

    /// Checks the cursor invariant
    pub fn validate(&self) -> StateResult<()> {
        if self.cursor > self.visited_urls.len() {
            return Err(StateError::CursorOutOfRange {
                cursor: self.cursor,
                visited: self.visited_urls.len(),
            });
        }
        Ok(())
    }

    /// The listing page the next expansion step processes
    ///
    /// With a cursor of 0 this is the start URL, otherwise
    /// `visited_urls[cursor - 1]`.
    pub fn current_url(&self) -> StateResult<&str> {
        self.validate()?;
        match self.cursor {
            0 => Ok(&self.start_url),
            n => Ok(&self.visited_urls[n - 1]),
        }
    }

    /// Appends an article URL unless it is known or the target is reached
    ///
    /// Returns true if the URL was added.
    pub fn add_article(&mut self, url: &str, target: usize) -> bool {
        if self.discovered_urls.len() >= target || self.has_article(url) {
            return false;
        }
        self.discovered_urls.push(url.to_string());
        true
    }

    /// Appends a listing page unless it is already known
    ///
    /// Returns true if the URL was added.
    pub fn add_listing(&mut self, url: &str) -> bool {
        if self.visited_urls.iter().any(|u| u == url) {
            return false;
        }
        self.visited_urls.push(url.to_string());
        true
    }

    pub fn has_article(&self, url: &str) -> bool {
        self.discovered_urls.iter().any(|u| u == url)
    }

    /// Returns true once `target` articles have been discovered
    pub fn is_complete(&self, target: usize) -> bool {
        self.discovered_urls.len() >= target
    }

    /// Moves the cursor to the next listing page
    ///
    /// Once every known listing page has been processed the cursor wraps to 0,
    /// so the start URL is processed again. Returns true on wrap.
    pub fn advance_cursor(&mut self) -> bool {
        if self.cursor >= self.visited_urls.len() {
            self.cursor = 0;
            true
        } else {
            self.cursor += 1;
            false
        }
    }

    /// Re-establishes the article invariants against `target`
    ///
    /// Drops repeated URLs (keeping the first) and truncates the list to
    /// `target`. Returns the number of URLs removed.
    pub fn reconcile(&mut self, target: usize) -> usize {
        let before = self.discovered_urls.len();

        let mut kept: Vec<String> = Vec::with_capacity(before);
        for url in self.discovered_urls.drain(..) {
            if !kept.contains(&url) {
                kept.push(url);
            }
        }
        kept.truncate(target);
        self.discovered_urls = kept;

        before - self.discovered_urls.len()
    }
}
