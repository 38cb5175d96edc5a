//! Recursive, resumable link discovery
//!
//! When listing pages do not expose enough article links directly, the
//! frontier walks outward from a start page across same-site listing pages.
//!
//! # Expansion Step
//!
//! 1. Pick the current listing page: the start URL when the cursor is 0,
//!    otherwise `visited_urls[cursor - 1]`
//! 2. Fetch it and classify every anchor
//!    - article links are added to the discovered list (deduplicated, capped)
//!    - same-site listing links are appended to the visited list
//! 3. If the target is not reached, advance the cursor (wrapping to the start
//!    URL once every listing page has been processed)
//! 4. Persist the state
//!
//! Steps run strictly one after another and each persists before the next
//! begins, so an interrupted run loses at most the step in flight. The total
//! number of steps per run is bounded.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{classify_links, SiteSelectors};
use crate::state::{CrawlState, FrontierStatus};
use crate::storage::StateStorage;
use crate::url::{LinkKind, LinkResolver};
use crate::{StateError, StateResult, UrlError};
use url::Url;

/// Counts of what a single expansion step added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub articles_added: usize,
    pub listings_added: usize,
    /// True when the cursor wrapped back to the start URL
    pub wrapped: bool,
}

/// The recursive frontier over a persisted [`CrawlState`]
pub struct RecursiveFrontier<'a, F, S> {
    fetcher: &'a F,
    resolver: &'a LinkResolver,
    selectors: &'a SiteSelectors,
    storage: &'a S,
    state: CrawlState,
    status: FrontierStatus,
    target: usize,
    max_steps: usize,
    steps: usize,
}

impl<'a, F: Fetcher, S: StateStorage> RecursiveFrontier<'a, F, S> {
    /// Loads the persisted state (or starts from `start_url`) and checks it
    ///
    /// Repeated or surplus discovered URLs in a loaded state are dropped. A
    /// cursor that points past the visited listing pages is an error.
    ///
    /// # Arguments
    ///
    /// * `start_url` - Listing page used when no state was persisted
    /// * `target` - Number of article URLs to discover
    /// * `max_steps` - Bound on expansion steps for this run
    pub fn new(
        fetcher: &'a F,
        resolver: &'a LinkResolver,
        selectors: &'a SiteSelectors,
        storage: &'a S,
        start_url: &str,
        target: usize,
        max_steps: usize,
    ) -> StateResult<Self> {
        let mut state = match storage.load() {
            Some(state) => state,
            None => CrawlState::new(start_url),
        };

        if state.start_url.is_empty() {
            if start_url.is_empty() {
                return Err(StateError::MissingStartUrl);
            }
            state.start_url = start_url.to_string();
        }

        let removed = state.reconcile(target);
        if removed > 0 {
            tracing::warn!(removed, target, "Dropped repeated or surplus URLs from loaded state");
        }

        state.validate()?;

        Ok(Self {
            fetcher,
            resolver,
            selectors,
            storage,
            state,
            status: FrontierStatus::Idle,
            target,
            max_steps,
            steps: 0,
        })
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn status(&self) -> FrontierStatus {
        self.status
    }

    /// Expansion steps run so far in this run
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Consumes the frontier, returning the discovered article URLs
    pub fn into_urls(self) -> Vec<String> {
        self.state.discovered_urls
    }

    /// Runs expansion steps until the target is reached or the step bound hit
    ///
    /// # Errors
    ///
    /// A failed listing-page fetch or state write stops expansion. The last
    /// persisted state remains the resume point.
    pub async fn expand(&mut self) -> crate::Result<FrontierStatus> {
        while !self.status.is_terminal() {
            if self.state.is_complete(self.target) {
                self.status = FrontierStatus::Done;
            } else if self.steps >= self.max_steps {
                tracing::warn!(
                    steps = self.steps,
                    discovered = self.state.discovered_urls.len(),
                    target = self.target,
                    "Expansion step limit reached"
                );
                self.status = FrontierStatus::StepLimitReached;
            } else {
                self.step().await?;
            }
        }

        tracing::info!(
            status = %self.status,
            steps = self.steps,
            discovered = self.state.discovered_urls.len(),
            visited = self.state.visited_urls.len(),
            "Frontier expansion finished"
        );

        Ok(self.status)
    }

    /// Runs a single expansion step and persists the result
    pub async fn step(&mut self) -> crate::Result<StepOutcome> {
        self.status = FrontierStatus::Expanding;

        let current_str = self.state.current_url()?.to_string();
        let current =
            Url::parse(&current_str).map_err(|e| UrlError::Parse(format!("{}: {}", current_str, e)))?;

        tracing::debug!(cursor = self.state.cursor, url = %current, "Expanding listing page");

        let page = self.fetcher.fetch(current.as_str()).await?;
        let links = classify_links(&page.body, &current, self.selectors, self.resolver);

        let mut outcome = StepOutcome::default();
        for link in links {
            match link {
                LinkKind::Article(url) => {
                    if self.state.add_article(url.as_str(), self.target) {
                        outcome.articles_added += 1;
                    }
                }
                LinkKind::Listing(url) => {
                    if self.state.add_listing(url.as_str()) {
                        outcome.listings_added += 1;
                    }
                }
                LinkKind::Unrecognized => {}
            }
        }

        self.steps += 1;

        if self.state.is_complete(self.target) {
            self.status = FrontierStatus::Done;
        } else {
            outcome.wrapped = self.state.advance_cursor();
            if outcome.wrapped {
                tracing::debug!("All listing pages processed, returning to start URL");
            }
        }

        self.storage.save(&self.state)?;

        tracing::info!(
            step = self.steps,
            url = %current,
            articles_added = outcome.articles_added,
            listings_added = outcome.listings_added,
            discovered = self.state.discovered_urls.len(),
            target = self.target,
            "Expansion step complete"
        );

        Ok(outcome)
    }
}
