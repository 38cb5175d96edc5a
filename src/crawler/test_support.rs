//! In-memory fetcher shared by the crawler unit tests

use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::{FetchError, FetchResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages and records which URLs were requested
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// URLs fetched so far, in request order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(body) => Ok(FetchedPage {
                url: url.to_string(),
                status: 200,
                body: body.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
