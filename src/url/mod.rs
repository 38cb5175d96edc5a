//! URL handling module for Gazeta-Scraper
//!
//! This module turns `href` attributes into absolute URLs against the site
//! origin and classifies anchors found on listing pages.

mod origin;
mod resolve;

pub use origin::same_site;
pub use resolve::{LinkResolver, FALLBACK_SCHEME};

use ::url::Url;

/// What an anchor on a listing page points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// An article page on the target site
    Article(Url),
    /// Another page on the same site as the page being scanned
    Listing(Url),
    /// Anything else: off-site links, non-http schemes, fragments, empty hrefs
    Unrecognized,
}
