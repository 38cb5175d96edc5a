//! State module for tracking discovery progress
//!
//! # Components
//!
//! - `CrawlState`: the persisted frontier (discovered articles, visited listing
//!   pages and the resume cursor)
//! - `FrontierStatus`: where a recursive expansion currently stands

mod crawl_state;
mod frontier_status;

// Re-export main types
pub use crawl_state::CrawlState;
pub use frontier_status::FrontierStatus;
