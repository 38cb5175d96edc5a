//! Storage module for persisting the crawl frontier
//!
//! The recursive frontier writes its [`CrawlState`](crate::state::CrawlState)
//! after every expansion step so that an interrupted run resumes from the last
//! completed step.

mod json_file;
mod traits;

pub use json_file::JsonStateFile;
pub use traits::StateStorage;

use std::path::Path;

/// Opens the JSON state file at `path`
pub fn open_state_file(path: &Path) -> JsonStateFile {
    JsonStateFile::new(path)
}
