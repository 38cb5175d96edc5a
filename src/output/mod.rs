//! Output module for writing extracted articles
//!
//! This module handles:
//! - The [`ArticleStore`] capability the pipeline hands records to
//! - Writing `<id>_raw.txt` and `<id>_meta.json` files
//! - Preparing the assets directory before a run
//! - Summarizing a run in a [`ScrapeReport`]

mod files;
mod report;
mod traits;

pub use files::{prepare_environment, FileStore};
pub use report::{print_report, ScrapeReport};
pub use traits::{ArticleStore, OutputError, OutputResult};
