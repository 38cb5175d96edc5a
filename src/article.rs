//! The normalized article record produced by extraction.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// Author value used when the page does not name one
pub const AUTHOR_NOT_FOUND: &str = "NOT FOUND";

/// Format used for publication dates, both when parsing and when writing metadata
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An article extracted from a single page.
///
/// Records are built once by the extractor and not modified afterwards. The
/// serialized form is what ends up in `<id>_meta.json`; the body is written
/// separately as raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    /// 1-based position of the URL in the discovered list
    pub id: usize,
    pub url: String,
    pub title: String,
    #[serde(skip)]
    pub body: String,
    /// Never empty; `["NOT FOUND"]` when the page has no author
    pub author: Vec<String>,
    #[serde(rename = "date", serialize_with = "serialize_date")]
    pub published_at: Option<NaiveDateTime>,
    /// Document order, duplicates kept
    pub topics: Vec<String>,
}

impl ArticleRecord {
    /// Returns true if the page did not name an author
    pub fn author_missing(&self) -> bool {
        self.author.len() == 1 && self.author[0] == AUTHOR_NOT_FOUND
    }
}

fn serialize_date<S>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}
