//! Storage trait for the crawl state

use crate::state::CrawlState;
use crate::StateResult;

/// Durable home of a [`CrawlState`]
///
/// Reads are forgiving: a missing or unreadable state yields `None` and the
/// caller starts from defaults. Writes are not: a failed save must surface as
/// [`StateError::Persistence`](crate::StateError::Persistence).
pub trait StateStorage {
    /// Loads the persisted state, if there is a usable one
    fn load(&self) -> Option<CrawlState>;

    /// Persists `state`, replacing whatever was stored before
    fn save(&self, state: &CrawlState) -> StateResult<()>;

    /// Forgets any persisted state
    fn clear(&self) -> StateResult<()>;
}
